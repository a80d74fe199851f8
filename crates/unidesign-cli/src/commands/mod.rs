pub mod binding;
pub mod design;
pub mod ligand;
pub mod stability;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use tracing::info;
use unidesign::{Artifact, Installation, JobOptions, RunRecord};

use crate::cli::RunArgs;
use crate::error::{CliError, Result};

pub(crate) fn installation(args: &RunArgs) -> Result<Installation> {
    let install = match &args.home {
        Some(root) => Installation::discover(root)?,
        None => Installation::from_env()?,
    };
    info!("Using UniDesign binary at {:?}", install.binary());
    Ok(install)
}

pub(crate) fn job_options(args: &RunArgs) -> Result<JobOptions> {
    Ok(JobOptions {
        keep_workspace: args.keep_workspace,
        env: parse_env_pairs(&args.env)?,
        timeout: args.timeout.map(Duration::from_secs),
    })
}

fn parse_env_pairs(pairs: &[String]) -> Result<HashMap<String, String>> {
    let mut env = HashMap::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(CliError::Argument(format!(
                "Invalid --env format: '{pair}'. Expected KEY=VALUE."
            )));
        };
        env.insert(key.to_string(), value.to_string());
    }
    Ok(env)
}

#[derive(Serialize)]
pub(crate) struct ArtifactSummary {
    name: &'static str,
    path: PathBuf,
}

#[derive(Serialize)]
struct RunSummary<'a> {
    command: &'static str,
    exit_code: Option<i32>,
    prefix: &'a str,
    /// Retained directory, absent when artifacts were exported to `--out`.
    workspace: Option<&'a Path>,
    artifacts: Vec<ArtifactSummary>,
}

/// Gathers the produced artifacts, exporting them into `--out` when given.
/// Returns the entries to report.
pub(crate) fn collect_artifacts(
    named: &[(&'static str, Option<&Artifact>)],
    out: Option<&Path>,
) -> Result<Vec<ArtifactSummary>> {
    let mut entries = Vec::new();
    for (name, artifact) in named {
        let Some(artifact) = artifact else { continue };
        let path = match out {
            Some(out) => artifact.copy_into(out)?,
            None => artifact.path().to_path_buf(),
        };
        entries.push(ArtifactSummary { name, path });
    }
    Ok(entries)
}

/// Prints the run outcome. With `--out` the retained workspace was already
/// closed, so it is omitted from the report.
pub(crate) fn print_summary(
    command: &'static str,
    run: &RunRecord,
    entries: Vec<ArtifactSummary>,
    args: &RunArgs,
) -> Result<()> {
    let workspace = args.out.is_none().then(|| run.workdir.as_path());

    if args.json {
        let summary = RunSummary {
            command,
            exit_code: run.exit_code,
            prefix: &run.prefix,
            workspace,
            artifacts: entries,
        };
        let rendered = serde_json::to_string_pretty(&summary)
            .map_err(|e| CliError::Other(e.into()))?;
        println!("{rendered}");
        return Ok(());
    }

    match run.exit_code {
        Some(code) => println!("{command} finished with exit code {code}"),
        None => println!("{command} was terminated by a signal"),
    }
    if !run.success() && !run.stderr.is_empty() {
        eprintln!("{}", run.stderr.trim_end());
    }
    for entry in &entries {
        println!("  {:<24} {}", entry.name, entry.path.display());
    }
    if let Some(workspace) = workspace {
        println!("Retained directory: {}", workspace.display());
    }
    Ok(())
}
