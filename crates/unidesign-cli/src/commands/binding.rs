use tracing::info;
use unidesign::{BindingJob, ComputeBindingConfig, UniDesignRunner};

use crate::cli::BindingArgs;
use crate::error::{CliError, Result};

pub fn run(args: BindingArgs) -> Result<()> {
    let mut config = ComputeBindingConfig::new(&args.pdb);
    if let Some(split) = &args.split {
        let Some((part1, part2)) = split.split_once(',') else {
            return Err(CliError::Argument(format!(
                "Invalid --split format: '{split}'. Expected two comma-separated groups, e.g. AB,C."
            )));
        };
        config = config.with_split_chains(part1, part2)?;
    }

    let install = super::installation(&args.run)?;
    let runner = UniDesignRunner::new(&install);
    let options = super::job_options(&args.run)?;

    info!("Starting ComputeBinding run for {:?}", args.pdb);
    let mut result = BindingJob::new(&runner, config).run(&options)?;

    // ComputeBinding reports through stdout only.
    if !result.run.stdout.is_empty() {
        print!("{}", result.run.stdout);
    }
    let entries = super::collect_artifacts(&[], args.run.out.as_deref())?;
    if args.run.out.is_some() {
        result.close()?;
    }
    super::print_summary("ComputeBinding", &result.run, entries, &args.run)
}
