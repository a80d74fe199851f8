use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::artifacts::{Artifact, Cleanup, probe, relocate_workspace};
use crate::config::{CommandConfig, ComputeBindingConfig, ComputeStabilityConfig};
use crate::error::Result;
use crate::runner::{RunRecord, UniDesignRunner};

use super::JobOptions;

/// Executes `ComputeStability`.
pub struct StabilityJob<'a> {
    runner: &'a UniDesignRunner,
    config: ComputeStabilityConfig,
}

#[derive(Debug)]
pub struct StabilityResult {
    pub run: RunRecord,
    pub rotamer_list: Option<Artifact>,
    cleanup: Cleanup,
}

impl StabilityResult {
    pub fn workspace(&self) -> &Path {
        &self.run.workdir
    }

    /// Deletes the retained directory. Idempotent.
    pub fn close(&mut self) -> io::Result<()> {
        self.cleanup.run()
    }
}

impl<'a> StabilityJob<'a> {
    pub fn new(runner: &'a UniDesignRunner, config: ComputeStabilityConfig) -> Self {
        Self { runner, config }
    }

    pub fn run(&self, options: &JobOptions) -> Result<StabilityResult> {
        let args = self.config.to_cli_args()?;
        let mut run = self.runner.run_with(&args, &options.run_options())?;

        let rotlist = PathBuf::from(format!("{}_rotlist.txt", run.prefix));
        let (workdir, cleanup) =
            relocate_workspace(&run.workdir, std::slice::from_ref(&rotlist), options.keep_workspace)?;
        run.workdir = workdir;

        let rotamer_list = probe(&run.workdir, &rotlist);
        info!(prefix = %run.prefix, "ComputeStability job complete");
        Ok(StabilityResult {
            run,
            rotamer_list,
            cleanup,
        })
    }
}

/// Executes `ComputeBinding`. The command reports through stdout and writes
/// no extra files, so the result carries no artifact handles.
pub struct BindingJob<'a> {
    runner: &'a UniDesignRunner,
    config: ComputeBindingConfig,
}

#[derive(Debug)]
pub struct BindingResult {
    pub run: RunRecord,
    cleanup: Cleanup,
}

impl BindingResult {
    pub fn workspace(&self) -> &Path {
        &self.run.workdir
    }

    /// Deletes the retained directory. Idempotent.
    pub fn close(&mut self) -> io::Result<()> {
        self.cleanup.run()
    }
}

impl<'a> BindingJob<'a> {
    pub fn new(runner: &'a UniDesignRunner, config: ComputeBindingConfig) -> Self {
        Self { runner, config }
    }

    pub fn run(&self, options: &JobOptions) -> Result<BindingResult> {
        let args = self.config.to_cli_args()?;
        let mut run = self.runner.run_with(&args, &options.run_options())?;

        let (workdir, cleanup) = relocate_workspace(&run.workdir, &[], options.keep_workspace)?;
        run.workdir = workdir;

        info!(prefix = %run.prefix, "ComputeBinding job complete");
        Ok(BindingResult { run, cleanup })
    }
}
