use std::io;
use std::path::Path;

use tracing::info;

use crate::artifacts::{Artifact, Cleanup, probe, relocate_workspace};
use crate::config::{CommandConfig, MakeLigParamConfig};
use crate::error::Result;
use crate::runner::{RunRecord, UniDesignRunner};

use super::JobOptions;

/// Executes `MakeLigParamAndTopo`.
///
/// Unlike the prefix-keyed commands, the expected outputs here are the
/// caller-chosen `--lig_param`/`--lig_topo` filenames from the
/// configuration.
pub struct LigandParamJob<'a> {
    runner: &'a UniDesignRunner,
    config: MakeLigParamConfig,
}

#[derive(Debug)]
pub struct LigandParamResult {
    pub run: RunRecord,
    pub parameter_file: Option<Artifact>,
    pub topology_file: Option<Artifact>,
    cleanup: Cleanup,
}

impl LigandParamResult {
    pub fn workspace(&self) -> &Path {
        &self.run.workdir
    }

    /// Deletes the retained directory. Idempotent.
    pub fn close(&mut self) -> io::Result<()> {
        self.cleanup.run()
    }
}

impl<'a> LigandParamJob<'a> {
    pub fn new(runner: &'a UniDesignRunner, config: MakeLigParamConfig) -> Self {
        Self { runner, config }
    }

    pub fn run(&self, options: &JobOptions) -> Result<LigandParamResult> {
        let args = self.config.to_cli_args()?;
        let mut run = self.runner.run_with(&args, &options.run_options())?;

        let expected = vec![
            self.config.ligand_parameter_path.clone(),
            self.config.ligand_topology_path.clone(),
        ];
        let (workdir, cleanup) =
            relocate_workspace(&run.workdir, &expected, options.keep_workspace)?;
        run.workdir = workdir;

        let parameter_file = probe(&run.workdir, &self.config.ligand_parameter_path);
        let topology_file = probe(&run.workdir, &self.config.ligand_topology_path);
        info!(prefix = %run.prefix, "MakeLigParamAndTopo job complete");
        Ok(LigandParamResult {
            run,
            parameter_file,
            topology_file,
            cleanup,
        })
    }
}
