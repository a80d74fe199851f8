use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::artifacts::{Artifact, Cleanup, probe, relocate_workspace};
use crate::config::{CommandConfig, ProteinDesignConfig};
use crate::error::Result;
use crate::runner::{RunRecord, UniDesignRunner};

use super::JobOptions;

/// Executes `ProteinDesign` and exposes its outputs as typed artifacts.
pub struct ProteinDesignJob<'a> {
    runner: &'a UniDesignRunner,
    config: ProteinDesignConfig,
}

/// Result bundle for one `ProteinDesign` run. Every artifact is optional:
/// which files appear depends on the design mode and flags.
#[derive(Debug)]
pub struct ProteinDesignResult {
    pub run: RunRecord,
    pub self_energy: Option<Artifact>,
    pub rotamer_list: Option<Artifact>,
    pub rotamer_list_secondary: Option<Artifact>,
    pub design_rotamer_indices: Option<Artifact>,
    pub design_sequences: Option<Artifact>,
    pub best_sequences: Option<Artifact>,
    pub best_structure: Option<Artifact>,
    pub best_sites: Option<Artifact>,
    pub best_mutation_sites: Option<Artifact>,
    pub best_ligand_pose: Option<Artifact>,
    cleanup: Cleanup,
}

impl ProteinDesignResult {
    /// Directory holding the retained files; removed by [`close`](Self::close).
    pub fn workspace(&self) -> &Path {
        &self.run.workdir
    }

    /// Deletes the retained directory and everything in it. Idempotent.
    pub fn close(&mut self) -> io::Result<()> {
        self.cleanup.run()
    }
}

impl<'a> ProteinDesignJob<'a> {
    pub fn new(runner: &'a UniDesignRunner, config: ProteinDesignConfig) -> Self {
        Self { runner, config }
    }

    fn expected_files(prefix: &str) -> Vec<PathBuf> {
        [
            format!("{prefix}_selfenergy.txt"),
            format!("{prefix}_rotlist.txt"),
            format!("{prefix}_rotlistSEC.txt"),
            format!("{prefix}_desrots"),
            format!("{prefix}_desseqs"),
            format!("{prefix}_bestseqs"),
            format!("{prefix}_beststruct"),
            format!("{prefix}_bestsites"),
            format!("{prefix}_bestmutsites"),
            format!("{prefix}_bestlig"),
        ]
        .into_iter()
        .map(PathBuf::from)
        .collect()
    }

    pub fn run(&self, options: &JobOptions) -> Result<ProteinDesignResult> {
        let args = self.config.to_cli_args()?;
        let mut run = self.runner.run_with(&args, &options.run_options())?;

        let (workdir, cleanup) = relocate_workspace(
            &run.workdir,
            &Self::expected_files(&run.prefix),
            options.keep_workspace,
        )?;
        run.workdir = workdir;

        let dir = run.workdir.clone();
        let prefix = run.prefix.clone();
        let find = |suffix: &str| probe(&dir, Path::new(&format!("{prefix}{suffix}")));

        let result = ProteinDesignResult {
            self_energy: find("_selfenergy.txt"),
            rotamer_list: find("_rotlist.txt"),
            rotamer_list_secondary: find("_rotlistSEC.txt"),
            design_rotamer_indices: find("_desrots"),
            design_sequences: find("_desseqs"),
            best_sequences: find("_bestseqs"),
            best_structure: find("_beststruct"),
            best_sites: find("_bestsites"),
            best_mutation_sites: find("_bestmutsites"),
            best_ligand_pose: find("_bestlig"),
            run,
            cleanup,
        };
        info!(prefix = %result.run.prefix, "ProteinDesign job complete");
        Ok(result)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::jobs::testutil::dispatch_runner;

    #[test]
    fn produced_artifacts_are_present_and_the_rest_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let runner = dispatch_runner(tmp.path());
        let mut config = ProteinDesignConfig::new("input.pdb");
        config.design_chains = Some("A".to_string());
        config.n_trajectories = Some(1);
        let job = ProteinDesignJob::new(&runner, config);

        let mut result = job.run(&JobOptions::default()).unwrap();
        assert!(result.run.success());
        assert_eq!(
            result.self_energy.as_ref().unwrap().read_to_string().unwrap(),
            "energy"
        );
        assert_eq!(
            result
                .best_sequences
                .as_ref()
                .unwrap()
                .read_to_string()
                .unwrap(),
            "SEQ"
        );
        assert!(result.best_structure.is_some());
        assert!(result.best_sites.is_none());
        assert!(result.best_mutation_sites.is_none());
        assert!(result.best_ligand_pose.is_none());

        result.close().unwrap();
        assert!(!result.workspace().exists());
    }

    #[test]
    fn relocated_artifacts_live_outside_the_original_workspace() {
        let tmp = tempfile::tempdir().unwrap();
        let runner = dispatch_runner(tmp.path());
        let job = ProteinDesignJob::new(&runner, ProteinDesignConfig::new("input.pdb"));

        let mut result = job.run(&JobOptions::default()).unwrap();
        // Relocation drops everything undeclared, resource bundles included.
        assert!(!result.workspace().join("library").exists());
        assert!(
            result
                .best_structure
                .as_ref()
                .unwrap()
                .path()
                .starts_with(result.workspace())
        );

        result.close().unwrap();
    }

    #[test]
    fn keep_workspace_wraps_artifacts_in_place() {
        let tmp = tempfile::tempdir().unwrap();
        let runner = dispatch_runner(tmp.path());
        let job = ProteinDesignJob::new(&runner, ProteinDesignConfig::new("input.pdb"));

        let options = JobOptions {
            keep_workspace: true,
            ..JobOptions::default()
        };
        let mut result = job.run(&options).unwrap();
        assert!(result.workspace().join("library").exists());
        assert!(
            result
                .self_energy
                .as_ref()
                .unwrap()
                .path()
                .starts_with(result.workspace())
        );

        result.close().unwrap();
        assert!(!result.workspace().exists());
    }

    #[test]
    fn close_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let runner = dispatch_runner(tmp.path());
        let job = ProteinDesignJob::new(&runner, ProteinDesignConfig::new("input.pdb"));

        let mut result = job.run(&JobOptions::default()).unwrap();
        result.close().unwrap();
        result.close().unwrap();
        assert!(!result.workspace().exists());
    }

    #[test]
    fn concurrent_jobs_do_not_cross_contaminate() {
        let tmp = tempfile::tempdir().unwrap();
        let runner = dispatch_runner(tmp.path());

        let outcomes = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    scope.spawn(|| {
                        let job = ProteinDesignJob::new(
                            &runner,
                            ProteinDesignConfig::new("input.pdb"),
                        );
                        job.run(&JobOptions::default()).unwrap()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect::<Vec<_>>()
        });

        let [mut first, mut second]: [ProteinDesignResult; 2] =
            outcomes.try_into().unwrap();
        assert_ne!(first.run.prefix, second.run.prefix);
        assert_ne!(first.workspace(), second.workspace());
        assert!(first.best_sequences.is_some());
        assert!(second.best_sequences.is_some());

        first.close().unwrap();
        second.close().unwrap();
    }
}
