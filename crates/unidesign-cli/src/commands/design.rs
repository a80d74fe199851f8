use tracing::info;
use unidesign::{ProteinDesignJob, UniDesignRunner};

use crate::cli::DesignArgs;
use crate::config::PartialDesignConfig;
use crate::error::Result;

pub fn run(args: DesignArgs) -> Result<()> {
    let partial = match &args.config {
        Some(path) => PartialDesignConfig::from_file(path)?,
        None => PartialDesignConfig::default(),
    };
    let config = partial.merge_with_cli(&args)?;

    let install = super::installation(&args.run)?;
    let runner = UniDesignRunner::new(&install);
    let options = super::job_options(&args.run)?;

    info!("Starting ProteinDesign run for {:?}", args.pdb);
    let mut result = ProteinDesignJob::new(&runner, config).run(&options)?;

    let named = [
        ("self_energy", result.self_energy.as_ref()),
        ("rotamer_list", result.rotamer_list.as_ref()),
        ("rotamer_list_secondary", result.rotamer_list_secondary.as_ref()),
        ("design_rotamer_indices", result.design_rotamer_indices.as_ref()),
        ("design_sequences", result.design_sequences.as_ref()),
        ("best_sequences", result.best_sequences.as_ref()),
        ("best_structure", result.best_structure.as_ref()),
        ("best_sites", result.best_sites.as_ref()),
        ("best_mutation_sites", result.best_mutation_sites.as_ref()),
        ("best_ligand_pose", result.best_ligand_pose.as_ref()),
    ];
    let entries = super::collect_artifacts(&named, args.run.out.as_deref())?;
    if args.run.out.is_some() {
        result.close()?;
    }
    super::print_summary("ProteinDesign", &result.run, entries, &args.run)
}
