use tracing::info;
use unidesign::{LigandParamJob, MakeLigParamConfig, UniDesignRunner};

use crate::cli::LigandParamArgs;
use crate::error::Result;

pub fn run(args: LigandParamArgs) -> Result<()> {
    let mut config = MakeLigParamConfig::new(&args.mol2);
    if let Some(path) = &args.lig_param {
        config.ligand_parameter_path = path.clone();
    }
    if let Some(path) = &args.lig_topo {
        config.ligand_topology_path = path.clone();
    }
    if let Some(atoms) = &args.init_atoms {
        config = config.with_initial_atoms(atoms.split(','))?;
    }

    let install = super::installation(&args.run)?;
    let runner = UniDesignRunner::new(&install);
    let options = super::job_options(&args.run)?;

    info!("Starting MakeLigParamAndTopo run for {:?}", args.mol2);
    let mut result = LigandParamJob::new(&runner, config).run(&options)?;

    let named = [
        ("parameter_file", result.parameter_file.as_ref()),
        ("topology_file", result.topology_file.as_ref()),
    ];
    let entries = super::collect_artifacts(&named, args.run.out.as_deref())?;
    if args.run.out.is_some() {
        result.close()?;
    }
    super::print_summary("MakeLigParamAndTopo", &result.run, entries, &args.run)
}
