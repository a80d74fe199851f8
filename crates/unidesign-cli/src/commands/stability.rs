use tracing::info;
use unidesign::{ComputeStabilityConfig, StabilityJob, UniDesignRunner};

use crate::cli::StabilityArgs;
use crate::error::Result;

pub fn run(args: StabilityArgs) -> Result<()> {
    let mut config = ComputeStabilityConfig::new(&args.pdb);
    config.use_bbdep_rotlib = args.bbdep;
    config.rotamer_library = args.rotlib.clone();
    config.weight_file = args.wread.clone();

    let install = super::installation(&args.run)?;
    let runner = UniDesignRunner::new(&install);
    let options = super::job_options(&args.run)?;

    info!("Starting ComputeStability run for {:?}", args.pdb);
    let mut result = StabilityJob::new(&runner, config).run(&options)?;

    let named = [("rotamer_list", result.rotamer_list.as_ref())];
    let entries = super::collect_artifacts(&named, args.run.out.as_deref())?;
    if args.run.out.is_some() {
        result.close()?;
    }
    super::print_summary("ComputeStability", &result.run, entries, &args.run)
}
