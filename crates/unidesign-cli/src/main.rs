mod cli;
mod commands;
mod config;
mod error;
mod logging;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let result = match cli.command {
        Commands::Design(args) => {
            info!("Dispatching to 'design' command.");
            commands::design::run(args)
        }
        Commands::Stability(args) => {
            info!("Dispatching to 'stability' command.");
            commands::stability::run(args)
        }
        Commands::Binding(args) => {
            info!("Dispatching to 'binding' command.");
            commands::binding::run(args)
        }
        Commands::LigandParam(args) => {
            info!("Dispatching to 'ligand-param' command.");
            commands::ligand::run(args)
        }
    };

    match &result {
        Ok(()) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {e}"),
    }
    result
}
