use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use unidesign::DesignMode;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "unirun - drive the UniDesign protein design and scoring binary through isolated, disposable workspaces.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Design sequences onto a structure (ProteinDesign).
    Design(DesignArgs),
    /// Score the stability of a structure (ComputeStability).
    Stability(StabilityArgs),
    /// Score binding across a chain split (ComputeBinding).
    Binding(BindingArgs),
    /// Generate ligand parameter and topology files (MakeLigParamAndTopo).
    LigandParam(LigandParamArgs),
}

/// Options shared by every job subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// UniDesign installation root. Falls back to $UNIDESIGN_HOME.
    #[arg(long, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Keep the full execution workspace instead of extracting artifacts.
    #[arg(long)]
    pub keep_workspace: bool,

    /// Copy produced artifacts into this directory and discard the rest.
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Extra environment variable for the run. May be repeated.
    /// Example: -e OMP_NUM_THREADS=8
    #[arg(short, long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<String>,

    /// Kill the run after this many seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the run summary as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `design` subcommand.
#[derive(Args, Debug)]
pub struct DesignArgs {
    /// Path to the input structure file (PDB).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub pdb: PathBuf,

    /// TOML configuration file covering the full ProteinDesign option
    /// surface. CLI flags below override values from the file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Chain identifiers selected for design, e.g. "AB".
    #[arg(long, value_name = "CHAINS")]
    pub chains: Option<String>,

    /// Design mode.
    #[arg(long, value_enum, value_name = "MODE")]
    pub mode: Option<ModeArg>,

    /// Number of Monte Carlo trajectories.
    #[arg(long, value_name = "INT")]
    pub ntraj: Option<i32>,

    /// Resfile restricting designable positions.
    #[arg(long, value_name = "PATH")]
    pub resfile: Option<PathBuf>,

    /// Enable evolutionary restraints.
    #[arg(long)]
    pub evolution: bool,

    #[command(flatten)]
    pub run: RunArgs,
}

/// Design mode names as accepted on the command line.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    Monomer,
    Ppi,
    Protlig,
    Enzyme,
}

impl From<ModeArg> for DesignMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Monomer => DesignMode::Monomer,
            ModeArg::Ppi => DesignMode::ProteinProtein,
            ModeArg::Protlig => DesignMode::ProteinLigand,
            ModeArg::Enzyme => DesignMode::Enzyme,
        }
    }
}

/// Arguments for the `stability` subcommand.
#[derive(Args, Debug)]
pub struct StabilityArgs {
    /// Path to the input structure file (PDB).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub pdb: PathBuf,

    /// Use the backbone-dependent rotamer library.
    #[arg(long, value_parser = parse_yes_no, value_name = "YES|NO")]
    pub bbdep: Option<bool>,

    /// Named text rotamer library.
    #[arg(long, value_name = "NAME")]
    pub rotlib: Option<String>,

    /// Alternate energy weight file.
    #[arg(long, value_name = "PATH")]
    pub wread: Option<PathBuf>,

    #[command(flatten)]
    pub run: RunArgs,
}

/// Arguments for the `binding` subcommand.
#[derive(Args, Debug)]
pub struct BindingArgs {
    /// Path to the input structure file (PDB).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub pdb: PathBuf,

    /// Chain split as two comma-separated disjoint groups, e.g. "AB,C".
    #[arg(long, value_name = "G1,G2")]
    pub split: Option<String>,

    #[command(flatten)]
    pub run: RunArgs,
}

/// Arguments for the `ligand-param` subcommand.
#[derive(Args, Debug)]
pub struct LigandParamArgs {
    /// Path to the ligand MOL2 file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub mol2: PathBuf,

    /// Output parameter file name.
    #[arg(long, value_name = "PATH")]
    pub lig_param: Option<PathBuf>,

    /// Output topology file name.
    #[arg(long, value_name = "PATH")]
    pub lig_topo: Option<PathBuf>,

    /// Three comma-separated atom names seeding topology generation,
    /// e.g. "C1,C2,C3".
    #[arg(long, value_name = "A1,A2,A3")]
    pub init_atoms: Option<String>,

    #[command(flatten)]
    pub run: RunArgs,
}

/// UniDesign's boolean flags speak "yes"/"no", so the CLI does too.
fn parse_yes_no(value: &str) -> Result<bool, String> {
    match value {
        "yes" => Ok(true),
        "no" => Ok(false),
        other => Err(format!("expected 'yes' or 'no', got '{other}'")),
    }
}
