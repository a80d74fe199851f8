use crate::cli::DesignArgs;
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use unidesign::{DesignMode, InitRotamerType, ProteinDesignConfig};

/// TOML mirror of the `ProteinDesign` option surface. Field names follow
/// the binary's flag vocabulary; every field is optional so "not in the
/// file" stays distinguishable from an explicit value.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct PartialDesignConfig {
    design_chains: Option<String>,
    mode: Option<String>,
    bbdep: Option<bool>,
    use_input_sc: Option<bool>,
    rotate_hydroxyl: Option<bool>,
    evolution: Option<bool>,
    seq: Option<PathBuf>,
    wprof: Option<f64>,
    wread: Option<PathBuf>,
    rotlib: Option<String>,
    ntraj: Option<i32>,
    ntraj_start_ndx: Option<i32>,
    excl_low_prob: Option<f64>,
    ppi_shell1: Option<f64>,
    ppi_shell2: Option<f64>,
    pli_shell1: Option<f64>,
    pli_shell2: Option<f64>,
    clash_ratio: Option<f64>,
    init_rotype: Option<String>,
    resfile: Option<PathBuf>,
    wildtype_only: Option<bool>,
    interface_only: Option<bool>,
    seed_from_nat_seq: Option<bool>,
    excl_cys_rots: Option<bool>,
    show_hydrogen: Option<bool>,
    within_residues: Option<String>,
    within_range: Option<f64>,
    wbind: Option<f64>,
    lig_param: Option<PathBuf>,
    lig_topo: Option<PathBuf>,
    lig_catacons: Option<PathBuf>,
    lig_placing: Option<PathBuf>,
    read_lig_poses: Option<PathBuf>,
    write_lig_poses: Option<PathBuf>,
    scrn_by_orien: Option<PathBuf>,
    scrn_by_vdw_pctl: Option<f64>,
    scrn_by_rmsd: Option<f64>,
}

impl PartialDesignConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading design configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Folds the file values under the CLI flags (CLI wins) into a core
    /// configuration.
    pub fn merge_with_cli(self, args: &DesignArgs) -> Result<ProteinDesignConfig> {
        let mut config = ProteinDesignConfig::new(&args.pdb);

        config.design_chains = args.chains.clone().or(self.design_chains);
        config.mode = match args.mode {
            Some(mode) => mode.into(),
            None => parse_mode(self.mode.as_deref())?,
        };
        config.use_bbdep_rotlib = self.bbdep;
        config.use_input_sidechains = self.use_input_sc;
        config.rotate_hydroxyl = self.rotate_hydroxyl;
        config.enable_evolution = args.evolution || self.evolution.unwrap_or(false);
        config.sequence_profile = self.seq;
        config.profile_weight = self.wprof;
        config.weight_file = self.wread;
        config.rotamer_library = self.rotlib;
        config.n_trajectories = args.ntraj.or(self.ntraj);
        config.n_trajectory_start_index = self.ntraj_start_ndx;
        config.exclude_low_prob_rotamers_cutoff = self.excl_low_prob;
        config.ppi_shell1 = self.ppi_shell1;
        config.ppi_shell2 = self.ppi_shell2;
        config.pli_shell1 = self.pli_shell1;
        config.pli_shell2 = self.pli_shell2;
        config.clash_ratio = self.clash_ratio;
        config.init_rotamer_type = parse_init_rotype(self.init_rotype.as_deref())?;
        config.resfile_path = args.resfile.clone().or(self.resfile);
        config.wildtype_only = self.wildtype_only.unwrap_or(false);
        config.interface_only = self.interface_only.unwrap_or(false);
        config.seed_from_native_sequence = self.seed_from_nat_seq.unwrap_or(false);
        config.exclude_cysteine_rotamers = self.excl_cys_rots.unwrap_or(false);
        config.write_hydrogen = self.show_hydrogen;
        config.within_residues = self.within_residues;
        config.within_range = self.within_range;
        config.binding_weight = self.wbind;
        config.ligand_parameter_path = self.lig_param;
        config.ligand_topology_path = self.lig_topo;
        config.ligand_constraint_path = self.lig_catacons;
        config.ligand_placement_path = self.lig_placing;
        config.ligand_pose_input = self.read_lig_poses;
        config.ligand_pose_output = self.write_lig_poses;
        config.ligand_orientation_screen = self.scrn_by_orien;
        config.ligand_vdw_percentile = self.scrn_by_vdw_pctl;
        config.ligand_rmsd_cutoff = self.scrn_by_rmsd;

        Ok(config)
    }
}

fn parse_mode(value: Option<&str>) -> Result<DesignMode> {
    match value {
        None | Some("monomer") => Ok(DesignMode::Monomer),
        Some("ppi") => Ok(DesignMode::ProteinProtein),
        Some("protlig") => Ok(DesignMode::ProteinLigand),
        Some("enzyme") => Ok(DesignMode::Enzyme),
        Some(other) => Err(CliError::Config(format!(
            "Unknown design mode '{other}'. Expected monomer, ppi, protlig or enzyme."
        ))),
    }
}

fn parse_init_rotype(value: Option<&str>) -> Result<Option<InitRotamerType>> {
    match value {
        None => Ok(None),
        Some("natro") => Ok(Some(InitRotamerType::Natro)),
        Some("nataa") => Ok(Some(InitRotamerType::Nataa)),
        Some("allaa") => Ok(Some(InitRotamerType::Allaa)),
        Some("allaaxc") => Ok(Some(InitRotamerType::Allaaxc)),
        Some(other) => Err(CliError::Config(format!(
            "Unknown init-rotype '{other}'. Expected natro, nataa, allaa or allaaxc."
        ))),
    }
}
