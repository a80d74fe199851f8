use std::path::PathBuf;

use super::{
    CommandConfig, ConfigError, ensure_positive, push_opt, push_opt_path, push_path, push_switch,
    push_value, push_yes_no,
};

/// Design mode selector. Monomer is the binary's default and emits no flag;
/// the three complex modes are mutually exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DesignMode {
    #[default]
    Monomer,
    /// Protein-protein interface design (`--ppint`).
    ProteinProtein,
    /// Protein-ligand interface design (`--protlig`).
    ProteinLigand,
    /// Enzyme active-site design (`--enzyme`).
    Enzyme,
}

impl DesignMode {
    fn flag(self) -> Option<&'static str> {
        match self {
            DesignMode::Monomer => None,
            DesignMode::ProteinProtein => Some("--ppint"),
            DesignMode::ProteinLigand => Some("--protlig"),
            DesignMode::Enzyme => Some("--enzyme"),
        }
    }
}

/// Initial rotamer type passed through `--init_rotype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitRotamerType {
    /// Native rotamers only.
    Natro,
    /// Native amino acid, rotamers free.
    Nataa,
    /// All amino acids.
    Allaa,
    /// All amino acids except cysteine.
    Allaaxc,
}

impl InitRotamerType {
    fn token(self) -> &'static str {
        match self {
            InitRotamerType::Natro => "natro",
            InitRotamerType::Nataa => "nataa",
            InitRotamerType::Allaa => "allaa",
            InitRotamerType::Allaaxc => "allaaxc",
        }
    }
}

/// Configuration for the `ProteinDesign` command.
///
/// Every optional field defaults to "unset", which leaves the corresponding
/// flag out of the compiled argument vector so the binary applies its own
/// native default (monomer mode, backbone-dependent rotamers, chain `A`,
/// weights from `wread/weight_all1.wgt`).
#[derive(Debug, Clone, PartialEq)]
pub struct ProteinDesignConfig {
    /// Input structure passed via `--pdb`.
    pub pdb_path: PathBuf,
    /// Chain identifiers for `--design_chains` (binary default: `A`).
    pub design_chains: Option<String>,
    pub mode: DesignMode,
    /// Override for `--bbdep` (binary default: yes).
    pub use_bbdep_rotlib: Option<bool>,
    /// Controls `--use_input_sc` (binary default: yes).
    pub use_input_sidechains: Option<bool>,
    /// Toggles `--rotate_hydroxyl` for Ser/Thr/Tyr (binary default: yes).
    pub rotate_hydroxyl: Option<bool>,
    /// Emits `--evolution` to enable evolutionary restraints.
    pub enable_evolution: bool,
    /// Sequence profile supplied through `--seq`.
    pub sequence_profile: Option<PathBuf>,
    /// Profile weight for `--wprof` (binary default: 1.0).
    pub profile_weight: Option<f64>,
    /// Energy weight file for `--wread`.
    pub weight_file: Option<PathBuf>,
    /// Named rotamer library passed to `--rotlib`.
    pub rotamer_library: Option<String>,
    /// Monte Carlo trajectory count for `--ntraj`; must be strictly positive.
    pub n_trajectories: Option<i32>,
    /// Trajectory start index for `--ntraj_start_ndx`; must be strictly positive.
    pub n_trajectory_start_index: Option<i32>,
    /// Low-probability rotamer cutoff for `--excl_low_prob`.
    pub exclude_low_prob_rotamers_cutoff: Option<f64>,
    pub ppi_shell1: Option<f64>,
    pub ppi_shell2: Option<f64>,
    pub pli_shell1: Option<f64>,
    pub pli_shell2: Option<f64>,
    /// Steric clash ratio threshold for `--clash_ratio`.
    pub clash_ratio: Option<f64>,
    /// Initial rotamer type for `--init_rotype`.
    pub init_rotamer_type: Option<InitRotamerType>,
    /// Resfile consumed via `--resfile`.
    pub resfile_path: Option<PathBuf>,
    /// Emits `--wildtype_only`.
    pub wildtype_only: bool,
    /// Emits `--interface_only`.
    pub interface_only: bool,
    /// Emits `--seed_from_nat_seq`.
    pub seed_from_native_sequence: bool,
    /// Emits `--excl_cys_rots`.
    pub exclude_cysteine_rotamers: bool,
    /// Controls hydrogen output via `--show_hydrogen` (binary default: yes).
    pub write_hydrogen: Option<bool>,
    /// Residue list fed to `--within_residues` for distance-based selection.
    pub within_residues: Option<String>,
    /// Radius in angstroms passed through `--within_range`.
    pub within_range: Option<f64>,
    /// Binding term weight for `--wbind`.
    pub binding_weight: Option<f64>,
    /// Ligand parameter override for `--lig_param`.
    pub ligand_parameter_path: Option<PathBuf>,
    /// Ligand topology override for `--lig_topo`.
    pub ligand_topology_path: Option<PathBuf>,
    /// Catalytic constraint definitions for `--lig_catacons`.
    pub ligand_constraint_path: Option<PathBuf>,
    /// Ligand placement rules for `--lig_placing`.
    pub ligand_placement_path: Option<PathBuf>,
    /// Ligand pose input consumed via `--read_lig_poses`.
    pub ligand_pose_input: Option<PathBuf>,
    /// Ligand pose output produced with `--write_lig_poses`.
    pub ligand_pose_output: Option<PathBuf>,
    /// Orientation screen manifest for `--scrn_by_orien`.
    pub ligand_orientation_screen: Option<PathBuf>,
    /// Percentile cutoff for `--scrn_by_vdw_pctl`.
    pub ligand_vdw_percentile: Option<f64>,
    /// RMSD cutoff in angstroms for `--scrn_by_rmsd`.
    pub ligand_rmsd_cutoff: Option<f64>,
}

impl ProteinDesignConfig {
    /// Configuration with every optional field unset, deferring to the
    /// binary's own defaults.
    pub fn new(pdb_path: impl Into<PathBuf>) -> Self {
        Self {
            pdb_path: pdb_path.into(),
            design_chains: None,
            mode: DesignMode::Monomer,
            use_bbdep_rotlib: None,
            use_input_sidechains: None,
            rotate_hydroxyl: None,
            enable_evolution: false,
            sequence_profile: None,
            profile_weight: None,
            weight_file: None,
            rotamer_library: None,
            n_trajectories: None,
            n_trajectory_start_index: None,
            exclude_low_prob_rotamers_cutoff: None,
            ppi_shell1: None,
            ppi_shell2: None,
            pli_shell1: None,
            pli_shell2: None,
            clash_ratio: None,
            init_rotamer_type: None,
            resfile_path: None,
            wildtype_only: false,
            interface_only: false,
            seed_from_native_sequence: false,
            exclude_cysteine_rotamers: false,
            write_hydrogen: None,
            within_residues: None,
            within_range: None,
            binding_weight: None,
            ligand_parameter_path: None,
            ligand_topology_path: None,
            ligand_constraint_path: None,
            ligand_placement_path: None,
            ligand_pose_input: None,
            ligand_pose_output: None,
            ligand_orientation_screen: None,
            ligand_vdw_percentile: None,
            ligand_rmsd_cutoff: None,
        }
    }
}

impl CommandConfig for ProteinDesignConfig {
    fn command(&self) -> &'static str {
        "ProteinDesign"
    }

    fn to_cli_args(&self) -> Result<Vec<String>, ConfigError> {
        ensure_positive("--ntraj", self.n_trajectories)?;
        ensure_positive("--ntraj_start_ndx", self.n_trajectory_start_index)?;

        let mut args = Vec::new();
        push_value(&mut args, "--command", self.command());
        push_path(&mut args, "--pdb", &self.pdb_path);
        if let Some(flag) = self.mode.flag() {
            args.push(flag.to_string());
        }

        push_opt(&mut args, "--design_chains", self.design_chains.as_deref());
        push_yes_no(&mut args, "--bbdep", self.use_bbdep_rotlib);
        push_yes_no(&mut args, "--use_input_sc", self.use_input_sidechains);
        push_yes_no(&mut args, "--rotate_hydroxyl", self.rotate_hydroxyl);
        push_switch(&mut args, "--evolution", self.enable_evolution);
        push_opt_path(&mut args, "--seq", &self.sequence_profile);
        push_opt(&mut args, "--wprof", self.profile_weight);
        push_opt_path(&mut args, "--wread", &self.weight_file);
        push_opt(&mut args, "--rotlib", self.rotamer_library.as_deref());
        push_opt(&mut args, "--ntraj", self.n_trajectories);
        push_opt(&mut args, "--ntraj_start_ndx", self.n_trajectory_start_index);
        push_opt(
            &mut args,
            "--excl_low_prob",
            self.exclude_low_prob_rotamers_cutoff,
        );
        push_opt(&mut args, "--ppi_shell1", self.ppi_shell1);
        push_opt(&mut args, "--ppi_shell2", self.ppi_shell2);
        push_opt(&mut args, "--pli_shell1", self.pli_shell1);
        push_opt(&mut args, "--pli_shell2", self.pli_shell2);
        push_opt(&mut args, "--clash_ratio", self.clash_ratio);
        push_opt(
            &mut args,
            "--init_rotype",
            self.init_rotamer_type.map(InitRotamerType::token),
        );
        push_opt_path(&mut args, "--resfile", &self.resfile_path);
        push_switch(&mut args, "--wildtype_only", self.wildtype_only);
        push_switch(&mut args, "--interface_only", self.interface_only);
        push_switch(
            &mut args,
            "--seed_from_nat_seq",
            self.seed_from_native_sequence,
        );
        push_switch(&mut args, "--excl_cys_rots", self.exclude_cysteine_rotamers);
        push_yes_no(&mut args, "--show_hydrogen", self.write_hydrogen);
        push_opt(&mut args, "--within_residues", self.within_residues.as_deref());
        push_opt(&mut args, "--within_range", self.within_range);
        push_opt(&mut args, "--wbind", self.binding_weight);
        push_opt_path(&mut args, "--lig_param", &self.ligand_parameter_path);
        push_opt_path(&mut args, "--lig_topo", &self.ligand_topology_path);
        push_opt_path(&mut args, "--lig_catacons", &self.ligand_constraint_path);
        push_opt_path(&mut args, "--lig_placing", &self.ligand_placement_path);
        push_opt_path(&mut args, "--read_lig_poses", &self.ligand_pose_input);
        push_opt_path(&mut args, "--write_lig_poses", &self.ligand_pose_output);
        push_opt_path(&mut args, "--scrn_by_orien", &self.ligand_orientation_screen);
        push_opt(&mut args, "--scrn_by_vdw_pctl", self.ligand_vdw_percentile);
        push_opt(&mut args, "--scrn_by_rmsd", self.ligand_rmsd_cutoff);

        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_emits_only_selector_and_input() {
        let config = ProteinDesignConfig::new("input.pdb");
        let args = config.to_cli_args().unwrap();

        assert_eq!(args, vec!["--command", "ProteinDesign", "--pdb", "input.pdb"]);
    }

    #[test]
    fn monomer_mode_emits_no_mode_flag() {
        let config = ProteinDesignConfig::new("a.pdb");
        let args = config.to_cli_args().unwrap();

        assert!(!args.iter().any(|a| a == "--ppint"));
        assert!(!args.iter().any(|a| a == "--protlig"));
        assert!(!args.iter().any(|a| a == "--enzyme"));
    }

    #[test]
    fn mode_flag_follows_input_selection() {
        let mut config = ProteinDesignConfig::new("complex.pdb");
        config.mode = DesignMode::ProteinProtein;
        config.design_chains = Some("AB".to_string());

        let args = config.to_cli_args().unwrap();
        assert_eq!(
            args,
            vec![
                "--command",
                "ProteinDesign",
                "--pdb",
                "complex.pdb",
                "--ppint",
                "--design_chains",
                "AB",
            ]
        );
    }

    #[test]
    fn yes_no_flags_render_literal_tokens() {
        let mut config = ProteinDesignConfig::new("a.pdb");
        config.use_bbdep_rotlib = Some(false);
        config.write_hydrogen = Some(true);

        let args = config.to_cli_args().unwrap();
        let joined = args.join(" ");
        assert!(joined.contains("--bbdep no"));
        assert!(joined.contains("--show_hydrogen yes"));
    }

    #[test]
    fn bare_flags_appear_only_when_enabled() {
        let mut config = ProteinDesignConfig::new("a.pdb");
        config.enable_evolution = true;
        config.exclude_cysteine_rotamers = true;

        let args = config.to_cli_args().unwrap();
        assert!(args.iter().any(|a| a == "--evolution"));
        assert!(args.iter().any(|a| a == "--excl_cys_rots"));
        assert!(!args.iter().any(|a| a == "--wildtype_only"));
        assert!(!args.iter().any(|a| a == "--interface_only"));
    }

    #[test]
    fn numeric_and_path_flags_render_in_declaration_order() {
        let mut config = ProteinDesignConfig::new("a.pdb");
        config.n_trajectories = Some(10);
        config.exclude_low_prob_rotamers_cutoff = Some(0.03);
        config.weight_file = Some(PathBuf::from("wread/weight_all1.wgt"));
        config.init_rotamer_type = Some(InitRotamerType::Allaaxc);
        config.resfile_path = Some(PathBuf::from("design.resfile"));

        let args = config.to_cli_args().unwrap();
        assert_eq!(
            args,
            vec![
                "--command",
                "ProteinDesign",
                "--pdb",
                "a.pdb",
                "--wread",
                "wread/weight_all1.wgt",
                "--ntraj",
                "10",
                "--excl_low_prob",
                "0.03",
                "--init_rotype",
                "allaaxc",
                "--resfile",
                "design.resfile",
            ]
        );
    }

    #[test]
    fn non_positive_trajectory_counts_are_rejected() {
        let mut config = ProteinDesignConfig::new("a.pdb");
        config.n_trajectories = Some(0);
        assert_eq!(
            config.to_cli_args(),
            Err(ConfigError::NonPositive {
                flag: "--ntraj",
                value: 0
            })
        );

        let mut config = ProteinDesignConfig::new("a.pdb");
        config.n_trajectory_start_index = Some(-1);
        assert_eq!(
            config.to_cli_args(),
            Err(ConfigError::NonPositive {
                flag: "--ntraj_start_ndx",
                value: -1
            })
        );
    }

    #[test]
    fn compiled_args_never_contain_the_prefix_flag() {
        let mut config = ProteinDesignConfig::new("a.pdb");
        config.mode = DesignMode::Enzyme;
        config.design_chains = Some("AC".to_string());
        config.use_bbdep_rotlib = Some(true);
        config.enable_evolution = true;
        config.n_trajectories = Some(5);
        config.ligand_parameter_path = Some(PathBuf::from("LIG_PARAM.prm"));
        config.ligand_vdw_percentile = Some(0.5);

        let args = config.to_cli_args().unwrap();
        assert!(!args.iter().any(|a| a.starts_with("--prefix")));
    }
}
