use std::path::PathBuf;

use super::{CommandConfig, ConfigError, push_path, push_value};

/// Configuration for the `MakeLigParamAndTopo` command.
///
/// Unlike the other commands, the output filenames here are caller-chosen:
/// the binary writes the parameter and topology files under exactly the
/// names passed to `--lig_param` and `--lig_topo`. Topology generation is
/// seeded from an ordered triplet of atom names.
#[derive(Debug, Clone, PartialEq)]
pub struct MakeLigParamConfig {
    /// Ligand MOL2 file supplied via `--mol2`.
    pub mol2_path: PathBuf,
    /// Output parameter file for `--lig_param`.
    pub ligand_parameter_path: PathBuf,
    /// Output topology file for `--lig_topo`.
    pub ligand_topology_path: PathBuf,
    initial_atoms: [String; 3],
}

impl MakeLigParamConfig {
    /// Configuration with the binary's default outputs (`LIG_PARAM.prm`,
    /// `LIG_TOPO.inp`) and the `C1,C2,C3` seed triplet.
    pub fn new(mol2_path: impl Into<PathBuf>) -> Self {
        Self {
            mol2_path: mol2_path.into(),
            ligand_parameter_path: PathBuf::from("LIG_PARAM.prm"),
            ligand_topology_path: PathBuf::from("LIG_TOPO.inp"),
            initial_atoms: ["C1".to_string(), "C2".to_string(), "C3".to_string()],
        }
    }

    /// Replaces the seed triplet, rejecting any other arity.
    pub fn with_initial_atoms<I, S>(mut self, atoms: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let atoms: Vec<String> = atoms.into_iter().map(Into::into).collect();
        let count = atoms.len();
        let triplet: [String; 3] = atoms
            .try_into()
            .map_err(|_| ConfigError::AtomTripletArity { count })?;
        self.initial_atoms = triplet;
        Ok(self)
    }

    pub fn initial_atoms(&self) -> &[String; 3] {
        &self.initial_atoms
    }
}

impl CommandConfig for MakeLigParamConfig {
    fn command(&self) -> &'static str {
        "MakeLigParamAndTopo"
    }

    fn to_cli_args(&self) -> Result<Vec<String>, ConfigError> {
        let mut args = Vec::new();
        push_value(&mut args, "--command", self.command());
        push_path(&mut args, "--mol2", &self.mol2_path);
        push_path(&mut args, "--lig_param", &self.ligand_parameter_path);
        push_path(&mut args, "--lig_topo", &self.ligand_topology_path);
        push_value(&mut args, "--init_3atoms", self.initial_atoms.join(","));
        Ok(args)
    }
}
