use std::path::PathBuf;

use super::{CommandConfig, ConfigError, push_opt, push_opt_path, push_path, push_value, push_yes_no};

/// Configuration for the `ComputeStability` command.
///
/// The binary defaults to the backbone-dependent Dunbrack library and reads
/// weights from `wread/weight_all1.wgt`; unset fields leave those defaults
/// in force.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeStabilityConfig {
    /// Structure to score, passed via `--pdb`.
    pub pdb_path: PathBuf,
    /// Override for `--bbdep` (binary default: yes).
    pub use_bbdep_rotlib: Option<bool>,
    /// Named text rotamer library passed through `--rotlib`.
    pub rotamer_library: Option<String>,
    /// Alternate energy weights via `--wread`.
    pub weight_file: Option<PathBuf>,
}

impl ComputeStabilityConfig {
    pub fn new(pdb_path: impl Into<PathBuf>) -> Self {
        Self {
            pdb_path: pdb_path.into(),
            use_bbdep_rotlib: None,
            rotamer_library: None,
            weight_file: None,
        }
    }
}

impl CommandConfig for ComputeStabilityConfig {
    fn command(&self) -> &'static str {
        "ComputeStability"
    }

    fn to_cli_args(&self) -> Result<Vec<String>, ConfigError> {
        let mut args = Vec::new();
        push_value(&mut args, "--command", self.command());
        push_path(&mut args, "--pdb", &self.pdb_path);
        push_yes_no(&mut args, "--bbdep", self.use_bbdep_rotlib);
        push_opt(&mut args, "--rotlib", self.rotamer_library.as_deref());
        push_opt_path(&mut args, "--wread", &self.weight_file);
        Ok(args)
    }
}
