use std::collections::BTreeSet;
use std::path::PathBuf;

use super::{CommandConfig, ConfigError, push_path, push_value};

/// Configuration for the `ComputeBinding` command.
///
/// The two chain groups passed to `--split_chains` must be pairwise
/// disjoint; the binary rejects overlapping identifiers at runtime, so the
/// overlap is caught here before a process is ever spawned. The groups are
/// only assignable through validating constructors.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeBindingConfig {
    /// Structure analysed via `--pdb`.
    pub pdb_path: PathBuf,
    split_part1: String,
    split_part2: String,
}

impl ComputeBindingConfig {
    /// Configuration with the binary's default `AB` / `C` chain split.
    pub fn new(pdb_path: impl Into<PathBuf>) -> Self {
        Self {
            pdb_path: pdb_path.into(),
            split_part1: "AB".to_string(),
            split_part2: "C".to_string(),
        }
    }

    /// Replaces the chain split, rejecting groups that share a chain.
    pub fn with_split_chains(
        mut self,
        part1: impl Into<String>,
        part2: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let part1 = part1.into();
        let part2 = part2.into();
        validate_disjoint(&part1, &part2)?;
        self.split_part1 = part1;
        self.split_part2 = part2;
        Ok(self)
    }

    pub fn split_chains(&self) -> (&str, &str) {
        (&self.split_part1, &self.split_part2)
    }
}

fn validate_disjoint(part1: &str, part2: &str) -> Result<(), ConfigError> {
    let first: BTreeSet<char> = part1.chars().collect();
    let overlapping: BTreeSet<char> = part2.chars().filter(|c| first.contains(c)).collect();
    if overlapping.is_empty() {
        return Ok(());
    }
    let overlap = overlapping
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(", ");
    Err(ConfigError::OverlappingChainGroups { overlap })
}

impl CommandConfig for ComputeBindingConfig {
    fn command(&self) -> &'static str {
        "ComputeBinding"
    }

    fn to_cli_args(&self) -> Result<Vec<String>, ConfigError> {
        let mut args = Vec::new();
        push_value(&mut args, "--command", self.command());
        push_path(&mut args, "--pdb", &self.pdb_path);
        push_value(
            &mut args,
            "--split_chains",
            format!("{},{}", self.split_part1, self.split_part2),
        );
        Ok(args)
    }
}
