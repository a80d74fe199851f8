//! Typed configuration for the UniDesign command-line surface.
//!
//! Each external command gets one immutable configuration type that compiles
//! into an ordered argument vector via [`CommandConfig::to_cli_args`].
//! Compilation is pure: it validates the configuration and renders text, and
//! never touches the filesystem. Absent optional fields emit no flag at all,
//! so the binary applies its own defaults.

mod binding;
mod design;
mod ligand;
mod stability;

pub use binding::ComputeBindingConfig;
pub use design::{DesignMode, InitRotamerType, ProteinDesignConfig};
pub use ligand::MakeLigParamConfig;
pub use stability::ComputeStabilityConfig;

use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{flag} must be strictly positive (got {value})")]
    NonPositive { flag: &'static str, value: i32 },

    #[error("split_chains groups must be disjoint; overlapping chain(s): {overlap}")]
    OverlappingChainGroups { overlap: String },

    #[error("exactly three atom names are required for init_3atoms (got {count})")]
    AtomTripletArity { count: usize },

    #[error("the --prefix argument is managed by the runner and cannot be supplied manually")]
    ReservedPrefix,
}

/// Implemented by configuration types that render UniDesign CLI arguments.
pub trait CommandConfig {
    /// Value passed to the `--command` selector.
    fn command(&self) -> &'static str;

    /// Compiles the configuration into the argument vector appended after
    /// the binary, excluding the runner-owned `--prefix` pair.
    fn to_cli_args(&self) -> Result<Vec<String>, ConfigError>;
}

/// True when the caller tries to smuggle in the runner-owned prefix flag.
pub(crate) fn contains_prefix_flag(args: &[String]) -> bool {
    args.iter()
        .any(|arg| arg == "--prefix" || arg.starts_with("--prefix="))
}

pub(crate) fn push_value(args: &mut Vec<String>, flag: &str, value: impl Display) {
    args.push(flag.to_string());
    args.push(value.to_string());
}

pub(crate) fn push_opt(args: &mut Vec<String>, flag: &str, value: Option<impl Display>) {
    if let Some(value) = value {
        push_value(args, flag, value);
    }
}

pub(crate) fn push_path(args: &mut Vec<String>, flag: &str, path: &Path) {
    push_value(args, flag, path.display());
}

pub(crate) fn push_opt_path(args: &mut Vec<String>, flag: &str, path: &Option<PathBuf>) {
    if let Some(path) = path {
        push_path(args, flag, path);
    }
}

/// Boolean flags use UniDesign's literal two-token vocabulary, never
/// flag presence.
pub(crate) fn push_yes_no(args: &mut Vec<String>, flag: &str, value: Option<bool>) {
    if let Some(value) = value {
        push_value(args, flag, if value { "yes" } else { "no" });
    }
}

pub(crate) fn push_switch(args: &mut Vec<String>, flag: &str, enabled: bool) {
    if enabled {
        args.push(flag.to_string());
    }
}

pub(crate) fn ensure_positive(
    flag: &'static str,
    value: Option<i32>,
) -> Result<(), ConfigError> {
    match value {
        Some(value) if value <= 0 => Err(ConfigError::NonPositive { flag, value }),
        _ => Ok(()),
    }
}
