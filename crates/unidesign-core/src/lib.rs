//! # UniDesign Job Orchestration
//!
//! A typed orchestration layer for the pre-built `UniDesign` protein design
//! and energy scoring binary. The external tool's algorithms are opaque to
//! this crate; what it owns is everything around one invocation.
//!
//! The crate is layered leaf-first:
//!
//! - **[`config`]: The Argument Compiler.** Immutable per-command
//!   configuration values compiled into ordered argument vectors, with
//!   command-specific validation applied before any text is emitted.
//!
//! - **[`install`] / [`runner`]: The Execution Runner.** Discovery of a
//!   UniDesign installation, then synchronous invocation inside a disposable
//!   workspace with the static resource bundles linked in, environment
//!   layers merged, and a unique `--prefix` injected.
//!
//! - **[`artifacts`]: The Artifact Resolver.** Probing which of a command's
//!   possible output files actually exist and settling them into a single
//!   retained directory with an idempotent cleanup.
//!
//! - **[`jobs`]: The Job Facades.** One facade per command kind
//!   (design, stability, binding, ligand parameterization) tying the three
//!   layers together into a closable result bundle.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod install;
pub mod jobs;
pub mod runner;

mod workspace;

pub use artifacts::{Artifact, Cleanup};
pub use config::{
    CommandConfig, ComputeBindingConfig, ComputeStabilityConfig, ConfigError, DesignMode,
    InitRotamerType, MakeLigParamConfig, ProteinDesignConfig,
};
pub use error::{Error, Result};
pub use install::{DiscoveryError, Installation};
pub use jobs::{
    BindingJob, BindingResult, JobOptions, LigandParamJob, LigandParamResult, ProteinDesignJob,
    ProteinDesignResult, StabilityJob, StabilityResult,
};
pub use runner::{RunOptions, RunRecord, RunnerError, StaticResource, UniDesignRunner};
