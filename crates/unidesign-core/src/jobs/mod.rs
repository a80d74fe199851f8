//! Job facades: one thin composition per UniDesign command.
//!
//! Each facade compiles its configuration, executes it with workspace
//! persistence forced on (the workspace has to survive long enough for
//! artifact discovery), declares which output files the command may produce,
//! delegates relocation to the artifact resolver, and hands back a result
//! bundle with an idempotent `close()`. Facades never interpret artifact
//! content; they only know the filenames a command kind can write.

mod design;
mod energy;
mod ligand;

pub use design::{ProteinDesignJob, ProteinDesignResult};
pub use energy::{BindingJob, BindingResult, StabilityJob, StabilityResult};
pub use ligand::{LigandParamJob, LigandParamResult};

use std::collections::HashMap;
use std::time::Duration;

use crate::runner::RunOptions;

/// Options shared by every job facade.
#[derive(Debug, Clone, Default)]
pub struct JobOptions {
    /// Retain the full execution workspace instead of copying the produced
    /// artifacts into a fresh directory.
    pub keep_workspace: bool,
    /// Per-call environment overrides.
    pub env: HashMap<String, String>,
    /// Optional wall-clock limit for the external process.
    pub timeout: Option<Duration>,
}

impl JobOptions {
    pub(crate) fn run_options(&self) -> RunOptions {
        RunOptions {
            env: self.env.clone(),
            // keep_workspace governs post-resolution retention only; the raw
            // workspace always survives until the resolver has seen it.
            persist_workspace: true,
            timeout: self.timeout,
        }
    }
}
