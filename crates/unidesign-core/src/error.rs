use thiserror::Error;

use crate::config::ConfigError;
use crate::install::DiscoveryError;
use crate::runner::RunnerError;

pub type Result<T> = std::result::Result<T, Error>;

/// Umbrella error for the job facades and other high-level entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
