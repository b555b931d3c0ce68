//! Error types for the parity check.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Parity check errors.
#[derive(Debug, thiserror::Error)]
pub enum ParityError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot read fixtures at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed fixtures in {path}: {source}")]
    Fixture {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results with ParityError.
pub type ParityResult<T> = Result<T, ParityError>;
