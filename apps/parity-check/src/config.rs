//! Parity check configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;

use godown_core::RoundingMode;

/// Parity check configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ParityConfig {
    /// Fixture file to replay
    pub fixtures_path: PathBuf,

    /// Rounding mode the backend was configured with
    pub rounding: RoundingMode,

    /// Stop at the first case that disagrees
    pub fail_fast: bool,
}

impl ParityConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fixtures_path = lookup("GODOWN_FIXTURES")
            .unwrap_or_else(|| "fixtures/parity.json".to_string());
        if fixtures_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("GODOWN_FIXTURES".to_string()));
        }

        let rounding = match lookup("GODOWN_ROUNDING") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue("GODOWN_ROUNDING".to_string()))?,
            None => RoundingMode::default(),
        };

        let fail_fast = lookup("GODOWN_FAIL_FAST")
            .unwrap_or_else(|| "false".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("GODOWN_FAIL_FAST".to_string()))?;

        Ok(ParityConfig {
            fixtures_path: PathBuf::from(fixtures_path),
            rounding,
            fail_fast,
        })
    }

    /// Replaces the fixture path, e.g. with a command-line argument.
    pub fn with_fixtures_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.fixtures_path = path.into();
        self
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
