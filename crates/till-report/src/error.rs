//! # CLI Error Types
//!
//! Everything that can stop a `till-report` run.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │      Input      │  │        Report           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Io             │  │  Report(ReportError)    │ │
//! │  │  ConfigLoad     │  │                 │  │  Output                 │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;
use till_core::ReportError;

/// Result type alias for the command-line front end.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration values that load but make no sense.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Input Errors
    // =========================================================================
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Report Errors
    // =========================================================================
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Rendering the result failed.
    #[error("Failed to write output: {0}")]
    Output(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::ConfigLoadFailed(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

impl From<std::fmt::Error> for CliError {
    fn from(err: std::fmt::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

impl CliError {
    /// Wraps an I/O failure with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CliError::InvalidConfig(_)
                | CliError::ConfigLoadFailed(_)
                | CliError::Report(ReportError::Validation(_))
        )
    }

    /// Process exit code: 2 for configuration, 3 for unreadable input, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_config_error() {
            return 2;
        }
        match self {
            CliError::Io { .. } => 3,
            _ => 1,
        }
    }
}
