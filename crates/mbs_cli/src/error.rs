//! CLI error type.

use mbs_core::types::ValuationError;
use thiserror::Error;

/// Errors surfaced to the user by `mbsval`.
#[derive(Debug, Error)]
pub enum CliError {
    /// The valuation rejected an input or failed numerically.
    #[error(transparent)]
    Valuation(#[from] ValuationError),

    /// The configuration file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    Config(String),

    /// A command-line argument is unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the rate-path CSV failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Rendering JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rendering TOML output failed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
