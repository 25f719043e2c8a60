//! CLI error types.

use fairpick_core::types::ParamsError;
use fairpick_optimiser::OptimiserError;
use fairpick_session::{SessionError, SnapshotError};
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid draw parameters
    #[error("Invalid parameters: {0}")]
    Params(#[from] ParamsError),

    /// Seed search failed
    #[error("Optimisation error: {0}")]
    Optimiser(#[from] OptimiserError),

    /// Draw session error
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Snapshot read, write or restore failed
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// No prepared session for the class
    #[error("No prepared session for class '{0}': run `fairpick prepare` first")]
    NotPrepared(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// CSV output failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
