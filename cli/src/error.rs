#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use apidesc_core::AppError;
use derive_more::{Display, From};

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// Loading, querying or synthesis failed in the core.
    #[display("{}", _0)]
    Core(AppError),

    /// IO Error wrapper (writing to stdout).
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Output could not be serialized.
    #[display("JSON Error: {}", _0)]
    Json(serde_json::Error),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
