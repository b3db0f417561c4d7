//! Error types for the environment loader.

use envgate_schema::SchemaError;
use thiserror::Error;

/// Errors returned by loader operations.
///
/// Validation failures are not errors: they are reported through the
/// configured [`crate::OnError`] policy.
#[derive(Debug, Error)]
pub enum EnvError {
    /// Schema construction or loading failed.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
    /// Reading or parsing a dotenv file failed.
    #[error("dotenv error: {0}")]
    Dotenv(#[from] dotenvy::Error),
    /// An option value is outside its accepted set.
    #[error("invalid option: {0}")]
    InvalidOption(String),
    /// A user callback returned an error.
    #[error("callback failed: {0:#}")]
    Callback(anyhow::Error),
    /// Converting the validated mapping into a typed value failed.
    #[error("failed to decode env: {0}")]
    Decode(#[from] serde_json::Error),
}
