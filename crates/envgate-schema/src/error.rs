//! Error types for schema construction and schema file loading.

use thiserror::Error;

/// Errors returned while building or loading a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Reading a schema file failed.
    #[error("failed to read schema: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// Parsing a schema file failed.
    #[error("failed to parse schema: {0}")]
    ParseFailed(#[from] json5::Error),
    /// A pattern constraint is not a valid regular expression.
    #[error("invalid pattern for {field}: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },
    /// A specific field of a schema document failed validation.
    #[error("invalid schema at {path}: {message}")]
    InvalidField { path: String, message: String },
    /// A descriptor is internally inconsistent.
    #[error("invalid descriptor for {field}: {message}")]
    InvalidDescriptor { field: String, message: String },
    /// The schema declares no fields.
    #[error("schema must declare at least one field")]
    Empty,
}
