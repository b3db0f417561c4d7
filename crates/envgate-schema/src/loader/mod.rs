//! Schema documents: JSON-Schema-shaped JSON5 files describing variables.
//!
//! ```json5
//! {
//!   type: "object",
//!   required: ["DATABASE_URL"],
//!   properties: {
//!     DATABASE_URL: { type: "string", format: "uri" },
//!     PORT: { type: "integer", default: 3000, minimum: 1 },
//!   },
//! }
//! ```
//!
//! Properties not listed in `required` are optional.

mod document;


use crate::{Schema, SchemaError};
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::path::Path;

impl Schema {
    /// Load a schema document from a JSON5 file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        info!("loading schema from path: {}", path.as_ref().display());
        let contents = fs::read_to_string(path)?;
        Self::from_json5_str(&contents)
    }

    /// Load a schema document from JSON5 contents.
    pub fn from_json5_str(contents: &str) -> Result<Self, SchemaError> {
        debug!("loading schema from raw contents (len={})", contents.len());
        let value: Value = json5::from_str(contents)?;
        Self::from_value(&value)
    }

    /// Build a schema from an already parsed document.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let builder = document::builder_from_document(value)?;
        let schema = builder.build()?;
        debug!("schema document loaded (fields={})", schema.len());
        Ok(schema)
    }
}
