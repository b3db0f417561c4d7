//! Error reports built from checker violations.

use envgate_schema::ValueError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Path used for violations that concern the mapping as a whole.
pub const ROOT_PATH: &str = "root";

/// Field path to message, one entry per reported violation.
///
/// When several violations share a path the last one reported is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorReport {
    entries: BTreeMap<String, String>,
}

impl ErrorReport {
    /// Collect violations, normalizing the empty path to [`ROOT_PATH`].
    pub fn from_errors<'a>(errors: impl IntoIterator<Item = &'a ValueError>) -> Self {
        let mut entries = BTreeMap::new();
        for error in errors {
            let path = if error.path.is_empty() {
                ROOT_PATH.to_string()
            } else {
                error.path.clone()
            };
            entries.insert(path, error.message.clone());
        }
        Self { entries }
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(path, message)| (path.as_str(), message.as_str()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Multi-line diagnostic: a header, then `  <path>: <message>` per entry.
impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "environment validation failed:")?;
        for (path, message) in &self.entries {
            write!(f, "\n  {path}: {message}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn violation(path: &str, message: &str) -> ValueError {
        ValueError {
            path: path.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn empty_path_becomes_root() {
        let report = ErrorReport::from_errors(&[violation("", "must be object")]);
        assert_eq!(report.get("root"), Some("must be object"));
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn last_violation_per_path_wins() {
        let report = ErrorReport::from_errors(&[
            violation("TOKEN", "must NOT have fewer than 8 characters"),
            violation("TOKEN", "must match pattern \"^tok_\""),
        ]);
        assert_eq!(report.len(), 1);
        assert_eq!(report.get("TOKEN"), Some("must match pattern \"^tok_\""));
    }

    #[test]
    fn display_lists_one_entry_per_line() {
        let report = ErrorReport::from_errors(&[
            violation("PORT", "must be number"),
            violation("API_URL", "must have required property"),
        ]);
        assert_eq!(
            report.to_string(),
            "environment validation failed:\n  API_URL: must have required property\n  PORT: must be number"
        );
    }

    #[test]
    fn serializes_as_plain_mapping() {
        let report = ErrorReport::from_errors(&[violation("PORT", "must be number")]);
        assert_eq!(
            serde_json::to_value(&report).expect("json"),
            serde_json::json!({ "PORT": "must be number" })
        );
    }
}
