//! Raw sources, dotenv merging, reference expansion, and prefix filtering.

use crate::EnvError;
use log::{debug, warn};
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Default dotenv file name, resolved against the working directory.
pub const DEFAULT_DOTENV_FILE: &str = ".env";

/// `\$`, `${NAME}`, or `$NAME`.
const REFERENCE_PATTERN: &str = r"\\\$|\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)";

/// Where raw values are read from.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Source {
    /// The live process environment, read at load time.
    #[default]
    Process,
    /// An injected mapping. Values may be any JSON value.
    Map(Map<String, Value>),
}

impl Source {
    /// Build a mapping source from key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Source::Map(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Snapshot the source. The source itself is never modified.
    pub fn read(&self) -> Map<String, Value> {
        match self {
            Source::Process => std::env::vars_os()
                .map(|(key, value)| {
                    (
                        key.to_string_lossy().into_owned(),
                        Value::String(value.to_string_lossy().into_owned()),
                    )
                })
                .collect(),
            Source::Map(map) => map.clone(),
        }
    }
}

/// Which dotenv file to merge beneath the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dotenv {
    /// `.env` in the working directory; silently skipped when missing.
    Default,
    /// A specific file; missing files are an error.
    Path(PathBuf),
}

/// Add dotenv entries for keys `raw` does not define. Returns how many
/// entries were added.
pub(crate) fn merge_dotenv(raw: &mut Map<String, Value>, dotenv: &Dotenv) -> Result<usize, EnvError> {
    let (path, required) = match dotenv {
        Dotenv::Default => (Path::new(DEFAULT_DOTENV_FILE), false),
        Dotenv::Path(path) => (path.as_path(), true),
    };

    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(err) if err.not_found() && !required => {
            debug!("dotenv file missing; skipping (path={})", path.display());
            return Ok(0);
        }
        Err(err) => return Err(err.into()),
    };

    let mut added = 0;
    for entry in entries {
        let (key, value) = entry?;
        if !raw.contains_key(&key) {
            raw.insert(key, Value::String(value));
            added += 1;
        }
    }
    debug!("merged dotenv file (path={}, added={added})", path.display());
    Ok(added)
}

/// Expand `${NAME}` and `$NAME` references in string values against the
/// unexpanded mapping. Unknown names expand to the empty string.
pub(crate) fn expand_references(raw: &mut Map<String, Value>) {
    let Ok(regex) = Regex::new(REFERENCE_PATTERN) else {
        warn!("reference pattern failed to compile; skipping expansion");
        return;
    };
    let lookup = raw.clone();
    for value in raw.values_mut() {
        let Value::String(text) = value else {
            continue;
        };
        if !text.contains('$') {
            continue;
        }
        let expanded = regex
            .replace_all(text.as_str(), |caps: &Captures<'_>| {
                let Some(name) = caps.get(1).or_else(|| caps.get(2)) else {
                    return "$".to_string();
                };
                match lookup.get(name.as_str()) {
                    Some(Value::String(found)) => found.clone(),
                    Some(Value::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                }
            })
            .into_owned();
        *text = expanded;
    }
}

/// Keep keys starting with `prefix`, with the prefix removed. An absent or
/// empty prefix returns the mapping unchanged. Later keys overwrite earlier
/// ones on collision.
pub(crate) fn filter_prefix(raw: Map<String, Value>, prefix: Option<&str>) -> Map<String, Value> {
    let Some(prefix) = prefix.filter(|prefix| !prefix.is_empty()) else {
        return raw;
    };
    let mut filtered = Map::new();
    for (key, value) in raw {
        if let Some(stripped) = key.strip_prefix(prefix) {
            filtered.insert(stripped.to_string(), value);
        }
    }
    filtered
}
