use serde_json::{Map, Value};

/// String-valued mapping, as the process environment would provide.
pub fn string_map(pairs: &[(&str, &str)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
        .collect()
}
