//! Staged pipeline behavior through the public API.

use envgate_schema::{Format, Schema, Stage, TypeDescriptor};
use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};

fn raw(pairs: &[(&str, &str)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
        .collect()
}

fn app_schema() -> Schema {
    Schema::builder()
        .field("PORT", TypeDescriptor::number().default(3000))
        .field("VERBOSE", TypeDescriptor::boolean().default(false))
        .field("API_URL", TypeDescriptor::string().format(Format::Uri))
        .field(
            "LOG_LEVEL",
            TypeDescriptor::string()
                .one_of(["error", "warn", "info", "debug"])
                .default("info"),
        )
        .build()
        .expect("schema")
}

#[test]
fn supplied_values_are_coerced() {
    let schema = app_schema();
    let values = schema.transform(
        &Stage::PIPELINE,
        raw(&[("PORT", "8080"), ("VERBOSE", "true"), ("API_URL", "https://api.test")]),
    );

    assert!(schema.check(&values));
    assert_eq!(
        Value::Object(values),
        json!({
            "PORT": 8080,
            "VERBOSE": true,
            "API_URL": "https://api.test",
            "LOG_LEVEL": "info",
        })
    );
}

#[test]
fn defaults_are_native_values() {
    let schema = app_schema();
    let values = schema.transform(&Stage::PIPELINE, raw(&[("API_URL", "https://api.test")]));
    assert_eq!(values.get("PORT"), Some(&json!(3000)));
    assert_eq!(values.get("VERBOSE"), Some(&json!(false)));
}

#[test]
fn default_then_convert_matches_supplied_string() {
    // A string default is converted exactly like a supplied value.
    let schema = Schema::builder()
        .field("WORKERS", TypeDescriptor::integer().default("4"))
        .build()
        .expect("schema");
    let defaulted = schema.transform(&Stage::PIPELINE, Map::new());
    let supplied = schema.transform(&Stage::PIPELINE, raw(&[("WORKERS", "4")]));
    assert_eq!(defaulted, supplied);
    assert_eq!(defaulted.get("WORKERS"), Some(&json!(4)));
}

#[test]
fn missing_required_field_is_an_error() {
    let schema = app_schema();
    let values = schema.transform(&Stage::PIPELINE, raw(&[("PORT", "1")]));
    assert!(!schema.check(&values));

    let errors = schema.errors(&values);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "API_URL");
    assert!(!errors[0].message.is_empty());
}

#[test]
fn unconvertible_values_survive_for_reporting() {
    let schema = app_schema();
    let values = schema.transform(
        &Stage::PIPELINE,
        raw(&[("PORT", "eighty"), ("API_URL", "https://api.test")]),
    );
    assert_eq!(values.get("PORT"), Some(&json!("eighty")));
    let messages: Vec<String> = schema.errors(&values).iter().map(ToString::to_string).collect();
    assert_eq!(messages, vec!["PORT: must be number".to_string()]);
}
