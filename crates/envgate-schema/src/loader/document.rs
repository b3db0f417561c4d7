//! Structural validation of schema documents.

use crate::descriptor::{Format, Kind, TypeDescriptor};
use crate::{SchemaBuilder, SchemaError};
use serde_json::{Map, Value};

/// Validate a document and translate it into a builder.
pub(super) fn builder_from_document(value: &Value) -> Result<SchemaBuilder, SchemaError> {
    let map = expect_object(value, "")?;
    ensure_allowed_keys(
        map,
        &[
            "$schema",
            "$id",
            "title",
            "description",
            "type",
            "required",
            "properties",
            "additionalProperties",
        ],
        "",
    )?;

    for key in ["$schema", "$id", "title", "description"] {
        if let Some(value) = map.get(key) {
            expect_string(value, key)?;
        }
    }
    if let Some(value) = map.get("type")
        && value.as_str() != Some("object")
    {
        return Err(invalid_field("type", "expected \"object\""));
    }
    if let Some(value) = map.get("additionalProperties") {
        expect_bool(value, "additionalProperties")?;
    }

    let properties = match map.get("properties") {
        Some(value) => expect_object(value, "properties")?,
        None => return Err(invalid_field("properties", "missing key")),
    };

    let required = match map.get("required") {
        Some(value) => string_array(value, "required")?,
        None => Vec::new(),
    };
    for (idx, name) in required.iter().enumerate() {
        if !properties.contains_key(*name) {
            return Err(invalid_field(
                &format!("required[{idx}]"),
                "unknown property",
            ));
        }
    }

    let mut builder = SchemaBuilder::new();
    for (name, property) in properties {
        let path = join_path("properties", name);
        let mut descriptor = descriptor_from_property(property, &path, true)?;
        if !required.contains(&name.as_str()) {
            descriptor = descriptor.optional();
        }
        builder = builder.field(name.clone(), descriptor);
    }
    Ok(builder)
}

/// Translate one property block. Array items may not declare defaults.
fn descriptor_from_property(
    value: &Value,
    path: &str,
    allow_default: bool,
) -> Result<TypeDescriptor, SchemaError> {
    let map = expect_object(value, path)?;
    ensure_allowed_keys(
        map,
        &[
            "type",
            "default",
            "description",
            "minimum",
            "maximum",
            "minLength",
            "maxLength",
            "pattern",
            "enum",
            "format",
            "items",
            "separator",
        ],
        path,
    )?;

    let type_path = join_path(path, "type");
    let type_name = match map.get("type") {
        Some(value) => expect_string(value, &type_path)?,
        None => return Err(invalid_field(&type_path, "missing key")),
    };

    let mut descriptor = match type_name {
        "string" => TypeDescriptor::string(),
        "number" => TypeDescriptor::number(),
        "integer" => TypeDescriptor::integer(),
        "boolean" => TypeDescriptor::boolean(),
        "json" | "object" => TypeDescriptor::json(),
        "array" => {
            let items_path = join_path(path, "items");
            let items = match map.get("items") {
                Some(value) => descriptor_from_property(value, &items_path, false)?,
                None => TypeDescriptor::string(),
            };
            if matches!(items.kind(), Kind::Array { .. }) {
                return Err(invalid_field(&items_path, "nested arrays are not supported"));
            }
            TypeDescriptor::array(items)
        }
        _ => return Err(invalid_field(&type_path, "unknown type")),
    };

    if type_name != "array" {
        for key in ["items", "separator"] {
            if map.contains_key(key) {
                return Err(invalid_field(&join_path(path, key), "only valid for arrays"));
            }
        }
    }
    if let Some(value) = map.get("separator") {
        descriptor = descriptor.separator(expect_string(value, &join_path(path, "separator"))?);
    }
    if let Some(value) = map.get("default") {
        if !allow_default {
            return Err(invalid_field(
                &join_path(path, "default"),
                "defaults are not allowed here",
            ));
        }
        descriptor = descriptor.default(value.clone());
    }
    if let Some(value) = map.get("description") {
        descriptor = descriptor.description(expect_string(value, &join_path(path, "description"))?);
    }
    if let Some(value) = map.get("minimum") {
        descriptor = descriptor.minimum(expect_f64(value, &join_path(path, "minimum"))?);
    }
    if let Some(value) = map.get("maximum") {
        descriptor = descriptor.maximum(expect_f64(value, &join_path(path, "maximum"))?);
    }
    if let Some(value) = map.get("minLength") {
        descriptor = descriptor.min_length(expect_usize(value, &join_path(path, "minLength"))?);
    }
    if let Some(value) = map.get("maxLength") {
        descriptor = descriptor.max_length(expect_usize(value, &join_path(path, "maxLength"))?);
    }
    if let Some(value) = map.get("pattern") {
        descriptor = descriptor.pattern(expect_string(value, &join_path(path, "pattern"))?);
    }
    if let Some(value) = map.get("enum") {
        let enum_path = join_path(path, "enum");
        let values = expect_array(value, &enum_path)?;
        if values.is_empty() {
            return Err(invalid_field(&enum_path, "expected at least one value"));
        }
        descriptor = descriptor.one_of(values.iter().cloned());
    }
    if let Some(value) = map.get("format") {
        let format_path = join_path(path, "format");
        let format: Format = expect_string(value, &format_path)?
            .parse()
            .map_err(|message: String| invalid_field(&format_path, &message))?;
        descriptor = descriptor.format(format);
    }

    Ok(descriptor)
}

/// Expect a JSON object or return a typed error.
fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, SchemaError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(invalid_field(path, "expected object")),
    }
}

/// Expect a JSON array or return a typed error.
fn expect_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, SchemaError> {
    match value {
        Value::Array(arr) => Ok(arr),
        _ => Err(invalid_field(path, "expected array")),
    }
}

/// Expect a JSON string or return a typed error.
fn expect_string<'a>(value: &'a Value, path: &str) -> Result<&'a str, SchemaError> {
    value
        .as_str()
        .ok_or_else(|| invalid_field(path, "expected string"))
}

/// Expect a JSON boolean or return a typed error.
fn expect_bool(value: &Value, path: &str) -> Result<bool, SchemaError> {
    value
        .as_bool()
        .ok_or_else(|| invalid_field(path, "expected bool"))
}

/// Expect a JSON number or return a typed error.
fn expect_f64(value: &Value, path: &str) -> Result<f64, SchemaError> {
    value
        .as_f64()
        .ok_or_else(|| invalid_field(path, "expected number"))
}

/// Expect a non-negative JSON integer or return a typed error.
fn expect_usize(value: &Value, path: &str) -> Result<usize, SchemaError> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| invalid_field(path, "expected non-negative integer"))
}

/// Validate that a value is an array of strings.
fn string_array<'a>(value: &'a Value, path: &str) -> Result<Vec<&'a str>, SchemaError> {
    let arr = expect_array(value, path)?;
    arr.iter()
        .enumerate()
        .map(|(idx, entry)| {
            entry
                .as_str()
                .ok_or_else(|| invalid_field(&format!("{path}[{idx}]"), "expected string"))
        })
        .collect()
}

/// Ensure an object contains only allowed keys.
fn ensure_allowed_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
    path: &str,
) -> Result<(), SchemaError> {
    for key in map.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(invalid_field(&join_path(path, key), "unknown key"));
        }
    }
    Ok(())
}

/// Join nested paths for better error messages.
fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Build a structured invalid-field error.
fn invalid_field(path: &str, message: &str) -> SchemaError {
    let normalized_path = if path.is_empty() { "root" } else { path };
    SchemaError::InvalidField {
        path: normalized_path.to_string(),
        message: message.to_string(),
    }
}
