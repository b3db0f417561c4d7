//! Conformance checks of coerced values against descriptors.

use crate::descriptor::{Kind, TypeDescriptor};
use serde_json::Value;
use std::fmt;

/// A single violation reported by the checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueError {
    /// Field path; empty for the mapping itself.
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "root"
        } else {
            self.path.as_str()
        };
        write!(f, "{path}: {}", self.message)
    }
}

/// Check one schema field, pushing every violation found.
pub(crate) fn check_field(
    name: &str,
    descriptor: &TypeDescriptor,
    value: Option<&Value>,
    errors: &mut Vec<ValueError>,
) {
    match value {
        Some(value) => check_value(descriptor, value, name, errors),
        None if descriptor.optional => {}
        None => errors.push(invalid(name, "must have required property")),
    }
}

fn check_value(descriptor: &TypeDescriptor, value: &Value, path: &str, errors: &mut Vec<ValueError>) {
    if !kind_matches(&descriptor.kind, value) {
        errors.push(invalid(path, &format!("must be {}", descriptor.kind.name())));
        return;
    }

    if let Some(n) = value.as_f64() {
        if let Some(min) = descriptor.minimum
            && n < min
        {
            errors.push(invalid(path, &format!("must be >= {min}")));
        }
        if let Some(max) = descriptor.maximum
            && n > max
        {
            errors.push(invalid(path, &format!("must be <= {max}")));
        }
    }

    match value {
        Value::String(text) => {
            check_length(descriptor, text.chars().count(), "characters", path, errors);
            if let Some(pattern) = &descriptor.compiled_pattern
                && !pattern.is_match(text)
            {
                errors.push(invalid(
                    path,
                    &format!("must match pattern \"{}\"", pattern.as_str()),
                ));
            }
            if let Some(format) = descriptor.format
                && !format.matches(text)
            {
                errors.push(invalid(path, &format!("must match format \"{format}\"")));
            }
        }
        Value::Array(entries) => {
            check_length(descriptor, entries.len(), "items", path, errors);
            if let Kind::Array { items, .. } = &descriptor.kind {
                for (idx, entry) in entries.iter().enumerate() {
                    check_value(items, entry, &format!("{path}[{idx}]"), errors);
                }
            }
        }
        _ => {}
    }

    if let Some(allowed) = &descriptor.allowed
        && !allowed.contains(value)
    {
        errors.push(invalid(path, "must be equal to one of the allowed values"));
    }
}

fn check_length(
    descriptor: &TypeDescriptor,
    len: usize,
    unit: &str,
    path: &str,
    errors: &mut Vec<ValueError>,
) {
    if let Some(min) = descriptor.min_length
        && len < min
    {
        errors.push(invalid(path, &format!("must NOT have fewer than {min} {unit}")));
    }
    if let Some(max) = descriptor.max_length
        && len > max
    {
        errors.push(invalid(path, &format!("must NOT have more than {max} {unit}")));
    }
}

fn kind_matches(kind: &Kind, value: &Value) -> bool {
    match kind {
        Kind::String => value.is_string(),
        Kind::Number => value.is_number(),
        Kind::Integer => value.is_i64() || value.is_u64(),
        Kind::Boolean => value.is_boolean(),
        Kind::Array { .. } => value.is_array(),
        Kind::Json => true,
    }
}

fn invalid(path: &str, message: &str) -> ValueError {
    ValueError {
        path: path.to_string(),
        message: message.to_string(),
    }
}
