//! Staged transforms applied to a raw mapping before it is checked.

use crate::descriptor::{Kind, TypeDescriptor};
use serde_json::{Number, Value};
use std::fmt;

/// One step of the transform pipeline.
///
/// Stages run in the order they are passed to [`crate::Schema::transform`].
/// Loaders use [`Stage::PIPELINE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Drop keys the schema does not declare.
    Clean,
    /// Fill absent keys from declared defaults.
    Default,
    /// Decode structured string encodings (lists, JSON).
    Decode,
    /// Coerce scalar representations to the declared kind.
    Convert,
}

impl Stage {
    /// Clean, then defaults, then decoding, then conversion.
    pub const PIPELINE: [Stage; 4] = [Stage::Clean, Stage::Default, Stage::Decode, Stage::Convert];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Clean => "clean",
            Stage::Default => "default",
            Stage::Decode => "decode",
            Stage::Convert => "convert",
        };
        f.write_str(name)
    }
}

pub(crate) fn apply_default(descriptor: &TypeDescriptor, slot: Option<&Value>) -> Option<Value> {
    match slot {
        Some(_) => None,
        None => descriptor.default.clone(),
    }
}

/// Decode string encodings of structured kinds. Non-string values and
/// undecodable text pass through unchanged.
pub(crate) fn decode(descriptor: &TypeDescriptor, value: Value) -> Value {
    match (&descriptor.kind, value) {
        (Kind::Array { separator, .. }, Value::String(text)) => {
            if text.trim().is_empty() {
                return Value::Array(Vec::new());
            }
            Value::Array(
                text.split(separator.as_str())
                    .map(|part| Value::String(part.trim().to_string()))
                    .collect(),
            )
        }
        (Kind::Json, Value::String(text)) => {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        }
        (_, value) => value,
    }
}

/// Coerce a value towards the descriptor's kind. Values that cannot be
/// represented are returned as given so the checker can report them.
pub(crate) fn convert(descriptor: &TypeDescriptor, value: Value) -> Value {
    match &descriptor.kind {
        Kind::String => match value {
            Value::Number(number) => Value::String(number.to_string()),
            Value::Bool(flag) => Value::String(flag.to_string()),
            other => other,
        },
        Kind::Number => match value {
            Value::String(text) => parse_number(&text).unwrap_or(Value::String(text)),
            Value::Bool(flag) => Value::from(u8::from(flag)),
            other => other,
        },
        Kind::Integer => match value {
            Value::String(text) => match parse_number(&text).and_then(integral) {
                Some(number) => number,
                None => Value::String(text),
            },
            Value::Number(number) => {
                let original = Value::Number(number);
                integral(original.clone()).unwrap_or(original)
            }
            Value::Bool(flag) => Value::from(u8::from(flag)),
            other => other,
        },
        Kind::Boolean => match value {
            Value::String(text) => parse_bool(&text).map_or(Value::String(text), Value::Bool),
            Value::Number(number) => match number.as_f64() {
                Some(n) if n == 1.0 => Value::Bool(true),
                Some(n) if n == 0.0 => Value::Bool(false),
                _ => Value::Number(number),
            },
            other => other,
        },
        Kind::Array { items, .. } => match value {
            Value::Array(entries) => Value::Array(
                entries
                    .into_iter()
                    .map(|entry| convert(items, entry))
                    .collect(),
            ),
            other => other,
        },
        Kind::Json => value,
    }
}

/// Parse numeric text, keeping integers integral.
fn parse_number(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(Value::from(n));
    }
    if let Ok(n) = trimmed.parse::<u64>() {
        return Some(Value::from(n));
    }
    let n = trimmed.parse::<f64>().ok()?;
    Number::from_f64(n).map(Value::Number)
}

/// Narrow a numeric value to an integer when it has no fractional part.
fn integral(value: Value) -> Option<Value> {
    let Value::Number(number) = &value else {
        return None;
    };
    if number.is_i64() || number.is_u64() {
        return Some(value);
    }
    let n = number.as_f64()?;
    if n.fract() != 0.0 {
        return None;
    }
    // i64::MAX and u64::MAX round up to 2^63 and 2^64 as f64.
    if n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Some(Value::from(n as i64))
    } else if n >= 0.0 && n < u64::MAX as f64 {
        Some(Value::from(n as u64))
    } else {
        None
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
