//! Type descriptors for individual environment variables.

use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Default separator used when decoding array variables.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Value kind a descriptor expects after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    String,
    Number,
    Integer,
    Boolean,
    /// Delimited list; each item is coerced with the item descriptor.
    Array {
        items: Box<TypeDescriptor>,
        separator: String,
    },
    /// Arbitrary JSON encoded as a string.
    Json,
}

impl Kind {
    /// Name used in schema documents and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Integer => "integer",
            Kind::Boolean => "boolean",
            Kind::Array { .. } => "array",
            Kind::Json => "json",
        }
    }
}

/// Well-known string formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Uri,
    Ipv4,
    Ipv6,
    Hostname,
}

impl Format {
    /// Whether the string satisfies this format.
    pub fn matches(self, value: &str) -> bool {
        match self {
            Format::Uri => url::Url::parse(value).is_ok(),
            Format::Ipv4 => value.parse::<Ipv4Addr>().is_ok(),
            Format::Ipv6 => value.parse::<Ipv6Addr>().is_ok(),
            Format::Hostname => is_hostname(value),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::Uri => "uri",
            Format::Ipv4 => "ipv4",
            Format::Ipv6 => "ipv6",
            Format::Hostname => "hostname",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uri" | "url" => Ok(Format::Uri),
            "ipv4" => Ok(Format::Ipv4),
            "ipv6" => Ok(Format::Ipv6),
            "hostname" => Ok(Format::Hostname),
            other => Err(format!("unknown format: {other}")),
        }
    }
}

/// RFC 1123 host name check.
fn is_hostname(value: &str) -> bool {
    if value.is_empty() || value.len() > 253 {
        return false;
    }
    value.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

/// Expected type and constraints of one variable.
///
/// Built with the kind constructors and chained setters:
///
/// ```
/// use envgate_schema::TypeDescriptor;
///
/// let port = TypeDescriptor::integer().default(3000).minimum(1.0).maximum(65535.0);
/// assert!(!port.is_optional());
/// ```
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    pub(crate) kind: Kind,
    pub(crate) default: Option<Value>,
    pub(crate) optional: bool,
    pub(crate) minimum: Option<f64>,
    pub(crate) maximum: Option<f64>,
    pub(crate) min_length: Option<usize>,
    pub(crate) max_length: Option<usize>,
    pub(crate) pattern: Option<String>,
    pub(crate) compiled_pattern: Option<Regex>,
    pub(crate) allowed: Option<Vec<Value>>,
    pub(crate) format: Option<Format>,
    pub(crate) description: Option<String>,
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.default == other.default
            && self.optional == other.optional
            && self.minimum == other.minimum
            && self.maximum == other.maximum
            && self.min_length == other.min_length
            && self.max_length == other.max_length
            && self.pattern == other.pattern
            && self.allowed == other.allowed
            && self.format == other.format
            && self.description == other.description
    }
}

impl TypeDescriptor {
    /// Descriptor of the given kind with no constraints.
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            default: None,
            optional: false,
            minimum: None,
            maximum: None,
            min_length: None,
            max_length: None,
            pattern: None,
            compiled_pattern: None,
            allowed: None,
            format: None,
            description: None,
        }
    }

    pub fn string() -> Self {
        Self::new(Kind::String)
    }

    pub fn number() -> Self {
        Self::new(Kind::Number)
    }

    pub fn integer() -> Self {
        Self::new(Kind::Integer)
    }

    pub fn boolean() -> Self {
        Self::new(Kind::Boolean)
    }

    pub fn json() -> Self {
        Self::new(Kind::Json)
    }

    /// Delimited list of `items`, split on `,` unless overridden.
    pub fn array(items: TypeDescriptor) -> Self {
        Self::new(Kind::Array {
            items: Box::new(items),
            separator: DEFAULT_SEPARATOR.to_string(),
        })
    }

    /// Override the array separator. No effect on non-array kinds.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        if let Kind::Array { separator: current, .. } = &mut self.kind {
            *current = separator.into();
        }
        self
    }

    /// Value used when the variable is absent. Stored as a native value.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Allow the variable to be absent.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    pub fn maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Regular expression string values must match. Compiled when the
    /// descriptor is added to a schema.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self.compiled_pattern = None;
        self
    }

    /// Restrict the value to one of the given literals.
    pub fn one_of<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn describe(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Check internal consistency and compile the pattern.
    pub(crate) fn prepare(&mut self, field: &str) -> Result<(), crate::SchemaError> {
        let invalid = |message: &str| crate::SchemaError::InvalidDescriptor {
            field: field.to_string(),
            message: message.to_string(),
        };

        if let (Some(min), Some(max)) = (self.minimum, self.maximum)
            && min > max
        {
            return Err(invalid("minimum exceeds maximum"));
        }
        if let (Some(min), Some(max)) = (self.min_length, self.max_length)
            && min > max
        {
            return Err(invalid("min_length exceeds max_length"));
        }
        if self.allowed.as_ref().is_some_and(Vec::is_empty) {
            return Err(invalid("enum must list at least one value"));
        }
        if let Some(pattern) = &self.pattern {
            let compiled = Regex::new(pattern).map_err(|source| crate::SchemaError::InvalidPattern {
                field: field.to_string(),
                source,
            })?;
            self.compiled_pattern = Some(compiled);
        }
        if let Kind::Array { items, separator } = &mut self.kind {
            if separator.is_empty() {
                return Err(invalid("array separator must not be empty"));
            }
            if matches!(items.kind, Kind::Array { .. }) {
                return Err(invalid("nested arrays are not supported"));
            }
            items.prepare(&format!("{field}[]"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostname_rules() {
        assert!(is_hostname("localhost"));
        assert!(is_hostname("api.example-1.com"));
        assert!(!is_hostname("-bad.example.com"));
        assert!(!is_hostname("bad..example"));
        assert!(!is_hostname("under_score.com"));
    }

    #[test]
    fn formats_parse_from_names() {
        assert_eq!("uri".parse::<Format>(), Ok(Format::Uri));
        assert_eq!("url".parse::<Format>(), Ok(Format::Uri));
        assert!("email".parse::<Format>().is_err());
    }

    #[test]
    fn separator_only_applies_to_arrays() {
        let list = TypeDescriptor::array(TypeDescriptor::string()).separator(";");
        assert_eq!(
            list.kind(),
            &Kind::Array {
                items: Box::new(TypeDescriptor::string()),
                separator: ";".to_string(),
            }
        );
        assert_eq!(TypeDescriptor::string().separator(";").kind(), &Kind::String);
    }

    #[test]
    fn prepare_rejects_inverted_bounds() {
        let mut descriptor = TypeDescriptor::number().minimum(10.0).maximum(1.0);
        let err = descriptor.prepare("PORT").unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn prepare_compiles_pattern() {
        let mut descriptor = TypeDescriptor::string().pattern("^v[0-9]+$");
        descriptor.prepare("VERSION").expect("prepare");
        assert!(descriptor.compiled_pattern.is_some());

        let mut broken = TypeDescriptor::string().pattern("(");
        assert!(broken.prepare("VERSION").is_err());
    }

    #[test]
    fn prepare_rejects_empty_enum() {
        let mut descriptor = TypeDescriptor::string().one_of(Vec::<String>::new());
        let err = descriptor.prepare("MODE").unwrap_err();
        assert!(matches!(err, crate::SchemaError::InvalidDescriptor { .. }));
        assert!(err.to_string().contains("MODE"));

        let mut items = TypeDescriptor::array(TypeDescriptor::string().one_of(Vec::<String>::new()));
        assert!(items.prepare("MODES").is_err());
    }
}
