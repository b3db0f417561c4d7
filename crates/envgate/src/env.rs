//! The validated environment handed to request handlers.

use crate::EnvError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Coerced environment values keyed by schema field name.
///
/// An `Env` is produced even when validation failed under a non-fatal error
/// policy; [`Env::is_valid`] tells the two apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Env {
    values: Map<String, Value>,
    #[serde(skip)]
    valid: bool,
}

impl Env {
    pub(crate) fn new(values: Map<String, Value>, valid: bool) -> Self {
        Self { values, valid }
    }

    /// Whether the values passed the conformance check.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(Value::as_i64)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.values.get(key).and_then(Value::as_u64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }

    /// Decode the values into a typed struct.
    ///
    /// ```
    /// # use envgate::{EnvOptions, Source, load};
    /// # use envgate::schema::{Schema, TypeDescriptor};
    /// #[derive(serde::Deserialize)]
    /// struct Config {
    ///     #[serde(rename = "PORT")]
    ///     port: u16,
    /// }
    ///
    /// let schema = Schema::builder()
    ///     .field("PORT", TypeDescriptor::integer().default(3000))
    ///     .build()?;
    /// let env = load(&schema, &EnvOptions::new().with_source(Source::from_pairs([("PORT", "8080")])))?;
    /// let config: Config = env.deserialize()?;
    /// assert_eq!(config.port, 8080);
    /// # Ok::<(), envgate::EnvError>(())
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, EnvError> {
        Ok(serde_json::from_value(Value::Object(self.values.clone()))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    fn sample() -> Env {
        let Value::Object(values) = json!({
            "PORT": 8080,
            "DEBUG": true,
            "RATIO": 0.5,
            "NAME": "api",
        }) else {
            unreachable!()
        };
        Env::new(values, true)
    }

    #[test]
    fn typed_accessors() {
        let env = sample();
        assert_eq!(env.get_u64("PORT"), Some(8080));
        assert_eq!(env.get_i64("PORT"), Some(8080));
        assert_eq!(env.get_bool("DEBUG"), Some(true));
        assert_eq!(env.get_f64("RATIO"), Some(0.5));
        assert_eq!(env.get_str("NAME"), Some("api"));
        assert_eq!(env.get_str("PORT"), None);
        assert!(!env.contains_key("MISSING"));
        assert_eq!(env.keys().collect::<Vec<_>>(), vec!["DEBUG", "NAME", "PORT", "RATIO"]);
    }

    #[test]
    fn deserializes_into_struct() {
        #[derive(Debug, Deserialize, PartialEq)]
        #[serde(rename_all = "UPPERCASE")]
        struct Settings {
            port: u16,
            debug: bool,
            name: String,
        }

        let settings: Settings = sample().deserialize().expect("settings");
        assert_eq!(
            settings,
            Settings {
                port: 8080,
                debug: true,
                name: "api".to_string(),
            }
        );
    }

    #[test]
    fn deserialize_reports_type_errors() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Wrong {
            #[serde(rename = "NAME")]
            name: u16,
        }
        let err = sample().deserialize::<Wrong>().unwrap_err();
        assert!(matches!(err, EnvError::Decode(_)));
    }

    #[test]
    fn serializes_values_only() {
        let env = Env::new(Map::new(), false);
        assert_eq!(serde_json::to_value(&env).expect("json"), json!({}));
    }
}
