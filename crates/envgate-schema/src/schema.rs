//! Schema: the authoritative set of variables and their descriptors.

use crate::check::{self, ValueError};
use crate::descriptor::TypeDescriptor;
use crate::stage::{self, Stage};
use crate::SchemaError;
use log::trace;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Mapping from variable name to descriptor.
///
/// Descriptors are validated and their patterns compiled when the schema is
/// built, so a `Schema` value is always usable.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    fields: BTreeMap<String, TypeDescriptor>,
}

impl Schema {
    /// Start building a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Descriptor for a variable, if declared.
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.fields.get(name)
    }

    /// Declared variable names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &TypeDescriptor)> {
        self.fields.iter().map(|(name, d)| (name.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false; empty schemas are rejected at build time.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Run `stages` in order over `values` and return the result.
    pub fn transform(&self, stages: &[Stage], mut values: Map<String, Value>) -> Map<String, Value> {
        for step in stages {
            match step {
                Stage::Clean => values.retain(|key, _| self.fields.contains_key(key)),
                Stage::Default => {
                    for (name, descriptor) in &self.fields {
                        if let Some(value) = stage::apply_default(descriptor, values.get(name)) {
                            values.insert(name.clone(), value);
                        }
                    }
                }
                Stage::Decode => self.map_fields(&mut values, stage::decode),
                Stage::Convert => self.map_fields(&mut values, stage::convert),
            }
            trace!("applied {step} stage (keys={})", values.len());
        }
        values
    }

    /// Whether `values` satisfies every descriptor.
    pub fn check(&self, values: &Map<String, Value>) -> bool {
        self.errors(values).is_empty()
    }

    /// Every violation in `values`, in field order.
    pub fn errors(&self, values: &Map<String, Value>) -> Vec<ValueError> {
        let mut errors = Vec::new();
        for (name, descriptor) in &self.fields {
            check::check_field(name, descriptor, values.get(name), &mut errors);
        }
        errors
    }

    fn map_fields(
        &self,
        values: &mut Map<String, Value>,
        apply: fn(&TypeDescriptor, Value) -> Value,
    ) {
        for (name, descriptor) in &self.fields {
            if let Some(value) = values.remove(name) {
                values.insert(name.clone(), apply(descriptor, value));
            }
        }
    }
}

/// Builder for assembling a [`Schema`] in code.
#[derive(Debug, Default, Clone)]
pub struct SchemaBuilder {
    fields: BTreeMap<String, TypeDescriptor>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable. Declaring the same name again replaces it.
    pub fn field(mut self, name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        self.fields.insert(name.into(), descriptor);
        self
    }

    /// Validate descriptors and finalize the schema.
    pub fn build(self) -> Result<Schema, SchemaError> {
        if self.fields.is_empty() {
            return Err(SchemaError::Empty);
        }
        let mut fields = self.fields;
        for (name, descriptor) in &mut fields {
            descriptor.prepare(name)?;
        }
        Ok(Schema { fields })
    }
}
