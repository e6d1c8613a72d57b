pub mod types;

pub use types::{destination_fields, FieldDescriptor, FieldKind, FieldValue};

use std::collections::BTreeMap;

/// Raw values as collected from the form: flat keys plus dotted paths
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFields {
    values: BTreeMap<String, FieldValue>,
}

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a JSON object into dotted keys.
    /// `{"location": {"latitude": 1}}` becomes `location.latitude = 1`.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let mut fields = Self::new();
        fields.flatten_into("", value);
        fields
    }

    fn flatten_into(&mut self, prefix: &str, value: &serde_json::Value) {
        use serde_json::Value;

        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    self.flatten_into(&path, child);
                }
            }
            Value::Bool(b) => self.set(prefix, *b),
            Value::Number(n) => {
                if let Some(n) = n.as_f64() {
                    self.set(prefix, n);
                }
            }
            Value::String(s) => self.set(prefix, s.as_str()),
            Value::Null | Value::Array(_) => {}
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.values.remove(key)
    }

    /// Trimmed text, `None` when absent or blank
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(FieldValue::as_text)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(FieldValue::as_number)
    }

    /// Absent flags are `false`
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).map(FieldValue::as_flag).unwrap_or(false)
    }

    pub fn is_blank(&self, key: &str) -> bool {
        self.get(key).map(FieldValue::is_blank).unwrap_or(true)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Form state bound to a list of field descriptors
#[derive(Debug, Clone)]
pub struct FormState {
    descriptors: Vec<FieldDescriptor>,
    values: RawFields,
}

impl FormState {
    pub fn new(descriptors: Vec<FieldDescriptor>) -> Self {
        let values = Self::initial_values(&descriptors);
        Self {
            descriptors,
            values,
        }
    }

    /// The create-destination form
    pub fn destination() -> Self {
        Self::new(destination_fields())
    }

    fn initial_values(descriptors: &[FieldDescriptor]) -> RawFields {
        let mut values = RawFields::new();
        for descriptor in descriptors {
            if let Some(default) = &descriptor.default {
                values.set(descriptor.key, default.clone());
            }
        }
        values
    }

    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.set(key, value);
    }

    /// Merge a batch of raw values over the current ones
    pub fn fill(&mut self, fields: &RawFields) {
        for (key, value) in fields.iter() {
            self.values.set(key, value.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn values(&self) -> &RawFields {
        &self.values
    }

    /// Back to descriptor defaults
    pub fn reset(&mut self) {
        self.values = Self::initial_values(&self.descriptors);
    }

    /// Keys of required fields that are absent or unusable for their kind
    /// (blank, non-numeric, or not one of the choices), in form order
    pub fn missing_required(&self) -> Vec<String> {
        self.descriptors
            .iter()
            .filter(|d| d.required)
            .filter(|d| !self.values.get(d.key).map(|v| d.accepts(v)).unwrap_or(false))
            .map(|d| d.key.to_string())
            .collect()
    }

    pub fn is_pristine(&self) -> bool {
        self.values == Self::initial_values(&self.descriptors)
    }
}
