use crate::models::{AccommodationType, ClimateType, Continent, PriceRange, SafetyLevel};
use serde::{Deserialize, Serialize};

/// A single value collected from a form control
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Blank text counts as "not entered"
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(n) => n.is_nan(),
            FieldValue::Flag(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            FieldValue::Text(_) => None,
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Flag(b) => Some(b.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Checkbox semantics: `true`, `"true"` and `"on"` are checked
    pub fn as_flag(&self) -> bool {
        match self {
            FieldValue::Flag(b) => *b,
            FieldValue::Text(s) => matches!(s.trim(), "true" | "on"),
            FieldValue::Number(n) => *n != 0.0,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Kind of form control backing a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Number,
    Flag,
    Url,
    Choice(&'static [&'static str]),
}

/// Declarative description of one form field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Flat key, or dotted path for nested groups (`climate.temperature`)
    pub key: &'static str,
    pub required: bool,
    pub kind: FieldKind,
    pub default: Option<FieldValue>,
}

impl FieldDescriptor {
    pub const fn required(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            required: true,
            kind,
            default: None,
        }
    }

    pub const fn optional(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            required: false,
            kind,
            default: None,
        }
    }

    /// Whether `value` is usable for this field's kind: numbers must parse,
    /// choices must be one of the options, text must be non-blank
    pub fn accepts(&self, value: &FieldValue) -> bool {
        match self.kind {
            FieldKind::Flag => true,
            FieldKind::Text | FieldKind::Url => !value.is_blank(),
            FieldKind::Number => value.as_number().is_some(),
            FieldKind::Choice(options) => value
                .as_text()
                .map(|text| options.contains(&text.as_str()))
                .unwrap_or(false),
        }
    }

    /// Unchecked checkbox
    pub const fn flag(key: &'static str) -> Self {
        Self {
            key,
            required: false,
            kind: FieldKind::Flag,
            default: Some(FieldValue::Flag(false)),
        }
    }
}

/// Every field of the create-destination form
pub fn destination_fields() -> Vec<FieldDescriptor> {
    use FieldKind::*;

    vec![
        // Basic information
        FieldDescriptor::required("name", Text),
        FieldDescriptor::required("country", Text),
        FieldDescriptor::optional("title", Text),
        FieldDescriptor::required("continent", Choice(Continent::OPTIONS)),
        FieldDescriptor::required("description", Text),
        // Accommodation
        FieldDescriptor::optional("type", Choice(AccommodationType::OPTIONS)),
        FieldDescriptor::optional("pricePerMonth", Number),
        FieldDescriptor::optional("priceRange", Choice(PriceRange::OPTIONS)),
        FieldDescriptor::optional("bookingLink", Url),
        // Cost and connectivity
        FieldDescriptor::required("avgLivingCost", Number),
        FieldDescriptor::required("currency", Text),
        FieldDescriptor::required("wifiSpeed", Number),
        FieldDescriptor::optional("coworkingSpaces", Number),
        FieldDescriptor::optional("safetyIndex", Number),
        FieldDescriptor::optional("totalSeat", Number),
        // Amenities
        FieldDescriptor::flag("wifi"),
        FieldDescriptor::flag("kitchen"),
        FieldDescriptor::flag("ac"),
        FieldDescriptor::flag("workspace"),
        // Climate, safety and visa
        FieldDescriptor::optional("climate.type", Choice(ClimateType::OPTIONS)),
        FieldDescriptor::optional("climate.temperature", Number),
        FieldDescriptor::optional("climate.humidity", Number),
        FieldDescriptor::optional("climate.seasonBest", Text),
        FieldDescriptor::required("location.latitude", Number),
        FieldDescriptor::required("location.longitude", Number),
        FieldDescriptor::optional("visaInfo.visaType", Text),
        FieldDescriptor::optional("visaInfo.visaDuration", Text),
        FieldDescriptor::optional("safety", Choice(SafetyLevel::OPTIONS)),
    ]
}
