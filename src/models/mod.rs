use serde::{Deserialize, Serialize};

/// Continent a destination belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Continent {
    Asia,
    Europe,
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "South America")]
    SouthAmerica,
    Africa,
    Australia,
}

impl Continent {
    pub const OPTIONS: &'static [&'static str] = &[
        "Asia",
        "Europe",
        "North America",
        "South America",
        "Africa",
        "Australia",
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Asia" => Some(Self::Asia),
            "Europe" => Some(Self::Europe),
            "North America" | "NorthAmerica" => Some(Self::NorthAmerica),
            "South America" | "SouthAmerica" => Some(Self::SouthAmerica),
            "Africa" => Some(Self::Africa),
            "Australia" => Some(Self::Australia),
            _ => None,
        }
    }
}

/// Kind of accommodation offered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccommodationType {
    Apartment,
    Home,
}

impl AccommodationType {
    pub const OPTIONS: &'static [&'static str] = &["Apartment", "Home"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Apartment" => Some(Self::Apartment),
            "Home" => Some(Self::Home),
            _ => None,
        }
    }
}

/// Coarse price bucket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PriceRange {
    Low,
    Medium,
    High,
}

impl PriceRange {
    pub const OPTIONS: &'static [&'static str] = &["Low", "Medium", "High"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            _ => None,
        }
    }
}

/// Safety level shown on the listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SafetyLevel {
    High,
    Medium,
    Low,
}

impl SafetyLevel {
    pub const OPTIONS: &'static [&'static str] = &["High", "Medium", "Low"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "High" => Some(Self::High),
            "Medium" => Some(Self::Medium),
            "Low" => Some(Self::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClimateType {
    Mediterranean,
    Tropical,
    #[serde(rename = "Spring-like")]
    SpringLike,
    Temperate,
    Arid,
}

impl ClimateType {
    pub const OPTIONS: &'static [&'static str] =
        &["Mediterranean", "Tropical", "Spring-like", "Temperate", "Arid"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Mediterranean" => Some(Self::Mediterranean),
            "Tropical" => Some(Self::Tropical),
            "Spring-like" => Some(Self::SpringLike),
            "Temperate" => Some(Self::Temperate),
            "Arid" => Some(Self::Arid),
            _ => None,
        }
    }
}

/// Amenity flags; always carries all four keys
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Amenities {
    pub wifi: bool,
    pub kitchen: bool,
    pub ac: bool,
    pub workspace: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Climate {
    #[serde(rename = "type")]
    pub kind: Option<ClimateType>,
    /// Average temperature in °C
    pub temperature: Option<f64>,
    /// Relative humidity in percent
    pub humidity: Option<f64>,
    pub season_best: String,
}

/// Coordinates of a destination
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct VisaInfo {
    pub visa_type: String,
    pub visa_duration: String,
}

/// Canonical destination record as sent to the backend.
///
/// Every field defaults so that listings created by older forms, which lack
/// some of these keys, still deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DestinationRecord {
    pub name: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub continent: Option<Continent>,
    pub description: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AccommodationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_month: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_link: Option<String>,
    pub avg_living_cost: f64,
    pub currency: String,
    /// Download speed in Mbps
    pub wifi_speed: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coworking_spaces: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_index: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_seat: Option<f64>,
    pub amenities: Amenities,
    pub climate: Climate,
    pub location: Location,
    pub visa_info: VisaInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety: Option<SafetyLevel>,
    pub images: Vec<String>,
    /// Mirrors `images[0]` for consumers that expect a single image
    pub image: String,
    pub user_name: String,
    pub user_email: String,
    /// ISO-8601 UTC timestamp, millisecond precision
    pub created_date: String,
}

/// Backend reply to a create call
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedRecord {
    pub id: Option<String>,
    pub body: serde_json::Value,
}

impl PersistedRecord {
    pub fn from_body(body: serde_json::Value) -> Self {
        let id = ["_id", "insertedId", "id"]
            .iter()
            .find_map(|key| body.get(*key))
            .and_then(|value| match value {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Null => None,
                other => Some(other.to_string()),
            });

        Self { id, body }
    }
}

/// A destination as returned by the read API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationListing {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub record: DestinationRecord,
}

impl DestinationListing {
    /// Heading for list views: the title when present, the name otherwise
    pub fn heading(&self) -> &str {
        match self.record.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => &self.record.name,
        }
    }
}

/// Envelope of `GET /destinations`
#[derive(Debug, Clone, Deserialize)]
pub struct ListingEnvelope {
    #[serde(default)]
    pub data: Vec<DestinationListing>,
}
