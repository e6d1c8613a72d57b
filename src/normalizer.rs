use crate::form::RawFields;
use crate::identity::IdentityContext;
use crate::models::{
    AccommodationType, Amenities, Climate, ClimateType, Continent, DestinationRecord, Location,
    PriceRange, SafetyLevel, VisaInfo,
};
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;

/// Builds the nested destination record from raw form values
#[derive(Clone)]
pub struct Normalizer {
    identity: Arc<dyn IdentityContext>,
}

impl Normalizer {
    pub fn new(identity: Arc<dyn IdentityContext>) -> Self {
        Self { identity }
    }

    /// Normalize with `createdDate` set to the current instant
    pub fn normalize(&self, raw: &RawFields, image: &str) -> DestinationRecord {
        self.normalize_at(raw, image, Utc::now())
    }

    pub fn normalize_at(
        &self,
        raw: &RawFields,
        image: &str,
        now: DateTime<Utc>,
    ) -> DestinationRecord {
        let identity = self.identity.current();
        let choice = |key: &str| raw.text(key);
        // Checkboxes post flat keys; record-shaped input nests them under `amenities`
        let amenity = |key: &str| raw.flag(key) || raw.flag(&format!("amenities.{key}"));

        DestinationRecord {
            name: raw.text("name").unwrap_or_default(),
            country: raw.text("country").unwrap_or_default(),
            title: raw.text("title"),
            continent: choice("continent").and_then(|v| Continent::parse(&v)),
            description: raw.text("description").unwrap_or_default(),
            kind: choice("type").and_then(|v| AccommodationType::parse(&v)),
            price_per_month: raw.number("pricePerMonth"),
            price_range: choice("priceRange").and_then(|v| PriceRange::parse(&v)),
            booking_link: raw.text("bookingLink"),
            avg_living_cost: raw.number("avgLivingCost").unwrap_or_default(),
            currency: raw.text("currency").unwrap_or_default(),
            wifi_speed: raw.number("wifiSpeed").unwrap_or_default(),
            coworking_spaces: raw
                .number("coworkingSpaces")
                .map(f64::round)
                .filter(|n| (0.0..=u32::MAX as f64).contains(n))
                .map(|n| n as u32),
            safety_index: raw.number("safetyIndex"),
            total_seat: raw.number("totalSeat"),
            amenities: Amenities {
                wifi: amenity("wifi"),
                kitchen: amenity("kitchen"),
                ac: amenity("ac"),
                workspace: amenity("workspace"),
            },
            climate: Climate {
                kind: choice("climate.type").and_then(|v| ClimateType::parse(&v)),
                temperature: raw.number("climate.temperature"),
                humidity: raw.number("climate.humidity"),
                season_best: raw.text("climate.seasonBest").unwrap_or_default(),
            },
            location: Location {
                latitude: raw.number("location.latitude").unwrap_or_default(),
                longitude: raw.number("location.longitude").unwrap_or_default(),
            },
            visa_info: VisaInfo {
                visa_type: raw.text("visaInfo.visaType").unwrap_or_default(),
                visa_duration: raw.text("visaInfo.visaDuration").unwrap_or_default(),
            },
            safety: choice("safety").and_then(|v| SafetyLevel::parse(&v)),
            images: vec![image.to_string()],
            image: image.to_string(),
            user_name: identity.name,
            user_email: identity.email,
            created_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
