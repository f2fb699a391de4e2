use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Geographic position in degrees, the only position shape the map consumes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPosition {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Listing agent. Always present; unknown fields are empty strings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub name: String,
    pub title: String,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlan {
    pub id: String,
    pub name: String,
    pub image: String,
    pub size: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub description: String,
}

/// Normalized property listing consumed by the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub name: String,
    pub location: String,
    pub description: String,
    pub full_description: String,
    pub about_text: String,
    pub image: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    pub price: Decimal,
    pub property_type: String,
    pub size: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub status: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub nearby_amenities: Vec<String>,
    #[serde(default)]
    pub floor_plans: Vec<FloorPlan>,
    pub map_position: GeoPosition,
    pub agent: Agent,
}

impl Listing {
    /// City part of the free-text location ("Algiers, Algeria" -> "Algiers").
    pub fn city(&self) -> &str {
        self.location
            .split(',')
            .next()
            .map(str::trim)
            .unwrap_or_default()
    }
}
