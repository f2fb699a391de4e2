use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

/// A listing as received from the projects API, after schema validation.
///
/// Only ever produced by [`crate::schema`]. Optional collections are already
/// defaulted to empty and the price is already numeric; the floor-plan id and
/// the absent agent are still in their wire form.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExternalListing {
    pub id: String,
    pub name: String,
    pub location: String,
    pub description: String,
    pub full_description: String,
    pub about_text: String,
    pub image: String,
    pub gallery: Vec<String>,
    pub price: Decimal,
    pub property_type: String,
    pub size: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub status: String,
    pub tags: Vec<String>,
    pub features: Vec<String>,
    pub amenities: Vec<String>,
    pub nearby_amenities: Vec<String>,
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<ExternalAgent>,
    #[serde(rename = "floorPlans")]
    pub floor_plans: Vec<ExternalFloorPlan>,
}

/// Agent sub-record of an [`ExternalListing`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExternalAgent {
    pub name: String,
    pub title: String,
    pub phone: String,
    pub email: String,
    pub image: Option<String>,
}

/// Floor-plan sub-record of an [`ExternalListing`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExternalFloorPlan {
    pub id: FloorPlanId,
    pub name: String,
    pub image: String,
    pub size: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub description: String,
}

/// Floor-plan identifier as sent by the backend: either a string or a number.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FloorPlanId {
    Text(String),
    Number(serde_json::Number),
}

impl FloorPlanId {
    /// Canonical string form: `7` and `"7"` both become `"7"`.
    pub fn into_string(self) -> String {
        match self {
            FloorPlanId::Text(text) => text,
            FloorPlanId::Number(number) => number.to_string(),
        }
    }
}

impl fmt::Display for FloorPlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloorPlanId::Text(text) => f.write_str(text),
            FloorPlanId::Number(number) => write!(f, "{}", number),
        }
    }
}

impl From<&str> for FloorPlanId {
    fn from(value: &str) -> Self {
        FloorPlanId::Text(value.to_string())
    }
}

impl From<u64> for FloorPlanId {
    fn from(value: u64) -> Self {
        FloorPlanId::Number(value.into())
    }
}
