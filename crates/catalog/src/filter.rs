//! Client-side catalog filtering and filter facets.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Listing;

/// Amenity checkbox offered by the catalog filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmenityKind {
    Pool,
    Gym,
    Parking,
    Security,
}

impl AmenityKind {
    pub const ALL: [AmenityKind; 4] = [
        AmenityKind::Pool,
        AmenityKind::Gym,
        AmenityKind::Parking,
        AmenityKind::Security,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AmenityKind::Pool => "pool",
            AmenityKind::Gym => "gym",
            AmenityKind::Parking => "parking",
            AmenityKind::Security => "security",
        }
    }

    /// Lower-cased keywords that identify this amenity in free text.
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            AmenityKind::Pool => &["pool"],
            AmenityKind::Gym => &["gym", "fitness"],
            AmenityKind::Parking => &["parking"],
            AmenityKind::Security => &["security"],
        }
    }

    /// Whether any of `amenities` mentions this kind (case-insensitive).
    pub fn matches_any(&self, amenities: &[String]) -> bool {
        amenities.iter().any(|amenity| {
            let amenity = amenity.to_lowercase();
            self.keywords().iter().any(|kw| amenity.contains(kw))
        })
    }
}

impl FromStr for AmenityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pool" => Ok(AmenityKind::Pool),
            "gym" => Ok(AmenityKind::Gym),
            "parking" => Ok(AmenityKind::Parking),
            "security" => Ok(AmenityKind::Security),
            other => Err(format!("Unknown amenity: {}", other)),
        }
    }
}

/// Catalog filter. Unset criteria match everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListingFilter {
    /// Case-insensitive substring of the listing location.
    pub location: Option<String>,
    /// Case-insensitive property type.
    pub property_type: Option<String>,
    pub min_bedrooms: Option<u32>,
    /// Exact status label.
    pub status: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Every selected amenity must be offered.
    pub amenities: Vec<AmenityKind>,
}

impl ListingFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(location) = non_blank(&self.location) {
            if !listing
                .location
                .to_lowercase()
                .contains(&location.to_lowercase())
            {
                return false;
            }
        }

        if let Some(property_type) = non_blank(&self.property_type) {
            if listing.property_type.to_lowercase() != property_type.to_lowercase() {
                return false;
            }
        }

        if let Some(min) = self.min_bedrooms {
            if listing.bedrooms < min {
                return false;
            }
        }

        if let Some(status) = non_blank(&self.status) {
            if listing.status != status {
                return false;
            }
        }

        if let Some(min) = self.min_price {
            if listing.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if listing.price > max {
                return false;
            }
        }

        self.amenities
            .iter()
            .all(|kind| kind.matches_any(&listing.amenities))
    }

    /// Listings that satisfy every criterion, in their original order.
    pub fn apply(&self, listings: &[Listing]) -> Vec<Listing> {
        listings
            .iter()
            .filter(|listing| self.matches(listing))
            .cloned()
            .collect()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Distinct values offered by the filter dropdowns, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFacets {
    pub locations: Vec<String>,
    pub property_types: Vec<String>,
    pub statuses: Vec<String>,
}

impl CatalogFacets {
    pub fn from_listings(listings: &[Listing]) -> Self {
        let mut facets = Self::default();
        for listing in listings {
            push_unique(&mut facets.locations, listing.city());
            push_unique(&mut facets.property_types, &listing.property_type);
            push_unique(&mut facets.statuses, &listing.status);
        }
        facets
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}
