//! Map adapters.
//!
//! Listings carry a single geographic position. Markers for a real map use it
//! directly; the static placeholder map needs it projected onto percentage
//! offsets over an image that covers a known geographic box.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{GeoPosition, Listing};

/// Marker shown for one listing on the catalog map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub id: String,
    pub name: String,
    pub location: String,
    pub price: Decimal,
    pub position: GeoPosition,
    pub image: String,
}

impl From<&Listing> for MapMarker {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id.clone(),
            name: listing.name.clone(),
            location: listing.location.clone(),
            price: listing.price,
            position: listing.map_position,
            image: listing.image.clone(),
        }
    }
}

impl MapMarker {
    pub fn from_listings(listings: &[Listing]) -> Vec<Self> {
        listings.iter().map(Self::from).collect()
    }
}

/// Placement over an overlay image, in percent of its width and height
/// measured from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayPosition {
    pub x: f64,
    pub y: f64,
}

/// Geographic box covered by an overlay image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayBounds {
    pub north: f64,
    pub south: f64,
    pub west: f64,
    pub east: f64,
}

impl OverlayBounds {
    pub fn new(north: f64, south: f64, west: f64, east: f64) -> Self {
        Self {
            north,
            south,
            west,
            east,
        }
    }

    pub fn contains(&self, position: GeoPosition) -> bool {
        position.lat <= self.north
            && position.lat >= self.south
            && position.lng >= self.west
            && position.lng <= self.east
    }

    /// Project `position` onto the overlay. `None` when it falls outside the
    /// box or the box is degenerate.
    pub fn project(&self, position: GeoPosition) -> Option<OverlayPosition> {
        let height = self.north - self.south;
        let width = self.east - self.west;
        if height <= 0.0 || width <= 0.0 || !self.contains(position) {
            return None;
        }

        Some(OverlayPosition {
            x: (position.lng - self.west) / width * 100.0,
            y: (self.north - position.lat) / height * 100.0,
        })
    }
}
