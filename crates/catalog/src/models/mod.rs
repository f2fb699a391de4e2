//! Listing models
//!
//! This module contains the two listing representations:
//! - `external` - The wire shape returned by the projects API (snake_case, loosely typed)
//! - `listing` - The normalized domain shape consumed by the presentation layer (camelCase)

mod external;
mod listing;

pub use external::{ExternalAgent, ExternalFloorPlan, ExternalListing, FloorPlanId};
pub use listing::{Agent, FloorPlan, GeoPosition, Listing};
