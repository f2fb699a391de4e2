//! Bessa Catalog Crate
//!
//! Listing ingestion for the Bessa property catalog: fetch raw listings from
//! the projects API, validate them against the listing contract, normalize
//! them into the shape the presentation layer consumes, and cache the results.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  Projects API    |  (snake_case JSON)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! | HttpListingSource|  (transport, JSON decoding)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! | Schema Validator |  -> ExternalListing | ShapeError
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |   Transformer    |  -> Listing (camelCase, total)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  ListingQueries  |  (per-key cache, freshness window, in-flight dedup)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`ExternalListing`] - Validated wire listing
//! - [`Listing`] - Normalized domain listing
//! - [`CatalogError`] - Fetch failure, tagged by [`ErrorKind`]
//! - [`ListingQueries`] - Cached listing accessors and observable handles
//! - [`ListingFilter`] / [`CatalogFacets`] - Catalog filtering
//! - [`MapMarker`] / [`OverlayBounds`] - Map adapters

pub mod cache;
pub mod client;
pub mod config;
pub mod errors;
pub mod filter;
pub mod map;
pub mod models;
pub mod query;
pub mod schema;
pub mod transform;

pub use cache::{CacheStats, FetchResult, QueryCache};
pub use client::{HttpListingSource, ListingSource};
pub use config::{CatalogConfig, DEFAULT_BASE_URL, DEFAULT_FRESHNESS, DEFAULT_REQUEST_TIMEOUT};
pub use errors::{CatalogError, ErrorKind, FieldIssue, ShapeError};
pub use filter::{AmenityKind, CatalogFacets, ListingFilter};
pub use map::{MapMarker, OverlayBounds, OverlayPosition};
pub use models::{
    Agent, ExternalAgent, ExternalFloorPlan, ExternalListing, FloorPlan, FloorPlanId,
    GeoPosition, Listing,
};
pub use query::{ListingQueries, QueryHandle, QueryKey, QueryState};
pub use schema::{validate_listing, validate_listings};
pub use transform::{transform_listing, transform_listings};
