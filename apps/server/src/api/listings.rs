use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use bessa_catalog::{AmenityKind, CatalogFacets, Listing, ListingFilter};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Query string of the catalog page.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    location: Option<String>,
    property_type: Option<String>,
    min_bedrooms: Option<u32>,
    status: Option<String>,
    min_price: Option<String>,
    max_price: Option<String>,
    /// Comma-separated amenity names.
    amenities: Option<String>,
}

impl TryFrom<ListingQuery> for ListingFilter {
    type Error = ApiError;

    fn try_from(query: ListingQuery) -> Result<Self, Self::Error> {
        let amenities = query
            .amenities
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(AmenityKind::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ApiError::BadRequest)?;

        Ok(ListingFilter {
            location: query.location,
            property_type: query.property_type,
            min_bedrooms: query.min_bedrooms,
            status: query.status,
            min_price: parse_price("minPrice", query.min_price)?,
            max_price: parse_price("maxPrice", query.max_price)?,
            amenities,
        })
    }
}

fn parse_price(name: &str, value: Option<String>) -> ApiResult<Option<Decimal>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Decimal::from_str(raw)
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("Invalid {}: {}", name, raw))),
    }
}

async fn list_listings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListingQuery>,
) -> ApiResult<Json<Vec<Listing>>> {
    let filter = ListingFilter::try_from(query)?;
    let listings = state.queries.fetch_all().await?;
    Ok(Json(filter.apply(&listings)))
}

async fn get_facets(State(state): State<Arc<AppState>>) -> ApiResult<Json<CatalogFacets>> {
    let listings = state.queries.fetch_all().await?;
    Ok(Json(CatalogFacets::from_listings(&listings)))
}

async fn get_listing(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Listing>> {
    let listing = state
        .queries
        .fetch_one(Some(&id))
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(listing.as_ref().clone()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/listings", get(list_listings))
        .route("/listings/facets", get(get_facets))
        .route("/listings/{id}", get(get_listing))
}
