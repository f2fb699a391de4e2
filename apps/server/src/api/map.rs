use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use bessa_catalog::{MapMarker, OverlayBounds, OverlayPosition};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Optional geographic box of a static overlay image.
#[derive(Debug, Default, Deserialize)]
struct OverlayQuery {
    north: Option<f64>,
    south: Option<f64>,
    west: Option<f64>,
    east: Option<f64>,
}

impl OverlayQuery {
    fn bounds(&self) -> ApiResult<Option<OverlayBounds>> {
        match (self.north, self.south, self.west, self.east) {
            (None, None, None, None) => Ok(None),
            (Some(north), Some(south), Some(west), Some(east)) => {
                Ok(Some(OverlayBounds::new(north, south, west, east)))
            }
            _ => Err(ApiError::BadRequest(
                "Overlay bounds need north, south, west and east".to_string(),
            )),
        }
    }
}

#[derive(Serialize)]
struct MarkerView {
    #[serde(flatten)]
    marker: MapMarker,
    #[serde(skip_serializing_if = "Option::is_none")]
    overlay: Option<OverlayPosition>,
}

async fn list_markers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OverlayQuery>,
) -> ApiResult<Json<Vec<MarkerView>>> {
    let bounds = query.bounds()?;
    let listings = state.queries.fetch_all().await?;
    let markers = MapMarker::from_listings(&listings)
        .into_iter()
        .map(|marker| MarkerView {
            overlay: bounds.and_then(|b| b.project(marker.position)),
            marker,
        })
        .collect();
    Ok(Json(markers))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/map/markers", get(list_markers))
}
