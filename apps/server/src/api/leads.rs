use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use bessa_leads::{ContactRequest, LandSubmission, LeadError, RecruitmentApplication, Validate};
use serde_json::{json, Value};

use crate::{error::ApiResult, main_lib::AppState};

type Accepted = (StatusCode, Json<Value>);

fn accepted() -> Accepted {
    (StatusCode::CREATED, Json(json!({ "status": "submitted" })))
}

async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ContactRequest>,
) -> ApiResult<Accepted> {
    form.validate().map_err(LeadError::from)?;
    state.leads.submit_contact(&form).await?;
    Ok(accepted())
}

async fn submit_application(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RecruitmentApplication>,
) -> ApiResult<Accepted> {
    form.validate().map_err(LeadError::from)?;
    state.leads.submit_application(&form).await?;
    Ok(accepted())
}

async fn submit_land(
    State(state): State<Arc<AppState>>,
    Json(form): Json<LandSubmission>,
) -> ApiResult<Accepted> {
    form.validate().map_err(LeadError::from)?;
    state.leads.submit_land(&form).await?;
    Ok(accepted())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/leads/contact", post(submit_contact))
        .route("/leads/recruitment", post(submit_application))
        .route("/leads/land", post(submit_land))
}
