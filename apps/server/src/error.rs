use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bessa_catalog::{CatalogError, ErrorKind};
use bessa_leads::{FieldError, LeadError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Catalog(Arc<CatalogError>),
    #[error("{0}")]
    Lead(#[from] LeadError),
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
}

impl From<Arc<CatalogError>> for ApiError {
    fn from(err: Arc<CatalogError>) -> Self {
        ApiError::Catalog(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut fields = Vec::new();
        let (status, msg) = match &self {
            ApiError::Catalog(e) => match e.kind() {
                // Upstream said the listing does not exist.
                ErrorKind::Transport if e.status() == Some(404) => {
                    (StatusCode::NOT_FOUND, e.to_string())
                }
                ErrorKind::Transport | ErrorKind::MalformedJson | ErrorKind::Shape => {
                    (StatusCode::BAD_GATEWAY, e.to_string())
                }
            },
            ApiError::Lead(e) => match e {
                LeadError::Invalid(errors) => {
                    fields = errors.errors().to_vec();
                    (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
                }
                LeadError::Rejected { status, .. } if *status < 500 => {
                    (StatusCode::BAD_REQUEST, e.to_string())
                }
                LeadError::Rejected { .. } | LeadError::Transport { .. } => {
                    (StatusCode::BAD_GATEWAY, e.to_string())
                }
            },
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
            fields,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
