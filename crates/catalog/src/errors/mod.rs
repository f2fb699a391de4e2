//! Error types for the listing catalog.
//!
//! This module provides:
//! - [`CatalogError`]: the error returned by every fetch, validate or cache operation
//! - [`ErrorKind`]: the explicit tag callers switch on
//! - [`ShapeError`] / [`FieldIssue`]: structured schema validation failures

mod kind;
mod shape;

pub use kind::ErrorKind;
pub use shape::{FieldIssue, ShapeError};

use thiserror::Error;

/// Errors that can occur while fetching listings.
///
/// Nothing here is retried automatically. Each variant maps to exactly one
/// [`ErrorKind`] via [`kind`](Self::kind).
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The request could not be sent, timed out, or returned a non-success status.
    #[error("Request to {url} failed: {message}")]
    Transport {
        url: String,
        /// HTTP status, when the server answered at all.
        status: Option<u16>,
        message: String,
    },

    /// The body could not be parsed as JSON.
    #[error("Invalid JSON response from {url}: {message}")]
    MalformedJson { url: String, message: String },

    /// The body parsed but failed schema validation.
    #[error("Data from API doesn't match expected format: {0}")]
    Shape(#[from] ShapeError),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::MalformedJson { .. } => ErrorKind::MalformedJson,
            Self::Shape(_) => ErrorKind::Shape,
        }
    }

    /// HTTP status of a transport failure, if the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Field issues of a shape failure; empty for the other kinds.
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            Self::Shape(shape) => shape.issues(),
            _ => &[],
        }
    }

    pub(crate) fn transport(url: &str, err: reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(path: &str, reason: &str) -> CatalogError {
        CatalogError::Shape(ShapeError::new(vec![FieldIssue::new(path, reason)]))
    }

    #[test]
    fn test_transport_kind_and_status() {
        let error = CatalogError::Transport {
            url: "http://127.0.0.1:8000/projects/projects/".to_string(),
            status: Some(503),
            message: "HTTP 503 Service Unavailable".to_string(),
        };
        assert_eq!(error.kind(), ErrorKind::Transport);
        assert_eq!(error.status(), Some(503));
        assert!(error.issues().is_empty());
        assert!(!error.kind().is_shape_mismatch());
    }

    #[test]
    fn test_malformed_json_is_shape_mismatch_but_distinct() {
        let error = CatalogError::MalformedJson {
            url: "http://x/".to_string(),
            message: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(error.kind(), ErrorKind::MalformedJson);
        assert!(error.kind().is_shape_mismatch());
        assert_ne!(error.kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_shape_exposes_issues() {
        let error = shape("agent.email", "not a valid email address");
        assert_eq!(error.kind(), ErrorKind::Shape);
        assert_eq!(error.issues().len(), 1);
        assert_eq!(error.issues()[0].path, "agent.email");
    }

    #[test]
    fn test_error_display() {
        let error = shape("bedrooms", "expected an integer");
        assert_eq!(
            format!("{}", error),
            "Data from API doesn't match expected format: 1 invalid field(s): bedrooms: expected an integer"
        );

        let error = CatalogError::Transport {
            url: "http://api/".to_string(),
            status: None,
            message: "connection refused".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Request to http://api/ failed: connection refused"
        );
    }

    #[test]
    fn test_shape_error_lists_every_issue() {
        let error = ShapeError::new(vec![
            FieldIssue::new("price", "not a numeric price"),
            FieldIssue::new("agent.email", "not a valid email address"),
        ]);
        assert!(error.has_field("price"));
        assert!(error.has_field("agent.email"));
        assert!(!error.has_field("name"));
        assert_eq!(
            error.to_string(),
            "2 invalid field(s): price: not a numeric price; agent.email: not a valid email address"
        );
    }
}
