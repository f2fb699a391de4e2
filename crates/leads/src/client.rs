//! Lead submission client.
//!
//! # API Endpoints
//!
//! - Contact: `POST {base}/api/contact/`
//! - Recruitment: `POST {base}/api/recruitment/`
//! - Land: `POST {base}/api/submit-land/`
//!
//! Forms are validated locally first; an invalid form never reaches the network.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use serde_json::Value;

use crate::errors::LeadError;
use crate::models::{ContactRequest, LandSubmission, LeadForm, RecruitmentApplication};

/// Default timeout for submissions.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Destination for lead forms.
#[async_trait]
pub trait LeadSink: Send + Sync {
    async fn submit_contact(&self, form: &ContactRequest) -> Result<(), LeadError>;

    async fn submit_application(&self, form: &RecruitmentApplication) -> Result<(), LeadError>;

    async fn submit_land(&self, form: &LandSubmission) -> Result<(), LeadError>;
}

/// Posts lead forms to the Bessa backend.
#[derive(Clone)]
pub struct LeadClient {
    client: Client,
    base_url: String,
}

impl LeadClient {
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be initialized.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LeadError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LeadError::Transport {
                url: base_url.to_string(),
                message: format!("Failed to initialize HTTP client: {}", e),
            })?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint<F: LeadForm>(&self) -> String {
        format!("{}{}", self.base_url, F::ENDPOINT)
    }

    /// Validate `form` and post it to its endpoint.
    pub async fn submit<F: LeadForm>(&self, form: &F) -> Result<(), LeadError> {
        if let Err(errors) = form.validate() {
            debug!("Rejected {} form locally: {}", F::KIND, errors);
            return Err(LeadError::Invalid(errors));
        }

        let url = self.endpoint::<F>();
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(form)
            .send()
            .await
            .map_err(|e| {
                warn!("Submitting {} form to {} failed: {}", F::KIND, url, e);
                LeadError::transport(&url, e)
            })?;

        let status = response.status();
        if status.is_success() {
            info!("Submitted {} form", F::KIND);
            return Ok(());
        }

        let body = response
            .text()
            .await
            .map_err(|e| LeadError::transport(&url, e))?;
        let detail = rejection_detail(&body).unwrap_or_else(|| format!("HTTP {}", status));
        warn!("{} form rejected with HTTP {}: {}", F::KIND, status, detail);

        Err(LeadError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl LeadSink for LeadClient {
    async fn submit_contact(&self, form: &ContactRequest) -> Result<(), LeadError> {
        self.submit(form).await
    }

    async fn submit_application(&self, form: &RecruitmentApplication) -> Result<(), LeadError> {
        self.submit(form).await
    }

    async fn submit_land(&self, form: &LandSubmission) -> Result<(), LeadError> {
        self.submit(form).await
    }
}

/// Human-readable reason from an error body.
///
/// Prefers `detail`; otherwise joins every string found in the object's
/// values (field error lists included).
fn rejection_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let obj = value.as_object()?;

    if let Some(detail) = obj.get("detail").and_then(Value::as_str) {
        return Some(detail.to_string());
    }

    let mut messages = Vec::new();
    for value in obj.values() {
        collect_strings(value, &mut messages);
    }
    (!messages.is_empty()).then(|| messages.join(", "))
}

fn collect_strings(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Array(items) => items.iter().for_each(|item| collect_strings(item, out)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let client = LeadClient::new("http://127.0.0.1:8000/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            client.endpoint::<ContactRequest>(),
            "http://127.0.0.1:8000/api/contact/"
        );
        assert_eq!(
            client.endpoint::<LandSubmission>(),
            "http://127.0.0.1:8000/api/submit-land/"
        );
    }

    #[test]
    fn test_rejection_detail_prefers_detail() {
        let body = r#"{"detail": "Too many requests", "email": ["Enter a valid email."]}"#;
        assert_eq!(rejection_detail(body).as_deref(), Some("Too many requests"));
    }

    #[test]
    fn test_rejection_detail_joins_field_messages() {
        let body = r#"{"email": ["Enter a valid email."], "phone": ["Too short."]}"#;
        assert_eq!(
            rejection_detail(body).as_deref(),
            Some("Enter a valid email., Too short.")
        );
    }

    #[test]
    fn test_rejection_detail_non_json() {
        assert!(rejection_detail("<html>oops</html>").is_none());
        assert!(rejection_detail("{}").is_none());
    }
}
