//! Projects API client.
//!
//! # API Endpoints
//!
//! - All listings: `GET {base}/projects/projects/`
//! - One listing: `GET {base}/projects/projects/{id}/`
//!
//! Responses are parsed and schema-validated before they leave this module,
//! so callers only ever see [`ExternalListing`] values that satisfy the
//! listing contract.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;

use crate::config::CatalogConfig;
use crate::errors::CatalogError;
use crate::models::ExternalListing;
use crate::schema::{validate_listing, validate_listings};

/// Source of validated wire listings.
///
/// [`HttpListingSource`] is the production implementation; the query layer
/// only depends on this trait.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch and validate every listing.
    async fn fetch_listings(&self) -> Result<Vec<ExternalListing>, CatalogError>;

    /// Fetch and validate one listing by identifier.
    async fn fetch_listing(&self, id: &str) -> Result<ExternalListing, CatalogError>;
}

/// Listing source backed by the projects REST API.
#[derive(Clone)]
pub struct HttpListingSource {
    client: Client,
    base_url: String,
}

impl HttpListingSource {
    /// Create a source using the base URL and request timeout from `config`.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be initialized.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| CatalogError::Transport {
                url: config.base_url.clone(),
                status: None,
                message: format!("Failed to initialize HTTP client: {}", e),
            })?;

        Ok(Self::with_client(client, &config.base_url))
    }

    /// Create a source with a caller-provided HTTP client.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn listings_url(&self) -> String {
        format!("{}/projects/projects/", self.base_url)
    }

    pub fn listing_url(&self, id: &str) -> String {
        format!(
            "{}/projects/projects/{}/",
            self.base_url,
            urlencoding::encode(id)
        )
    }

    /// GET `url` and decode the body as JSON.
    async fn get_json(&self, url: &str) -> Result<Value, CatalogError> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            CatalogError::transport(url, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Request to {} returned HTTP {}", url, status);
            return Err(CatalogError::Transport {
                url: url.to_string(),
                status: Some(status.as_u16()),
                message: format!("HTTP error: {}", status),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| CatalogError::transport(url, e))?;
        debug!("Response from {}: {} bytes", url, text.len());

        serde_json::from_str(&text).map_err(|e| {
            warn!("Response from {} is not valid JSON: {}", url, e);
            CatalogError::MalformedJson {
                url: url.to_string(),
                message: e.to_string(),
            }
        })
    }
}

#[async_trait]
impl ListingSource for HttpListingSource {
    async fn fetch_listings(&self) -> Result<Vec<ExternalListing>, CatalogError> {
        let url = self.listings_url();
        let value = self.get_json(&url).await?;

        let listings = validate_listings(&value).map_err(|e| {
            warn!("Listings from {} failed validation: {}", url, e);
            CatalogError::from(e)
        })?;
        debug!("Fetched {} listings", listings.len());
        Ok(listings)
    }

    async fn fetch_listing(&self, id: &str) -> Result<ExternalListing, CatalogError> {
        let url = self.listing_url(id);
        let value = self.get_json(&url).await?;

        validate_listing(&value).map_err(|e| {
            warn!("Listing {} from {} failed validation: {}", id, url, e);
            CatalogError::from(e)
        })
    }
}
