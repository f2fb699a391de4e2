use std::sync::Arc;
use std::time::Duration;

use bessa_catalog::{CatalogConfig, HttpListingSource, ListingQueries, ListingSource};
use bessa_leads::{LeadClient, LeadSink};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LogFormat};

pub struct AppState {
    pub queries: Arc<ListingQueries>,
    pub leads: Arc<dyn LeadSink>,
}

impl AppState {
    /// State over explicit collaborators.
    pub fn new(
        source: Arc<dyn ListingSource>,
        leads: Arc<dyn LeadSink>,
        cache_ttl: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            queries: Arc::new(ListingQueries::new(source, cache_ttl)),
            leads,
        })
    }
}

/// Install the global subscriber. `log` records from the library crates are
/// forwarded as well.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let catalog = CatalogConfig::new(config.api_url.as_str())
        .with_request_timeout(config.request_timeout)
        .with_freshness(config.cache_ttl);
    tracing::info!(
        "Catalog API in use: {} (cache ttl {}s)",
        catalog.base_url,
        catalog.freshness.as_secs()
    );

    let source: Arc<dyn ListingSource> = Arc::new(HttpListingSource::new(&catalog)?);
    let leads: Arc<dyn LeadSink> =
        Arc::new(LeadClient::new(&catalog.base_url, config.request_timeout)?);

    Ok(AppState::new(source, leads, catalog.freshness))
}
