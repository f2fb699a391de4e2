use std::time::Duration;

/// Local development backend.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default HTTP request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default freshness window for cached listings.
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(5 * 60);

/// Catalog configuration, injected explicitly by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Base URL of the projects API, without a trailing slash.
    pub base_url: String,
    pub request_timeout: Duration,
    /// How long a fetched result is served without re-fetching.
    pub freshness: Duration,
}

impl CatalogConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            ..Self::default()
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            freshness: DEFAULT_FRESHNESS,
        }
    }
}

fn normalize_base_url(url: String) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.freshness, Duration::from_secs(300));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(
            CatalogConfig::new("https://api.bessa.dz/").base_url,
            "https://api.bessa.dz"
        );
        assert_eq!(CatalogConfig::new("  ").base_url, DEFAULT_BASE_URL);
    }
}
