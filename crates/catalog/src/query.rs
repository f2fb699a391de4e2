//! Listing queries: fetch → validate → transform, cached per request key.
//!
//! [`ListingQueries`] is the entry point used by the presentation layer. It
//! offers plain async accessors ([`fetch_all`](ListingQueries::fetch_all),
//! [`fetch_one`](ListingQueries::fetch_one)) and observable result cells
//! ([`QueryHandle`]) that move through [`QueryState`]s.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::cache::{CacheStats, FetchResult, QueryCache};
use crate::client::{HttpListingSource, ListingSource};
use crate::config::CatalogConfig;
use crate::errors::CatalogError;
use crate::models::Listing;
use crate::transform::{transform_listing, transform_listings};

/// Cache key of a listing request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// Every listing (list endpoint).
    All,
    /// One listing by identifier.
    ById(String),
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::All => write!(f, "projects"),
            QueryKey::ById(id) => write!(f, "project:{}", id),
        }
    }
}

/// Observable state of one query.
#[derive(Debug)]
pub enum QueryState<T> {
    /// The query is disabled and will not run (single-item query without an id).
    Idle,
    Loading,
    Error(Arc<CatalogError>),
    Success(Arc<T>),
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Loading => Self::Loading,
            Self::Error(err) => Self::Error(Arc::clone(err)),
            Self::Success(data) => Self::Success(Arc::clone(data)),
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&Arc<T>> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Arc<CatalogError>> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }

    fn from_result(result: FetchResult<T>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(err) => Self::Error(err),
        }
    }
}

/// Tri-state result cell for one query.
///
/// Poll it with [`state`](Self::state) or wait with
/// [`changed`](Self::changed) / [`settled`](Self::settled). Dropping the
/// handle stops its driver task; a fetch shared with other callers keeps
/// running for them, otherwise it is abandoned.
pub struct QueryHandle<T> {
    receiver: watch::Receiver<QueryState<T>>,
    task: Option<JoinHandle<()>>,
}

impl<T: Send + Sync + 'static> QueryHandle<T> {
    fn ready(state: QueryState<T>) -> Self {
        let (_, receiver) = watch::channel(state);
        Self {
            receiver,
            task: None,
        }
    }

    fn spawn<F>(fetch: F) -> Self
    where
        F: std::future::Future<Output = FetchResult<T>> + Send + 'static,
    {
        let (sender, receiver) = watch::channel(QueryState::Loading);
        let task = tokio::spawn(async move {
            let state = QueryState::from_result(fetch.await);
            // Nobody left to observe the result is fine.
            let _ = sender.send(state);
        });
        Self {
            receiver,
            task: Some(task),
        }
    }

    /// Current state, without waiting.
    pub fn state(&self) -> QueryState<T> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next state change and return it.
    ///
    /// Returns the current state immediately when no further change can happen.
    pub async fn changed(&mut self) -> QueryState<T> {
        let _ = self.receiver.changed().await;
        self.receiver.borrow_and_update().clone()
    }

    /// Wait until the query leaves [`QueryState::Loading`].
    pub async fn settled(&mut self) -> QueryState<T> {
        loop {
            let state = self.receiver.borrow_and_update().clone();
            if !state.is_loading() {
                return state;
            }
            if self.receiver.changed().await.is_err() {
                return self.receiver.borrow().clone();
            }
        }
    }

    /// Additional receiver for consumers that want to subscribe independently.
    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.receiver.clone()
    }
}

impl<T> Drop for QueryHandle<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Cached listing queries over a [`ListingSource`].
pub struct ListingQueries {
    source: Arc<dyn ListingSource>,
    all: QueryCache<QueryKey, Vec<Listing>>,
    single: QueryCache<QueryKey, Listing>,
}

impl ListingQueries {
    /// Create queries over `source` with the given freshness window.
    pub fn new(source: Arc<dyn ListingSource>, freshness: Duration) -> Self {
        Self {
            source,
            all: QueryCache::new(freshness),
            single: QueryCache::new(freshness),
        }
    }

    /// Create queries over the projects API described by `config`.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let source = HttpListingSource::new(config)?;
        Ok(Self::new(Arc::new(source), config.freshness))
    }

    pub fn freshness(&self) -> Duration {
        self.all.ttl()
    }

    /// All listings, served from cache while fresh.
    pub async fn fetch_all(&self) -> FetchResult<Vec<Listing>> {
        let source = Arc::clone(&self.source);
        let result = self
            .all
            .get_or_fetch(QueryKey::All, move || async move {
                source.fetch_listings().await.map(transform_listings)
            })
            .await;
        log_failure(&QueryKey::All, &result);
        result
    }

    /// One listing by identifier, served from cache while fresh.
    ///
    /// A missing or blank `id` disables the query: `Ok(None)` is returned and
    /// no request is made.
    pub async fn fetch_one(&self, id: Option<&str>) -> Result<Option<Arc<Listing>>, Arc<CatalogError>> {
        let Some(id) = enabled_id(id) else {
            debug!("Single listing query disabled: no id");
            return Ok(None);
        };

        self.fetch_by_id(id).await.map(Some)
    }

    async fn fetch_by_id(&self, id: String) -> FetchResult<Listing> {
        let key = QueryKey::ById(id.clone());
        let source = Arc::clone(&self.source);
        let result = self
            .single
            .get_or_fetch(key.clone(), move || async move {
                source.fetch_listing(&id).await.map(transform_listing)
            })
            .await;
        log_failure(&key, &result);
        result
    }

    /// Observable query for all listings.
    ///
    /// Starts in [`QueryState::Success`] when a fresh result is cached,
    /// otherwise in [`QueryState::Loading`]. Must be called inside a Tokio runtime.
    pub fn listings(self: &Arc<Self>) -> QueryHandle<Vec<Listing>> {
        if let Some(cached) = self.all.peek(&QueryKey::All) {
            return QueryHandle::ready(QueryState::Success(cached));
        }
        let queries = Arc::clone(self);
        QueryHandle::spawn(async move { queries.fetch_all().await })
    }

    /// Observable query for one listing.
    ///
    /// Stays in [`QueryState::Idle`] when `id` is missing or blank.
    pub fn listing(self: &Arc<Self>, id: Option<&str>) -> QueryHandle<Listing> {
        let Some(id) = enabled_id(id) else {
            return QueryHandle::ready(QueryState::Idle);
        };
        if let Some(cached) = self.single.peek(&QueryKey::ById(id.clone())) {
            return QueryHandle::ready(QueryState::Success(cached));
        }

        let queries = Arc::clone(self);
        QueryHandle::spawn(async move { queries.fetch_by_id(id).await })
    }

    /// Drop every cached result so the next request re-fetches.
    pub fn invalidate_all(&self) {
        self.all.clear();
        self.single.clear();
    }

    pub fn invalidate_listing(&self, id: &str) {
        self.single.invalidate(&QueryKey::ById(id.to_string()));
    }

    /// Drop cached results whose freshness window has passed.
    pub fn purge_expired(&self) -> usize {
        self.all.purge_expired() + self.single.purge_expired()
    }

    /// Cache statistics for the list query and the single-item queries.
    pub fn stats(&self) -> (CacheStats, CacheStats) {
        (self.all.stats(), self.single.stats())
    }
}

fn enabled_id(id: Option<&str>) -> Option<String> {
    id.map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn log_failure<T>(key: &QueryKey, result: &FetchResult<T>) {
    if let Err(err) = result {
        warn!("Query {} failed ({}): {}", key, err.kind(), err);
    }
}
