//! Keyed query cache with a freshness window and in-flight de-duplication.
//!
//! Each key holds at most one `(value, fetched_at, ttl)` entry and at most one
//! pending fetch. Requests for a key that is already being fetched join the
//! pending fetch instead of starting another one. Failed fetches are never
//! cached; the next request for the key fetches again.
//!
//! A pending fetch lives only as long as someone awaits it. When its last
//! waiter is dropped (handle dropped, request cancelled, caller timed out),
//! the fetch is abandoned and its result discarded, and the next request
//! starts a new one.
//!
//! Timestamps use [`tokio::time::Instant`], so tests can drive expiry with a
//! paused runtime clock.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use log::{debug, warn};
use tokio::time::Instant;

use crate::errors::CatalogError;

/// Result shared between every waiter of one fetch.
pub type FetchResult<V> = Result<Arc<V>, Arc<CatalogError>>;

type InFlight<V> = Shared<BoxFuture<'static, FetchResult<V>>>;

struct CacheEntry<V> {
    value: Arc<V>,
    fetched_at: Instant,
}

struct PendingFetch<V> {
    id: u64,
    future: InFlight<V>,
    waiters: usize,
}

struct CacheState<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    pending: HashMap<K, PendingFetch<V>>,
}

/// Counters describing how requests were served.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Entries currently stored (fresh or not yet purged).
    pub entries: usize,
    /// Fetches currently in flight.
    pub pending: usize,
    /// Requests served from a fresh entry.
    pub hits: u64,
    /// Requests that started a new fetch.
    pub fetches: u64,
    /// Requests that joined a fetch already in flight.
    pub joined: u64,
}

pub struct QueryCache<K, V> {
    ttl: Duration,
    state: Mutex<CacheState<K, V>>,
    next_fetch_id: AtomicU64,
    hits: AtomicU64,
    fetches: AtomicU64,
    joined: AtomicU64,
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Create a cache whose entries stay fresh for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                pending: HashMap::new(),
            }),
            next_fetch_id: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            fetches: AtomicU64::new(0),
            joined: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the fresh value for `key`, or run `fetch` to produce it.
    ///
    /// `fetch` is only invoked when there is neither a fresh entry nor a
    /// fetch already in flight for `key`.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> FetchResult<V>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<V, CatalogError>> + Send + 'static,
    {
        let (id, in_flight) = {
            let mut state = self.lock_state();

            if let Some(entry) = state.entries.get(&key) {
                if self.is_fresh(entry) {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    debug!("Cache hit for {:?}", key);
                    return Ok(Arc::clone(&entry.value));
                }
            }

            if let Some(pending) = state.pending.get_mut(&key) {
                self.joined.fetch_add(1, Ordering::Relaxed);
                debug!("Joining in-flight fetch for {:?}", key);
                pending.waiters += 1;
                (pending.id, pending.future.clone())
            } else {
                self.fetches.fetch_add(1, Ordering::Relaxed);
                debug!("Cache miss for {:?}, fetching", key);
                let id = self.next_fetch_id.fetch_add(1, Ordering::Relaxed);
                let future = fetch()
                    .map(|result| result.map(Arc::new).map_err(Arc::new))
                    .boxed()
                    .shared();
                state.pending.insert(
                    key.clone(),
                    PendingFetch {
                        id,
                        future: future.clone(),
                        waiters: 1,
                    },
                );
                (id, future)
            }
        };

        let _waiter = Waiter {
            cache: self,
            key: &key,
            id,
        };
        let result = in_flight.await;
        self.settle(&key, id, &result);
        result
    }

    /// Fresh cached value for `key`, without fetching.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        let state = self.lock_state();
        state
            .entries
            .get(key)
            .filter(|entry| self.is_fresh(entry))
            .map(|entry| Arc::clone(&entry.value))
    }

    /// Drop the entry and any pending fetch for `key`.
    ///
    /// A fetch already in flight still completes for its waiters but does
    /// not repopulate the cache.
    pub fn invalidate(&self, key: &K) {
        let mut state = self.lock_state();
        state.entries.remove(key);
        state.pending.remove(key);
    }

    pub fn clear(&self) {
        let mut state = self.lock_state();
        state.entries.clear();
        state.pending.clear();
    }

    /// Remove entries whose freshness window has passed.
    pub fn purge_expired(&self) -> usize {
        let mut state = self.lock_state();
        let before = state.entries.len();
        let ttl = self.ttl;
        state
            .entries
            .retain(|_, entry| entry.fetched_at.elapsed() < ttl);
        before - state.entries.len()
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.lock_state();
        CacheStats {
            entries: state.entries.len(),
            pending: state.pending.len(),
            hits: self.hits.load(Ordering::Relaxed),
            fetches: self.fetches.load(Ordering::Relaxed),
            joined: self.joined.load(Ordering::Relaxed),
        }
    }

    fn is_fresh(&self, entry: &CacheEntry<V>) -> bool {
        entry.fetched_at.elapsed() < self.ttl
    }

    /// Record the outcome of fetch `id` if it is still the pending fetch for `key`.
    ///
    /// Every waiter calls this; only the first one finds its own fetch
    /// registered and does the bookkeeping.
    fn settle(&self, key: &K, id: u64, result: &FetchResult<V>) {
        let mut state = self.lock_state();
        if !state.pending.get(key).is_some_and(|pending| pending.id == id) {
            return;
        }

        state.pending.remove(key);
        if let Ok(value) = result {
            state.entries.insert(
                key.clone(),
                CacheEntry {
                    value: Arc::clone(value),
                    fetched_at: Instant::now(),
                },
            );
        }
    }
}

impl<K: Eq + Hash + Debug, V> QueryCache<K, V> {
    /// Forget one waiter of fetch `id`, abandoning the fetch when none remain.
    fn leave(&self, key: &K, id: u64) {
        let mut state = self.lock_state();
        let Some(pending) = state.pending.get_mut(key) else {
            return;
        };
        if pending.id != id {
            return;
        }

        pending.waiters -= 1;
        if pending.waiters == 0 {
            debug!("Abandoning in-flight fetch for {:?}", key);
            state.pending.remove(key);
        }
    }

    /// Lock the cache state, recovering from poison if necessary.
    fn lock_state(&self) -> MutexGuard<'_, CacheState<K, V>> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("Query cache mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

/// Registration of one caller awaiting a pending fetch.
///
/// Dropped on completion and on cancellation alike. After the fetch has
/// settled, leaving is a no-op.
struct Waiter<'a, K: Eq + Hash + Debug, V> {
    cache: &'a QueryCache<K, V>,
    key: &'a K,
    id: u64,
}

impl<K: Eq + Hash + Debug, V> Drop for Waiter<'_, K, V> {
    fn drop(&mut self) {
        self.cache.leave(self.key, self.id);
    }
}
