//! Background cache maintenance.
//!
//! Expired listing results are only replaced when requested again; this task
//! drops the ones nobody asks for so the cache does not grow without bound.

use std::sync::Arc;

use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::debug;

use crate::main_lib::AppState;

/// Purge interval.
const PURGE_INTERVAL_SECS: u64 = 60;

pub fn spawn_cache_purger(state: Arc<AppState>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(PURGE_INTERVAL_SECS));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let purged = state.queries.purge_expired();
            if purged > 0 {
                debug!("Purged {} expired listing results", purged);
            }
        }
    })
}
