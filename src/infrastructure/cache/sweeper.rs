//! Background task that removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

use super::service::CacheService;

/// Periodically purges expired entries so memory use tracks live data.
///
/// Runs until the task is aborted or the runtime shuts down. The first purge
/// happens one `period` after start.
pub async fn run_cache_sweeper(cache: Arc<dyn CacheService>, period: Duration) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // interval() fires immediately on the first tick
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let removed = cache.purge_expired().await;
        if removed > 0 {
            debug!("Cache sweep removed {} expired entries", removed);
        }
    }
}
