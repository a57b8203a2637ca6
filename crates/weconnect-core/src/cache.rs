// ── Snapshot freshness tracking ──
//
// The upstream garage fetch is expensive and rate-limited upstream, so
// reads reuse the last snapshot until a TTL elapses. Writes invalidate
// so the next read observes the command's effect.

use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Tracks when the snapshot was last fetched successfully.
///
/// Uses a monotonic clock; wall-clock jumps never expire or extend the
/// snapshot. The timestamp advances only on [`mark_fetched`], so a
/// failed refresh leaves the cache expired and the next read retries.
///
/// [`mark_fetched`]: FreshnessCache::mark_fetched
#[derive(Debug)]
pub struct FreshnessCache {
    ttl: Duration,
    fetched_at: Mutex<Option<Instant>>,
}

impl FreshnessCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            fetched_at: Mutex::new(None),
        }
    }

    /// True when no successful fetch happened yet or the TTL elapsed.
    pub fn is_expired(&self) -> bool {
        match self.fetched_at.lock() {
            Ok(fetched_at) => match *fetched_at {
                Some(at) => at.elapsed() >= self.ttl,
                None => true,
            },
            // A poisoned lock means a panic elsewhere; refetching is the
            // safe answer.
            Err(_) => true,
        }
    }

    /// Record a successful fetch at the current instant.
    pub fn mark_fetched(&self) {
        if let Ok(mut fetched_at) = self.fetched_at.lock() {
            *fetched_at = Some(Instant::now());
        }
    }

    /// Force the next read to refetch.
    pub fn invalidate(&self) {
        if let Ok(mut fetched_at) = self.fetched_at.lock() {
            *fetched_at = None;
        }
    }
}

impl Default for FreshnessCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn starts_expired() {
        let cache = FreshnessCache::new(Duration::from_secs(300));
        assert!(cache.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_until_ttl_elapses() {
        let cache = FreshnessCache::new(Duration::from_secs(300));
        cache.mark_fetched();
        assert!(!cache.is_expired());

        tokio::time::advance(Duration::from_secs(299)).await;
        assert!(!cache.is_expired());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cache.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn invalidate_expires_immediately() {
        let cache = FreshnessCache::new(Duration::from_secs(300));
        cache.mark_fetched();
        cache.invalidate();
        assert!(cache.is_expired());
    }
}
