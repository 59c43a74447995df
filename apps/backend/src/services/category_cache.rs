//! TTL-expiring read-through cache for the category listing.
//!
//! One instance lives in `AppState` for the process lifetime. A single async
//! mutex guards the cached set and is held for the whole of `get()`, read or
//! refresh, so refreshes serialize and readers never observe a torn update.
//! The refresh round trip happens under the lock; with a 1-hour TTL and a
//! cheap read that trade-off is fine.

use std::future::Future;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::Mutex;

use crate::entities::categories;
use crate::error::AppError;

const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Where a `get()` answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheSource {
    Cache,
    Database,
}

#[derive(Debug, Default)]
struct Slot {
    entries: Vec<categories::Model>,
    /// None until the first successful refresh.
    expires_at: Option<Instant>,
}

#[derive(Debug)]
pub struct CategoryCache {
    ttl: Duration,
    slot: Mutex<Slot>,
}

impl Default for CategoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(Slot::default()),
        }
    }

    /// Return the cached categories, refreshing through `refresh` when the
    /// entry is missing or past its expiry.
    ///
    /// A failed refresh propagates the error and leaves the previous
    /// snapshot in place (availability over freshness).
    pub async fn get<F, Fut>(
        &self,
        refresh: F,
    ) -> Result<(Vec<categories::Model>, CacheSource), AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<categories::Model>, AppError>>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(expires_at) = slot.expires_at {
            if Instant::now() < expires_at {
                return Ok((slot.entries.clone(), CacheSource::Cache));
            }
        }

        let fresh = refresh().await?;
        slot.entries = fresh.clone();
        slot.expires_at = Some(Instant::now() + self.ttl);

        Ok((fresh, CacheSource::Database))
    }

    /// Force the current entry past its expiry without touching its contents.
    #[cfg(test)]
    async fn force_expire(&self) {
        let mut slot = self.slot.lock().await;
        if slot.expires_at.is_some() {
            slot.expires_at = Some(Instant::now());
        }
    }

    #[cfg(test)]
    async fn snapshot(&self) -> Vec<categories::Model> {
        self.slot.lock().await.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::{CacheSource, CategoryCache};
    use crate::entities::categories;
    use crate::error::AppError;

    fn sample() -> Vec<categories::Model> {
        vec![
            categories::Model {
                id: 2,
                name: "Roads".to_string(),
            },
            categories::Model {
                id: 1,
                name: "Sanitation".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn first_read_comes_from_the_database() {
        let cache = CategoryCache::new();

        let (data, source) = cache.get(|| async { Ok(sample()) }).await.unwrap();

        assert_eq!(source, CacheSource::Database);
        assert_eq!(data, sample());
    }

    #[tokio::test]
    async fn second_read_within_ttl_is_served_from_cache() {
        let cache = CategoryCache::new();
        let refreshes = AtomicUsize::new(0);

        let refresh = || {
            refreshes.fetch_add(1, Ordering::SeqCst);
            async { Ok(sample()) }
        };

        let (first, _) = cache.get(refresh).await.unwrap();
        let (second, source) = cache
            .get(|| async { panic!("refresh must not run inside the TTL window") })
            .await
            .unwrap();

        assert_eq!(source, CacheSource::Cache);
        assert_eq!(first, second);
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_entry_triggers_exactly_one_refresh() {
        let cache = CategoryCache::new();
        let refreshes = AtomicUsize::new(0);

        cache.get(|| async { Ok(sample()) }).await.unwrap();
        cache.force_expire().await;

        // Content is unchanged; the refresh must still run, once.
        let (_, source) = cache
            .get(|| {
                refreshes.fetch_add(1, Ordering::SeqCst);
                async { Ok(sample()) }
            })
            .await
            .unwrap();
        assert_eq!(source, CacheSource::Database);
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);

        // Back inside the window: no further refresh.
        let (_, source) = cache.get(|| async { Ok(sample()) }).await.unwrap();
        assert_eq!(source, CacheSource::Cache);
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_stale_snapshot() {
        let cache = CategoryCache::new();

        cache.get(|| async { Ok(sample()) }).await.unwrap();
        cache.force_expire().await;

        let result = cache
            .get(|| async { Err(AppError::db("Failed to fetch categories")) })
            .await;
        assert!(result.is_err());

        // The stale set is still there and the next successful refresh works.
        assert_eq!(cache.snapshot().await, sample());
        let (data, source) = cache.get(|| async { Ok(sample()) }).await.unwrap();
        assert_eq!(source, CacheSource::Database);
        assert_eq!(data, sample());
    }

    #[tokio::test]
    async fn concurrent_reads_refresh_once() {
        let cache = CategoryCache::with_ttl(Duration::from_secs(3600));
        let refreshes = AtomicUsize::new(0);

        let slow_refresh = || {
            refreshes.fetch_add(1, Ordering::SeqCst);
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                Ok(sample())
            }
        };

        let (a, b) = tokio::join!(cache.get(slow_refresh), cache.get(slow_refresh));

        assert_eq!(a.unwrap().0, b.unwrap().0);
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_listing_is_cached_too() {
        let cache = CategoryCache::new();

        let (data, source) = cache.get(|| async { Ok(Vec::new()) }).await.unwrap();
        assert_eq!(source, CacheSource::Database);
        assert!(data.is_empty());

        let (_, source) = cache
            .get(|| async { panic!("refresh must not run inside the TTL window") })
            .await
            .unwrap();
        assert_eq!(source, CacheSource::Cache);
    }
}
