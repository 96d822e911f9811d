// Explorer allow-list access for metadata validation.
//
// ExplorerSource — one page of the remote registry (ExplorerClient in production).
// ExplorerLookup — what the validator depends on: the current snapshot.
//   ExplorerCache wraps a source with a TTL and single-flight refresh;
//   StaticExplorers serves a fixed snapshot for offline runs and tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use explorer_client::{Explorer, ExplorerClient, ExplorerError};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

#[async_trait]
pub trait ExplorerSource: Send + Sync {
    async fn explorers(&self, offset: u32, limit: u32) -> Result<Vec<Explorer>, ExplorerError>;
}

#[async_trait]
impl ExplorerSource for ExplorerClient {
    async fn explorers(&self, offset: u32, limit: u32) -> Result<Vec<Explorer>, ExplorerError> {
        ExplorerClient::explorers(self, offset, limit).await
    }
}

/// Explorers known at a point in time.
#[derive(Debug, Clone)]
pub struct ExplorerSnapshot {
    pub explorers: Vec<Explorer>,
    pub fetched_at: DateTime<Utc>,
}

impl ExplorerSnapshot {
    pub fn new(explorers: Vec<Explorer>) -> Self {
        Self {
            explorers,
            fetched_at: Utc::now(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Explorer> {
        self.explorers.iter().find(|e| e.id == id)
    }
}

#[async_trait]
pub trait ExplorerLookup: Send + Sync {
    async fn snapshot(&self) -> Result<Arc<ExplorerSnapshot>, ExplorerError>;
}

/// A fixed explorer list that never refreshes.
pub struct StaticExplorers {
    snapshot: Arc<ExplorerSnapshot>,
}

impl StaticExplorers {
    pub fn new(explorers: Vec<Explorer>) -> Self {
        Self {
            snapshot: Arc::new(ExplorerSnapshot::new(explorers)),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl ExplorerLookup for StaticExplorers {
    async fn snapshot(&self) -> Result<Arc<ExplorerSnapshot>, ExplorerError> {
        Ok(self.snapshot.clone())
    }
}

/// Wait after a failed refresh before the registry is asked again.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CacheEntry {
    snapshot: Arc<ExplorerSnapshot>,
    inserted_at: Instant,
    /// Last failed refresh. The stale snapshot is served for one backoff after it.
    failed_at: Option<Instant>,
}

impl CacheEntry {
    fn is_servable(&self, ttl: Duration, retry_backoff: Duration) -> bool {
        self.inserted_at.elapsed() < ttl
            || self.failed_at.is_some_and(|at| at.elapsed() < retry_backoff)
    }
}

/// Read-through cache over an [`ExplorerSource`].
///
/// Only the first page (offset 0, `page_limit` items) is ever requested.
/// When a refresh fails and an expired snapshot exists, the stale snapshot is
/// served rather than failing validation, and the registry is not asked again
/// until the retry backoff has passed.
pub struct ExplorerCache<S> {
    source: S,
    ttl: Duration,
    page_limit: u32,
    retry_backoff: Duration,
    entry: RwLock<Option<CacheEntry>>,
    refresh: Mutex<()>,
}

impl<S: ExplorerSource> ExplorerCache<S> {
    pub fn new(source: S, ttl: Duration, page_limit: u32) -> Self {
        Self {
            source,
            ttl,
            page_limit,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            entry: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    pub fn with_retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    async fn fresh(&self) -> Option<Arc<ExplorerSnapshot>> {
        let entry = self.entry.read().await;
        let entry = entry.as_ref()?;
        entry
            .is_servable(self.ttl, self.retry_backoff)
            .then(|| entry.snapshot.clone())
    }

    /// Forget the cached snapshot so the next lookup refetches.
    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
    }

    async fn refetch(&self) -> Result<Arc<ExplorerSnapshot>, ExplorerError> {
        match self.source.explorers(0, self.page_limit).await {
            Ok(explorers) => {
                if explorers.len() >= self.page_limit as usize {
                    tracing::warn!(
                        limit = self.page_limit,
                        "Explorer page is full; explorers past the first page are not allow-listed"
                    );
                }
                tracing::info!(
                    count = explorers.len(),
                    ttl_secs = self.ttl.as_secs(),
                    "Explorer cache refreshed"
                );

                let snapshot = Arc::new(ExplorerSnapshot::new(explorers));
                *self.entry.write().await = Some(CacheEntry {
                    snapshot: snapshot.clone(),
                    inserted_at: Instant::now(),
                    failed_at: None,
                });
                Ok(snapshot)
            }
            Err(e) => {
                let mut entry = self.entry.write().await;
                match entry.as_mut() {
                    Some(stale) => {
                        stale.failed_at = Some(Instant::now());
                        tracing::warn!(
                            error = %e,
                            transient = e.is_transient(),
                            age_secs = stale.inserted_at.elapsed().as_secs(),
                            retry_in_secs = self.retry_backoff.as_secs(),
                            "Explorer refresh failed, serving stale snapshot"
                        );
                        Ok(stale.snapshot.clone())
                    }
                    None => {
                        tracing::warn!(
                            error = %e,
                            transient = e.is_transient(),
                            "Explorer lookup failed with no cached snapshot"
                        );
                        Err(e)
                    }
                }
            }
        }
    }
}

#[async_trait]
impl<S: ExplorerSource> ExplorerLookup for ExplorerCache<S> {
    async fn snapshot(&self) -> Result<Arc<ExplorerSnapshot>, ExplorerError> {
        if let Some(snapshot) = self.fresh().await {
            return Ok(snapshot);
        }

        let _guard = self.refresh.lock().await;
        // Another caller may have refreshed while we waited.
        if let Some(snapshot) = self.fresh().await {
            return Ok(snapshot);
        }
        self.refetch().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        failing: AtomicBool,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                failing: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl ExplorerSource for CountingSource {
        async fn explorers(&self, offset: u32, limit: u32) -> Result<Vec<Explorer>, ExplorerError> {
            assert_eq!(offset, 0);
            assert_eq!(limit, 30);
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(ExplorerError::Network("connection refused".into()));
            }
            Ok(vec![Explorer {
                id: "etherscan_profile".into(),
                base_url: "https://etherscan.io".into(),
                explorer: "Etherscan".into(),
                hidden: false,
            }])
        }
    }

    const TTL: Duration = Duration::from_secs(12 * 3600);

    #[tokio::test(start_paused = true)]
    async fn second_lookup_is_served_from_cache() {
        let cache = ExplorerCache::new(CountingSource::new(), TTL, 30);

        let first = cache.snapshot().await.unwrap();
        let second = cache.snapshot().await.unwrap();

        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.explorers, second.explorers);
        assert!(second.get("etherscan_profile").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_is_refetched() {
        let cache = ExplorerCache::new(CountingSource::new(), TTL, 30);
        cache.snapshot().await.unwrap();

        tokio::time::advance(TTL - Duration::from_secs(1)).await;
        cache.snapshot().await.unwrap();
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        cache.snapshot().await.unwrap();
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_refresh_serves_stale_snapshot() {
        let cache = ExplorerCache::new(CountingSource::new(), TTL, 30);
        cache.snapshot().await.unwrap();

        cache.source.failing.store(true, Ordering::SeqCst);
        tokio::time::advance(TTL + Duration::from_secs(1)).await;

        let stale = cache.snapshot().await.unwrap();
        assert_eq!(stale.explorers.len(), 1);
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_refresh_backs_off_before_retrying() {
        let cache = Arc::new(
            ExplorerCache::new(CountingSource::new(), TTL, 30)
                .with_retry_backoff(Duration::from_secs(60)),
        );
        cache.snapshot().await.unwrap();

        cache.source.failing.store(true, Ordering::SeqCst);
        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        cache.snapshot().await.unwrap();
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 2);

        let handles: Vec<_> = (0..5)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.snapshot().await })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap().explorers.len(), 1);
        }
        tokio::time::advance(Duration::from_secs(59)).await;
        cache.snapshot().await.unwrap();
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 2);

        tokio::time::advance(Duration::from_secs(2)).await;
        cache.snapshot().await.unwrap();
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn recovered_registry_clears_the_backoff() {
        let cache = ExplorerCache::new(CountingSource::new(), TTL, 30)
            .with_retry_backoff(Duration::from_secs(60));
        cache.snapshot().await.unwrap();

        cache.source.failing.store(true, Ordering::SeqCst);
        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        cache.snapshot().await.unwrap();

        cache.source.failing.store(false, Ordering::SeqCst);
        tokio::time::advance(Duration::from_secs(61)).await;
        cache.snapshot().await.unwrap();
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 3);

        // Fresh again for a full TTL.
        tokio::time::advance(TTL - Duration::from_secs(1)).await;
        cache.snapshot().await.unwrap();
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn cold_failure_is_an_error() {
        let source = CountingSource::new();
        source.failing.store(true, Ordering::SeqCst);
        let cache = ExplorerCache::new(source, TTL, 30);

        assert!(matches!(cache.snapshot().await, Err(ExplorerError::Network(_))));
    }

    #[tokio::test]
    async fn concurrent_cold_lookups_fetch_once() {
        let cache = Arc::new(ExplorerCache::new(CountingSource::new(), TTL, 30));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.snapshot().await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let cache = ExplorerCache::new(CountingSource::new(), TTL, 30);
        cache.snapshot().await.unwrap();
        cache.invalidate().await;
        cache.snapshot().await.unwrap();
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn static_explorers_never_change() {
        let lookup = StaticExplorers::empty();
        assert!(lookup.snapshot().await.unwrap().explorers.is_empty());
    }
}
