//! Single-slot catalog cache.
//!
//! Readers inside the TTL share one immutable [`Snapshot`]. A stale read takes
//! the refresh guard, so concurrent readers on an expired slot cause exactly
//! one upstream aggregation; the rest wait and pick up its result. The new
//! snapshot replaces the old one in a single write, so a reader never sees a
//! half-built catalog.

use crate::CanonicalEvent;
use chrono::{DateTime, TimeDelta, Utc};
use log::debug;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::Mutex;

/// Produces the full, unfiltered catalog. Never fails: upstream errors are
/// contained below this point.
pub trait CatalogSource: Send + Sync {
    fn aggregate_all(&self) -> impl Future<Output = Vec<CanonicalEvent>> + Send;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// One generation of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub events: Vec<CanonicalEvent>,
    pub computed_at: DateTime<Utc>,
}

pub struct CatalogCache<S> {
    source: S,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
    slot: RwLock<Option<Arc<Snapshot>>>,
    refresh: Mutex<()>,
}

impl<S: CatalogSource> CatalogCache<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self::with_clock(source, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(source: S, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            clock,
            slot: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl.to_std().unwrap_or_default()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current snapshot, fresh or not, without touching upstream.
    pub fn peek(&self) -> Option<Arc<Snapshot>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Snapshot no older than the TTL, refreshing first when needed.
    pub async fn get(&self) -> Arc<Snapshot> {
        if let Some(snapshot) = self.fresh() {
            return snapshot;
        }

        let _guard = self.refresh.lock().await;
        // Someone else may have refreshed while we waited.
        if let Some(snapshot) = self.fresh() {
            return snapshot;
        }

        debug!("catalog cache stale, refreshing");
        let events = self.source.aggregate_all().await;
        let snapshot = Arc::new(Snapshot {
            events,
            computed_at: self.clock.now(),
        });
        debug!("catalog cache holds {} events", snapshot.events.len());
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Drop the current snapshot; the next read refreshes.
    pub fn invalidate(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn fresh(&self) -> Option<Arc<Snapshot>> {
        let now = self.clock.now();
        self.peek()
            .filter(|snapshot| now.signed_duration_since(snapshot.computed_at) < self.ttl)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{Provider, fixtures};
    use chrono::TimeZone;
    use futures_util::future::join_all;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub struct ManualClock(StdMutex<DateTime<Utc>>);

    impl ManualClock {
        pub fn new() -> Arc<Self> {
            Arc::new(Self(StdMutex::new(
                Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            )))
        }

        pub fn advance(&self, secs: i64) {
            *self.0.lock().unwrap() += TimeDelta::seconds(secs);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    /// Returns n events on its n-th call, so each refresh is distinguishable.
    #[derive(Default)]
    pub struct CountingSource {
        pub calls: AtomicUsize,
    }

    impl CatalogSource for CountingSource {
        async fn aggregate_all(&self) -> Vec<CanonicalEvent> {
            let generation = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            for _ in 0..5 {
                tokio::task::yield_now().await;
            }
            (0..generation)
                .map(|n| fixtures::event(Provider::Espn, &n.to_string(), 12))
                .collect()
        }
    }

    fn cache(clock: &Arc<ManualClock>) -> CatalogCache<CountingSource> {
        CatalogCache::with_clock(
            CountingSource::default(),
            Duration::from_secs(60),
            clock.clone(),
        )
    }

    #[tokio::test]
    async fn reads_within_ttl_share_one_snapshot() {
        let clock = ManualClock::new();
        let cache = cache(&clock);
        assert!(cache.peek().is_none());

        let first = cache.get().await;
        clock.advance(59);
        let second = cache.get().await;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.source().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_snapshot_is_rebuilt() {
        let clock = ManualClock::new();
        let cache = cache(&clock);

        let first = cache.get().await;
        clock.advance(60);
        let second = cache.get().await;

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.events.len(), 2);
        assert_eq!(second.computed_at - first.computed_at, TimeDelta::seconds(60));
        assert_eq!(cache.source().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn concurrent_stale_readers_trigger_one_refresh() {
        let clock = ManualClock::new();
        let cache = cache(&clock);

        let snapshots = join_all((0..16).map(|_| cache.get())).await;

        assert_eq!(cache.source().calls.load(Ordering::SeqCst), 1);
        assert!(snapshots.iter().all(|s| Arc::ptr_eq(s, &snapshots[0])));
    }

    #[tokio::test]
    async fn invalidate_forces_refresh() {
        let clock = ManualClock::new();
        let cache = cache(&clock);
        cache.get().await;
        cache.invalidate();
        assert!(cache.peek().is_none());
        cache.get().await;
        assert_eq!(cache.source().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn zero_ttl_never_serves_cached_data() {
        let clock = ManualClock::new();
        let cache = CatalogCache::with_clock(CountingSource::default(), Duration::ZERO, clock);
        cache.get().await;
        cache.get().await;
        assert_eq!(cache.source().calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.ttl(), Duration::ZERO);
    }
}
