//! Bounded fan-out over one provider's league requests.

use crate::CanonicalEvent;
use crate::providers::{Adapter, LeagueQuery};
use futures_util::future::join_all;
use log::{debug, warn};

pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Runs `queries` in batches of `batch_size`: every request of a batch is in
/// flight together, batches run one after another. A failed league is logged
/// and contributes nothing; results keep query order.
pub async fn run_batches<A: Adapter + ?Sized>(
    adapter: &A,
    queries: &[LeagueQuery],
    batch_size: usize,
) -> Vec<CanonicalEvent> {
    let provider = adapter.provider();
    let mut events = Vec::new();

    for (n, batch) in queries.chunks(batch_size.max(1)).enumerate() {
        debug!("{provider}: batch {} ({} leagues)", n + 1, batch.len());
        let results = join_all(batch.iter().map(|q| adapter.fetch_query(q))).await;

        for (query, result) in batch.iter().zip(results) {
            match result {
                Ok(found) => events.extend(found),
                Err(e) => warn!("{provider}: {query} failed: {e}"),
            }
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ApiError, ApiResult};
    use crate::fixtures;
    use crate::leagues::{self, SCORES365_LEAGUES};
    use crate::Provider;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// One event per league; leagues listed in `failing` error out.
    #[derive(Default)]
    struct FakeAdapter {
        failing: Vec<&'static str>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    impl Adapter for FakeAdapter {
        fn provider(&self) -> Provider {
            Provider::Scores365
        }

        fn queries(&self, sport: Option<&str>) -> Vec<LeagueQuery> {
            leagues::select(Provider::Scores365, sport)
                .into_iter()
                .map(|league| LeagueQuery {
                    league,
                    url: league.native_id.to_owned(),
                })
                .collect()
        }

        async fn fetch_query(&self, query: &LeagueQuery) -> ApiResult<Vec<CanonicalEvent>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            for _ in 0..3 {
                tokio::task::yield_now().await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.failing.contains(&query.league.native_id) {
                return Err(ApiError::InvalidUrl(query.url.clone()));
            }
            Ok(vec![fixtures::event(Provider::Scores365, query.league.native_id, 12)])
        }
    }

    #[tokio::test]
    async fn in_flight_requests_never_exceed_batch_size() {
        let adapter = FakeAdapter::default();
        let events = adapter.fetch_events(None, DEFAULT_BATCH_SIZE).await;

        assert_eq!(events.len(), SCORES365_LEAGUES.len());
        assert_eq!(adapter.calls.load(Ordering::SeqCst), SCORES365_LEAGUES.len());
        let peak = adapter.peak.load(Ordering::SeqCst);
        assert!(peak <= DEFAULT_BATCH_SIZE, "peak {peak}");
        assert!(peak > 1, "batch members should overlap");
    }

    #[tokio::test]
    async fn one_failing_league_does_not_sink_the_rest() {
        let adapter = FakeAdapter {
            failing: vec!["11", "438"],
            ..FakeAdapter::default()
        };
        let events = adapter.fetch_events(None, 3).await;

        assert_eq!(events.len(), SCORES365_LEAGUES.len() - 2);
        assert!(!events.iter().any(|e| e.id == "365scores-11"));
        // query order survives
        assert_eq!(events[0].id, "365scores-7");
        assert_eq!(events[1].id, "365scores-35");
    }

    #[tokio::test]
    async fn zero_batch_size_still_makes_progress() {
        let adapter = FakeAdapter::default();
        let queries = adapter.queries(Some("basketball"));
        let events = run_batches(&adapter, &queries, 0).await;
        assert_eq!(events.len(), 1);
        assert_eq!(adapter.peak.load(Ordering::SeqCst), 1);
    }
}
