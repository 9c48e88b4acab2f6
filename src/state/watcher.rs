use chrono::Local;
use log::debug;
use sportsfeed_api::EventCatalog;
use sportsfeed_api::cache::CatalogSource;
use std::io::Write;
use std::time::Duration;
use tokio::time::interval;

/// Polls the catalog's live view and prints one line per tick. Upstream is
/// only hit when the cached generation has expired.
pub struct LiveWatcher<'a, S> {
    catalog: &'a EventCatalog<S>,
    every: Duration,
}

impl<'a, S: CatalogSource> LiveWatcher<'a, S> {
    pub fn new(catalog: &'a EventCatalog<S>, every: Duration) -> Self {
        Self {
            catalog,
            every: every.max(Duration::from_secs(1)),
        }
    }

    /// Runs until ctrl-c.
    pub async fn run<W: Write>(self, out: &mut W) -> anyhow::Result<()> {
        let mut ticks = interval(self.every);
        // First tick completes immediately.
        ticks.tick().await;
        self.report(out).await?;

        loop {
            tokio::select! {
                _ = ticks.tick() => self.report(out).await?,
                _ = tokio::signal::ctrl_c() => {
                    debug!("watch interrupted");
                    return Ok(());
                }
            }
        }
    }

    pub async fn report<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let live = self.catalog.live().await;
        let snapshot = self.catalog.snapshot().await;
        writeln!(
            out,
            "[{}] {} live of {} events (catalog from {})",
            Local::now().format("%H:%M:%S"),
            live.len(),
            snapshot.events.len(),
            snapshot.computed_at.with_timezone(&Local).format("%H:%M:%S"),
        )?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sportsfeed_api::cache::CatalogCache;
    use sportsfeed_api::{CanonicalEvent, EventStatus};

    struct TwoEvents;

    impl CatalogSource for TwoEvents {
        async fn aggregate_all(&self) -> Vec<CanonicalEvent> {
            [EventStatus::Live, EventStatus::Scheduled]
                .into_iter()
                .enumerate()
                .map(|(n, status)| {
                    serde_json::from_value(serde_json::json!({
                        "id": format!("espn-{n}"),
                        "slug": format!("game-{n}"),
                        "provider": "espn",
                        "title": "A vs B",
                        "sport": "Soccer",
                        "sport_slug": "soccer",
                        "league": "MLS",
                        "participants": {
                            "home": {"id": "h", "name": "A", "logo_ref": "", "abbreviation": "A"},
                            "away": {"id": "a", "name": "B", "logo_ref": "", "abbreviation": "B"}
                        },
                        "start_time": "2025-03-01T15:00:00Z",
                        "venue": "N/A",
                        "status": status,
                        "score": null,
                        "links": [],
                        "broadcast": null,
                        "is_main_event": false,
                        "statistics": null,
                        "timeline": null
                    }))
                    .unwrap()
                })
                .collect()
        }
    }

    #[tokio::test]
    async fn test_report_counts_live_events() {
        let catalog = EventCatalog::new(CatalogCache::new(TwoEvents, Duration::from_secs(60)));
        let watcher = LiveWatcher::new(&catalog, Duration::from_millis(10));
        let mut out = Vec::new();
        watcher.report(&mut out).await.unwrap();

        let line = String::from_utf8(out).unwrap();
        assert!(line.contains("1 live of 2 events"), "{line}");
        assert_eq!(watcher.every, Duration::from_secs(1));
    }
}
