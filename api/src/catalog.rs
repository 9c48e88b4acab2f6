//! Read side of the system: filtered views over the cached catalog.

use crate::aggregate::{Aggregator, order_for_scope};
use crate::cache::{CatalogCache, CatalogSource, Snapshot};
use crate::client::ApiResult;
use crate::config::FeedConfig;
use crate::identity::scope_slug;
use crate::leagues::{self, LeagueListing, SPORTS, Sport, find_by_slug, is_combat_sport, resolve_sport};
use crate::{CanonicalEvent, Provider, TeamSchedule};
use std::sync::Arc;

/// Optional sport and league narrowing. Each accepts a slug (`mma-ufc`,
/// `premier-league`) or a display name (`MMA`, `Premier League`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub sport: Option<String>,
    pub league: Option<String>,
}

impl CatalogFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn sport(mut self, sport: impl Into<String>) -> Self {
        self.sport = Some(sport.into());
        self
    }

    pub fn league(mut self, league: impl Into<String>) -> Self {
        self.league = Some(league.into());
        self
    }

    pub fn is_unfiltered(&self) -> bool {
        self.sport.is_none() && self.league.is_none()
    }

    pub fn matches(&self, event: &CanonicalEvent) -> bool {
        let sport_ok = self.sport.as_deref().is_none_or(|query| {
            match resolve_sport(query) {
                Some(sport) => event.sport_slug == sport.slug,
                None => scope_slug(query) == scope_slug(&event.sport),
            }
        });
        let league_ok = self
            .league
            .as_deref()
            .is_none_or(|query| scope_slug(query) == scope_slug(&event.league));
        sport_ok && league_ok
    }

    /// Scope is a combat sport, or a league belonging to one.
    pub fn is_combat_scope(&self) -> bool {
        let by_sport = self
            .sport
            .as_deref()
            .and_then(resolve_sport)
            .is_some_and(|s| is_combat_sport(s.slug));
        let by_league = self
            .league
            .as_deref()
            .and_then(find_by_slug)
            .is_some_and(|l| is_combat_sport(l.sport_slug));
        by_sport || by_league
    }
}

/// Cached, deduplicated catalog. Reads never fail: with every upstream down
/// they return empty results.
pub struct EventCatalog<S = Aggregator> {
    cache: CatalogCache<S>,
}

impl EventCatalog<Aggregator> {
    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(CatalogCache::new(Aggregator::new(config), config.cache_ttl))
    }

    /// Uncached: team pages are looked up one at a time.
    pub async fn team_schedule(&self, provider: Provider, team_id: &str) -> ApiResult<TeamSchedule> {
        self.cache.source().team_schedule(provider, team_id).await
    }
}

impl<S: CatalogSource> EventCatalog<S> {
    pub fn new(cache: CatalogCache<S>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &CatalogCache<S> {
        &self.cache
    }

    /// Sports the catalog covers, in display order.
    pub fn sports(&self) -> &'static [Sport] {
        SPORTS
    }

    /// Configured leagues, optionally for one sport (slug or display name).
    /// These are the leagues requested upstream, whether or not they have
    /// events right now.
    pub fn leagues(&self, sport: Option<&str>) -> Vec<LeagueListing> {
        leagues::listing(sport)
    }

    /// The whole current generation, refreshed first if stale.
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.cache.get().await
    }

    /// Events matching `filter`, time-ordered; combat scopes list main
    /// events first.
    pub async fn combined(&self, filter: &CatalogFilter) -> Vec<CanonicalEvent> {
        let snapshot = self.snapshot().await;
        let mut events: Vec<CanonicalEvent> = snapshot
            .events
            .iter()
            .filter(|event| filter.matches(event))
            .cloned()
            .collect();
        order_for_scope(&mut events, filter.is_combat_scope());
        events
    }

    pub async fn by_slug(&self, slug: &str) -> Option<CanonicalEvent> {
        let slug = slug.trim();
        self.snapshot()
            .await
            .events
            .iter()
            .find(|event| event.slug == slug)
            .cloned()
    }

    /// In-play events only; halftime counts as a break, not live.
    pub async fn live(&self) -> Vec<CanonicalEvent> {
        self.snapshot()
            .await
            .events
            .iter()
            .filter(|event| event.is_live())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::merge_by_priority;
    use crate::cache::tests::ManualClock;
    use crate::fixtures::{event, in_league};
    use crate::{EventStatus, Provider};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Fixed catalog shaped like a merged aggregation.
    #[derive(Default)]
    struct FixedSource {
        calls: AtomicUsize,
    }

    impl CatalogSource for FixedSource {
        async fn aggregate_all(&self) -> Vec<CanonicalEvent> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut live = event(Provider::Espn, "1", 14);
            live.status = EventStatus::Live;
            let mut halftime = event(Provider::Scores365, "2", 13);
            halftime.status = EventStatus::Halftime;
            let mut main = in_league(event(Provider::Espn, "500_10", 23), "mma-ufc", "UFC");
            main.is_main_event = true;
            let undercard = in_league(event(Provider::Espn, "500_11", 21), "mma-ufc", "UFC");
            let nba = in_league(event(Provider::Scores365, "3", 20), "basketball", "NBA");
            merge_by_priority(vec![
                (Provider::Espn, vec![live, main, undercard]),
                (Provider::Scores365, vec![halftime, nba]),
            ])
        }
    }

    fn catalog() -> EventCatalog<FixedSource> {
        EventCatalog::new(CatalogCache::with_clock(
            FixedSource::default(),
            Duration::from_secs(60),
            ManualClock::new(),
        ))
    }

    fn ids(events: &[CanonicalEvent]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn listings_come_from_the_league_tables_without_fetching() {
        let catalog = catalog();
        let sports: Vec<&str> = catalog.sports().iter().map(|s| s.slug).collect();
        assert_eq!(sports.first(), Some(&"soccer"));
        assert!(sports.contains(&"mma-ufc"));

        let mma: Vec<String> = catalog.leagues(Some("MMA")).into_iter().map(|l| l.slug).collect();
        assert_eq!(mma, vec!["ufc", "pfl"]);
        let nhl = catalog.leagues(Some("hockey"));
        assert_eq!(nhl[0].providers, vec![Provider::Espn, Provider::Scores365]);
        assert!(catalog.leagues(Some("curling")).is_empty());

        assert_eq!(catalog.cache().source().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn team_schedule_goes_to_the_named_provider() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/soccer/all/teams/359/schedule")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"team": {"id": "359", "displayName": "Arsenal"}, "events": []}"#)
            .create_async()
            .await;
        let config = FeedConfig {
            espn_base: server.url(),
            scores365_base: server.url(),
            ..FeedConfig::default()
        };

        let catalog = EventCatalog::from_config(&config);
        let schedule = catalog.team_schedule(Provider::Espn, "359").await.unwrap();
        assert_eq!(schedule.team.map(|t| t.id).as_deref(), Some("espn-team-359"));
        assert!(schedule.events.is_empty());
        assert!(catalog.cache().peek().is_none());
    }

    #[tokio::test]
    async fn unfiltered_view_is_time_ordered() {
        let catalog = catalog();
        let events = catalog.combined(&CatalogFilter::all()).await;
        assert_eq!(
            ids(&events),
            vec!["365scores-2", "espn-1", "365scores-3", "espn-500_11", "espn-500_10"]
        );
        assert!(events.windows(2).all(|w| w[0].start_time <= w[1].start_time));
    }

    #[tokio::test]
    async fn sport_and_league_filters_accept_names_or_slugs() {
        let catalog = catalog();
        let soccer = catalog.combined(&CatalogFilter::all().sport("Soccer")).await;
        assert_eq!(ids(&soccer), vec!["365scores-2", "espn-1"]);

        let nba = catalog
            .combined(&CatalogFilter::all().sport("basketball").league("nba"))
            .await;
        assert_eq!(ids(&nba), vec!["365scores-3"]);

        let epl = catalog.combined(&CatalogFilter::all().league("premier-league")).await;
        assert_eq!(epl.len(), 2);

        assert!(catalog.combined(&CatalogFilter::all().sport("curling")).await.is_empty());
    }

    #[tokio::test]
    async fn combat_scope_puts_main_event_first() {
        let catalog = catalog();
        for filter in [
            CatalogFilter::all().sport("mma-ufc"),
            CatalogFilter::all().sport("MMA"),
            CatalogFilter::all().league("ufc"),
        ] {
            assert!(filter.is_combat_scope(), "{filter:?}");
            let events = catalog.combined(&filter).await;
            assert_eq!(ids(&events), vec!["espn-500_10", "espn-500_11"], "{filter:?}");
        }
    }

    #[tokio::test]
    async fn slug_lookup_and_live_view() {
        let catalog = catalog();
        let found = catalog.by_slug("home-1-vs-away-1-1").await.unwrap();
        assert_eq!(found.id, "espn-1");
        assert!(catalog.by_slug("no-such-event").await.is_none());

        let live = catalog.live().await;
        assert_eq!(ids(&live), vec!["espn-1"]);
    }

    #[tokio::test]
    async fn filtered_reads_share_the_cached_generation() {
        let catalog = catalog();
        let before = catalog.snapshot().await;
        catalog.combined(&CatalogFilter::all().sport("soccer")).await;
        catalog.live().await;
        catalog.by_slug("x").await;
        let after = catalog.snapshot().await;

        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(catalog.cache().source().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn filter_basics() {
        assert!(CatalogFilter::all().is_unfiltered());
        assert!(!CatalogFilter::all().sport("golf").is_unfiltered());
        assert!(!CatalogFilter::all().sport("soccer").is_combat_scope());
    }
}
