//! Fan-out over every provider and priority merge into one catalog.

use crate::cache::CatalogSource;
use crate::client::{ApiResult, HttpFetcher};
use crate::config::FeedConfig;
use crate::leagues::{is_combat_sport, resolve_sport};
use crate::providers::{Adapter, EspnAdapter, Scores365Adapter};
use crate::{CanonicalEvent, Provider, TeamSchedule};
use futures_util::future::join;
use log::debug;
use std::collections::HashSet;

pub struct Aggregator {
    espn: EspnAdapter,
    scores365: Scores365Adapter,
    batch_size: usize,
}

impl Aggregator {
    pub fn new(config: &FeedConfig) -> Self {
        let http = HttpFetcher::new(config.http_timeout, &config.user_agent);
        Self {
            espn: EspnAdapter::new(http.clone(), config),
            scores365: Scores365Adapter::new(http, config),
            batch_size: config.batch_size,
        }
    }

    /// Both providers concurrently, merged and ordered. With a `sport` only
    /// that sport's leagues are requested.
    pub async fn aggregate(&self, sport: Option<&str>) -> Vec<CanonicalEvent> {
        let (espn, scores365) = join(
            self.espn.fetch_events(sport, self.batch_size),
            self.scores365.fetch_events(sport, self.batch_size),
        )
        .await;
        debug!(
            "aggregated {} espn + {} 365scores events",
            espn.len(),
            scores365.len()
        );

        let mut merged = merge_by_priority(vec![
            (Provider::Espn, espn),
            (Provider::Scores365, scores365),
        ]);
        let combat = sport
            .and_then(resolve_sport)
            .is_some_and(|s| is_combat_sport(s.slug));
        order_for_scope(&mut merged, combat);
        merged
    }

    /// One team's details and fixtures from `provider`, soonest first.
    /// Team ids are provider-native, so there is nothing to merge.
    pub async fn team_schedule(&self, provider: Provider, team_id: &str) -> ApiResult<TeamSchedule> {
        let mut schedule = match provider {
            Provider::Espn => self.espn.team_schedule(team_id).await?,
            Provider::Scores365 => self.scores365.team_schedule(team_id).await?,
        };
        schedule.events.retain(|event| !event.status.is_removal());
        schedule.events.sort_by_key(|event| event.start_time);
        Ok(schedule)
    }
}

impl CatalogSource for Aggregator {
    async fn aggregate_all(&self) -> Vec<CanonicalEvent> {
        self.aggregate(None).await
    }
}

/// Concatenates per-provider lists in priority order, keeps the first event
/// per id, drops postponed/cancelled, then stable-sorts by start time.
pub fn merge_by_priority(mut lists: Vec<(Provider, Vec<CanonicalEvent>)>) -> Vec<CanonicalEvent> {
    lists.sort_by_key(|(provider, _)| provider.rank());

    let mut seen = HashSet::new();
    let mut merged: Vec<CanonicalEvent> = lists
        .into_iter()
        .flat_map(|(_, events)| events)
        .filter(|event| !event.status.is_removal())
        .filter(|event| seen.insert(event.id.clone()))
        .collect();
    merged.sort_by_key(|event| event.start_time);
    merged
}

/// Combat listings put main events first; both halves stay time-ordered.
pub fn order_for_scope(events: &mut [CanonicalEvent], combat_scope: bool) {
    if combat_scope {
        events.sort_by_key(|event| !event.is_main_event);
    }
}
