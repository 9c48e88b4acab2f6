//! Provider adapters: each turns one upstream's payloads into
//! [`CanonicalEvent`]s.

pub mod espn;
pub mod scores365;

pub use espn::EspnAdapter;
pub use scores365::Scores365Adapter;

use crate::client::ApiResult;
use crate::flex::FlexScore;
use crate::identity::{derive_slug, event_id};
use crate::leagues::League;
use crate::orchestrator;
use crate::{CanonicalEvent, EventStatus, LinkKind, Participants, Provider, Score, WatchLink};
use chrono::{DateTime, NaiveDateTime, Utc};
use log::warn;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::future::Future;

/// One upstream request: a league and the endpoint that lists its events.
#[derive(Debug, Clone)]
pub struct LeagueQuery {
    pub league: &'static League,
    pub url: String,
}

impl fmt::Display for LeagueQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.league.name, self.league.native_id)
    }
}

pub trait Adapter: Send + Sync {
    fn provider(&self) -> Provider;

    /// Requests needed to cover `sport` (slug or display name), or every
    /// configured league when `None`.
    fn queries(&self, sport: Option<&str>) -> Vec<LeagueQuery>;

    /// Fetch and map one league. Malformed records are skipped; transport and
    /// status failures are returned.
    fn fetch_query(
        &self,
        query: &LeagueQuery,
    ) -> impl Future<Output = ApiResult<Vec<CanonicalEvent>>> + Send;

    /// Every league for `sport`, in bounded batches. Never fails: a league
    /// that errors contributes nothing.
    fn fetch_events(
        &self,
        sport: Option<&str>,
        batch_size: usize,
    ) -> impl Future<Output = Vec<CanonicalEvent>> + Send {
        async move {
            let queries = self.queries(sport);
            orchestrator::run_batches(self, &queries, batch_size).await
        }
    }
}

// ---------------------------------------------------------------------------
// Shared mapping helpers
// ---------------------------------------------------------------------------

/// Fields every adapter must resolve before an event exists. Optional extras
/// (score, links, statistics...) are set on the returned event.
pub(crate) struct EventDraft<'a> {
    pub provider: Provider,
    pub league: &'a League,
    pub league_name: Option<String>,
    pub native_id: String,
    pub title: String,
    pub slug_title: String,
    pub participants: Participants,
    pub start_time: DateTime<Utc>,
    pub venue: Option<String>,
    pub status: EventStatus,
}

impl EventDraft<'_> {
    pub fn finish(self) -> CanonicalEvent {
        CanonicalEvent {
            id: event_id(self.provider, &self.native_id),
            slug: derive_slug(&self.slug_title, &self.native_id),
            provider: self.provider,
            title: self.title,
            sport: self.league.sport_name().to_owned(),
            sport_slug: self.league.sport_slug.to_owned(),
            league: self
                .league_name
                .unwrap_or_else(|| self.league.name.to_owned()),
            participants: self.participants,
            start_time: self.start_time,
            venue: non_empty(self.venue).unwrap_or_else(|| "N/A".to_owned()),
            status: self.status,
            score: None,
            links: Vec::new(),
            broadcast: None,
            is_main_event: false,
            statistics: None,
            timeline: None,
        }
    }
}

/// RFC 3339, or ESPN's minute-precision `2025-03-01T19:30Z`.
pub fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%MZ", "%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// A score only exists once play has started and both sides are numeric.
pub(crate) fn score_if_started(
    status: EventStatus,
    home: Option<&FlexScore>,
    away: Option<&FlexScore>,
) -> Option<Score> {
    if !status.has_started() {
        return None;
    }
    let (home, away) = (home?, away?);
    Some(Score {
        home: home.numeric()?,
        away: away.numeric()?,
        display_home: home.display()?,
        display_away: away.display()?,
    })
}

/// Unofficial watch link: `base` with the event title as URL fragment.
pub(crate) fn watch_link(base: &str, title: &str) -> Option<WatchLink> {
    let mut url = Url::parse(base).ok()?;
    url.set_fragment(Some(title));
    Some(WatchLink {
        label: "Watch Live".to_owned(),
        url: url.to_string(),
        kind: LinkKind::Unofficial,
    })
}

/// Decode records one by one, logging and skipping the ones that don't fit.
/// `source` names the request in the log line.
pub(crate) fn decode_records<T: DeserializeOwned>(
    records: Vec<Value>,
    provider: Provider,
    source: impl fmt::Display,
) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value(record) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("{provider}: skipping malformed record in {source}: {e}");
                None
            }
        })
        .collect()
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

pub(crate) fn first_text<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_owned)
}
