pub mod aggregate;
pub mod cache;
pub mod catalog;
pub mod client;
pub mod config;
pub mod espn;
pub mod flex;
pub mod identity;
pub mod leagues;
pub mod orchestrator;
pub mod providers;
pub mod scores365;
pub mod status;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use catalog::{CatalogFilter, EventCatalog};
pub use config::FeedConfig;
pub use status::EventStatus;

// ---------------------------------------------------------------------------
// Domain types: canonical model, independent of any provider wire format
// ---------------------------------------------------------------------------

/// Upstream data source. Declaration order is merge priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Espn,
    Scores365,
}

impl Provider {
    /// Fixed merge priority: earlier providers win id collisions.
    pub const PRIORITY: [Provider; 2] = [Provider::Espn, Provider::Scores365];

    /// Namespace used in canonical ids, e.g. `espn-401547`.
    pub fn prefix(&self) -> &'static str {
        match self {
            Provider::Espn => "espn",
            Provider::Scores365 => "365scores",
        }
    }

    pub fn rank(&self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|p| p == self)
            .unwrap_or(Self::PRIORITY.len())
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// One sporting fixture as the rest of the system sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    pub id: String,
    pub slug: String,
    pub provider: Provider,
    pub title: String,
    pub sport: String,
    pub sport_slug: String,
    pub league: String,
    pub participants: Participants,
    pub start_time: DateTime<Utc>,
    pub venue: String,
    pub status: EventStatus,
    pub score: Option<Score>,
    pub links: Vec<WatchLink>,
    pub broadcast: Option<String>,
    pub is_main_event: bool,
    pub statistics: Option<Statistics>,
    pub timeline: Option<Vec<TimelineItem>>,
}

impl CanonicalEvent {
    pub fn is_live(&self) -> bool {
        self.status == EventStatus::Live
    }
}

/// "home"/"away" is a display convention only; fighter pairs, player pairs
/// and synthesized session sides use the same two slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participants {
    pub home: Participant,
    pub away: Participant,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub logo_ref: String,
    pub abbreviation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub home: f64,
    pub away: f64,
    pub display_home: String,
    pub display_away: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Official,
    Unofficial,
    Highlight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchLink {
    pub label: String,
    pub url: String,
    pub kind: LinkKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub home: Vec<StatItem>,
    pub away: Vec<StatItem>,
}

impl Statistics {
    /// `None` when neither side carries anything, so absence stays absence.
    pub fn from_sides(home: Vec<StatItem>, away: Vec<StatItem>) -> Option<Self> {
        if home.is_empty() && away.is_empty() {
            None
        } else {
            Some(Self { home, away })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatItem {
    pub name: String,          // "possessionPct"
    pub abbreviation: String,  // "PP"
    pub display_value: String, // "65.3"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Yellow,
    Red,
}

/// Key moment inside a match (goal, card, substitution...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub kind: String,
    pub clock: String, // "34'", "45'+3'"
    pub team_id: Option<String>,
    pub team_name: Option<String>,
    pub athletes: Vec<TimelineAthlete>,
    pub is_goal: bool,
    pub is_own_goal: bool,
    pub is_penalty: bool,
    pub card: Option<CardKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineAthlete {
    pub id: String,
    pub display_name: String,
    pub team_id: Option<String>,
}

/// Club header returned with a team schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
    pub logo_ref: String,
    pub record_summary: Option<String>,  // "18-6-4"
    pub standing_summary: Option<String>, // "2nd in English Premier League"
    pub color: Option<String>,
    pub season: Option<String>,
}

/// One team's fixtures from a single provider, soonest first. `team` is
/// `None` when the provider had no details for the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSchedule {
    pub provider: Provider,
    pub team: Option<TeamInfo>,
    pub events: Vec<CanonicalEvent>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    /// Scheduled soccer fixture on 2025-03-01 at `hour`:00 UTC.
    pub fn event(provider: Provider, native_id: &str, hour: u32) -> CanonicalEvent {
        let title = format!("Home {native_id} vs Away {native_id}");
        CanonicalEvent {
            id: identity::event_id(provider, native_id),
            slug: identity::derive_slug(&title, native_id),
            provider,
            title,
            sport: "Soccer".to_owned(),
            sport_slug: "soccer".to_owned(),
            league: "Premier League".to_owned(),
            participants: Participants {
                home: Participant::default(),
                away: Participant::default(),
            },
            start_time: Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap(),
            venue: "N/A".to_owned(),
            status: EventStatus::Scheduled,
            score: None,
            links: Vec::new(),
            broadcast: None,
            is_main_event: false,
            statistics: None,
            timeline: None,
        }
    }

    pub fn in_league(mut event: CanonicalEvent, sport_slug: &str, league: &str) -> CanonicalEvent {
        event.sport_slug = sport_slug.to_owned();
        event.sport = leagues::sport_name(sport_slug).to_owned();
        event.league = league.to_owned();
        event
    }
}
