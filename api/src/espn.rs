/// ESPN API raw wire types: serde shapes for deserializing ESPN responses.
/// The ESPN adapter in `providers/espn.rs` maps these to canonical events.
///
/// Records are kept as `serde_json::Value` in the envelopes and decoded one
/// at a time, so a single odd record never sinks a whole league.
use crate::flex::{FlexId, FlexScore, lenient_seq};
use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    #[serde(default)]
    pub events: Vec<Value>,
    /// Some racing/golf scoreboards nest their events one level down.
    #[serde(default)]
    pub competitions: Vec<NestedCompetition>,
}

impl ScoreboardResponse {
    pub fn records(self) -> Vec<Value> {
        if !self.events.is_empty() {
            return self.events;
        }
        self.competitions
            .into_iter()
            .flat_map(|c| c.events)
            .collect()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NestedCompetition {
    #[serde(default)]
    pub events: Vec<Value>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<FlexId>,
    pub name: Option<String>,
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
    pub date: Option<String>, // "2025-03-01T19:30Z", not always RFC 3339
    pub status: Option<EspnStatus>,
    /// Bouts on fight cards, sessions on race weekends.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub competitions: Option<Vec<EspnCompetition>>,
    pub venue: Option<EspnVenue>,
    pub circuit: Option<EspnVenue>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub links: Option<Vec<EspnLink>>,
    /// Only on team schedules, which mix competitions.
    pub league: Option<EspnLeagueRef>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnLeagueRef {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
    pub period: Option<u8>,
    #[serde(rename = "displayClock")]
    pub display_clock: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatusType {
    pub name: Option<String>, // "STATUS_SCHEDULED", "STATUS_IN_PROGRESS", "STATUS_FINAL"
    pub state: Option<String>, // "pre" | "in" | "post"
    pub completed: Option<bool>,
    pub description: Option<String>,
    pub detail: Option<String>,
    #[serde(rename = "shortDetail")]
    pub short_detail: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    pub id: Option<FlexId>,
    pub date: Option<String>,
    pub name: Option<String>, // session name on race weekends
    pub status: Option<EspnStatus>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub competitors: Option<Vec<EspnCompetitor>>,
    pub venue: Option<EspnVenue>,
    pub circuit: Option<EspnVenue>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub broadcasts: Option<Vec<EspnBroadcast>>,
    #[serde(rename = "geoBroadcasts", default, deserialize_with = "lenient_seq")]
    pub geo_broadcasts: Option<Vec<EspnBroadcast>>,
    #[serde(rename = "type")]
    pub competition_type: Option<EspnCompetitionType>,
    pub headlines: Option<Vec<EspnHeadline>>,
    pub format: Option<EspnFormat>,
    /// Timeline array on team games, a `{regulation}` object on fight cards.
    pub details: Option<Value>,
}

impl EspnCompetition {
    pub fn timeline_details(&self) -> Vec<EspnDetail> {
        match &self.details {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Scheduled rounds, from `format.regulation` or `details.regulation`.
    pub fn regulation_periods(&self) -> Option<u64> {
        let from_format = self
            .format
            .as_ref()
            .and_then(|f| f.regulation.as_ref())
            .and_then(|r| r.periods);
        from_format.or_else(|| {
            self.details
                .as_ref()?
                .get("regulation")?
                .get("periods")?
                .as_u64()
        })
    }

    pub fn broadcast_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for b in self
            .broadcasts
            .iter()
            .flatten()
            .chain(self.geo_broadcasts.iter().flatten())
        {
            for name in b.names() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetitionType {
    pub id: Option<FlexId>,
    pub abbreviation: Option<String>, // "FP1", "Race", "Main Event"
    pub text: Option<String>,
    #[serde(rename = "shortDetail")]
    pub short_detail: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnHeadline {
    #[serde(rename = "type")]
    pub headline_type: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnFormat {
    pub regulation: Option<EspnRegulation>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnRegulation {
    pub periods: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetitor {
    pub id: Option<FlexId>,
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    pub athlete: Option<EspnAthlete>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>, // tennis header sends bare names
    pub score: Option<FlexScore>,
    pub winner: Option<bool>,
    /// `[{name, abbreviation, displayValue}]` on most sports; shape varies.
    pub statistics: Option<Value>,
}

impl EspnCompetitor {
    pub fn is_side(&self, side: &str) -> bool {
        self.home_away.as_deref() == Some(side)
    }

    pub fn stat_items(&self) -> Vec<EspnStat> {
        match &self.statistics {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| serde_json::from_value::<EspnStat>(item.clone()).ok())
                .filter(|s| s.name.is_some())
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStat {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeam {
    pub id: Option<FlexId>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "shortDisplayName")]
    pub short_display_name: Option<String>,
    pub abbreviation: Option<String>,
    pub logo: Option<String>,
    /// Team schedules send `logos: [{href}]` instead of `logo`.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub logos: Option<Vec<EspnLogo>>,
    #[serde(rename = "recordSummary")]
    pub record_summary: Option<String>,
    #[serde(rename = "standingSummary")]
    pub standing_summary: Option<String>,
    pub color: Option<String>,
}

impl EspnTeam {
    pub fn logo_url(&self) -> Option<String> {
        self.logo
            .iter()
            .chain(self.logos.iter().flatten().filter_map(|l| l.href.as_ref()))
            .map(|url| url.trim())
            .find(|url| !url.is_empty())
            .map(str::to_owned)
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnLogo {
    pub href: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnAthlete {
    pub id: Option<FlexId>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
    /// `{href}` on the scoreboard, a bare URL on some header payloads.
    pub headshot: Option<Value>,
}

impl EspnAthlete {
    pub fn headshot_url(&self) -> Option<String> {
        match self.headshot.as_ref()? {
            Value::String(url) => Some(url.clone()),
            other => other.get("href")?.as_str().map(str::to_owned),
        }
        .filter(|url| !url.trim().is_empty())
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnVenue {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnBroadcast {
    pub media: Option<EspnMedia>,
    pub names: Option<Vec<String>>,
}

impl EspnBroadcast {
    pub fn names(&self) -> Vec<String> {
        let media = self
            .media
            .as_ref()
            .and_then(|m| m.short_name.clone())
            .into_iter();
        media
            .chain(self.names.iter().flatten().cloned())
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnMedia {
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnLink {
    pub href: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "shortText")]
    pub short_text: Option<String>,
    #[serde(default)]
    pub rel: Vec<String>, // ["summary", "desktop", "event"], ["highlights", ...]
}

// ---------------------------------------------------------------------------
// Timeline  (competition.details on team games)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnDetail {
    #[serde(rename = "type")]
    pub detail_type: Option<EspnDetailType>,
    pub clock: Option<EspnClock>,
    pub team: Option<EspnTeamRef>,
    #[serde(rename = "scoringPlay", default)]
    pub scoring_play: bool,
    #[serde(rename = "ownGoal", default)]
    pub own_goal: bool,
    #[serde(rename = "penaltyKick", default)]
    pub penalty_kick: bool,
    #[serde(rename = "yellowCard", default)]
    pub yellow_card: bool,
    #[serde(rename = "redCard", default)]
    pub red_card: bool,
    #[serde(rename = "athletesInvolved")]
    pub athletes_involved: Option<Vec<EspnInvolvedAthlete>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnDetailType {
    pub text: Option<String>, // "Goal", "Yellow Card", "Substitution"
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnClock {
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeamRef {
    pub id: Option<FlexId>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnInvolvedAthlete {
    pub id: Option<FlexId>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub team: Option<EspnTeamRef>,
}

// ---------------------------------------------------------------------------
// Team schedule  (soccer/all/teams/{id}/schedule)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamScheduleResponse {
    pub team: Option<EspnTeam>,
    pub season: Option<EspnSeason>,
    #[serde(default)]
    pub events: Vec<Value>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnSeason {
    pub year: Option<i64>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Scoreboard header  (personalized v2 API, tennis)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct HeaderResponse {
    #[serde(default)]
    pub sports: Vec<HeaderSport>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct HeaderSport {
    #[serde(default)]
    pub leagues: Vec<HeaderLeague>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct HeaderLeague {
    pub name: Option<String>, // tournament, e.g. "Australian Open"
    #[serde(default)]
    pub events: Vec<Value>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct HeaderEvent {
    pub id: Option<FlexId>,
    pub date: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
    pub status: Option<HeaderStatus>,
    #[serde(rename = "fullStatus")]
    pub full_status: Option<EspnStatus>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub competitors: Option<Vec<EspnCompetitor>>,
    pub location: Option<String>,
    pub venue: Option<EspnVenue>,
    pub broadcasts: Option<Vec<EspnBroadcast>>,
    pub broadcast: Option<String>,
    pub link: Option<String>,
}

/// The header feed sends status either as ESPN's usual object or as a bare
/// state string (`"pre"`, `"in"`, `"post"`).
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum HeaderStatus {
    Detailed(EspnStatus),
    State(String),
}
