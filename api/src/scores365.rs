/// Wire types for the 365scores web API.
/// Endpoint: https://webws.365scores.com/web/games/current/?appTypeId=5&competitions={id}
use crate::flex::{FlexId, lenient_seq};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Default, Debug)]
pub struct GamesResponse {
    /// Decoded one game at a time by the adapter.
    #[serde(default)]
    pub games: Vec<Value>,
    /// Names for competitions outside the league table, read by team
    /// schedules.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub competitions: Option<Vec<Scores365Competition>>,
}

impl GamesResponse {
    pub fn competition_name(&self, id: &str) -> Option<String> {
        self.competitions
            .iter()
            .flatten()
            .find(|c| c.id.as_ref().and_then(FlexId::value).as_deref() == Some(id))
            .and_then(|c| c.name.clone())
    }
}

/// Endpoint: /web/competitors/?appTypeId=5&competitorIds={id}
#[derive(Deserialize, Default, Debug)]
pub struct CompetitorsResponse {
    #[serde(default)]
    pub competitors: Vec<Value>,
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Scores365Competition {
    pub id: Option<FlexId>,
    pub name: Option<String>,
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Scores365Game {
    pub id: Option<FlexId>,
    pub competition_id: Option<FlexId>,
    pub competition_display_name: Option<String>,
    pub name: Option<String>,
    /// 0 not started, 1-5/9-11/13-15 in play, 6/16/17 ended, 7 postponed,
    /// 8 cancelled, 12 to be announced.
    pub status_id: Option<i64>,
    pub status_text: Option<String>, // "HT", "45'", "Ended", "Top 7th"
    pub start_time: Option<String>,
    pub home_competitor: Option<Scores365Competitor>,
    pub away_competitor: Option<Scores365Competitor>,
    pub venue: Option<Scores365Venue>,
    pub tv_networks: Option<Vec<Scores365TvNetwork>>,
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Scores365Competitor {
    pub id: Option<FlexId>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub image_url: Option<String>,
    /// `-1` until the game has a score.
    pub score: Option<f64>,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct Scores365Venue {
    pub name: Option<String>,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct Scores365TvNetwork {
    pub name: Option<String>,
}
