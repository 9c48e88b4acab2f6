use super::{
    Adapter, EventDraft, LeagueQuery, decode_records, first_text, non_empty, parse_start_time,
    score_if_started, watch_link,
};
use crate::client::{ApiResult, HttpFetcher};
use crate::config::FeedConfig;
use crate::flex::{FlexScore, id_of};
use crate::identity::{abbreviate, canonical_title};
use crate::leagues::{self, League};
use crate::scores365::{CompetitorsResponse, GamesResponse, Scores365Competitor, Scores365Game};
use crate::status::{CodeClass, RawStatus, normalize};
use crate::{CanonicalEvent, Participant, Participants, Provider, TeamInfo, TeamSchedule};
use futures_util::future::join;
use log::{debug, warn};

const COMPETITOR_IMAGE: &str = "https://imagecache.365scores.com/image/upload/f_png,w_82,h_82,c_limit,q_auto:eco,dpr_2,d_Competitors:default1.png/v20/Competitors/";

/// 365scores web API, one request per competition.
#[derive(Debug, Clone)]
pub struct Scores365Adapter {
    http: HttpFetcher,
    base_url: String,
    watch_url: String,
}

impl Scores365Adapter {
    pub fn new(http: HttpFetcher, config: &FeedConfig) -> Self {
        Self {
            http,
            base_url: config.scores365_base.trim_end_matches('/').to_owned(),
            watch_url: config.watch_url.clone(),
        }
    }

    pub fn league_url(&self, league: &League) -> String {
        format!(
            "{}/web/games/current/?appTypeId=5&competitions={}&sports=1,2,3,4,10",
            self.base_url, league.native_id
        )
    }

    pub fn team_games_url(&self, team_id: &str) -> String {
        format!(
            "{}/web/games/current/?appTypeId=5&competitors={}",
            self.base_url,
            team_id.trim()
        )
    }

    pub fn team_details_url(&self, team_id: &str) -> String {
        format!(
            "{}/web/competitors/?appTypeId=5&competitorIds={}",
            self.base_url,
            team_id.trim()
        )
    }

    /// Current fixtures of one competitor. Games in a configured competition
    /// use that league; the rest borrow the sport of the team's first
    /// configured game and keep their own competition name.
    pub async fn team_games(&self, team_id: &str) -> ApiResult<Vec<CanonicalEvent>> {
        let url = self.team_games_url(team_id);
        let mut raw: GamesResponse = self.http.get_json(&url).await?;
        let games: Vec<Scores365Game> =
            decode_records(std::mem::take(&mut raw.games), Provider::Scores365, &url);

        let home_league = games.iter().find_map(configured_league);
        let events: Vec<CanonicalEvent> = games
            .iter()
            .filter_map(|game| match configured_league(game) {
                Some(league) => self.map_game(game, league, None),
                None => {
                    let league = home_league?;
                    let name = first_text([game.competition_display_name.as_deref()]).or_else(|| {
                        id_of(game.competition_id.as_ref()).and_then(|id| raw.competition_name(&id))
                    });
                    self.map_game(game, league, name)
                }
            })
            .collect();
        debug!("365scores: {} games for team {team_id}", events.len());
        Ok(events)
    }

    /// `None` when 365scores knows no competitor with this id.
    pub async fn team_details(&self, team_id: &str) -> ApiResult<Option<TeamInfo>> {
        let url = self.team_details_url(team_id);
        let raw: CompetitorsResponse = self.http.get_json(&url).await?;
        let competitors: Vec<Scores365Competitor> =
            decode_records(raw.competitors, Provider::Scores365, &url);
        Ok(competitors.first().map(|c| {
            let side = competitor(c, "Unknown Team");
            TeamInfo {
                id: side.id,
                name: side.name,
                abbreviation: side.abbreviation,
                logo_ref: side.logo_ref,
                record_summary: None,
                standing_summary: None,
                color: None,
                season: None,
            }
        }))
    }

    /// Details and games together. Missing details don't hide the games.
    pub async fn team_schedule(&self, team_id: &str) -> ApiResult<TeamSchedule> {
        let (team, events) = join(self.team_details(team_id), self.team_games(team_id)).await;
        let team = team.unwrap_or_else(|e| {
            warn!("365scores: no details for team {team_id}: {e}");
            None
        });
        Ok(TeamSchedule {
            provider: Provider::Scores365,
            team,
            events: events?,
        })
    }

    fn map_game(
        &self,
        game: &Scores365Game,
        league: &League,
        league_name: Option<String>,
    ) -> Option<CanonicalEvent> {
        let native_id = id_of(game.id.as_ref())?;
        let (Some(home), Some(away)) = (&game.home_competitor, &game.away_competitor) else {
            debug!("365scores: dropping {native_id}, missing competitors");
            return None;
        };

        let status = normalize(
            &RawStatus::new()
                .with_code(game.status_id.and_then(code_class))
                .with_text(game.status_text.as_deref()),
        );
        if status.is_removal() {
            debug!("365scores: dropping {native_id} ({status})");
            return None;
        }
        let Some(start_time) = game.start_time.as_deref().and_then(parse_start_time) else {
            debug!("365scores: dropping {native_id}, no usable start time");
            return None;
        };

        let home_side = competitor(home, "Home Team");
        let away_side = competitor(away, "Away Team");
        let title = canonical_title(&format!("{} vs {}", home_side.name, away_side.name));

        let mut mapped = EventDraft {
            provider: Provider::Scores365,
            league,
            league_name,
            native_id,
            slug_title: title.clone(),
            title,
            participants: Participants {
                home: home_side,
                away: away_side,
            },
            start_time,
            venue: game.venue.as_ref().and_then(|v| v.name.clone()),
            status,
        }
        .finish();
        mapped.score = score_if_started(status, posted_score(home).as_ref(), posted_score(away).as_ref());

        let networks: Vec<String> = game
            .tv_networks
            .iter()
            .flatten()
            .filter_map(|n| non_empty(n.name.clone()))
            .collect();
        if !networks.is_empty() {
            mapped.links.extend(watch_link(&self.watch_url, &mapped.title));
            mapped.broadcast = Some(networks.join(", "));
        }
        Some(mapped)
    }
}

impl Adapter for Scores365Adapter {
    fn provider(&self) -> Provider {
        Provider::Scores365
    }

    fn queries(&self, sport: Option<&str>) -> Vec<LeagueQuery> {
        leagues::select(Provider::Scores365, sport)
            .into_iter()
            .map(|league| LeagueQuery {
                league,
                url: self.league_url(league),
            })
            .collect()
    }

    async fn fetch_query(&self, query: &LeagueQuery) -> ApiResult<Vec<CanonicalEvent>> {
        let raw: GamesResponse = self.http.get_json(&query.url).await?;
        let games: Vec<Scores365Game> = decode_records(raw.games, Provider::Scores365, query);
        let events: Vec<CanonicalEvent> = games
            .iter()
            .filter_map(|game| self.map_game(game, query.league, None))
            .collect();
        debug!("365scores: {} events from {query}", events.len());
        Ok(events)
    }
}

/// 365scores `statusId` table.
pub fn code_class(status_id: i64) -> Option<CodeClass> {
    match status_id {
        0 => Some(CodeClass::NotStarted),
        1..=5 | 9..=11 | 13..=15 => Some(CodeClass::InPlay),
        6 | 16 | 17 => Some(CodeClass::Ended),
        7 => Some(CodeClass::Postponed),
        8 => Some(CodeClass::Cancelled),
        12 => Some(CodeClass::Announced),
        _ => None,
    }
}

fn configured_league(game: &Scores365Game) -> Option<&'static League> {
    let id = id_of(game.competition_id.as_ref())?;
    leagues::SCORES365_LEAGUES
        .iter()
        .find(|league| league.native_id == id)
}

fn competitor(c: &Scores365Competitor, fallback_name: &str) -> Participant {
    let name = first_text([c.name.as_deref()]).unwrap_or_else(|| fallback_name.to_owned());
    let id = id_of(c.id.as_ref());
    Participant {
        logo_ref: non_empty(c.image_url.clone())
            .or_else(|| id.as_ref().map(|id| format!("{COMPETITOR_IMAGE}{id}")))
            .unwrap_or_default(),
        id: format!(
            "365scores-team-{}",
            id.unwrap_or_else(|| name.split_whitespace().collect::<String>().to_lowercase())
        ),
        abbreviation: first_text([c.short_name.as_deref()]).unwrap_or_else(|| abbreviate(&name, 3)),
        name,
    }
}

/// `-1` (or nothing) until a score is posted.
fn posted_score(c: &Scores365Competitor) -> Option<FlexScore> {
    c.score
        .filter(|s| s.is_finite() && *s >= 0.0)
        .map(FlexScore::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventStatus, LinkKind};
    use chrono::{TimeZone, Utc};
    use mockito::Matcher;
    use serde_json::json;
    use std::time::Duration;

    fn adapter(server: &mockito::ServerGuard) -> Scores365Adapter {
        let config = FeedConfig {
            scores365_base: server.url(),
            ..FeedConfig::default()
        };
        Scores365Adapter::new(HttpFetcher::new(Duration::from_secs(5), "sportsfeed-test"), &config)
    }

    fn premier_league(adapter: &Scores365Adapter) -> LeagueQuery {
        let league = leagues::SCORES365_LEAGUES
            .iter()
            .find(|l| l.native_id == "7")
            .unwrap();
        LeagueQuery {
            league,
            url: adapter.league_url(league),
        }
    }

    fn game(id: u64, status_id: i64, status_text: &str, home_score: f64, away_score: f64) -> serde_json::Value {
        json!({
            "id": id,
            "competitionId": 7,
            "statusId": status_id,
            "statusText": status_text,
            "startTime": "2025-03-01T15:00:00+00:00",
            "homeCompetitor": {"id": 110, "name": "Arsenal", "shortName": "ARS", "score": home_score},
            "awayCompetitor": {"id": 131, "name": "Chelsea", "imageUrl": "https://img/131.png", "score": away_score},
            "venue": {"name": "Emirates Stadium"}
        })
    }

    #[test]
    fn status_codes_map_to_classes() {
        assert_eq!(code_class(0), Some(CodeClass::NotStarted));
        assert_eq!(code_class(14), Some(CodeClass::InPlay));
        assert_eq!(code_class(17), Some(CodeClass::Ended));
        assert_eq!(code_class(7), Some(CodeClass::Postponed));
        assert_eq!(code_class(8), Some(CodeClass::Cancelled));
        assert_eq!(code_class(12), Some(CodeClass::Announced));
        assert_eq!(code_class(99), None);
    }

    #[test]
    fn url_carries_competition_id() {
        let server = mockito::Server::new();
        let adapter = adapter(&server);
        assert_eq!(
            premier_league(&adapter).url,
            format!(
                "{}/web/games/current/?appTypeId=5&competitions=7&sports=1,2,3,4,10",
                server.url()
            )
        );
        assert_eq!(adapter.queries(Some("american-football")).len(), 1);
        assert!(adapter.queries(Some("golf")).is_empty());
    }

    #[tokio::test]
    async fn games_map_to_canonical_events() {
        let mut server = mockito::Server::new_async().await;
        let adapter = adapter(&server);
        let q = premier_league(&adapter);
        let mut live = game(3921, 2, "45'", 1.0, 0.0);
        live["tvNetworks"] = json!([{"name": "Sky Sports"}, {"name": " "}]);
        server
            .mock("GET", "/web/games/current/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "competitions": [],
                    "games": [
                        live,
                        game(3922, 1, "HT", 0.0, 0.0),
                        game(3923, 0, "", -1.0, -1.0),
                        game(3924, 7, "Postponed", -1.0, -1.0),
                        game(3925, 8, "Cancelled", -1.0, -1.0),
                        {"id": 3926, "statusId": 2}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let events = adapter.fetch_query(&q).await.unwrap();
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["365scores-3921", "365scores-3922", "365scores-3923"]);

        let ev = &events[0];
        assert_eq!(ev.title, "Arsenal vs Chelsea");
        assert_eq!(ev.slug, "arsenal-vs-chelsea-3921");
        assert_eq!(ev.sport, "Soccer");
        assert_eq!(ev.league, "Premier League");
        assert_eq!(ev.status, EventStatus::Live);
        assert_eq!(ev.venue, "Emirates Stadium");
        assert_eq!(ev.start_time, Utc.with_ymd_and_hms(2025, 3, 1, 15, 0, 0).unwrap());
        assert_eq!(ev.participants.home.id, "365scores-team-110");
        assert_eq!(ev.participants.home.abbreviation, "ARS");
        assert_eq!(ev.participants.home.logo_ref, format!("{COMPETITOR_IMAGE}110"));
        assert_eq!(ev.participants.away.logo_ref, "https://img/131.png");
        assert_eq!(ev.participants.away.abbreviation, "CHE");
        assert_eq!(ev.score.as_ref().map(|s| (s.home, s.away)), Some((1.0, 0.0)));
        assert_eq!(ev.broadcast.as_deref(), Some("Sky Sports"));
        assert_eq!(ev.links.len(), 1);
        assert_eq!(ev.links[0].kind, LinkKind::Unofficial);

        assert_eq!(events[1].status, EventStatus::Halftime);
        assert!(events[1].links.is_empty());
        assert_eq!(events[2].status, EventStatus::Scheduled);
        assert!(events[2].score.is_none());
    }

    #[test]
    fn unposted_score_is_absent() {
        let adapter = Scores365Adapter::new(
            HttpFetcher::new(Duration::from_secs(1), "t"),
            &FeedConfig::default(),
        );
        let league = &leagues::SCORES365_LEAGUES[0];
        let raw: Scores365Game = serde_json::from_value(game(1, 6, "Ended", 2.0, -1.0)).unwrap();
        let ev = adapter.map_game(&raw, league, None).unwrap();
        assert_eq!(ev.status, EventStatus::Finished);
        assert!(ev.score.is_none());
    }

    #[tokio::test]
    async fn team_games_name_unconfigured_competitions() {
        let mut server = mockito::Server::new_async().await;
        let adapter = adapter(&server);
        assert_eq!(
            adapter.team_games_url("110"),
            format!("{}/web/games/current/?appTypeId=5&competitors=110", server.url())
        );

        let mut friendly = game(4001, 0, "", -1.0, -1.0);
        friendly["competitionId"] = json!(9999);
        let mut cup = game(4002, 0, "", -1.0, -1.0);
        cup["competitionId"] = json!(9998);
        cup["competitionDisplayName"] = json!("Emirates Cup");
        server
            .mock("GET", "/web/games/current/")
            .match_query(Matcher::UrlEncoded("competitors".into(), "110".into()))
            .with_status(200)
            .with_body(
                json!({
                    "competitions": [{"id": 9999, "name": "Club Friendlies"}, "junk"],
                    "games": [friendly, game(3921, 6, "Ended", 2.0, 1.0), cup]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let events = adapter.team_games("110").await.unwrap();
        let leagues: Vec<&str> = events.iter().map(|e| e.league.as_str()).collect();
        assert_eq!(leagues, vec!["Club Friendlies", "Premier League", "Emirates Cup"]);
        assert!(events.iter().all(|e| e.sport == "Soccer"));
        assert_eq!(events[1].score.as_ref().map(|s| (s.home, s.away)), Some((2.0, 1.0)));
    }

    #[tokio::test]
    async fn team_games_without_any_configured_competition_are_empty() {
        let mut server = mockito::Server::new_async().await;
        let adapter = adapter(&server);
        let mut stray = game(5001, 0, "", -1.0, -1.0);
        stray["competitionId"] = json!(9999);
        server
            .mock("GET", "/web/games/current/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({"games": [stray]}).to_string())
            .create_async()
            .await;
        assert!(adapter.team_games("110").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn team_details_from_competitors_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let adapter = adapter(&server);
        server
            .mock("GET", "/web/competitors/")
            .match_query(Matcher::UrlEncoded("competitorIds".into(), "110".into()))
            .with_status(200)
            .with_body(json!({"competitors": [{"id": 110, "name": " Arsenal ", "shortName": "ARS"}]}).to_string())
            .create_async()
            .await;

        let team = adapter.team_details("110").await.unwrap().unwrap();
        assert_eq!(team.id, "365scores-team-110");
        assert_eq!(team.name, "Arsenal");
        assert_eq!(team.abbreviation, "ARS");
        assert_eq!(team.logo_ref, format!("{COMPETITOR_IMAGE}110"));
        assert_eq!(team.season, None);
    }

    #[tokio::test]
    async fn team_schedule_survives_missing_details() {
        let mut server = mockito::Server::new_async().await;
        let adapter = adapter(&server);
        server
            .mock("GET", "/web/competitors/")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;
        server
            .mock("GET", "/web/games/current/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({"games": [game(3921, 0, "", -1.0, -1.0)]}).to_string())
            .create_async()
            .await;

        let schedule = adapter.team_schedule("110").await.unwrap();
        assert_eq!(schedule.provider, Provider::Scores365);
        assert!(schedule.team.is_none());
        assert_eq!(schedule.events.len(), 1);
    }

    #[tokio::test]
    async fn empty_payload_is_no_games() {
        let mut server = mockito::Server::new_async().await;
        let adapter = adapter(&server);
        let q = premier_league(&adapter);
        server
            .mock("GET", "/web/games/current/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;
        assert!(adapter.fetch_query(&q).await.unwrap().is_empty());
    }
}
