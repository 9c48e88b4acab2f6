use super::{
    Adapter, EventDraft, LeagueQuery, decode_records, first_text, non_empty, parse_start_time,
    score_if_started, watch_link,
};
use crate::client::{ApiResult, HttpFetcher};
use crate::config::FeedConfig;
use crate::espn::{
    EspnAthlete, EspnCompetition, EspnCompetitor, EspnEvent, EspnLink, EspnStatus, EspnTeam,
    HeaderEvent, HeaderResponse, HeaderStatus, ScoreboardResponse, TeamScheduleResponse,
};
use crate::flex::id_of;
use crate::identity::{
    abbreviate, canonical_title, composite_native_id, placeholder_logo, placeholder_participant,
    versus,
};
use crate::leagues::{self, League, PayloadShape};
use crate::status::{RawStatus, normalize};
use crate::{
    CanonicalEvent, CardKind, EventStatus, LinkKind, Participant, Participants, Provider,
    StatItem, Statistics, TeamInfo, TeamSchedule, TimelineAthlete, TimelineItem, WatchLink,
};
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;

const FIGHTER_HEADSHOT: &str = "https://a.espncdn.com/combiner/i?img=/i/headshots/mma/players/full/";

/// ESPN public site API: scoreboards per league plus the tennis header feed.
#[derive(Debug, Clone)]
pub struct EspnAdapter {
    http: HttpFetcher,
    base_url: String,
    tennis_url: String,
    watch_url: String,
}

impl EspnAdapter {
    pub fn new(http: HttpFetcher, config: &FeedConfig) -> Self {
        Self {
            http,
            base_url: config.espn_base.trim_end_matches('/').to_owned(),
            tennis_url: config.espn_tennis_url.clone(),
            watch_url: config.watch_url.clone(),
        }
    }

    pub fn league_url(&self, league: &League, today: NaiveDate) -> String {
        if league.shape == PayloadShape::IndividualMatch {
            return self.tennis_url.clone();
        }
        let url = format!(
            "{}/{}/{}/scoreboard",
            self.base_url, league.path_sport, league.native_id
        );
        if league.date_scoped {
            format!("{url}?dates={}", today.format("%Y%m%d"))
        } else {
            url
        }
    }

    pub fn team_schedule_url(&self, team_id: &str) -> String {
        format!(
            "{}/soccer/all/teams/{}/schedule?fixture=true",
            self.base_url,
            team_id.trim()
        )
    }

    /// Club details and fixtures for one soccer team, across every
    /// competition it plays in.
    pub async fn team_schedule(&self, team_id: &str) -> ApiResult<TeamSchedule> {
        let url = self.team_schedule_url(team_id);
        let raw: TeamScheduleResponse = self.http.get_json(&url).await?;
        let season = raw
            .season
            .as_ref()
            .and_then(|s| first_text([s.display_name.as_deref()]));

        let fixtures: Vec<EspnEvent> = decode_records(raw.events, Provider::Espn, &url);
        let events: Vec<CanonicalEvent> = fixtures
            .iter()
            .filter_map(|fixture| {
                let mut mapped = self.map_team_game(fixture, &leagues::ESPN_SOCCER_TEAMS)?;
                let competition = fixture.league.as_ref().and_then(|l| non_empty(l.name.clone()));
                if let Some(name) = competition.or_else(|| season.clone()) {
                    mapped.league = name;
                }
                Some(mapped)
            })
            .collect();
        debug!("espn: {} fixtures for team {team_id}", events.len());

        Ok(TeamSchedule {
            provider: Provider::Espn,
            team: raw.team.as_ref().map(|team| team_info(team, season)),
            events,
        })
    }

    fn map_scoreboard(&self, raw: ScoreboardResponse, query: &LeagueQuery) -> Vec<CanonicalEvent> {
        let league = query.league;
        let events: Vec<EspnEvent> = decode_records(raw.records(), Provider::Espn, query);
        let mut mapped = Vec::new();
        for event in &events {
            match league.shape {
                PayloadShape::TeamGame => mapped.extend(self.map_team_game(event, league)),
                PayloadShape::FightCard => mapped.extend(self.map_fight_card(event, league)),
                PayloadShape::SessionWeekend => mapped.extend(self.map_race_weekend(event, league)),
                PayloadShape::Tournament => mapped.extend(self.map_tournament(event, league)),
                PayloadShape::IndividualMatch => {}
            }
        }
        mapped
    }

    // -----------------------------------------------------------------------
    // TeamGame
    // -----------------------------------------------------------------------

    fn map_team_game(&self, event: &EspnEvent, league: &League) -> Option<CanonicalEvent> {
        let native_id = id_of(event.id.as_ref())?;
        let competition = event.competitions.as_ref()?.first()?;
        let status = open_status(
            &native_id,
            competition.status.as_ref().or(event.status.as_ref()),
        )?;
        let start_time = start_time(
            &native_id,
            event.date.as_deref().or(competition.date.as_deref()),
        )?;
        let venue = competition.venue.as_ref().and_then(|v| v.full_name.clone());

        let competitors = competition.competitors.as_deref().unwrap_or_default();
        let side = |name: &str| {
            competitors
                .iter()
                .filter(|c| c.is_side(name))
                .find_map(|c| Some((c, c.team.as_ref()?)))
        };
        let (Some((home, home_team)), Some((away, away_team))) = (side("home"), side("away")) else {
            return self.unnamed_team_game(
                event,
                competition,
                league,
                native_id,
                status,
                start_time,
                venue,
            );
        };

        let home_side = team_participant(home_team, "Home Team", "H");
        let away_side = team_participant(away_team, "Away Team", "A");
        let slug_title = versus(&away_side.name, &home_side.name);
        let title = canonical_title(
            &first_text([event.name.as_deref(), event.short_name.as_deref()])
                .unwrap_or_else(|| slug_title.clone()),
        );

        let sides = [
            (id_of(home_team.id.as_ref()), home_side.name.clone()),
            (id_of(away_team.id.as_ref()), away_side.name.clone()),
        ];
        let mut mapped = EventDraft {
            provider: Provider::Espn,
            league,
            league_name: None,
            native_id,
            title,
            slug_title,
            participants: Participants {
                home: home_side,
                away: away_side,
            },
            start_time,
            venue,
            status,
        }
        .finish();
        mapped.score = score_if_started(status, home.score.as_ref(), away.score.as_ref());
        mapped.statistics = statistics(home, away);
        mapped.timeline = timeline(competition, &sides);
        Some(self.with_coverage(mapped, event.links.as_deref(), competition.broadcast_names()))
    }

    /// Home/away teams missing: keep the event under its own name. With no
    /// name and no competitors at all there is nothing to show.
    #[allow(clippy::too_many_arguments)]
    fn unnamed_team_game(
        &self,
        event: &EspnEvent,
        competition: &EspnCompetition,
        league: &League,
        native_id: String,
        status: EventStatus,
        start_time: DateTime<Utc>,
        venue: Option<String>,
    ) -> Option<CanonicalEvent> {
        let name = first_text([event.name.as_deref(), event.short_name.as_deref()]);
        let has_competitors = competition
            .competitors
            .as_ref()
            .is_some_and(|c| !c.is_empty());
        if name.is_none() && !has_competitors {
            debug!("espn: skipping {native_id}, no name and no competitors");
            return None;
        }
        let title = canonical_title(&name.unwrap_or_else(|| format!("{} Event", league.name)));
        let mapped = EventDraft {
            provider: Provider::Espn,
            league,
            league_name: None,
            native_id,
            slug_title: title.clone(),
            title,
            participants: Participants {
                home: unnamed_side("Team 1", "T1", "home"),
                away: unnamed_side("Team 2", "T2", "away"),
            },
            start_time,
            venue,
            status,
        }
        .finish();
        Some(self.with_coverage(mapped, event.links.as_deref(), competition.broadcast_names()))
    }

    // -----------------------------------------------------------------------
    // FightCard
    // -----------------------------------------------------------------------

    fn map_fight_card(&self, card: &EspnEvent, league: &League) -> Vec<CanonicalEvent> {
        let Some(card_id) = id_of(card.id.as_ref()) else {
            return Vec::new();
        };
        card.competitions
            .iter()
            .flatten()
            .filter_map(|bout| self.map_bout(card, &card_id, bout, league))
            .collect()
    }

    fn map_bout(
        &self,
        card: &EspnEvent,
        card_id: &str,
        bout: &EspnCompetition,
        league: &League,
    ) -> Option<CanonicalEvent> {
        let native_id = composite_native_id(card_id, &id_of(bout.id.as_ref())?);
        let status = open_status(&native_id, bout.status.as_ref())?;
        let [first, second, ..] = bout.competitors.as_deref()? else {
            return None;
        };
        let (Some(first_athlete), Some(second_athlete)) = (&first.athlete, &second.athlete) else {
            return None;
        };
        let start_time = start_time(&native_id, bout.date.as_deref().or(card.date.as_deref()))?;

        let home = fighter(first_athlete, "Fighter 1");
        let away = fighter(second_athlete, "Fighter 2");
        let title = canonical_title(&versus(&home.name, &away.name));
        let venue = first_text([
            bout.venue.as_ref().and_then(|v| v.full_name.as_deref()),
            card.venue.as_ref().and_then(|v| v.full_name.as_deref()),
        ]);

        let mut mapped = EventDraft {
            provider: Provider::Espn,
            league,
            league_name: None,
            native_id,
            slug_title: title.clone(),
            title,
            participants: Participants { home, away },
            start_time,
            venue,
            status,
        }
        .finish();
        mapped.is_main_event = is_main_event(bout);
        mapped.statistics = statistics(first, second);
        Some(self.with_coverage(mapped, card.links.as_deref(), bout.broadcast_names()))
    }

    // -----------------------------------------------------------------------
    // SessionWeekend
    // -----------------------------------------------------------------------

    fn map_race_weekend(&self, weekend: &EspnEvent, league: &League) -> Vec<CanonicalEvent> {
        let Some(weekend_id) = id_of(weekend.id.as_ref()) else {
            return Vec::new();
        };
        weekend
            .competitions
            .iter()
            .flatten()
            .filter_map(|session| self.map_session(weekend, &weekend_id, session, league))
            .collect()
    }

    fn map_session(
        &self,
        weekend: &EspnEvent,
        weekend_id: &str,
        session: &EspnCompetition,
        league: &League,
    ) -> Option<CanonicalEvent> {
        let native_id = composite_native_id(weekend_id, &id_of(session.id.as_ref())?);
        let status = open_status(&native_id, session.status.as_ref())?;
        let start_time = start_time(&native_id, session.date.as_deref().or(weekend.date.as_deref()))?;

        let kind = session.competition_type.as_ref();
        let session_name = first_text([
            session.name.as_deref(),
            kind.and_then(|k| k.text.as_deref()),
            kind.and_then(|k| k.short_detail.as_deref()),
            kind.and_then(|k| k.description.as_deref()),
            kind.and_then(|k| k.abbreviation.as_deref()),
        ])
        .unwrap_or_else(|| "Session".to_owned());
        let weekend_name = first_text([weekend.short_name.as_deref(), weekend.name.as_deref()])
            .unwrap_or_else(|| league.name.to_owned());
        let title = canonical_title(&format!("{weekend_name} - {session_name}"));
        let venue = first_text([
            weekend.circuit.as_ref().and_then(|v| v.full_name.as_deref()),
            session.circuit.as_ref().and_then(|v| v.full_name.as_deref()),
            weekend.venue.as_ref().and_then(|v| v.full_name.as_deref()),
            session.venue.as_ref().and_then(|v| v.full_name.as_deref()),
        ]);

        let mapped = EventDraft {
            provider: Provider::Espn,
            league,
            league_name: None,
            native_id,
            slug_title: title.clone(),
            title,
            participants: Participants {
                home: placeholder_participant(Provider::Espn, &weekend_name, "gp"),
                away: placeholder_participant(Provider::Espn, &session_name, "s"),
            },
            start_time,
            venue,
            status,
        }
        .finish();
        Some(self.with_coverage(mapped, weekend.links.as_deref(), session.broadcast_names()))
    }

    // -----------------------------------------------------------------------
    // Tournament
    // -----------------------------------------------------------------------

    fn map_tournament(&self, event: &EspnEvent, league: &League) -> Option<CanonicalEvent> {
        let native_id = id_of(event.id.as_ref())?;
        let competition = event.competitions.as_ref().and_then(|c| c.first());
        let status = open_status(
            &native_id,
            competition
                .and_then(|c| c.status.as_ref())
                .or(event.status.as_ref()),
        )?;
        let start_time = start_time(
            &native_id,
            competition
                .and_then(|c| c.date.as_deref())
                .or(event.date.as_deref()),
        )?;

        let title = canonical_title(
            &first_text([event.name.as_deref(), event.short_name.as_deref()])
                .unwrap_or_else(|| format!("{} Event", league.name)),
        );
        let headline = first_text([event.short_name.as_deref()]).unwrap_or_else(|| league.name.to_owned());
        let venue = first_text([
            competition
                .and_then(|c| c.venue.as_ref())
                .and_then(|v| v.full_name.as_deref()),
            event.circuit.as_ref().and_then(|v| v.full_name.as_deref()),
            event.venue.as_ref().and_then(|v| v.full_name.as_deref()),
        ]);

        let mut mapped = EventDraft {
            provider: Provider::Espn,
            league,
            league_name: None,
            native_id,
            slug_title: title.clone(),
            title,
            participants: Participants {
                home: placeholder_participant(Provider::Espn, &headline, "h"),
                away: placeholder_participant(Provider::Espn, "Event", "a"),
            },
            start_time,
            venue,
            status,
        }
        .finish();
        if let Some([first, second, ..]) = competition.and_then(|c| c.competitors.as_deref()) {
            mapped.statistics = statistics(first, second);
        }
        let broadcasts = competition.map(|c| c.broadcast_names()).unwrap_or_default();
        Some(self.with_coverage(mapped, event.links.as_deref(), broadcasts))
    }

    // -----------------------------------------------------------------------
    // IndividualMatch (tennis header feed)
    // -----------------------------------------------------------------------

    fn map_header(&self, raw: HeaderResponse, query: &LeagueQuery) -> Vec<CanonicalEvent> {
        let mut mapped = Vec::new();
        for tournament in raw.sports.into_iter().flat_map(|s| s.leagues) {
            let name = non_empty(tournament.name).unwrap_or_else(|| "Tennis Tournament".to_owned());
            let matches: Vec<HeaderEvent> = decode_records(tournament.events, Provider::Espn, query);
            mapped.extend(
                matches
                    .iter()
                    .filter_map(|m| self.map_match(m, &name, query.league)),
            );
        }
        mapped
    }

    fn map_match(&self, m: &HeaderEvent, tournament: &str, league: &League) -> Option<CanonicalEvent> {
        let native_id = id_of(m.id.as_ref())?;
        let raw = match (&m.full_status, &m.status) {
            (Some(full), _) | (None, Some(HeaderStatus::Detailed(full))) => raw_status(Some(full)),
            (None, Some(HeaderStatus::State(state))) => RawStatus::new().with_state(Some(state.as_str())),
            (None, None) => RawStatus::new(),
        };
        let status = normalize(&raw);
        if status.is_removal() {
            debug!("espn: dropping {native_id} ({status})");
            return None;
        }
        let [first, second, ..] = m.competitors.as_deref()? else {
            return None;
        };
        let start_time = start_time(&native_id, m.date.as_deref())?;

        let home = player(first, "Player 1");
        let away = player(second, "Player 2");
        let title = canonical_title(
            &first_text([m.short_name.as_deref()]).unwrap_or_else(|| versus(&home.name, &away.name)),
        );
        let venue = first_text([
            m.venue.as_ref().and_then(|v| v.full_name.as_deref()),
            m.location.as_deref(),
            Some(tournament),
        ]);

        let mut mapped = EventDraft {
            provider: Provider::Espn,
            league,
            league_name: Some(tournament.to_owned()),
            native_id,
            slug_title: title.clone(),
            title,
            participants: Participants { home, away },
            start_time,
            venue,
            status,
        }
        .finish();
        mapped.score = score_if_started(status, first.score.as_ref(), second.score.as_ref());
        mapped.statistics = statistics(first, second);

        let mut broadcasts: Vec<String> = m.broadcasts.iter().flatten().flat_map(|b| b.names()).collect();
        broadcasts.extend(non_empty(m.broadcast.clone()));
        broadcasts.dedup();
        let gamecast = non_empty(m.link.clone()).map(|href| EspnLink {
            href: Some(href),
            text: Some("Gamecast".to_owned()),
            ..EspnLink::default()
        });
        Some(self.with_coverage(mapped, Some(gamecast.as_slice()), broadcasts))
    }

    /// Official links from ESPN plus, when a broadcaster is known, an
    /// unofficial watch link.
    fn with_coverage(
        &self,
        mut event: CanonicalEvent,
        links: Option<&[EspnLink]>,
        broadcasts: Vec<String>,
    ) -> CanonicalEvent {
        event.links = official_links(links.unwrap_or_default());
        if !broadcasts.is_empty() {
            event.links.extend(watch_link(&self.watch_url, &event.title));
            event.broadcast = Some(broadcasts.join(", "));
        }
        event
    }
}

impl Adapter for EspnAdapter {
    fn provider(&self) -> Provider {
        Provider::Espn
    }

    fn queries(&self, sport: Option<&str>) -> Vec<LeagueQuery> {
        let today = Utc::now().date_naive();
        leagues::select(Provider::Espn, sport)
            .into_iter()
            .map(|league| LeagueQuery {
                league,
                url: self.league_url(league, today),
            })
            .collect()
    }

    async fn fetch_query(&self, query: &LeagueQuery) -> ApiResult<Vec<CanonicalEvent>> {
        let events = if query.league.shape == PayloadShape::IndividualMatch {
            let raw: HeaderResponse = self.http.get_json(&query.url).await?;
            self.map_header(raw, query)
        } else {
            let raw: ScoreboardResponse = self.http.get_json(&query.url).await?;
            self.map_scoreboard(raw, query)
        };
        debug!("espn: {} events from {query}", events.len());
        Ok(events)
    }
}

// ---------------------------------------------------------------------------
// Mapping helpers
// ---------------------------------------------------------------------------

fn raw_status(status: Option<&EspnStatus>) -> RawStatus {
    let Some(t) = status.and_then(|s| s.status_type.as_ref()) else {
        return RawStatus::new();
    };
    RawStatus::new()
        .with_completed(t.completed)
        .with_state(t.state.as_deref())
        .with_text(t.name.as_deref())
        .with_text(t.description.as_deref())
        .with_text(t.detail.as_deref())
        .with_text(t.short_detail.as_deref())
}

/// Normalized status, or `None` (logged) for postponed/cancelled records.
fn open_status(native_id: &str, status: Option<&EspnStatus>) -> Option<EventStatus> {
    let status = normalize(&raw_status(status));
    if status.is_removal() {
        debug!("espn: dropping {native_id} ({status})");
        return None;
    }
    Some(status)
}

fn start_time(native_id: &str, raw: Option<&str>) -> Option<DateTime<Utc>> {
    let parsed = raw.and_then(parse_start_time);
    if parsed.is_none() {
        debug!("espn: dropping {native_id}, no usable start time ({raw:?})");
    }
    parsed
}

fn team_participant(team: &EspnTeam, fallback_name: &str, fallback_abbr: &str) -> Participant {
    let name = first_text([team.display_name.as_deref(), team.name.as_deref()])
        .unwrap_or_else(|| fallback_name.to_owned());
    let abbreviation = first_text([team.abbreviation.as_deref(), team.short_display_name.as_deref()])
        .unwrap_or_else(|| fallback_abbr.to_owned());
    let id = id_of(team.id.as_ref()).unwrap_or_else(|| compact(&name));
    Participant {
        id: format!("espn-team-{id}"),
        logo_ref: team.logo_url().unwrap_or_else(|| placeholder_logo(&abbreviation)),
        name,
        abbreviation,
    }
}

fn team_info(team: &EspnTeam, season: Option<String>) -> TeamInfo {
    let side = team_participant(team, "Unknown Team", "TEAM");
    TeamInfo {
        id: side.id,
        name: side.name,
        abbreviation: side.abbreviation,
        logo_ref: side.logo_ref,
        record_summary: non_empty(team.record_summary.clone()),
        standing_summary: non_empty(team.standing_summary.clone()),
        color: non_empty(team.color.clone()),
        season,
    }
}

fn unnamed_side(name: &str, abbreviation: &str, side: &str) -> Participant {
    Participant {
        id: format!("espn-team-placeholder-{side}"),
        name: name.to_owned(),
        logo_ref: placeholder_logo(abbreviation),
        abbreviation: abbreviation.to_owned(),
    }
}

fn fighter(athlete: &EspnAthlete, fallback_name: &str) -> Participant {
    let name = first_text([athlete.display_name.as_deref()]).unwrap_or_else(|| fallback_name.to_owned());
    let abbreviation = first_text([athlete.short_name.as_deref()]).unwrap_or_else(|| abbreviate(&name, 3));
    match id_of(athlete.id.as_ref()) {
        Some(id) => Participant {
            logo_ref: format!("{FIGHTER_HEADSHOT}{id}.png&h=80&w=80&scale=crop"),
            id: format!("espn-fighter-{id}"),
            name,
            abbreviation,
        },
        None => Participant {
            id: format!("espn-fighter-{}", compact(&name)),
            logo_ref: placeholder_logo(&abbreviation),
            name,
            abbreviation,
        },
    }
}

/// Tennis competitors carry either an athlete object or just a name.
fn player(competitor: &EspnCompetitor, fallback_name: &str) -> Participant {
    let athlete = competitor.athlete.as_ref();
    let name = first_text([
        athlete.and_then(|a| a.display_name.as_deref()),
        competitor.display_name.as_deref(),
    ])
    .unwrap_or_else(|| fallback_name.to_owned());
    let id = athlete
        .and_then(|a| id_of(a.id.as_ref()))
        .or_else(|| id_of(competitor.id.as_ref()))
        .unwrap_or_else(|| compact(&name));
    let abbreviation = first_text([athlete.and_then(|a| a.short_name.as_deref())])
        .unwrap_or_else(|| abbreviate(&name, 3));
    Participant {
        id: format!("espn-player-{id}"),
        logo_ref: athlete
            .and_then(EspnAthlete::headshot_url)
            .unwrap_or_else(|| placeholder_logo(&abbreviate(&name, 2))),
        name,
        abbreviation,
    }
}

fn compact(name: &str) -> String {
    name.split_whitespace().collect::<String>().to_lowercase()
}

fn statistics(home: &EspnCompetitor, away: &EspnCompetitor) -> Option<Statistics> {
    let items = |c: &EspnCompetitor| -> Vec<StatItem> {
        c.stat_items()
            .into_iter()
            .map(|s| StatItem {
                name: s.name.unwrap_or_default(),
                abbreviation: s.abbreviation.unwrap_or_default(),
                display_value: s.display_value.unwrap_or_default(),
            })
            .collect()
    };
    Statistics::from_sides(items(home), items(away))
}

/// `sides` pairs each raw ESPN team id with the display name used for it.
fn timeline(competition: &EspnCompetition, sides: &[(Option<String>, String)]) -> Option<Vec<TimelineItem>> {
    let items: Vec<TimelineItem> = competition
        .timeline_details()
        .into_iter()
        .map(|detail| {
            let team_id = detail.team.as_ref().and_then(|t| id_of(t.id.as_ref()));
            let team_name = team_id.as_ref().and_then(|id| {
                sides
                    .iter()
                    .find(|(side_id, _)| side_id.as_ref() == Some(id))
                    .map(|(_, name)| name.clone())
            });
            let kind = if detail.own_goal {
                "Own Goal".to_owned()
            } else if detail.penalty_kick {
                "Penalty".to_owned()
            } else {
                first_text([detail.detail_type.as_ref().and_then(|t| t.text.as_deref())])
                    .unwrap_or_else(|| "Event".to_owned())
            };
            let card = if detail.yellow_card {
                Some(CardKind::Yellow)
            } else if detail.red_card {
                Some(CardKind::Red)
            } else {
                None
            };
            TimelineItem {
                kind,
                clock: detail
                    .clock
                    .and_then(|c| c.display_value)
                    .unwrap_or_default(),
                team_id,
                team_name,
                athletes: detail
                    .athletes_involved
                    .unwrap_or_default()
                    .into_iter()
                    .map(|a| TimelineAthlete {
                        id: id_of(a.id.as_ref()).unwrap_or_default(),
                        display_name: a.display_name.unwrap_or_default(),
                        team_id: a.team.and_then(|t| id_of(t.id.as_ref())),
                    })
                    .collect(),
                is_goal: detail.scoring_play,
                is_own_goal: detail.own_goal,
                is_penalty: detail.penalty_kick,
                card,
            }
        })
        .collect();
    (!items.is_empty()).then_some(items)
}

fn is_main_event(bout: &EspnCompetition) -> bool {
    let is_main = |s: &str| s.trim().eq_ignore_ascii_case("main event");
    let by_type = bout
        .competition_type
        .as_ref()
        .and_then(|t| t.abbreviation.as_deref())
        .is_some_and(is_main);
    let by_headline = bout
        .headlines
        .iter()
        .flatten()
        .any(|h| h.headline_type.as_deref().is_some_and(is_main));
    by_type || by_headline || bout.regulation_periods() == Some(5)
}

fn official_links(links: &[EspnLink]) -> Vec<WatchLink> {
    links
        .iter()
        .filter_map(|link| {
            let url = non_empty(link.href.clone())?;
            let label = first_text([link.text.as_deref(), link.short_text.as_deref()])
                .unwrap_or_else(|| "ESPN".to_owned());
            let kind = if link.rel.iter().any(|r| r.eq_ignore_ascii_case("highlights")) {
                LinkKind::Highlight
            } else {
                LinkKind::Official
            };
            Some(WatchLink { label, url, kind })
        })
        .collect()
}
