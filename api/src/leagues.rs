//! Static lookup tables: which leagues each provider is asked for, and the
//! display names the catalog shows for sports and leagues.

use crate::Provider;
use crate::identity::scope_slug;
use serde::Serialize;

/// How an ESPN endpoint lays out its events. 365scores only has one layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// One competition per event with home/away competitors.
    TeamGame,
    /// One event per card, one competition per bout.
    FightCard,
    /// One event per race weekend, one competition per session.
    SessionWeekend,
    /// Event-level record with no real opponents (golf, IndyCar).
    Tournament,
    /// Tennis header feed: one record per match, grouped by tournament.
    IndividualMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sport {
    pub slug: &'static str,
    pub name: &'static str,
}

pub const SPORTS: &[Sport] = &[
    Sport { slug: "soccer", name: "Soccer" },
    Sport { slug: "basketball", name: "Basketball" },
    Sport { slug: "american-football", name: "NFL" },
    Sport { slug: "baseball", name: "MLB" },
    Sport { slug: "hockey", name: "NHL" },
    Sport { slug: "motor-sports", name: "Motor Sports" },
    Sport { slug: "golf", name: "Golf" },
    Sport { slug: "mma-ufc", name: "MMA" },
    Sport { slug: "tennis", name: "Tennis" },
];

/// Sports whose listings put headline bouts before the undercard.
pub const COMBAT_SPORTS: &[&str] = &["mma-ufc"];

pub fn sport_name(slug: &str) -> &'static str {
    SPORTS
        .iter()
        .find(|s| s.slug == slug)
        .map(|s| s.name)
        .unwrap_or("Other")
}

/// Accepts either the internal slug (`mma-ufc`) or the display name in slug
/// form (`mma`).
pub fn resolve_sport(query: &str) -> Option<&'static Sport> {
    let query = scope_slug(query);
    SPORTS
        .iter()
        .find(|s| s.slug == query || scope_slug(s.name) == query)
}

pub fn is_combat_sport(slug: &str) -> bool {
    COMBAT_SPORTS.contains(&slug)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct League {
    pub provider: Provider,
    /// Provider-native identifier: ESPN league path segment or 365scores
    /// competition id.
    pub native_id: &'static str,
    /// ESPN sport path segment (`soccer`, `mma`); empty for 365scores.
    pub path_sport: &'static str,
    pub sport_slug: &'static str,
    pub name: &'static str,
    pub shape: PayloadShape,
    /// Scoreboard is requested for today's date (`?dates=YYYYMMDD`).
    pub date_scoped: bool,
}

impl League {
    pub fn slug(&self) -> String {
        scope_slug(self.name)
    }

    pub fn sport_name(&self) -> &'static str {
        sport_name(self.sport_slug)
    }
}

const fn espn(
    path_sport: &'static str,
    native_id: &'static str,
    sport_slug: &'static str,
    name: &'static str,
    shape: PayloadShape,
    date_scoped: bool,
) -> League {
    League {
        provider: Provider::Espn,
        native_id,
        path_sport,
        sport_slug,
        name,
        shape,
        date_scoped,
    }
}

const fn soccer(native_id: &'static str, name: &'static str) -> League {
    espn("soccer", native_id, "soccer", name, PayloadShape::TeamGame, true)
}

const fn scores365(native_id: &'static str, sport_slug: &'static str, name: &'static str) -> League {
    League {
        provider: Provider::Scores365,
        native_id,
        path_sport: "",
        sport_slug,
        name,
        shape: PayloadShape::TeamGame,
        date_scoped: false,
    }
}

// NFL and MLB come from 365scores only.
pub const ESPN_LEAGUES: &[League] = &[
    soccer("UEFA.CHAMPIONS", "UEFA Champions League"),
    soccer("UEFA.EUROPA", "UEFA Europa League"),
    soccer("UEFA.EUROPA.CONF", "UEFA Europa Conference League"),
    soccer("ENG.1", "Premier League"),
    soccer("ENG.FA", "English FA Cup"),
    soccer("ENG.LEAGUE_CUP", "English Carabao Cup"),
    soccer("ENG.2", "English League Championship"),
    soccer("ESP.1", "La Liga"),
    soccer("ESP.COPA_DEL_REY", "Spanish Copa del Rey"),
    soccer("GER.1", "Bundesliga"),
    soccer("ITA.1", "Serie A"),
    soccer("ITA.COPPA_ITALIA", "Coppa Italia"),
    soccer("FRA.1", "Ligue 1"),
    soccer("FRA.COUPE_DE_FRANCE", "Coupe de France"),
    soccer("USA.1", "MLS"),
    soccer("MEX.1", "Mexican Liga BBVA MX"),
    soccer("MEX.2", "Mexican Liga de Expansión MX"),
    soccer("CONCACAF.CHAMPIONS", "Concacaf Champions League"),
    soccer("CONCACAF.LEAGUES.CUP", "Leagues Cup"),
    soccer("SCO.1", "Scottish Premiership"),
    soccer("SCO.TENNENTS", "Scottish Cup"),
    soccer("KSA.KINGS.CUP", "Saudi Kings Cup"),
    soccer("AUS.1", "Australian A-League Men"),
    soccer("TUR.1", "Turkish Super Lig"),
    soccer("CONMEBOL.LIBERTADORES", "CONMEBOL Libertadores"),
    soccer("FIFA.FRIENDLY", "International Friendly"),
    soccer("FIFA.WORLD", "FIFA World Cup"),
    soccer("FIFA.CWC", "FIFA Club World Cup"),
    soccer("CLUB.FRIENDLY", "Club Friendly"),
    espn("basketball", "nba", "basketball", "NBA", PayloadShape::TeamGame, false),
    espn("hockey", "nhl", "hockey", "NHL", PayloadShape::TeamGame, true),
    espn("racing", "f1", "motor-sports", "Formula 1", PayloadShape::SessionWeekend, false),
    espn("racing", "irl", "motor-sports", "IndyCar Series", PayloadShape::Tournament, false),
    espn("mma", "ufc", "mma-ufc", "UFC", PayloadShape::FightCard, false),
    espn("mma", "pfl", "mma-ufc", "PFL", PayloadShape::FightCard, false),
    espn("golf", "pga", "golf", "PGA Tour", PayloadShape::Tournament, false),
    espn("golf", "lpga", "golf", "LPGA Tour", PayloadShape::Tournament, false),
    espn("golf", "liv", "golf", "LIV Golf", PayloadShape::Tournament, false),
    espn("golf", "champions-tour", "golf", "Champions Tour", PayloadShape::Tournament, false),
    espn("tennis", "tennis", "tennis", "Tennis", PayloadShape::IndividualMatch, false),
];

/// Context for ESPN's cross-competition soccer team schedules. Each fixture
/// carries its own competition name.
pub static ESPN_SOCCER_TEAMS: League = soccer("all", "Soccer");

pub const SCORES365_LEAGUES: &[League] = &[
    scores365("7", "soccer", "Premier League"),
    scores365("11", "soccer", "La Liga"),
    scores365("35", "soccer", "Ligue 1"),
    scores365("25", "soccer", "Bundesliga"),
    scores365("17", "soccer", "Serie A"),
    scores365("572", "soccer", "UEFA Champions League"),
    scores365("573", "soccer", "UEFA Europa League"),
    scores365("103", "basketball", "NBA"),
    scores365("438", "baseball", "MLB"),
    scores365("366", "hockey", "NHL"),
    scores365("104", "soccer", "MLS"),
    scores365("649", "soccer", "Saudi Professional League"),
    scores365("8", "soccer", "FA Cup"),
    scores365("141", "soccer", "Liga MX"),
    scores365("623", "soccer", "AFC Champions League"),
    scores365("624", "soccer", "CAF Champions League"),
    scores365("102", "soccer", "Copa Libertadores"),
    scores365("5096", "soccer", "FIFA Club World Cup"),
    scores365("352", "american-football", "NFL"),
];

pub fn leagues_for(provider: Provider) -> &'static [League] {
    match provider {
        Provider::Espn => ESPN_LEAGUES,
        Provider::Scores365 => SCORES365_LEAGUES,
    }
}

/// Leagues of one provider, optionally narrowed to a sport (slug or display
/// name). An unknown sport selects nothing.
pub fn select(provider: Provider, sport: Option<&str>) -> Vec<&'static League> {
    let wanted = match sport {
        Some(query) => match resolve_sport(query) {
            Some(sport) => Some(sport.slug),
            None => return Vec::new(),
        },
        None => None,
    };
    leagues_for(provider)
        .iter()
        .filter(|league| wanted.is_none_or(|slug| league.sport_slug == slug))
        .collect()
}

/// First league (any provider) whose display name slugs to `slug`.
pub fn find_by_slug(slug: &str) -> Option<&'static League> {
    let slug = scope_slug(slug);
    ESPN_LEAGUES
        .iter()
        .chain(SCORES365_LEAGUES)
        .find(|league| league.slug() == slug)
}

/// A league as the catalog lists it. Providers that share a display name
/// share one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeagueListing {
    pub slug: String,
    pub name: &'static str,
    pub sport_slug: &'static str,
    pub providers: Vec<Provider>,
}

/// Every configured league, optionally for one sport, in priority order.
pub fn listing(sport: Option<&str>) -> Vec<LeagueListing> {
    let mut listed: Vec<LeagueListing> = Vec::new();
    for league in Provider::PRIORITY.iter().flat_map(|&p| select(p, sport)) {
        let slug = league.slug();
        match listed.iter_mut().find(|l| l.slug == slug) {
            Some(entry) if !entry.providers.contains(&league.provider) => {
                entry.providers.push(league.provider);
            }
            Some(_) => {}
            None => listed.push(LeagueListing {
                slug,
                name: league.name,
                sport_slug: league.sport_slug,
                providers: vec![league.provider],
            }),
        }
    }
    listed
}
