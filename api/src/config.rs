use std::time::Duration;

pub const ESPN_SITE_V2: &str = "https://site.api.espn.com/apis/site/v2/sports";
pub const ESPN_TENNIS_HEADER: &str =
    "https://site.web.api.espn.com/apis/personalized/v2/scoreboard/header?sport=tennis";
pub const SCORES365_WEB: &str = "https://webws.365scores.com";
pub const WATCH_BASE: &str = "https://club.sportsurge.uno/";

/// Endpoints and limits for one catalog. Every field has a working default;
/// tests point the base URLs at a mock server.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub espn_base: String,
    pub espn_tennis_url: String,
    pub scores365_base: String,
    /// Unofficial watch links are this URL with the event title as fragment.
    pub watch_url: String,
    pub http_timeout: Duration,
    pub batch_size: usize,
    pub cache_ttl: Duration,
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            espn_base: ESPN_SITE_V2.to_owned(),
            espn_tennis_url: ESPN_TENNIS_HEADER.to_owned(),
            scores365_base: SCORES365_WEB.to_owned(),
            watch_url: WATCH_BASE.to_owned(),
            http_timeout: Duration::from_secs(10),
            batch_size: 5,
            cache_ttl: Duration::from_secs(60),
            user_agent: concat!("sportsfeed/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}
