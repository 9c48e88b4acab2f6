use sportsfeed_api::FeedConfig;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone)]
pub struct Settings {
    pub feed: FeedConfig,
    /// env_logger filter directives, e.g. `warn` or `sportsfeed_api=debug`.
    pub log_filter: String,
    /// Variables that were set but unusable; logged once logging is up.
    pub problems: Vec<String>,
}

impl Settings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut problems = Vec::new();
        let mut feed = FeedConfig::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        if let Some(secs) = parsed::<u64>(&get, "SPORTSFEED_CACHE_TTL_SECS", &mut problems) {
            feed.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(secs) = parsed::<u64>(&get, "SPORTSFEED_HTTP_TIMEOUT_SECS", &mut problems) {
            if secs == 0 {
                problems.push("SPORTSFEED_HTTP_TIMEOUT_SECS must be at least 1, keeping default".into());
            } else {
                feed.http_timeout = Duration::from_secs(secs);
            }
        }
        if let Some(size) = parsed::<usize>(&get, "SPORTSFEED_BATCH_SIZE", &mut problems) {
            feed.batch_size = size.max(1);
        }
        if let Some(url) = get("SPORTSFEED_ESPN_BASE") {
            feed.espn_base = url;
        }
        if let Some(url) = get("SPORTSFEED_ESPN_TENNIS_URL") {
            feed.espn_tennis_url = url;
        }
        if let Some(url) = get("SPORTSFEED_365_BASE") {
            feed.scores365_base = url;
        }
        if let Some(url) = get("SPORTSFEED_WATCH_URL") {
            feed.watch_url = url;
        }

        Self {
            feed,
            log_filter: get("SPORTSFEED_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned()),
            problems,
        }
    }
}

fn parsed<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    problems: &mut Vec<String>,
) -> Option<T> {
    let raw = get(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            problems.push(format!("ignoring {key}={raw:?}: not a number"));
            None
        }
    }
}
