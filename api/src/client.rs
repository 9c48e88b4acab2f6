use log::debug;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    InvalidUrl(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::InvalidUrl(url) => write!(f, "Invalid URL: {url}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Shared JSON-over-HTTP GET used by every provider adapter.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Every request made through this fetcher is bounded by `timeout`.
    pub fn new(timeout: Duration, user_agent: &str) -> Self {
        Self {
            client: Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_default(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Any non-2xx answer is an error; the caller decides what an empty
    /// league looks like.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let url = Url::parse(url).map_err(|_| ApiError::InvalidUrl(url.to_owned()))?;
        debug!("GET {url}");

        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_string()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_string())),
            Err(e) => Err(ApiError::Api(e, url.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Ping {
        ok: bool,
    }

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(5), "sportsfeed-test")
    }

    #[tokio::test]
    async fn decodes_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ping")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let ping: Ping = fetcher()
            .get_json(&format!("{}/ping", server.url()))
            .await
            .unwrap();
        assert!(ping.ok);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let err = fetcher()
            .get_json::<Ping>(&format!("{}/missing", server.url()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Api(..)), "{err}");
    }

    #[tokio::test]
    async fn bad_body_is_parsing_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/garbage")
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let err = fetcher()
            .get_json::<Ping>(&format!("{}/garbage", server.url()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Parsing(..)), "{err}");
    }

    #[tokio::test]
    async fn rejects_malformed_url() {
        let err = fetcher().get_json::<Ping>("not a url").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }
}
