//! HTTP client for upstream JSON APIs.
//!
//! All upstreams (transit, weather, image and quote feeds) are plain
//! `GET url → JSON` endpoints, so one client serves them all.

use std::time::Duration;

use futures::future::BoxFuture;
use serde_json::Value;

use super::error::FetchError;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Longest body excerpt carried in a JSON parse error.
const MAX_BODY_SNIPPET: usize = 500;

/// A source of JSON documents addressed by URL.
///
/// This abstraction lets handlers be tested against canned responses.
pub trait Upstream: Send + Sync {
    /// Fetch `url` and parse the body as JSON.
    fn get_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, FetchError>>;
}

/// Configuration for the HTTP upstream client.
#[derive(Debug, Clone)]
pub struct HttpUpstreamConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl HttpUpstreamConfig {
    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for HttpUpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("dashboard-server/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Upstream backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    http: reqwest::Client,
}

impl HttpUpstream {
    /// Create a new client with the given configuration.
    pub fn new(config: HttpUpstreamConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http })
    }

    async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        // Stop URLs carry credentials in the query string
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Unauthorized {
                status: status.as_u16(),
                body,
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await.map_err(reqwest::Error::without_url)?;

        serde_json::from_str(&body).map_err(|e| FetchError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(MAX_BODY_SNIPPET).collect()),
        })
    }
}

impl Upstream for HttpUpstream {
    fn get_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, FetchError>> {
        Box::pin(self.fetch(url))
    }
}
