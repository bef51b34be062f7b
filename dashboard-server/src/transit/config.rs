//! Transit stop configuration.

use std::fmt;
use std::time::Duration;

use crate::upstream::DEFAULT_TTL;

/// Default base URL for the HSL stop API.
const DEFAULT_BASE_URL: &str = "http://api.reittiopas.fi/hsl/prod/";

/// Stop queried by the startup credential check.
const DEFAULT_PROBE_STOP: &str = "2222209";

/// A stop to show on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopConfig {
    /// Provider stop code, e.g. "2222209"
    pub code: String,
    /// How many upcoming departures to keep
    pub max_entries: usize,
}

impl StopConfig {
    pub fn new(code: impl Into<String>, max_entries: usize) -> Self {
        Self {
            code: code.into(),
            max_entries,
        }
    }
}

/// The dashboard's stops, in display order.
pub fn default_stops() -> Vec<StopConfig> {
    vec![StopConfig::new("2222209", 2), StopConfig::new("2222210", 8)]
}

/// Configuration for the transit API.
#[derive(Clone)]
pub struct TransitConfig {
    /// API username
    pub username: String,
    /// API password
    pub password: String,
    /// Base URL for the API (defaults to production HSL)
    pub base_url: String,
    /// Stops to query, in display order
    pub stops: Vec<StopConfig>,
    /// How long stop responses stay cached
    pub ttl: Duration,
    /// Stop used to verify credentials at startup
    pub probe_stop: String,
}

impl TransitConfig {
    /// Create a new config with the given credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            stops: default_stops(),
            ttl: DEFAULT_TTL,
            probe_stop: DEFAULT_PROBE_STOP.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// URL of the stop query for `code`.
    ///
    /// Also serves as the cache key, so it must be stable for a given stop.
    pub fn stop_url(&self, code: &str) -> String {
        format!(
            "{}?user={}&pass={}&request=stop&code={}",
            self.base_url, self.username, self.password, code
        )
    }
}

// Keep the password out of logs.
impl fmt::Debug for TransitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("stops", &self.stops)
            .field("ttl", &self.ttl)
            .field("probe_stop", &self.probe_stop)
            .finish()
    }
}
