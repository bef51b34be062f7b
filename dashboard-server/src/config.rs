//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cache::CacheConfig;
use crate::feeds::FeedsConfig;
use crate::transit::TransitConfig;
use crate::upstream::HttpUpstreamConfig;

const DEFAULT_PORT: u16 = 5002;
/// Shipped assets, independent of the working directory.
const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Printed alongside a missing-variable error.
pub const CREDENTIALS_HINT: &str = "\
You can get the API credentials from:
http://developer.reittiopas.fi/pages/en/account-request.php
and then export them:

export HSL_USERNAME=''
export HSL_PASSWORD=''
export WEATHER_API_KEY=''
export DEBUG=0";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("missing configuration variable: {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything needed to run the server.
#[derive(Debug, Clone)]
pub struct Config {
    pub transit: TransitConfig,
    pub feeds: FeedsConfig,
    pub cache: CacheConfig,
    pub upstream: HttpUpstreamConfig,
    /// Verbose logging
    pub debug: bool,
    /// Address to listen on
    pub addr: SocketAddr,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Environment Variables
    /// - `HSL_USERNAME`, `HSL_PASSWORD` - transit API credentials (required)
    /// - `WEATHER_API_KEY` - weather API key (required)
    /// - `DEBUG` - integer, non-zero enables debug logging (required)
    /// - `DASHBOARD_ADDR` - listen address (default: 0.0.0.0:5002)
    /// - `DASHBOARD_STATIC_DIR` - static asset directory (default: the crate's `static/`)
    /// - `UPSTREAM_TIMEOUT_SECS` - upstream request timeout (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |var: &'static str| lookup(var).ok_or(ConfigError::Missing(var));

        let username = required("HSL_USERNAME")?;
        let password = required("HSL_PASSWORD")?;
        let weather_api_key = required("WEATHER_API_KEY")?;
        let debug = parse_var::<i64>("DEBUG", required("DEBUG")?)? != 0;

        let addr = match lookup("DASHBOARD_ADDR") {
            Some(value) => parse_var("DASHBOARD_ADDR", value)?,
            None => SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
        };

        let static_dir = lookup("DASHBOARD_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let mut upstream = HttpUpstreamConfig::default();
        if let Some(value) = lookup("UPSTREAM_TIMEOUT_SECS") {
            upstream = upstream.with_timeout(parse_var("UPSTREAM_TIMEOUT_SECS", value)?);
        }

        Ok(Self {
            transit: TransitConfig::new(username, password),
            feeds: FeedsConfig::new(weather_api_key),
            cache: CacheConfig::default(),
            upstream,
            debug,
            addr,
            static_dir,
        })
    }
}

fn parse_var<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::Invalid {
        var,
        reason: e.to_string(),
        value,
    })
}
