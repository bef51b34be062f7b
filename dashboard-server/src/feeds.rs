//! Weather, image-of-the-day and quote-of-the-day feeds.
//!
//! Weather and quote payloads are passed through verbatim; only the image
//! archive is interpreted, to turn its relative image path into a full URL.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::upstream::DEFAULT_TTL;

/// TTL for feeds that change about once a day.
pub const DAILY_FEED_TTL: Duration = Duration::from_secs(10 * 60 * 60);

const DEFAULT_WEATHER_BASE_URL: &str = "http://api.openweathermap.org/data/2.5/weather";
const DEFAULT_WEATHER_CITY_ID: &str = "660158";
const DEFAULT_IMAGE_FEED_URL: &str =
    "http://www.bing.com/HPImageArchive.aspx?format=js&idx=0&n=1&mkt=en-US";
const DEFAULT_IMAGE_BASE_URL: &str = "https://www.bing.com";
const DEFAULT_QUOTE_URL: &str = "http://quotes.rest/qod.json";

/// Errors from interpreting a feed payload.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Payload did not have the expected shape
    #[error("malformed image feed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Image archive listed no images
    #[error("image feed contained no images")]
    NoImages,
}

/// Weather API configuration.
#[derive(Clone)]
pub struct WeatherConfig {
    pub api_key: String,
    pub city_id: String,
    pub base_url: String,
    pub ttl: Duration,
}

impl WeatherConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            city_id: DEFAULT_WEATHER_CITY_ID.to_string(),
            base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn url(&self) -> String {
        format!("{}?id={}&appid={}", self.base_url, self.city_id, self.api_key)
    }
}

// Keep the API key out of logs.
impl fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &"<redacted>")
            .field("city_id", &self.city_id)
            .field("base_url", &self.base_url)
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Image-of-the-day feed configuration.
#[derive(Debug, Clone)]
pub struct WallpaperConfig {
    /// Archive feed returning `{"images": [{"url": "/th?id=..."}]}`
    pub feed_url: String,
    /// Host the relative image URLs are resolved against
    pub image_base_url: String,
    pub ttl: Duration,
}

impl Default for WallpaperConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_IMAGE_FEED_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            ttl: DAILY_FEED_TTL,
        }
    }
}

/// Quote-of-the-day feed configuration.
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    pub url: String,
    pub ttl: Duration,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_QUOTE_URL.to_string(),
            ttl: DAILY_FEED_TTL,
        }
    }
}

/// All non-transit feeds.
#[derive(Debug, Clone)]
pub struct FeedsConfig {
    pub weather: WeatherConfig,
    pub wallpaper: WallpaperConfig,
    pub quote: QuoteConfig,
}

impl FeedsConfig {
    /// Default feeds with the given weather API key.
    pub fn new(weather_api_key: impl Into<String>) -> Self {
        Self {
            weather: WeatherConfig::new(weather_api_key),
            wallpaper: WallpaperConfig::default(),
            quote: QuoteConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ImageArchive {
    images: Vec<ArchivedImage>,
}

#[derive(Debug, Deserialize)]
struct ArchivedImage {
    url: String,
}

/// Full URL of the first image in an archive feed payload.
pub fn wallpaper_url(image_base_url: &str, feed: &Value) -> Result<String, FeedError> {
    let archive = ImageArchive::deserialize(feed)?;
    let first = archive.images.first().ok_or(FeedError::NoImages)?;
    Ok(join_url(image_base_url, &first.url))
}

/// Join a base URL and a path with exactly one `/` between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
