//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use futures::future::try_join_all;
use serde_json::Value;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::feeds::{FeedError, wallpaper_url};
use crate::transit::{StopInfo, TransitError, build_board};
use crate::upstream::FetchError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/routes", get(routes_page))
        .route("/weather", get(weather))
        .route("/wallpaper", get(wallpaper))
        .route("/quote", get(quote))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Dashboard shell page.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let template = IndexTemplate {
        server_time: state.clock.now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    render(&template)
}

/// Upcoming departures at every configured stop.
async fn routes_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let transit = &state.transit;
    let urls: Vec<String> = transit
        .stops
        .iter()
        .map(|stop| transit.stop_url(&stop.code))
        .collect();

    // Results come back in stop order regardless of completion order
    let responses = try_join_all(
        urls.iter()
            .map(|url| state.fetcher.fetch_json(url, transit.ttl)),
    )
    .await?;

    let infos = responses
        .iter()
        .map(|response| StopInfo::from_response(response))
        .collect::<Result<Vec<_>, _>>()?;

    let board = build_board(transit.stops.iter().zip(&infos), state.clock.now());

    render(&RoutesTemplate::from_board(&board))
}

/// Current weather, passed through verbatim.
async fn weather(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let config = &state.feeds.weather;
    let payload = state.fetcher.fetch_json(&config.url(), config.ttl).await?;
    Ok(Json(Value::clone(&payload)))
}

/// Absolute URL of today's wallpaper image.
async fn wallpaper(State(state): State<AppState>) -> Result<Json<WallpaperResponse>, AppError> {
    let config = &state.feeds.wallpaper;
    let feed = state.fetcher.fetch_json(&config.feed_url, config.ttl).await?;
    let url = wallpaper_url(&config.image_base_url, &feed)?;
    Ok(Json(WallpaperResponse { url }))
}

/// Quote of the day, passed through verbatim.
async fn quote(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let config = &state.feeds.quote;
    let payload = state.fetcher.fetch_json(&config.url, config.ttl).await?;
    Ok(Json(Value::clone(&payload)))
}

fn render(template: &impl Template) -> Result<Html<String>, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {e}"),
    })?;
    Ok(Html(html))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// An upstream failed or returned something unusable
    BadGateway { message: String },
    Internal { message: String },
}

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        AppError::BadGateway {
            message: e.to_string(),
        }
    }
}

impl From<TransitError> for AppError {
    fn from(e: TransitError) -> Self {
        AppError::BadGateway {
            message: e.to_string(),
        }
    }
}

impl From<FeedError> for AppError {
    fn from(e: FeedError) -> Self {
        AppError::BadGateway {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, header};
    use chrono::NaiveDate;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::cache::{CacheConfig, ResponseCache};
    use crate::clock::ManualClock;
    use crate::feeds::FeedsConfig;
    use crate::transit::TransitConfig;
    use crate::upstream::ApiFetcher;
    use crate::upstream::mock::MockUpstream;

    const WEATHER_URL: &str = "http://weather.test/data?id=660158&appid=key";
    const IMAGE_FEED_URL: &str = "http://images.test/archive";
    const QUOTE_URL: &str = "http://quotes.test/qod.json";

    fn transit() -> TransitConfig {
        TransitConfig::new("user", "pass").with_base_url("http://transit.test/")
    }

    fn feeds() -> FeedsConfig {
        let mut feeds = FeedsConfig::new("key");
        feeds.weather = feeds.weather.with_base_url("http://weather.test/data");
        feeds.wallpaper.feed_url = IMAGE_FEED_URL.to_string();
        feeds.quote.url = QUOTE_URL.to_string();
        feeds
    }

    fn clock() -> ManualClock {
        ManualClock::new(
            NaiveDate::from_ymd_opt(2026, 3, 15)
                .unwrap()
                .and_hms_opt(9, 10, 0)
                .unwrap(),
        )
    }

    fn app(upstream: &MockUpstream, clock: &ManualClock, static_dir: &Path) -> Router {
        let clock: Arc<dyn crate::clock::Clock> = Arc::new(clock.clone());
        let cache = ResponseCache::new(&CacheConfig::default(), clock.clone());
        let fetcher = ApiFetcher::new(Arc::new(upstream.clone()), cache);
        create_router(AppState::new(fetcher, clock, transit(), feeds()), static_dir)
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn stop_response() -> Value {
        json!([{
            "code": "2222209",
            "lines": ["1102T 2:Kamppi, Espoo", "2550  2:Itäkeskus"],
            "departures": [
                {"code": "2550  2", "time": 905},
                {"code": "1102T 2", "time": 915},
                {"code": "2550  2", "time": 2359}
            ]
        }])
    }

    fn empty_stop_response() -> Value {
        json!([{"code": "2222210", "lines": [], "departures": null}])
    }

    #[tokio::test]
    async fn health_ok() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&MockUpstream::new(), &clock(), dir.path());

        let (status, _, body) = get(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn index_shows_server_time() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&MockUpstream::new(), &clock(), dir.path());

        let (status, content_type, body) = get(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/html"));
        assert!(body.contains("2026-03-15 09:10:00"));
    }

    #[tokio::test]
    async fn weather_is_fetched_once_within_ttl() {
        let dir = tempfile::tempdir().unwrap();
        let payload = json!({"main": {"temp": 271.5}, "weather": [{"description": "snow"}]});
        let upstream = MockUpstream::new().with_response(WEATHER_URL, payload.clone());
        let clock = clock();
        let app = app(&upstream, &clock, dir.path());

        let (status, content_type, first) = get(&app, "/weather").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(serde_json::from_str::<Value>(&first).unwrap(), payload);

        clock.advance(chrono::Duration::minutes(4));
        let (_, _, second) = get(&app, "/weather").await;
        assert_eq!(first, second);
        assert_eq!(upstream.calls(), 1);

        clock.advance(chrono::Duration::minutes(1));
        get(&app, "/weather").await;
        assert_eq!(upstream.calls(), 2);
    }

    #[tokio::test]
    async fn wallpaper_returns_absolute_url() {
        let dir = tempfile::tempdir().unwrap();
        let upstream = MockUpstream::new()
            .with_response(IMAGE_FEED_URL, json!({"images": [{"url": "/th?id=1"}]}));
        let app = app(&upstream, &clock(), dir.path());

        let (status, _, body) = get(&app, "/wallpaper").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_str::<WallpaperResponse>(&body).unwrap(),
            WallpaperResponse {
                url: "https://www.bing.com/th?id=1".into()
            }
        );
    }

    #[tokio::test]
    async fn wallpaper_with_no_images_is_bad_gateway() {
        let dir = tempfile::tempdir().unwrap();
        let upstream = MockUpstream::new().with_response(IMAGE_FEED_URL, json!({"images": []}));
        let app = app(&upstream, &clock(), dir.path());

        let (status, _, body) = get(&app, "/wallpaper").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let error: ErrorResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(error.error, "image feed contained no images");
    }

    #[tokio::test]
    async fn quote_is_passed_through() {
        let dir = tempfile::tempdir().unwrap();
        let payload = json!({"contents": {"quotes": [{"quote": "Hi", "author": "Me"}]}});
        let upstream = MockUpstream::new().with_response(QUOTE_URL, payload.clone());
        let app = app(&upstream, &clock(), dir.path());

        let (status, content_type, body) = get(&app, "/quote").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), payload);
    }

    #[tokio::test]
    async fn routes_lists_upcoming_departures() {
        let dir = tempfile::tempdir().unwrap();
        let transit = transit();
        let upstream = MockUpstream::new()
            .with_response(transit.stop_url("2222209"), stop_response())
            .with_response(transit.stop_url("2222210"), empty_stop_response());
        let app = app(&upstream, &clock(), dir.path());

        let (status, content_type, body) = get(&app, "/routes").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/html"));

        // 09:05 has left; the limit of 2 is filled by 09:15 and 23:59
        assert!(!body.contains("09:05"));
        assert!(body.contains("09:15"));
        assert!(body.contains("23:59"));
        assert!(body.contains("Kamppi"));
        assert!(body.contains(r#"data-minutes="5""#));

        assert!(body.contains(r#"data-stop="2222209""#));
        assert!(!body.contains(r#"data-stop="2222210""#));
    }

    #[tokio::test]
    async fn routes_uses_cached_stop_responses() {
        let dir = tempfile::tempdir().unwrap();
        let transit = transit();
        let upstream = MockUpstream::new()
            .with_response(transit.stop_url("2222209"), stop_response())
            .with_response(transit.stop_url("2222210"), empty_stop_response());
        let app = app(&upstream, &clock(), dir.path());

        get(&app, "/routes").await;
        get(&app, "/routes").await;
        assert_eq!(upstream.calls(), 2);
    }

    #[tokio::test]
    async fn routes_fails_when_any_stop_fails() {
        let dir = tempfile::tempdir().unwrap();
        let upstream = MockUpstream::new()
            .with_response(transit().stop_url("2222209"), stop_response());
        let app = app(&upstream, &clock(), dir.path());

        let (status, content_type, _) = get(&app, "/routes").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(content_type.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn routes_rejects_malformed_stop_response() {
        let dir = tempfile::tempdir().unwrap();
        let transit = transit();
        let upstream = MockUpstream::new()
            .with_response(transit.stop_url("2222209"), json!({"error": "nope"}))
            .with_response(transit.stop_url("2222210"), empty_stop_response());
        let app = app(&upstream, &clock(), dir.path());

        let (status, _, body) = get(&app, "/routes").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("malformed stop response"));
    }

    #[tokio::test]
    async fn serves_static_assets() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dashboard.css"), "body {}").unwrap();
        let app = app(&MockUpstream::new(), &clock(), dir.path());

        let (status, _, body) = get(&app, "/static/dashboard.css").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "body {}");
    }
}
