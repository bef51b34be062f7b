use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dashboard_server::cache::ResponseCache;
use dashboard_server::clock::{Clock, SystemClock};
use dashboard_server::config::{CREDENTIALS_HINT, Config, ConfigError};
use dashboard_server::health::probe_transit;
use dashboard_server::upstream::{ApiFetcher, HttpUpstream};
use dashboard_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            if matches!(e, ConfigError::Missing(_)) {
                eprintln!();
                eprintln!("{CREDENTIALS_HINT}");
            }
            return ExitCode::from(1);
        }
    };

    init_tracing(config.debug);

    if config.debug {
        warn!("debug mode is on");
    }

    let upstream = match HttpUpstream::new(config.upstream.clone()) {
        Ok(upstream) => upstream,
        Err(e) => {
            error!("failed to create HTTP client: {e}");
            return ExitCode::from(1);
        }
    };

    // Fail fast on bad credentials rather than on the first page load
    info!("checking transit API credentials");
    if let Err(e) = probe_transit(&upstream, &config.transit).await {
        error!("transit API returned error: {e}");
        return ExitCode::from(2);
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let cache = ResponseCache::new(&config.cache, clock.clone());
    let fetcher = ApiFetcher::new(Arc::new(upstream), cache);

    let state = AppState::new(fetcher, clock, config.transit, config.feeds);
    let app = create_router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {}: {e}", config.addr);
            return ExitCode::from(1);
        }
    };

    info!("Dashboard listening on http://{}", config.addr);
    info!("  GET  /           - Dashboard");
    info!("  GET  /routes     - Departures fragment");
    info!("  GET  /weather    - Weather (JSON)");
    info!("  GET  /wallpaper  - Wallpaper URL (JSON)");
    info!("  GET  /quote      - Quote of the day (JSON)");
    info!("  GET  /health     - Health check");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("server error: {e}");
        return ExitCode::from(1);
    }

    info!("shutdown complete");
    ExitCode::SUCCESS
}

/// `RUST_LOG` wins; otherwise info, or debug in debug mode.
fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "dashboard_server=debug,tower_http=debug"
    } else {
        "dashboard_server=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
