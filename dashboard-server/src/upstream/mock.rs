//! Mock upstream serving canned JSON, for tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use futures::future::BoxFuture;
use serde_json::Value;

use super::client::Upstream;
use super::error::FetchError;

/// Upstream that answers from a fixed URL → JSON map and counts requests.
///
/// Unknown URLs yield a 404 `FetchError::Api`.
#[derive(Clone, Default)]
pub struct MockUpstream {
    responses: Arc<HashMap<String, Value>>,
    calls: Arc<AtomicUsize>,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canned response for `url`.
    pub fn with_response(mut self, url: impl Into<String>, body: Value) -> Self {
        Arc::make_mut(&mut self.responses).insert(url.into(), body);
        self
    }

    /// Total number of requests served, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Upstream for MockUpstream {
    fn get_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, FetchError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = self.responses.get(url).cloned().ok_or_else(|| FetchError::Api {
            status: 404,
            message: format!("no mock response for {url}"),
        });
        Box::pin(async move { result })
    }
}

/// Serve `body` with `status` on an ephemeral local port and return its URL.
///
/// For exercising the real HTTP client.
pub async fn serve_canned(status: StatusCode, body: impl Into<String>) -> String {
    let body = body.into();
    let app = Router::new().route(
        "/",
        get(move || {
            let body = body.clone();
            async move { (status, body) }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}
