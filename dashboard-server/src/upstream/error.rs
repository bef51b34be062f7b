//! Upstream fetch error types.

/// Errors from fetching or decoding an upstream JSON document.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credentials rejected by the upstream
    #[error(
        "unauthorized ({status}): {body} (check HSL_USERNAME, HSL_PASSWORD and WEATHER_API_KEY)"
    )]
    Unauthorized { status: u16, body: String },

    /// Upstream returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Body was not valid JSON
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_ref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}
