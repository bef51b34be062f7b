//! JSON response bodies.

use serde::{Deserialize, Serialize};

/// Response for the wallpaper endpoint.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WallpaperResponse {
    /// Absolute URL of today's image
    pub url: String,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
