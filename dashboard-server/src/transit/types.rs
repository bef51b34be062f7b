//! Raw stop API types.
//!
//! The stop query returns a JSON array whose first element describes the
//! stop. Only the fields the dashboard reads are modelled; everything else
//! is ignored.

use serde::Deserialize;
use serde_json::Value;

/// Errors from interpreting a stop response.
#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    /// Response did not have the expected shape
    #[error("malformed stop response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Response array was empty
    #[error("stop response contained no stops")]
    EmptyResponse,
}

/// One stop as described by the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopInfo {
    /// Line directory, entries of the form "code:name,direction..."
    #[serde(default)]
    pub lines: Option<Vec<String>>,

    /// Upcoming departures in arrival order; `null` when there are none
    #[serde(default)]
    pub departures: Option<Vec<RawDeparture>>,
}

impl StopInfo {
    /// Parse the stop from a raw API response.
    pub fn from_response(response: &Value) -> Result<Self, TransitError> {
        let stops = Vec::<StopInfo>::deserialize(response)?;
        stops.into_iter().next().ok_or(TransitError::EmptyResponse)
    }

    /// Line directory entries.
    pub fn lines(&self) -> &[String] {
        self.lines.as_deref().unwrap_or_default()
    }

    /// Departures, empty when the API reported none.
    pub fn departures(&self) -> &[RawDeparture] {
        self.departures.as_deref().unwrap_or_default()
    }
}

/// A departure as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawDeparture {
    /// Padded internal line code, e.g. "1102T 2"
    pub code: String,

    /// Packed departure time, e.g. 930 for 09:30
    pub time: u32,
}
