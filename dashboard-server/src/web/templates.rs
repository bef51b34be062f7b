//! Askama templates for the web frontend.

use askama::Template;

use crate::transit::{Departure, RoutesBoard, StopDepartures};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Dashboard shell; the panels fill themselves in from the JSON endpoints.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub server_time: String,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Departures panel.
#[derive(Template)]
#[template(path = "routes.html")]
pub struct RoutesTemplate {
    pub stops: Vec<StopView>,
    pub minutes_until_kamppi: Option<i64>,
}

impl RoutesTemplate {
    /// Create from an aggregated board.
    pub fn from_board(board: &RoutesBoard) -> Self {
        Self {
            stops: board.departures.iter().map(StopView::from_stop).collect(),
            minutes_until_kamppi: board.minutes_until_next_kamppi,
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One stop's departures.
#[derive(Debug, Clone)]
pub struct StopView {
    pub code: String,
    pub departures: Vec<DepartureView>,
}

impl StopView {
    pub fn from_stop(stop: &StopDepartures) -> Self {
        Self {
            code: stop.code.clone(),
            departures: stop
                .departures
                .iter()
                .map(DepartureView::from_departure)
                .collect(),
        }
    }
}

/// A single departure row.
#[derive(Debug, Clone)]
pub struct DepartureView {
    pub line_code: String,
    pub time: String,
    pub name: Option<String>,
}

impl DepartureView {
    pub fn from_departure(departure: &Departure) -> Self {
        Self {
            line_code: departure.line_code.clone(),
            time: departure.display_time.clone(),
            name: departure.line_name.clone(),
        }
    }

    /// Line name, or nothing if the stop's directory did not list it.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}
