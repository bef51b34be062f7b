//! Aggregating departures across all configured stops.

use chrono::NaiveDateTime;

use super::config::StopConfig;
use super::format::{Departure, build_departures};
use super::types::StopInfo;

/// Line prefix of the Kamppi-bound service highlighted on the dashboard.
pub const KAMPPI_LINE_PREFIX: &str = "102";

/// Upcoming departures at one stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopDepartures {
    pub code: String,
    pub departures: Vec<Departure>,
}

/// Departures grouped by stop, in configured stop order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeparturesByStop(Vec<StopDepartures>);

impl DeparturesByStop {
    /// Departures for `code`, if the stop is present.
    pub fn get(&self, code: &str) -> Option<&[Departure]> {
        self.0
            .iter()
            .find(|s| s.code == code)
            .map(|s| s.departures.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &StopDepartures> {
        self.0.iter()
    }
}

/// Everything the routes page shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutesBoard {
    pub departures: DeparturesByStop,
    /// Minutes until the first upcoming Kamppi-line departure, if any
    pub minutes_until_next_kamppi: Option<i64>,
}

/// Build the board from each stop's parsed response.
///
/// Stops whose response lists no departures at all are left out. A stop
/// whose departures have all left stays in with an empty list.
pub fn build_board<'a, I>(stops: I, now: NaiveDateTime) -> RoutesBoard
where
    I: IntoIterator<Item = (&'a StopConfig, &'a StopInfo)>,
{
    let mut by_stop = Vec::new();
    let mut minutes_until_next_kamppi = None;

    for (stop, info) in stops {
        if info.departures().is_empty() {
            continue;
        }

        let departures = build_departures(stop, info, now);

        if minutes_until_next_kamppi.is_none() {
            minutes_until_next_kamppi = departures
                .iter()
                .find(|d| d.line_code.starts_with(KAMPPI_LINE_PREFIX))
                .map(|d| minutes_between(now, d.departs_at));
        }

        by_stop.push(StopDepartures {
            code: stop.code.clone(),
            departures,
        });
    }

    RoutesBoard {
        departures: DeparturesByStop(by_stop),
        minutes_until_next_kamppi,
    }
}

/// Whole minutes from `from` to `to`, rounded to nearest.
fn minutes_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    let secs = to.signed_duration_since(from).num_seconds();
    (secs as f64 / 60.0).round() as i64
}
