//! HSL stop departures.
//!
//! Fetched stop responses are parsed into [`StopInfo`], formatted per stop
//! by [`build_departures`] and aggregated for the routes page by
//! [`build_board`].

mod board;
mod config;
mod format;
mod types;

pub use board::{DeparturesByStop, KAMPPI_LINE_PREFIX, RoutesBoard, StopDepartures, build_board};
pub use config::{StopConfig, TransitConfig, default_stops};
pub use format::{
    Departure, build_departures, departure_time, extract_line_name, format_time,
    normalize_line_code,
};
pub use types::{RawDeparture, StopInfo, TransitError};
