//! Web layer for the dashboard.
//!
//! Serves the dashboard shell, the departures fragment and the JSON feed
//! endpoints the shell polls.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
