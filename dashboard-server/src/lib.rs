//! Personal dashboard server.
//!
//! Aggregates transit departures, weather, a wallpaper and a quote of the
//! day from third-party APIs, caching each response briefly.

pub mod cache;
pub mod clock;
pub mod config;
pub mod feeds;
pub mod health;
pub mod transit;
pub mod upstream;
pub mod web;
