//! Upstream JSON APIs.
//!
//! Every data source behind the dashboard is an HTTP `GET` returning JSON.
//! [`HttpUpstream`] performs the requests and [`ApiFetcher`] puts the
//! TTL cache in front of it.

mod client;
mod error;
mod fetcher;
#[cfg(test)]
pub(crate) mod mock;

pub use client::{HttpUpstream, HttpUpstreamConfig, Upstream};
pub use error::FetchError;
pub use fetcher::{ApiFetcher, DEFAULT_TTL};
