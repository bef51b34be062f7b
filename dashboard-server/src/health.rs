//! Startup connectivity check.

use crate::transit::TransitConfig;
use crate::upstream::{FetchError, Upstream};

/// Verify that the transit API accepts our credentials.
///
/// Queries the configured probe stop directly, bypassing the cache. Any
/// transport error, non-success status or non-JSON body fails the probe;
/// rejected credentials carry the upstream's explanation in the error.
pub async fn probe_transit(
    upstream: &dyn Upstream,
    transit: &TransitConfig,
) -> Result<(), FetchError> {
    let url = transit.stop_url(&transit.probe_stop);
    upstream.get_json(&url).await.map(|_| ())
}
