//! Application state for the web layer.

use std::sync::Arc;

use crate::clock::Clock;
use crate::feeds::FeedsConfig;
use crate::transit::TransitConfig;
use crate::upstream::ApiFetcher;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached upstream fetcher
    pub fetcher: ApiFetcher,

    /// Source of "now" for departure filtering and the frontpage
    pub clock: Arc<dyn Clock>,

    /// Transit API and stop configuration
    pub transit: Arc<TransitConfig>,

    /// Weather, wallpaper and quote feeds
    pub feeds: Arc<FeedsConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        fetcher: ApiFetcher,
        clock: Arc<dyn Clock>,
        transit: TransitConfig,
        feeds: FeedsConfig,
    ) -> Self {
        Self {
            fetcher,
            clock,
            transit: Arc::new(transit),
            feeds: Arc::new(feeds),
        }
    }
}
