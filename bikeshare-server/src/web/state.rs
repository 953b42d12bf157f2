//! Application state for the web layer.

use std::sync::Arc;

use crate::service::StationService;

/// Shared application state.
///
/// Holds no request data; every request fetches the feeds afresh.
#[derive(Clone)]
pub struct AppState {
    /// Station queries backed by the upstream feed
    pub stations: Arc<StationService>,
}

impl AppState {
    pub fn new(stations: StationService) -> Self {
        Self {
            stations: Arc::new(stations),
        }
    }
}
