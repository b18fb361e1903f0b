use std::sync::Arc;

use osteria_core::config::Config;
use osteria_tracker::VisitorTracker;

/// Shared application state injected into every Axum handler via
/// [`axum::extract::State`].
///
/// The tracker is the only heavy resource; it is constructed once in
/// `main.rs` (performing the legacy store migration) and shared behind an
/// `Arc` so the tracking middleware can hand clones to spawned tasks.
pub struct AppState {
    pub tracker: Arc<VisitorTracker>,
    /// Parsed configuration, loaded once at startup from environment variables.
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(tracker: VisitorTracker, config: Config) -> Self {
        Self {
            tracker: Arc::new(tracker),
            config: Arc::new(config),
        }
    }
}
