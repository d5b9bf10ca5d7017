//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use assistance_core::ports::{
    ApplicationRepository, Clock, ContentRepository, SystemClock, TrackingCodeSource,
};
use assistance_core::tracking::RandomTrackingCodes;
use assistance_core::{ApplicationService, ContentService};
use std::sync::Arc;

use crate::config::Config;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub applications: ApplicationService,
    pub content: ContentService,
}

impl AppState {
    /// Wires both components to one storage adapter, the wall clock and
    /// tracking codes with the configured prefix.
    pub fn from_config<R>(repo: Arc<R>, config: &Config) -> Self
    where
        R: ApplicationRepository + ContentRepository + 'static,
    {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let codes: Arc<dyn TrackingCodeSource> =
            Arc::new(RandomTrackingCodes::new(config.tracking_prefix.clone()));
        Self::with_parts(repo, clock, codes, config.seed_initial_timeline)
    }

    pub fn with_parts<R>(
        repo: Arc<R>,
        clock: Arc<dyn Clock>,
        codes: Arc<dyn TrackingCodeSource>,
        seed_initial_timeline: bool,
    ) -> Self
    where
        R: ApplicationRepository + ContentRepository + 'static,
    {
        let applications = ApplicationService::new(repo.clone(), clock.clone(), codes)
            .with_initial_timeline(seed_initial_timeline);
        let content = ContentService::new(repo, clock);
        Self {
            applications,
            content,
        }
    }
}
