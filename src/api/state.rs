//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::data::{DataResult, SampleCache, SampleKey, SampleSeries};
use crate::nav::{NavigationState, RenderContext};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<Config>,
    /// Generated sample tables per session
    pub cache: Arc<SampleCache>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let cache = SampleCache::new(config.sample.cache_capacity);
        Self {
            config: Arc::new(config),
            cache: Arc::new(cache),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Render context for `nav` with the configured page chrome
    pub fn render_context(&self, nav: NavigationState) -> RenderContext {
        RenderContext::from_ui(nav, &self.config.ui)
    }

    /// Navigation used when the request carries none (or an invalid one)
    pub fn default_nav(&self) -> NavigationState {
        NavigationState::default().theme(self.config.ui.default_theme)
    }

    /// Sample table of a session. `seed` overrides the configured seed.
    pub async fn sample_for(
        &self,
        session: &str,
        seed: Option<u64>,
    ) -> DataResult<Arc<SampleSeries>> {
        let key = SampleKey::new(
            self.config.sample.year,
            seed.or(self.config.sample.seed),
            session,
        );
        self.cache.get_or_generate(&key).await
    }
}
