//! Shared application state.

use std::sync::Arc;

use synapse_core::SynapseConfig;
use synapse_store::SqliteStore;
use synapse_trends::{InsightsProvider, TrendsOptions};

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: SynapseConfig,
    pub store: SqliteStore,
    /// Optional AI backend used by `GET /api/trends?enrich=true`.
    pub insights: Option<Arc<dyn InsightsProvider>>,
}

impl AppState {
    pub fn new(config: SynapseConfig, store: SqliteStore) -> Self {
        Self {
            config,
            store,
            insights: None,
        }
    }

    pub fn with_insights(mut self, provider: Arc<dyn InsightsProvider>) -> Self {
        self.insights = Some(provider);
        self
    }

    /// Fill unset request options from the configured defaults.
    pub fn trends_options(&self, window_days: Option<u32>, max_topics: Option<usize>) -> TrendsOptions {
        TrendsOptions {
            window_days: Some(window_days.unwrap_or(self.config.trends.window_days)),
            max_topics: Some(max_topics.unwrap_or(self.config.trends.max_topics)),
        }
    }
}
