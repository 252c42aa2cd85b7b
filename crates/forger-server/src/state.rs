//! Shared application state.

use std::sync::Arc;

use forger_core::ForgerConfig;
use forger_runtime::Orchestrator;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: ForgerConfig,
    /// Shared with blocking tasks; the orchestrator is read-only after startup.
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(config: ForgerConfig, orchestrator: Orchestrator) -> Self {
        Self {
            config,
            orchestrator: Arc::new(orchestrator),
        }
    }
}
