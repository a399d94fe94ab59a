//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::services::{OptimizerConfig, SessionLockRegistry};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for store operations
    pub repository: Arc<dyn FullRepository>,
    /// Per-session locks shared across concurrent optimization passes
    pub session_locks: Arc<SessionLockRegistry>,
    /// Hall pool configuration
    pub optimizer_config: OptimizerConfig,
}

impl AppState {
    /// Create a new application state with the given repository and the
    /// environment-derived optimizer configuration.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self::with_config(repository, OptimizerConfig::from_env())
    }

    /// Create a new application state with an explicit configuration.
    pub fn with_config(repository: Arc<dyn FullRepository>, config: OptimizerConfig) -> Self {
        Self {
            repository,
            session_locks: Arc::new(SessionLockRegistry::new()),
            optimizer_config: config,
        }
    }
}
