//! Application state

use tracing::{info, warn};

use super::ServerConfig;
use crate::scoring::ScoringEngine;

/// State shared across handlers: the configuration and, when the
/// artifact could be loaded, the scoring engine. The engine is read-only
/// for the life of the process, so no locking is needed.
pub struct AppState {
    pub config: ServerConfig,
    pub engine: Option<ScoringEngine>,
}

impl AppState {
    /// Load the model artifact eagerly. A missing or unreadable artifact
    /// leaves the service in degraded mode rather than failing startup.
    pub fn new(config: ServerConfig) -> Self {
        let engine = match ScoringEngine::load(&config.model_path) {
            Ok(engine) => {
                info!(model = %config.model_path.display(), "model loaded");
                Some(engine)
            }
            Err(e) => {
                warn!(
                    model = %config.model_path.display(),
                    error = %e,
                    "model not available, serving in degraded mode"
                );
                None
            }
        };

        Self { config, engine }
    }
}
