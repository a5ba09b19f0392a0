//! Application state for the benefit ledger API.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::engine::BenefitEngine;

/// Shared application state.
///
/// Holds the engine every handler posts to.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<BenefitEngine>,
}

impl AppState {
    /// Creates a state around an in-memory engine for the given configuration.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_engine(BenefitEngine::in_memory(config))
    }

    /// Creates a state around an existing engine.
    pub fn with_engine(engine: BenefitEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &BenefitEngine {
        &self.engine
    }
}
