use std::sync::Arc;

use crate::engine::MatchEngine;

/// Shared gateway state
#[derive(Clone)]
pub struct AppState {
    /// The engine is the only path to the queue store
    pub engine: Arc<MatchEngine>,
}

impl AppState {
    pub fn new(engine: Arc<MatchEngine>) -> Self {
        Self { engine }
    }
}
