//! Application state for the statutory deduction engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::engine::StatutoryEngine;

/// Shared application state.
///
/// Contains the statutory engine shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<StatutoryEngine>,
}

impl AppState {
    /// Creates a new application state wrapping the given engine.
    pub fn new(engine: StatutoryEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns a reference to the statutory engine.
    pub fn engine(&self) -> &StatutoryEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
