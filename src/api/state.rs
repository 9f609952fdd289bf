//! Application state for the rota engine API.

use std::sync::Arc;

use crate::config::RotaSettings;

/// Shared application state, available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    settings: Arc<RotaSettings>,
}

impl AppState {
    /// Creates a new application state with the given settings.
    pub fn new(settings: RotaSettings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }

    /// Returns the runtime settings.
    pub fn settings(&self) -> &RotaSettings {
        &self.settings
    }
}
