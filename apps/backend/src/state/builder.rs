use std::sync::Arc;

use crate::config::settings::Settings;
use crate::error::AppError;
use crate::profile::{ProfileStore, RestProfileStore};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    testing: bool,
    profile_store: Option<Arc<dyn ProfileStore>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            testing: false,
            profile_store: None,
        }
    }

    /// Start from process settings: signing config, test mode and, when
    /// configured, a REST profile store client.
    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        let profile_store = match &settings.profile_store {
            Some(store) => {
                Some(Arc::new(RestProfileStore::new(store)?) as Arc<dyn ProfileStore>)
            }
            None => None,
        };

        Ok(Self {
            security_config: settings.security_config(),
            testing: settings.testing,
            profile_store,
        })
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_testing(mut self, testing: bool) -> Self {
        self.testing = testing;
        self
    }

    pub fn with_profile_store(mut self, store: Arc<dyn ProfileStore>) -> Self {
        self.profile_store = Some(store);
        self
    }

    pub fn build(self) -> AppState {
        AppState::new(self.security_config, self.testing, self.profile_store)
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
