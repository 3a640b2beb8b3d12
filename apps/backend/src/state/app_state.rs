use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::profile::ProfileStore;

/// Application state shared by every worker. Immutable after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Token signing configuration
    pub security: SecurityConfig,
    /// Test mode: identity resolution never contacts the profile store
    pub testing: bool,
    /// External profile store (absent when not configured)
    pub profile_store: Option<Arc<dyn ProfileStore>>,
}

impl AppState {
    pub fn new(
        security: SecurityConfig,
        testing: bool,
        profile_store: Option<Arc<dyn ProfileStore>>,
    ) -> Self {
        Self {
            security,
            testing,
            profile_store,
        }
    }

    /// The profile store to consult, or `None` when identities must be
    /// synthesized from token claims.
    pub fn active_profile_store(&self) -> Option<&Arc<dyn ProfileStore>> {
        if self.testing {
            None
        } else {
            self.profile_store.as_ref()
        }
    }

    /// Test-mode state with the given security config and no profile store
    pub fn for_tests(security: SecurityConfig) -> Self {
        Self::new(security, true, None)
    }
}
