#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod logging;
pub mod middleware;
pub mod profile;
pub mod routes;
pub mod state;
pub mod trace_ctx;


pub use auth::{resolve_user, Claims, Role, TokenType, User};
pub use config::settings::Settings;
pub use error::AppError;
pub use extractors::{AuthToken, CurrentAdmin, CurrentUser};
pub use profile::{Profile, ProfileStore, ProfileStoreError};
pub use state::{AppState, SecurityConfig};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
