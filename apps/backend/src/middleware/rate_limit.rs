//! Rate limiting for the authentication endpoints.
//!
//! Budgets live in one in-memory backend shared by every worker and are
//! keyed by the client's real IP (`Forwarded` / `X-Forwarded-For`, then the
//! peer address). Health and dashboard routes are not throttled.

use std::time::Instant;

use actix_extensible_rate_limit::backend::memory::InMemoryBackend;
use actix_extensible_rate_limit::backend::{SimpleInputFunctionBuilder, SimpleOutput};
use actix_web::{HttpResponse, ResponseError};

use crate::config::settings::RateLimitSettings;
use crate::error::AppError;
use crate::logging::security;

/// Shared limiter state for `/api/v1/auth/*`.
#[derive(Clone)]
pub struct AuthRateLimit {
    backend: InMemoryBackend,
    settings: RateLimitSettings,
}

impl AuthRateLimit {
    /// Needs a running actix runtime: the backend spawns its expiry sweep.
    pub fn new(settings: RateLimitSettings) -> Self {
        Self {
            backend: InMemoryBackend::builder().build(),
            settings,
        }
    }

    pub fn settings(&self) -> RateLimitSettings {
        self.settings
    }

    pub fn backend(&self) -> InMemoryBackend {
        self.backend.clone()
    }

    /// `max_requests` per `window` per client IP.
    pub fn input(&self) -> SimpleInputFunctionBuilder {
        SimpleInputFunctionBuilder::new(self.settings.window, self.settings.max_requests)
            .real_ip_key()
    }
}

/// Problem Details body for a denied request, with `Retry-After`.
pub fn denied_response(scope: &str, output: &SimpleOutput) -> HttpResponse {
    let retry_after = retry_after_secs(output.reset.into(), Instant::now());
    security::rate_limit_hit(scope, output.limit, retry_after);
    AppError::rate_limited(retry_after).error_response()
}

/// Whole seconds until `reset`, rounded up, never below one.
fn retry_after_secs(reset: Instant, now: Instant) -> u64 {
    let remaining = reset.saturating_duration_since(now);
    let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    secs.max(1)
}
