use tracing::warn;
use uuid::Uuid;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// A presented token was rejected (expired, invalid, wrong type...).
pub fn token_rejected(code: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        code,
        "Token rejected"
    );
}

/// Identity resolution fell back to a synthesized identity.
pub fn profile_fallback(user_id: Uuid, reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_PROFILE_FALLBACK",
        %trace_id,
        %user_id,
        reason = %Redacted(reason),
        "User profile unavailable, using fallback identity"
    );
}

/// A client exhausted its request budget.
pub fn rate_limit_hit(scope: &str, limit: u64, retry_after_secs: u64) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_RATE_LIMIT_HIT",
        %trace_id,
        scope,
        limit,
        retry_after_secs,
        "Rate limit exceeded"
    );
}

/// An authenticated user hit an admin-only route.
pub fn admin_denied(user_id: Uuid) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_ADMIN_DENIED",
        %trace_id,
        %user_id,
        "Admin access required"
    );
}
