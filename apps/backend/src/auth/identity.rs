//! Bearer token → `User` resolution.
//!
//! The token alone proves authentication. The profile store only enriches
//! the identity (display name, role), so a store that is missing, empty or
//! failing degrades to an identity synthesized from the claims instead of
//! failing the request.

use uuid::Uuid;

use crate::auth::jwt::verify_access_token;
use crate::auth::user::{Role, User};
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

/// Verify an access token and resolve the caller's identity.
///
/// Errors:
/// - expired token → `TokenExpired`
/// - bad signature, malformed payload, wrong type, missing `sub`/`email`
///   → `TokenInvalid`
/// - `sub` that is not a UUID → `Validation`
pub async fn resolve_user(token: &str, state: &AppState) -> Result<User, AppError> {
    let claims = verify_access_token(token, &state.security)?;

    let (sub, email) = match (claims.sub, claims.email) {
        (Some(sub), Some(email)) if !sub.is_empty() && !email.is_empty() => (sub, email),
        _ => return Err(AppError::token_invalid("Invalid token payload")),
    };

    let user_id = Uuid::parse_str(&sub)
        .map_err(|_| AppError::validation(format!("Invalid user ID format: {sub}")))?;

    let Some(store) = state.active_profile_store() else {
        return Ok(fallback_user(user_id, &email));
    };

    match store.fetch_profile(user_id).await {
        Ok(Some(profile)) => Ok(User {
            user_id,
            full_name: profile.full_name,
            email: profile.email,
            role: profile.role,
        }),
        Ok(None) => {
            security::profile_fallback(user_id, "profile not found");
            Ok(fallback_user(user_id, &email))
        }
        Err(e) => {
            security::profile_fallback(user_id, &e.to_string());
            Ok(fallback_user(user_id, &email))
        }
    }
}

/// Identity synthesized from token claims alone.
///
/// The display name is the email local-part; when there is none, the
/// subject UUID stands in.
pub fn fallback_user(user_id: Uuid, email: &str) -> User {
    let full_name = match email.split_once('@') {
        Some((local, _)) if !local.is_empty() => local.to_string(),
        _ => user_id.to_string(),
    };

    User {
        user_id,
        full_name,
        email: email.to_string(),
        role: Role::Student,
    }
}

/// Admin gate: pass the user through only if their role is `admin`.
pub fn require_admin(user: User) -> Result<User, AppError> {
    if user.role.is_admin() {
        Ok(user)
    } else {
        Err(AppError::forbidden("Admin access required"))
    }
}
