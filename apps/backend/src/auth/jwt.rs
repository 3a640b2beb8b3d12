use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};

use crate::auth::claims::{Claims, TokenType};
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

pub const ACCESS_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);
pub const REFRESH_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

impl TokenType {
    pub const fn default_ttl(&self) -> Duration {
        match self {
            TokenType::Access => ACCESS_TOKEN_TTL,
            TokenType::Refresh => REFRESH_TOKEN_TTL,
        }
    }
}

/// Mint an access token. Validity defaults to 15 minutes.
pub fn create_access_token(
    data: &Map<String, Value>,
    expires_in: Option<Duration>,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    create_token(data, TokenType::Access, expires_in, now, security)
}

/// Mint a refresh token. Validity defaults to 7 days.
pub fn create_refresh_token(
    data: &Map<String, Value>,
    expires_in: Option<Duration>,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    create_token(data, TokenType::Refresh, expires_in, now, security)
}

/// Sign `data` after injecting `exp` and `type`.
///
/// The injected claims always win over same-named keys in `data`. A
/// lifetime that pushes `exp` past `i64` seconds is a `Validation` error.
pub fn create_token(
    data: &Map<String, Value>,
    token_type: TokenType,
    expires_in: Option<Duration>,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let issued_at = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?;
    let ttl = expires_in.unwrap_or_else(|| token_type.default_ttl());
    let exp = issued_at
        .checked_add(ttl)
        .and_then(|expires_at| i64::try_from(expires_at.as_secs()).ok())
        .ok_or_else(|| AppError::validation("Token lifetime is out of range"))?;

    let mut payload = data.clone();
    payload.insert("exp".to_string(), Value::from(exp));
    payload.insert(
        "type".to_string(),
        Value::String(token_type.as_str().to_string()),
    );

    encode(
        &Header::new(security.algorithm),
        &payload,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify signature and expiry, returning the raw claims.
///
/// Errors:
/// - past `exp` → `AppError::TokenExpired`
/// - anything else (malformed, tampered, wrong algorithm) → `AppError::TokenInvalid`
pub fn decode_claims(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    // Pin the algorithm; no clock skew allowance.
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = true;
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::token_expired(),
        _ => AppError::token_invalid("Invalid authentication credentials"),
    })
}

/// Decode a token and require its `type` claim to be `expected`.
pub fn verify_token(
    token: &str,
    expected: TokenType,
    security: &SecurityConfig,
) -> Result<Claims, AppError> {
    let claims = decode_claims(token, security)?;

    if claims.token_type != Some(expected) {
        return Err(AppError::token_invalid("Invalid token type"));
    }

    Ok(claims)
}

pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    verify_token(token, TokenType::Access, security)
}

/// Refresh-flow verification: no identity resolution, just the claims.
pub fn verify_refresh_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    verify_token(token, TokenType::Refresh, security)
}
