//! Process-wide settings, read from the environment once at startup.
//!
//! Variables:
//! - `SECRET_KEY` (required): token signing secret. Outside test mode it must
//!   be at least 32 characters and mix uppercase, lowercase, digits and symbols.
//! - `ALGORITHM` (default `HS256`)
//! - `TESTING` (default `false`): relaxes secret checks, disables the profile store
//! - `DATABASE_URL`: required unless `TESTING`
//! - `SUPABASE_URL` / `SUPABASE_KEY`: profile store; both must be set to enable it
//! - `PROFILE_STORE_TIMEOUT_SECS` (default 5)
//! - `BACKEND_HOST` / `BACKEND_PORT` (default `0.0.0.0:8000`)
//! - `CORS_ALLOWED_ORIGINS`: comma-separated origins
//! - `AUTH_RATE_LIMIT_REQUESTS` / `AUTH_RATE_LIMIT_WINDOW_SECS` (default 30
//!   per 60 s): per-client budget on `/api/v1/auth/*`
//! - `DEBUG` (default `false`)

use std::env;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

pub const MIN_SECRET_LEN: usize = 32;

const DEFAULT_CORS_ORIGIN: &str = "https://the-lab-academy.vercel.app";
const DEFAULT_PROFILE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_AUTH_RATE_LIMIT_REQUESTS: u64 = 30;
const DEFAULT_AUTH_RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Connection parameters for the hosted profile store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStoreSettings {
    pub url: String,
    pub api_key: String,
    pub timeout: Duration,
}

/// Request budget per client IP within a fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    pub max_requests: u64,
    pub window: Duration,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_AUTH_RATE_LIMIT_REQUESTS,
            window: Duration::from_secs(DEFAULT_AUTH_RATE_LIMIT_WINDOW_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub secret_key: String,
    pub algorithm: Algorithm,
    pub testing: bool,
    pub debug: bool,
    pub database_url: Option<String>,
    /// `None` when either URL or key is absent; identity resolution then
    /// always uses the fallback identity.
    pub profile_store: Option<ProfileStoreSettings>,
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub auth_rate_limit: RateLimitSettings,
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Tests use this instead of
    /// mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let testing = parse_bool("TESTING", get("TESTING"))?;
        let debug = parse_bool("DEBUG", get("DEBUG"))?;

        let secret_key = get("SECRET_KEY")
            .ok_or_else(|| AppError::config("SECRET_KEY is required"))?;
        if !testing {
            validate_secret_strength(&secret_key)?;
        }

        let algorithm = SecurityConfig::parse_algorithm(
            get("ALGORITHM").as_deref().unwrap_or("HS256"),
        )?;

        let database_url = get("DATABASE_URL");
        if !testing && database_url.is_none() {
            return Err(AppError::config(
                "DATABASE_URL is required when not in testing mode",
            ));
        }

        let timeout_secs = parse_count(
            "PROFILE_STORE_TIMEOUT_SECS",
            get("PROFILE_STORE_TIMEOUT_SECS"),
            DEFAULT_PROFILE_TIMEOUT_SECS,
        )?;
        let profile_store = match (get("SUPABASE_URL"), get("SUPABASE_KEY")) {
            (Some(url), Some(api_key)) => Some(ProfileStoreSettings {
                url,
                api_key,
                timeout: Duration::from_secs(timeout_secs),
            }),
            _ => None,
        };

        let host = get("BACKEND_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match get("BACKEND_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got {raw}"))
            })?,
            None => 8000,
        };

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()]);

        let auth_rate_limit = RateLimitSettings {
            max_requests: parse_count(
                "AUTH_RATE_LIMIT_REQUESTS",
                get("AUTH_RATE_LIMIT_REQUESTS"),
                DEFAULT_AUTH_RATE_LIMIT_REQUESTS,
            )?,
            window: Duration::from_secs(parse_count(
                "AUTH_RATE_LIMIT_WINDOW_SECS",
                get("AUTH_RATE_LIMIT_WINDOW_SECS"),
                DEFAULT_AUTH_RATE_LIMIT_WINDOW_SECS,
            )?),
        };

        Ok(Self {
            secret_key,
            algorithm,
            testing,
            debug,
            database_url,
            profile_store,
            host,
            port,
            cors_allowed_origins,
            auth_rate_limit,
        })
    }

    pub fn security_config(&self) -> SecurityConfig {
        SecurityConfig::new(self.secret_key.as_bytes()).with_algorithm(self.algorithm)
    }

    /// Database URL trimmed to a prefix safe for startup logs.
    pub fn database_url_preview(&self) -> Option<String> {
        self.database_url
            .as_ref()
            .map(|url| format!("{}...", url.chars().take(20).collect::<String>()))
    }
}

/// Enforce a minimum length and all four character classes.
pub fn validate_secret_strength(secret: &str) -> Result<(), AppError> {
    if secret.chars().count() < MIN_SECRET_LEN {
        return Err(AppError::config(format!(
            "SECRET_KEY must be at least {MIN_SECRET_LEN} characters long"
        )));
    }

    let has_upper = secret.chars().any(char::is_uppercase);
    let has_lower = secret.chars().any(char::is_lowercase);
    let has_digit = secret.chars().any(|c| c.is_ascii_digit());
    let has_symbol = secret.chars().any(|c| !c.is_alphanumeric());

    if !(has_upper && has_lower && has_digit && has_symbol) {
        return Err(AppError::config(
            "SECRET_KEY must contain at least one uppercase letter, one lowercase letter, one digit, and one special character",
        ));
    }

    Ok(())
}

/// Positive whole number, or `default` when unset.
fn parse_count(key: &str, value: Option<String>, default: u64) -> Result<u64, AppError> {
    let Some(raw) = value else {
        return Ok(default);
    };
    match raw.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::config(format!(
            "{key} must be a positive whole number, got {raw}"
        ))),
    }
}

fn parse_bool(key: &str, value: Option<String>) -> Result<bool, AppError> {
    let Some(raw) = value else {
        return Ok(false);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::config(format!(
            "{key} must be a boolean, got {raw}"
        ))),
    }
}
