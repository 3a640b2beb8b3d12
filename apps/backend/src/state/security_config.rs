use std::str::FromStr;

use jsonwebtoken::Algorithm;

use crate::error::AppError;

/// Signing material shared by the token issuer and the identity resolver.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Shared secret used to sign and verify tokens
    pub jwt_secret: Vec<u8>,
    /// HMAC algorithm tokens are signed with (defaults to HS256)
    pub algorithm: Algorithm,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given secret and HS256.
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Parse an algorithm identifier such as `"HS256"`.
    ///
    /// Only the HMAC family is accepted: the secret is a shared key, not a
    /// PEM document.
    pub fn parse_algorithm(name: &str) -> Result<Algorithm, AppError> {
        let algorithm = Algorithm::from_str(name.trim())
            .map_err(|_| AppError::config(format!("Unknown signing algorithm: {name}")))?;

        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
            other => Err(AppError::config(format!(
                "Signing algorithm {other:?} requires a key pair; use HS256, HS384 or HS512"
            ))),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
