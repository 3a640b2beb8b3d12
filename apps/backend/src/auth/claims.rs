//! Claims carried by backend-issued tokens.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Discriminator stored under the `type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded token payload.
///
/// `sub` and `email` are optional at this layer; the identity resolver
/// decides whether their absence is fatal. Any other claim the issuer was
/// given survives in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: string-encoded user UUID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Absent on tokens not minted by this service
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Claim map for a subject, the usual input to the token issuer.
pub fn subject_claims(sub: &str, email: Option<&str>) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("sub".to_string(), Value::String(sub.to_string()));
    if let Some(email) = email {
        data.insert("email".to_string(), Value::String(email.to_string()));
    }
    data
}
