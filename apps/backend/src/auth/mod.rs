pub mod claims;
pub mod identity;
pub mod jwt;
pub mod user;

pub use claims::{subject_claims, Claims, TokenType};
pub use identity::{fallback_user, require_admin, resolve_user};
pub use jwt::{
    create_access_token, create_refresh_token, verify_access_token, verify_refresh_token,
    ACCESS_TOKEN_TTL, REFRESH_TOKEN_TTL,
};
pub use user::{Role, User};
