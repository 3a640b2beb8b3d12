//! External profile store: the system of record for display name, email
//! and role.

pub mod rest;

use std::fmt::Debug;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::user::Role;

pub use rest::RestProfileStore;

/// One row of the `profiles` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Error)]
pub enum ProfileStoreError {
    #[error("profile store request failed: {0}")]
    Transport(String),
    #[error("profile store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("profile store returned an unreadable body: {0}")]
    Decode(String),
}

/// Outcome of a single lookup: `Ok(None)` when no profile row exists.
pub type ProfileLookup = Result<Option<Profile>, ProfileStoreError>;

/// Read access to user profiles, keyed by subject UUID.
///
/// Implementations make exactly one attempt per call; callers decide how to
/// degrade on failure.
#[async_trait]
pub trait ProfileStore: Send + Sync + Debug {
    async fn fetch_profile(&self, user_id: Uuid) -> ProfileLookup;
}
