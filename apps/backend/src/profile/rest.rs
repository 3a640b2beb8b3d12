//! PostgREST client for the hosted `profiles` table.

use std::fmt;

use async_trait::async_trait;
use uuid::Uuid;

use super::{Profile, ProfileLookup, ProfileStore, ProfileStoreError};
use crate::config::settings::ProfileStoreSettings;
use crate::error::AppError;

const PROFILE_COLUMNS: &str = "full_name,email,role";

#[derive(Clone)]
pub struct RestProfileStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestProfileStore {
    pub fn new(settings: &ProfileStoreSettings) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build profile store client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    fn profiles_url(&self) -> String {
        format!("{}/rest/v1/profiles", self.base_url)
    }
}

impl fmt::Debug for RestProfileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestProfileStore")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl ProfileStore for RestProfileStore {
    async fn fetch_profile(&self, user_id: Uuid) -> ProfileLookup {
        let id_filter = format!("eq.{user_id}");

        let response = self
            .client
            .get(self.profiles_url())
            .query(&[
                ("select", PROFILE_COLUMNS),
                ("id", id_filter.as_str()),
                ("limit", "1"),
            ])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| ProfileStoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProfileStoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<Profile> = response
            .json()
            .await
            .map_err(|e| ProfileStoreError::Decode(e.to_string()))?;

        Ok(rows.into_iter().next())
    }
}
