//! REST implementation of [`ProfileDirectory`] against the identity
//! provider's users API.

use cycles_core::error::CyclesResult;
use cycles_core::models::profile::UserProfile;
use cycles_core::store::ProfileDirectory;
use serde::Deserialize;

use crate::client::{ClerkConfig, build_client};
use crate::error::StoreError;

/// User row as returned by the users API.
#[derive(Debug, Deserialize)]
struct UserDto {
    id: String,
    first_name: Option<String>,
    last_name: Option<String>,
    image_url: Option<String>,
}

impl UserDto {
    fn into_profile(self) -> UserProfile {
        let parts: Vec<&str> = self
            .first_name
            .as_deref()
            .into_iter()
            .chain(self.last_name.as_deref())
            .filter(|part| !part.is_empty())
            .collect();
        let full_name = if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        };
        UserProfile {
            id: self.id,
            full_name,
            image_url: self.image_url,
        }
    }
}

/// REST implementation of the profile directory.
#[derive(Debug, Clone)]
pub struct ClerkProfileDirectory {
    config: ClerkConfig,
    client: reqwest::Client,
}

impl ClerkProfileDirectory {
    /// Build a directory client from configuration.
    ///
    /// # Errors
    ///
    /// [`StoreError::Http`] when the HTTP client cannot be constructed.
    pub fn new(config: ClerkConfig) -> Result<Self, StoreError> {
        let client = build_client(config.timeout)?;
        Ok(Self { config, client })
    }
}

impl ProfileDirectory for ClerkProfileDirectory {
    async fn resolve_profile(&self, user_id: &str) -> CyclesResult<UserProfile> {
        let url = format!(
            "{}/users/{user_id}",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.secret_key)
            .send()
            .await
            .map_err(StoreError::from)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                entity: "user".into(),
                id: user_id.into(),
            }
            .into());
        }
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let user: UserDto = response.json().await.map_err(StoreError::from)?;
        Ok(user.into_profile())
    }
}
