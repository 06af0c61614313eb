//! Client for the external identity provider's backend API.
//!
//! Authentication itself is delegated: the provider signs session tokens and
//! owns the user records. This client only reads profiles during identity
//! bootstrap and writes role metadata back on role selection.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use util::config;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("identity provider returned status {0}")]
    Status(u16),
}

/// Profile fields exposed by the provider for a single user.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityProfile {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub metadata: ProfileMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileMetadata {
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Serialize)]
struct MetadataPatch<'a> {
    role: &'a str,
}

pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl IdentityClient {
    pub fn from_config() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config::identity_api_url(),
            secret_key: config::identity_secret_key(),
        }
    }

    /// Fetches the provider's profile for a user. `Ok(None)` means the
    /// provider does not know the user.
    pub async fn fetch_profile(
        &self,
        provider_id: &str,
    ) -> Result<Option<IdentityProfile>, IdentityError> {
        let url = format!("{}/v1/users/{}", self.base_url, provider_id);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(IdentityError::Status(resp.status().as_u16()));
        }

        Ok(Some(resp.json::<IdentityProfile>().await?))
    }

    /// Pushes the selected role into the provider's user metadata so other
    /// clients of the provider see it. Callers treat failures as non-fatal.
    pub async fn update_role_metadata(
        &self,
        provider_id: &str,
        role: &str,
    ) -> Result<(), IdentityError> {
        let url = format!("{}/v1/users/{}/metadata", self.base_url, provider_id);
        let resp = self
            .http
            .patch(&url)
            .bearer_auth(&self.secret_key)
            .json(&MetadataPatch { role })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(IdentityError::Status(resp.status().as_u16()));
        }

        Ok(())
    }
}
