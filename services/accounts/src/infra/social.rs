use anyhow::Context as _;
use reqwest::Client;
use serde_json::json;
use uuid::Uuid;

use crate::domain::repository::SocialPort;
use crate::domain::types::ProfileSeed;
use crate::error::AccountsServiceError;

/// HTTP client for the social service's profile API.
#[derive(Clone)]
pub struct HttpSocialClient {
    client: Client,
    base_url: String,
}

impl HttpSocialClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn profiles_url(&self) -> String {
        format!("{}/api/v1/social/profiles", self.base_url)
    }
}

impl SocialPort for HttpSocialClient {
    async fn create_profile(&self, seed: &ProfileSeed) -> Result<(), AccountsServiceError> {
        self.client
            .post(self.profiles_url())
            .json(seed)
            .send()
            .await
            .context("send create profile request")?
            .error_for_status()
            .context("social service rejected create profile")?;
        Ok(())
    }

    async fn update_username(
        &self,
        user_id: Uuid,
        username: &str,
    ) -> Result<(), AccountsServiceError> {
        let url = format!("{}/{user_id}/username", self.profiles_url());
        self.client
            .patch(url)
            .json(&json!({ "username": username }))
            .send()
            .await
            .context("send username update request")?
            .error_for_status()
            .context("social service rejected username update")?;
        Ok(())
    }
}
