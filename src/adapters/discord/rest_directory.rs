//! Discord REST directory adapter.
//!
//! Role assignment maps onto the guild member role endpoints:
//! `PUT /guilds/{guild}/members/{user}/roles/{role}` adds a role and
//! `DELETE` removes it. Both succeed with `204 No Content`.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use tracing::debug;

use crate::domain::foundation::UserId;
use crate::domain::registry::RoleTier;
use crate::ports::{Directory, DirectoryError};

use super::DiscordConfig;

/// `Directory` implementation backed by the Discord REST API.
pub struct RestDirectory {
    config: DiscordConfig,
    http_client: reqwest::Client,
}

impl RestDirectory {
    pub fn new(config: DiscordConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn role_id(&self, role: RoleTier) -> &str {
        match role {
            RoleTier::Warriors => &self.config.role_ids.0,
            RoleTier::Fellows => &self.config.role_ids.1,
        }
    }

    async fn role_request(
        &self,
        method: Method,
        user_id: &UserId,
        role: RoleTier,
    ) -> Result<(), DirectoryError> {
        let url = format!(
            "{}/guilds/{}/members/{}/roles/{}",
            self.config.api_base,
            self.config.guild_id,
            user_id,
            self.role_id(role)
        );
        debug!(%method, user_id = %user_id, role = %role, "Directory role request");

        let response = self
            .http_client
            .request(method, &url)
            .header(
                "Authorization",
                format!("Bot {}", self.config.bot_token.expose_secret()),
            )
            .send()
            .await
            .map_err(|e| DirectoryError::ActionFailed(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(DirectoryError::MemberOrRoleNotFound {
                user_id: user_id.clone(),
                role,
            }),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(DirectoryError::ActionFailed(format!(
                    "HTTP {status}: {body}"
                )))
            }
        }
    }
}

#[async_trait]
impl Directory for RestDirectory {
    async fn grant_role(&self, user_id: &UserId, role: RoleTier) -> Result<(), DirectoryError> {
        self.role_request(Method::PUT, user_id, role).await
    }

    async fn revoke_role(&self, user_id: &UserId, role: RoleTier) -> Result<(), DirectoryError> {
        self.role_request(Method::DELETE, user_id, role).await
    }
}
