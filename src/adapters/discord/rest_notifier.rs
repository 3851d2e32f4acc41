//! Discord REST notifier adapter.
//!
//! Direct messages need two calls: `POST /users/@me/channels` opens (or
//! returns) the DM channel for a recipient, then the message goes to
//! `POST /channels/{channel}/messages`. Announcements post straight to the
//! configured broadcast channel.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::foundation::UserId;
use crate::ports::{Notifier, NotifyError};

use super::DiscordConfig;

/// `Notifier` implementation backed by the Discord REST API.
pub struct RestNotifier {
    config: DiscordConfig,
    http_client: reqwest::Client,
}

impl RestNotifier {
    pub fn new(config: DiscordConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.config.bot_token.expose_secret())
    }

    async fn post_json<T: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<R, NotifyError> {
        let response = self
            .http_client
            .post(url)
            .header("Authorization", self.auth_header())
            .json(body)
            .send()
            .await
            .map_err(|e| NotifyError::DeliveryFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::DeliveryFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| NotifyError::DeliveryFailed(e.to_string()))
    }

    async fn send_to_channel(&self, channel_id: &str, content: &str) -> Result<(), NotifyError> {
        let url = format!("{}/channels/{}/messages", self.config.api_base, channel_id);
        let _: MessageResponse = self
            .post_json(&url, &CreateMessage { content })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for RestNotifier {
    async fn notify_user(&self, user_id: &UserId, message: &str) -> Result<(), NotifyError> {
        debug!(user_id = %user_id, "Opening DM channel");
        let url = format!("{}/users/@me/channels", self.config.api_base);
        let dm: DmChannel = self
            .post_json(
                &url,
                &OpenDmRequest {
                    recipient_id: user_id.as_str(),
                },
            )
            .await?;

        self.send_to_channel(&dm.id, message).await
    }

    async fn broadcast(&self, message: &str) -> Result<(), NotifyError> {
        self.send_to_channel(&self.config.broadcast_channel_id, message)
            .await
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire Types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct OpenDmRequest<'a> {
    recipient_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct DmChannel {
    id: String,
}

#[derive(Debug, Serialize)]
struct CreateMessage<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[allow(dead_code)]
    id: String,
}
