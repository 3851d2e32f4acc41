//! Discord adapters.
//!
//! Implements the `Directory` port (guild role assignment) and the
//! `Notifier` port (direct messages and channel announcements) against the
//! Discord REST API. Secrets are handled via `secrecy::SecretString`.

mod rest_directory;
mod rest_notifier;

pub use rest_directory::RestDirectory;
pub use rest_notifier::RestNotifier;

use secrecy::SecretString;

use crate::config::DirectoryConfig;

/// Shared Discord REST configuration.
#[derive(Clone)]
pub struct DiscordConfig {
    /// REST API base URL, without a trailing slash.
    pub(crate) api_base: String,

    /// Bot token for the `Authorization: Bot ...` header.
    pub(crate) bot_token: SecretString,

    /// Guild whose member roles are managed.
    pub(crate) guild_id: String,

    /// Platform role id per tier: (warriors, fellows).
    pub(crate) role_ids: (String, String),

    /// Channel that receives announcements.
    pub(crate) broadcast_channel_id: String,
}

impl DiscordConfig {
    /// Create configuration from the directory config section.
    pub fn from_config(config: &DirectoryConfig) -> Self {
        Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_token: SecretString::new(config.bot_token.clone()),
            guild_id: config.guild_id.clone(),
            role_ids: (
                config.warriors_role_id.clone(),
                config.fellows_role_id.clone(),
            ),
            broadcast_channel_id: config.broadcast_channel_id.clone(),
        }
    }
}
