//! Membership directory configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Directory configuration (Discord REST API)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryConfig {
    /// REST API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Bot token, used as the `Bot` Authorization credential
    pub bot_token: String,

    /// Guild whose member roles are managed
    pub guild_id: String,

    /// Platform role id backing the Warriors tier
    pub warriors_role_id: String,

    /// Platform role id backing the Fellows tier
    pub fellows_role_id: String,

    /// Channel that receives rollover announcements
    pub broadcast_channel_id: String,
}

impl DirectoryConfig {
    /// Validate directory configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bot_token.is_empty() {
            return Err(ValidationError::MissingRequired("DIRECTORY__BOT_TOKEN"));
        }
        if self.guild_id.is_empty() {
            return Err(ValidationError::MissingRequired("DIRECTORY__GUILD_ID"));
        }
        if self.warriors_role_id.is_empty() {
            return Err(ValidationError::MissingRequired(
                "DIRECTORY__WARRIORS_ROLE_ID",
            ));
        }
        if self.fellows_role_id.is_empty() {
            return Err(ValidationError::MissingRequired(
                "DIRECTORY__FELLOWS_ROLE_ID",
            ));
        }
        if self.broadcast_channel_id.is_empty() {
            return Err(ValidationError::MissingRequired(
                "DIRECTORY__BROADCAST_CHANNEL_ID",
            ));
        }
        Ok(())
    }
}

fn default_api_base() -> String {
    "https://discord.com/api/v10".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> DirectoryConfig {
        DirectoryConfig {
            api_base: default_api_base(),
            bot_token: "token".to_string(),
            guild_id: "1".to_string(),
            warriors_role_id: "2".to_string(),
            fellows_role_id: "3".to_string(),
            broadcast_channel_id: "4".to_string(),
        }
    }

    #[test]
    fn test_validation_requires_every_id() {
        assert!(full().validate().is_ok());
        for strip in 0..5 {
            let mut config = full();
            match strip {
                0 => config.bot_token.clear(),
                1 => config.guild_id.clear(),
                2 => config.warriors_role_id.clear(),
                3 => config.fellows_role_id.clear(),
                _ => config.broadcast_channel_id.clear(),
            }
            assert!(config.validate().is_err());
        }
    }
}
