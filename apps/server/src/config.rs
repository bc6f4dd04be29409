//! Application configuration from the environment.

use monowatch_alerts::AccessGuard;
use thiserror::Error;

pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const MONOBANK_TOKEN: &str = "MONOBANK_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const MONOBANK_ACCOUNT: &str = "MONOBANK_ACCOUNT";
pub const ALLOWED_USER_IDS: &str = "ALLOWED_USER_IDS";

/// Configuration errors. All of them are fatal at startup.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
    #[error("ALLOWED_USER_IDS must list at least one user id")]
    EmptyAllowList,
}

/// Secrets and identities the daemon needs.
#[derive(Clone)]
pub struct AppConfig {
    pub telegram_token: String,
    pub monobank_token: String,
    /// Destination chat for notifications.
    pub chat_id: i64,
    /// Monobank account identifier to watch.
    pub account: String,
    pub allowed_users: Vec<u64>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("telegram_token", &"<redacted>")
            .field("monobank_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("account", &self.account)
            .field("allowed_users", &self.allowed_users)
            .finish()
    }
}

impl AppConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let chat_id = required(TELEGRAM_CHAT_ID)?;
        let chat_id = chat_id.parse::<i64>().map_err(|e| ConfigError::Invalid {
            var: TELEGRAM_CHAT_ID,
            reason: format!("{:?} is not an integer chat id ({})", chat_id, e),
        })?;

        Ok(Self {
            telegram_token: required(TELEGRAM_BOT_TOKEN)?,
            monobank_token: required(MONOBANK_TOKEN)?,
            chat_id,
            account: required(MONOBANK_ACCOUNT)?,
            allowed_users: parse_user_ids(&required(ALLOWED_USER_IDS)?)?,
        })
    }

    pub fn access_guard(&self) -> AccessGuard {
        AccessGuard::new(self.allowed_users.iter().copied())
    }
}

/// Parse a comma-separated list of Telegram user ids. Blank items are skipped.
fn parse_user_ids(raw: &str) -> Result<Vec<u64>, ConfigError> {
    let ids = raw
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: ALLOWED_USER_IDS,
                reason: format!("{:?} is not a user id ({})", item, e),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if ids.is_empty() {
        return Err(ConfigError::EmptyAllowList);
    }
    Ok(ids)
}
