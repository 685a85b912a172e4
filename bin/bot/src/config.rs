//! Centralized bot configuration.
//!
//! Strongly-typed configuration loaded via the `config` crate from
//! environment variables, with `__` separating nested sections. The
//! variables the bot reads:
//!
//! - `DATABASE_URL`
//! - `TELEGRAM__BOT_TOKEN`
//! - `TELEGRAM__SUPER_ADMINS` (comma separated user ids)
//! - `TELEGRAM__AUDIT_CHAT_ID` (optional)
//! - `TELEGRAM__POLL_TIMEOUT_SECONDS` (optional)
//! - `SESSION__IDLE_TIMEOUT_SECONDS`, `SESSION__SWEEP_INTERVAL_SECONDS`,
//!   `SESSION__MAX_SESSIONS` (all optional)

use serde::Deserialize;
use station_roster_core::{ChatUserId, ParseIdError};

/// Bot configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct BotConfig {
    /// PostgreSQL database connection URL.
    pub database_url: String,

    /// Telegram connectivity and access control.
    pub telegram: TelegramConfig,

    /// Dialogue session limits.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Telegram-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token from BotFather.
    pub bot_token: String,

    /// Comma separated Telegram user ids with super admin rights.
    pub super_admins: String,

    /// Chat id of the audit channel. When unset, audit notices go straight
    /// to the super admins.
    #[serde(default)]
    pub audit_chat_id: Option<i64>,

    /// Long poll timeout passed to getUpdates, in seconds.
    #[serde(default = "default_poll_timeout_seconds")]
    pub poll_timeout_seconds: u64,
}

impl TelegramConfig {
    /// Parses the super admin list.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry is not a valid user id.
    pub fn super_admin_ids(&self) -> Result<Vec<ChatUserId>, ParseIdError> {
        self.super_admins
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::parse)
            .collect()
    }
}

/// Session-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// How long a dialogue may sit idle before it is evicted, in seconds.
    #[serde(default = "default_idle_timeout_seconds")]
    pub idle_timeout_seconds: i64,

    /// Interval between idle sweeps, in seconds.
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,

    /// Upper bound on concurrently active dialogues.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_poll_timeout_seconds() -> u64 {
    30
}

fn default_idle_timeout_seconds() -> i64 {
    900
}

fn default_sweep_interval_seconds() -> u64 {
    60
}

fn default_max_sessions() -> usize {
    10_000
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_seconds: default_idle_timeout_seconds(),
            sweep_interval_seconds: default_sweep_interval_seconds(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl BotConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
