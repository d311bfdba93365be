//! Configuration management for statuswatch
//!
//! This module handles loading and validating configuration from
//! environment variables. The three secrets are required; everything
//! else has a default.

use anyhow::{bail, Result};
use std::time::Duration;

/// Default review API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default pause between poll cycles, in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

/// Default HTTP request timeout, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth token for the homework review API
    pub practicum_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Fixed destination chat for notifications
    pub telegram_chat_id: String,

    /// Review API endpoint URL
    pub endpoint: String,

    /// Pause between poll cycles in seconds
    pub poll_interval_secs: u64,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Fails with a message naming the variable when any of the three
    /// required secrets is missing or empty. The process must not
    /// enter the poll loop in that case.
    pub fn from_env() -> Result<Self> {
        let practicum_token = require_env("PRACTICUM_TOKEN")?;
        let telegram_token = require_env("TELEGRAM_TOKEN")?;
        let telegram_chat_id = require_env("TELEGRAM_CHAT_ID")?;

        let endpoint = std::env::var("STATUSWATCH_ENDPOINT")
            .unwrap_or_else(|_| String::from(DEFAULT_ENDPOINT));

        let poll_interval_secs = std::env::var("POLL_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

        let request_timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let config = Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            poll_interval_secs,
            request_timeout_secs,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_secs == 0 {
            bail!("poll_interval_secs must be greater than 0");
        }

        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than 0");
        }

        if self.endpoint.is_empty() {
            bail!("endpoint must not be empty");
        }

        Ok(())
    }

    /// Get poll interval as Duration
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Read a required environment variable, rejecting empty values
fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => bail!(
            "Отсутствует обязательная переменная окружения: \"{name}\". \
             Программа принудительно остановлена."
        ),
    }
}
