//! statuswatch - Homework review status watcher
//!
//! A Telegram bot that polls the Yandex Practicum homework-review API
//! on a fixed interval and relays status-change notifications to one
//! fixed chat.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration from environment variables
//! - [`api`] - HTTP client for the review API
//! - [`parser`] - Response shape validation and status parsing
//! - [`models`] - Review status domain type and verdict texts
//! - [`notifier`] - Telegram delivery channel
//! - [`watcher`] - The poll loop driver and its state
//! - [`error`] - Unified error type
//!
//! # Example
//!
//! ```no_run
//! use statuswatch::api::StatusClient;
//! use statuswatch::config::Config;
//! use statuswatch::notifier::TelegramNotifier;
//! use statuswatch::watcher::Watcher;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = StatusClient::new(
//!         &config.endpoint,
//!         &config.practicum_token,
//!         config.request_timeout(),
//!     )?;
//!     let notifier = TelegramNotifier::new(
//!         &config.telegram_token,
//!         &config.telegram_chat_id,
//!         config.request_timeout(),
//!     )?;
//!     let mut watcher = Watcher::new(client, notifier, config.poll_interval());
//!     watcher.run().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod notifier;
pub mod parser;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::{ApiError, StatusClient};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::models::HomeworkStatus;
    pub use crate::notifier::{NotifyError, TelegramNotifier};
    pub use crate::parser::ResponseError;
    pub use crate::watcher::{CycleOutcome, Watcher, WatcherState};
}

// Direct re-exports for convenience
pub use models::HomeworkStatus;
