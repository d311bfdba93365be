//! Telegram notification channel
//!
//! Delivers plain-text messages to one fixed chat via the Bot API's
//! `sendMessage` method. Delivery is best-effort from the loop's point
//! of view: [`TelegramNotifier::notify`] logs a failure and returns
//! normally, so a broken Telegram connection never stops polling.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// Default Bot API host
const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Errors that can occur while delivering a notification
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Bot API rejected the request
    #[error("Telegram API error (status {status}): {description}")]
    Api { status: u16, description: String },

    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Subset of the Bot API response envelope we care about
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram channel bound to one bot token and one chat
pub struct TelegramNotifier {
    client: Client,
    base_url: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Create a notifier for the given bot token and chat
    pub fn new(token: &str, chat_id: &str, timeout: Duration) -> Result<Self, NotifyError> {
        Self::with_base_url(TELEGRAM_API_BASE, token, chat_id, timeout)
    }

    /// Create a notifier against a mock server base URL for testing
    pub fn with_base_url(
        base_url: &str,
        token: &str,
        chat_id: &str,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(NotifyError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            chat_id: chat_id.to_string(),
        })
    }

    /// Send a text message to the fixed chat
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Api` when the Bot API responds with a
    /// non-success status or an `ok: false` envelope, and
    /// `NotifyError::Http` on transport failures.
    pub async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let payload = json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();

        if !status.is_success() {
            let description = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unable to read response body"));
            return Err(NotifyError::Api {
                status: status.as_u16(),
                description,
            });
        }

        // Telegram reports method-level failures inside a 200 envelope
        let envelope: ApiEnvelope = response.json().await?;
        if !envelope.ok {
            return Err(NotifyError::Api {
                status: status.as_u16(),
                description: envelope
                    .description
                    .unwrap_or_else(|| String::from("no description")),
            });
        }

        Ok(())
    }

    /// Best-effort delivery: log the outcome, never propagate failure
    pub async fn notify(&self, text: &str) {
        match self.send(text).await {
            Ok(()) => {
                tracing::debug!("notification delivered to chat {}", self.chat_id);
            }
            Err(e) => {
                tracing::error!("failed to deliver notification: {e}");
            }
        }
    }
}
