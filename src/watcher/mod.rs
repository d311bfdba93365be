//! Poll loop driver
//!
//! Ties the API client, response parser and notifier together: fetch
//! remote state, validate its shape, compare against the previously
//! observed status and emit a message exactly once per change. Runs
//! unattended forever; every remote or data error is converted to a
//! "program failure" notification (deduplicated against the previous
//! cycle) and the loop sleeps and retries.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::api::StatusClient;
use crate::error::Result;
use crate::notifier::TelegramNotifier;
use crate::parser;

/// Loop state held by the driver, reset on process restart
#[derive(Debug, Clone)]
pub struct WatcherState {
    /// Lower bound passed as the `from_date` query parameter
    pub from_date: i64,

    /// Status message produced by the immediately preceding cycle
    pub last_status_text: Option<String>,

    /// Failure message reported by the immediately preceding cycle
    pub last_error_text: Option<String>,
}

impl WatcherState {
    /// Fresh state starting from the given unix timestamp
    pub fn starting_at(from_date: i64) -> Self {
        Self {
            from_date,
            last_status_text: None,
            last_error_text: None,
        }
    }

    /// Record a status message; returns whether it should be notified
    ///
    /// Comparison is against the immediately preceding cycle's message
    /// only, and the stored text is updated unconditionally.
    fn note_status(&mut self, message: &str) -> bool {
        let changed = self.last_status_text.as_deref() != Some(message);
        self.last_status_text = Some(message.to_string());
        changed
    }

    /// Record a failure message; returns whether it should be notified
    fn note_error(&mut self, message: &str) -> bool {
        let changed = self.last_error_text.as_deref() != Some(message);
        self.last_error_text = Some(message.to_string());
        changed
    }
}

/// What one poll cycle did, for logging and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Status changed, notification sent
    Notified(String),
    /// Status parsed but identical to the previous cycle
    Unchanged,
    /// Empty homework list, nothing to do this cycle
    NoNews,
    /// Cycle failed; carries the reported failure text
    Failed(String),
}

/// The polling driver
pub struct Watcher {
    client: StatusClient,
    notifier: TelegramNotifier,
    interval: Duration,
    state: WatcherState,
}

impl Watcher {
    /// Create a watcher polling from the current time
    pub fn new(client: StatusClient, notifier: TelegramNotifier, interval: Duration) -> Self {
        Self::with_state(client, notifier, interval, WatcherState::starting_at(now()))
    }

    /// Create a watcher with explicit initial state
    pub fn with_state(
        client: StatusClient,
        notifier: TelegramNotifier,
        interval: Duration,
        state: WatcherState,
    ) -> Self {
        Self {
            client,
            notifier,
            interval,
            state,
        }
    }

    /// Current loop state
    pub fn state(&self) -> &WatcherState {
        &self.state
    }

    /// Run the poll loop forever
    ///
    /// The only suspension point is the fixed sleep between cycles.
    /// There is no exit path; the process runs until externally
    /// killed.
    pub async fn run(&mut self) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            from_date = self.state.from_date,
            "entering poll loop"
        );

        loop {
            self.run_once().await;
            tokio::time::sleep(self.interval).await;
        }
    }

    /// Run a single cycle: fetch, validate, parse, dedup-notify
    pub async fn run_once(&mut self) -> CycleOutcome {
        match self.poll_cycle().await {
            Ok(Some(message)) => {
                if self.state.note_status(&message) {
                    tracing::info!("status changed: {message}");
                    self.notifier.notify(&message).await;
                    CycleOutcome::Notified(message)
                } else {
                    tracing::debug!("status unchanged, not notifying");
                    CycleOutcome::Unchanged
                }
            }
            Ok(None) => CycleOutcome::NoNews,
            Err(e) => {
                let message = format!("Сбой в работе программы: {e}");
                tracing::warn!(recoverable = e.is_recoverable(), "{message}");
                if self.state.note_error(&message) {
                    self.notifier.notify(&message).await;
                } else {
                    tracing::debug!("failure message unchanged, not notifying");
                }
                CycleOutcome::Failed(message)
            }
        }
    }

    /// Fetch and interpret one API response
    ///
    /// `from_date` advances to the response's `current_date` only when
    /// the whole cycle succeeds, so a record whose parse failed is
    /// re-fetched next cycle.
    async fn poll_cycle(&mut self) -> Result<Option<String>> {
        let response = self.client.get_statuses(self.state.from_date).await?;

        let message = match parser::check_response(&response)? {
            Some(record) => Some(parser::parse_status(record)?),
            None => None,
        };

        if let Some(server_now) = parser::current_date(&response) {
            self.state.from_date = server_now;
        }

        Ok(message)
    }
}

/// Current unix time in seconds
fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
