//! Unified error handling for the statuswatch crate
//!
//! Domain-specific errors stay in their modules (`api::ApiError`,
//! `parser::ResponseError`, `notifier::NotifyError`); this module
//! wraps them into a single [`Error`] enum so the poll loop can match
//! on one type when deciding how a cycle failed.

use thiserror::Error;

pub use crate::api::ApiError;
pub use crate::notifier::NotifyError;
pub use crate::parser::ResponseError;

/// Unified error type for the statuswatch crate
#[derive(Error, Debug)]
pub enum Error {
    /// Review API errors (non-200 status, transport, bad JSON)
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Payload shape or missing-value errors
    #[error("{0}")]
    Response(#[from] ResponseError),

    /// Notification delivery errors
    ///
    /// Delivery is best-effort and normally swallowed inside the
    /// notifier; the variant exists for callers that use
    /// `TelegramNotifier::send` directly.
    #[error("{0}")]
    Notify(#[from] NotifyError),
}

impl Error {
    /// Check if the poll loop should keep running after this error
    ///
    /// Everything except a fatal startup-config failure is recoverable
    /// for the loop, and config failures never reach this type, so
    /// this currently always holds. Kept as an explicit classification
    /// point so the loop's policy stays type-checked.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Api(_) | Self::Response(_) | Self::Notify(_) => true,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
