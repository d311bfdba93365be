//! Validation and parsing of review API responses
//!
//! The API payload is handled as loosely-typed JSON on purpose:
//! [`check_response`] verifies the shape against the documented schema
//! and fails loudly instead of coercing bad data, and [`parse_status`]
//! turns the first homework record into the notification sentence.

use serde_json::Value;
use thiserror::Error;

use crate::models::HomeworkStatus;

/// Errors raised for payloads that do not match the documented schema
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResponseError {
    /// Top-level payload is not a JSON object
    #[error("response is not a JSON object")]
    NotAnObject,

    /// A required key is absent from the payload
    #[error("response is missing the \"{0}\" key")]
    MissingKey(&'static str),

    /// `homeworks` is present but is not an array
    #[error("\"homeworks\" is not a list")]
    NotAList,

    /// First homework record is not a JSON object
    #[error("homework record is not a JSON object")]
    RecordNotAnObject,

    /// A required field is absent or empty in a homework record
    #[error("homework record is missing the \"{0}\" field")]
    MissingField(&'static str),

    /// Status value outside the known set
    #[error("unexpected homework status \"{0}\"")]
    UnknownStatus(String),
}

/// Check an API response against the documented shape
///
/// Returns the first homework record when there is one, `Ok(None)`
/// when the list is empty (nothing to parse this cycle).
///
/// # Errors
///
/// Fails with a [`ResponseError`] shape error when the payload is not
/// an object, lacks the `homeworks` key, or carries a non-list value
/// under it.
pub fn check_response(response: &Value) -> Result<Option<&Value>, ResponseError> {
    let object = response.as_object().ok_or(ResponseError::NotAnObject)?;

    let homeworks = object
        .get("homeworks")
        .ok_or(ResponseError::MissingKey("homeworks"))?;

    let list = homeworks.as_array().ok_or(ResponseError::NotAList)?;

    let Some(first) = list.first() else {
        tracing::debug!("no new homework statuses in response");
        return Ok(None);
    };

    if !first.is_object() {
        return Err(ResponseError::RecordNotAnObject);
    }

    Ok(Some(first))
}

/// Extract the server timestamp from a response, if present
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}

/// Build the notification sentence for a homework record
///
/// # Errors
///
/// Fails with `ResponseError::MissingField` when `homework_name` or
/// `status` is absent or empty, and `ResponseError::UnknownStatus`
/// when the status has no verdict mapping. Never returns a partially
/// filled sentence.
pub fn parse_status(record: &Value) -> Result<String, ResponseError> {
    let name = record
        .get("homework_name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(ResponseError::MissingField("homework_name"))?;

    let status = record
        .get("status")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(ResponseError::MissingField("status"))?;

    let verdict = HomeworkStatus::from_str(status)
        .ok_or_else(|| ResponseError::UnknownStatus(status.to_string()))?
        .verdict();

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {verdict}"
    ))
}
