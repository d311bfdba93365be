//! HTTP client for the homework review API
//!
//! One authenticated GET per poll cycle against the fixed statuses
//! endpoint. The adapter performs no retries of its own; the outer
//! loop's fixed-interval re-invocation is the only retry policy.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while querying the review API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (DNS, timeout, connection reset)
    #[error("connection error: {0}")]
    Connection(#[source] reqwest::Error),

    /// Non-200 response from the endpoint
    #[error("unexpected status {status} from {url}")]
    Status { status: StatusCode, url: String },

    /// Response body was not valid JSON
    #[error("invalid JSON in response body: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Authorization header could not be built from the token
    #[error("API token contains characters not allowed in a header")]
    InvalidToken,
}

/// Client for the homework statuses endpoint
pub struct StatusClient {
    client: Client,
    endpoint: String,
    auth_header: HeaderValue,
}

impl StatusClient {
    /// Create a new client for the given endpoint
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` if the HTTP client cannot be created
    /// and `ApiError::InvalidToken` if the token is not a valid header
    /// value.
    pub fn new(endpoint: &str, token: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(ApiError::Client)?;

        let mut auth_header = HeaderValue::from_str(&format!("OAuth {token}"))
            .map_err(|_| ApiError::InvalidToken)?;
        auth_header.set_sensitive(true);

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            auth_header,
        })
    }

    /// Create a client against a mock server base URL for testing
    pub fn with_base_url(base_url: &str, token: &str) -> Result<Self, ApiError> {
        Self::new(
            &format!("{base_url}/api/user_api/homework_statuses/"),
            token,
            Duration::from_secs(5),
        )
    }

    /// The endpoint this client queries
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch homework statuses changed since `from_date`
    ///
    /// Returns the parsed JSON body on HTTP 200. The shape of the body
    /// is not checked here; that is the validator's job.
    ///
    /// # Errors
    ///
    /// - `ApiError::Status` for any non-200 response, carrying the
    ///   status code and request URL
    /// - `ApiError::Connection` for transport failures
    /// - `ApiError::Json` when the body cannot be parsed
    pub async fn get_statuses(&self, from_date: i64) -> Result<Value, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.auth_header.clone());

        let response = self
            .client
            .get(&self.endpoint)
            .headers(headers)
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(ApiError::Connection)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::Status {
                status,
                url: response.url().to_string(),
            });
        }

        let body = response.text().await.map_err(ApiError::Connection)?;
        let json = serde_json::from_str(&body)?;
        Ok(json)
    }
}
