use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the API layer.
///
/// The monitor catches all of these at the cycle boundary; only `Auth` during
/// the initial token acquisition is fatal to the process.
#[derive(Debug, Error)]
pub enum ApiError {
    /// OAuth token missing/empty, or the token-issuance endpoint rejected it
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Transport-level failure (timeout, connection refused/reset)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success, non-401 status
    #[error("API returned HTTP {status}")]
    Api { status: StatusCode },

    /// The response body did not have the expected shape
    #[error("unexpected response payload: {0}")]
    Payload(String),
}
