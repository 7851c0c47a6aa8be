// Error type for the API client. Every remote call returns
// `Result<T, ApiError>`; the controller turns these into log lines.

use reqwest::StatusCode;
use thiserror::Error;

/// Why a single HTTP call against the relief API did not succeed.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS, timeout or body decoding problem.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid url: {0}")]
    Url(String),
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::Url(err.to_string())
    }
}
