//! Error types for the detection council.
//!
//! Malformed classifier answers are not errors; they are folded into
//! the aggregation result. Only transport and API failures surface here.

use thiserror::Error;

/// Errors that can occur while obtaining classifier responses.
#[derive(Debug, Error)]
pub enum CouncilError {
    /// The HTTP request could not be completed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The model service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the service, if any.
        message: String,
    },

    /// The API key was rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The configured model is not offered by the service.
    #[error("model '{0}' is unavailable")]
    ModelUnavailable(String),

    /// The service returned no candidate text.
    #[error("empty response from model")]
    EmptyResponse,

    /// The API key environment variable is not set.
    #[error("missing API key: set {0}")]
    MissingApiKey(String),
}

impl From<reqwest::Error> for CouncilError {
    fn from(err: reqwest::Error) -> Self {
        CouncilError::Http(err.to_string())
    }
}
