//! Error types for the snapshot locator.

use thiserror::Error;

/// Errors that can occur while locating or downloading a snapshot.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// The HTTP request could not be completed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The page came back empty; the camera is not publishing.
    #[error("no content at {0}, try again later")]
    Unavailable(String),

    /// An image download returned no bytes.
    #[error("image at {0} is empty")]
    EmptyImage(String),

    /// A configured or constructed URL is invalid.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL text.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// A timeslot label is not in the slot table.
    #[error("unknown timeslot '{0}' (expected 8am..5pm)")]
    UnknownTimeSlot(String),

    /// A day name is neither today nor yesterday.
    #[error("unknown day '{0}' (expected today or yesterday)")]
    UnknownDay(String),
}

impl From<reqwest::Error> for LocatorError {
    fn from(err: reqwest::Error) -> Self {
        LocatorError::Http(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_display() {
        let err = LocatorError::Unavailable("https://example.jp/main.htm".to_string());
        assert!(err.to_string().contains("try again later"));
    }

    #[test]
    fn test_status_display() {
        let err = LocatorError::Status {
            url: "https://example.jp/x.jpg".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "https://example.jp/x.jpg returned HTTP 404");
    }

    #[test]
    fn test_unknown_timeslot_display() {
        let err = LocatorError::UnknownTimeSlot("7am".to_string());
        assert!(err.to_string().contains("7am"));
    }
}
