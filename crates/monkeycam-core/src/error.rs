//! Error types for monkeycam core.

use thiserror::Error;

/// Core error type for detection operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Locator error passthrough.
    #[error("Locator error: {0}")]
    Locator(#[from] monkeycam_locator::LocatorError),

    /// Council error passthrough.
    #[error("Classifier error: {0}")]
    Council(#[from] monkeycam_council::CouncilError),
}
