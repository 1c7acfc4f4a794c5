//! # Monkeycam Core
//!
//! Detection facade for the Jigokudani snow monkey livecam.
//! Ties the snapshot locator and the classifier council together.
//!
//! ## Pipeline
//!
//! | Step | Component | Outcome on failure |
//! |------|-----------|--------------------|
//! | Slot | [`Detector`] | Default slot, `NoSlotSelected` warning |
//! | Page | Image Locator | `TryLater` or `NoPhotoYet` |
//! | Image | Image Locator | Error propagates |
//! | Vote | Detection Council | Error propagates |
//! | Verdict | [`Verdict`] | `Inconclusive` on malformed answers |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       MONKEYCAM CORE                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │                    ┌─────────────────┐                          │
//! │                    │    Detector     │  ← Facade                │
//! │                    └────────┬────────┘                          │
//! │                             │                                   │
//! │              ┌──────────────┴──────────────┐                    │
//! │              ▼                             ▼                    │
//! │       ┌─────────────┐               ┌─────────────┐             │
//! │       │    Image    │               │  Detection  │             │
//! │       │   Locator   │               │   Council   │             │
//! │       └─────────────┘               └─────────────┘             │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use monkeycam_core::{connect_classifier, Detector, DetectionOutcome, MonkeycamConfig};
//!
//! let config = MonkeycamConfig::resolve(None)?;
//! let gemini = connect_classifier(&config.classifier).await?;
//! let detector = Detector::new(config, &gemini)?;
//!
//! if let DetectionOutcome::Detected(report) = detector.detect(DaySelector::Today, None).await? {
//!     println!("{}", report.verdict.message());
//! }
//! ```
//!
//! ## Notes
//!
//! - The classifier is connected once and borrowed by every detector
//! - The snapshot image is downloaded once per run and reused for all three calls
//! - Detection never retries; an inconclusive verdict asks the user to rerun

mod config;
mod detector;
mod error;
mod state;
mod verdict;

pub use config::{
    ClassifierConfig, ImageChoice, MonkeycamConfig, SiteConfig, DEFAULT_CONFIG_FILE,
};
pub use detector::{
    connect_classifier, probe_services, DetectionOutcome, DetectionReport, Detector,
    ServiceStatus,
};
pub use error::CoreError;
pub use state::{AppState, View};
pub use verdict::{Verdict, Warning};

// Re-export component types for convenience
pub use monkeycam_council::{
    aggregate, AggregationResult, CouncilOutcome, GeminiClassifier, ImagePayload,
    ResponseSample, VisionClassifier, VoteTally,
};
pub use monkeycam_locator::{CameraFeed, DaySelector, PathMode, Season, TimeSlot};

/// Core result type for detection operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests;
