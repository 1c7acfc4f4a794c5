//! # Detection Council
//!
//! Majority-vote monkey detection over a noisy vision classifier.
//!
//! ## Overview
//!
//! A multimodal model asked "are there monkeys?" is probabilistic and
//! occasionally answers with something other than the requested token.
//! The council asks the same question about the same image three times
//! and reduces the answers to one reproducible decision plus a
//! data-quality flag.
//!
//! ## Voting Rule
//!
//! | `"True"` answers | `monkeys_detected` |
//! |------------------|--------------------|
//! | 0 or 1           | false              |
//! | 2 or 3           | true               |
//!
//! Any answer other than exactly `"True"` or `"False"` clears
//! `well_formed` but is otherwise ignored, so two positives next to one
//! garbage answer still count as a detection.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────┐   3 × classify   ┌──────────────────┐
//!   │ ImagePayload │ ───────────────▶ │ VisionClassifier │
//!   └──────────────┘                  └────────┬─────────┘
//!                                              │ trimmed text
//!                                              ▼
//!                                     ┌──────────────────┐
//!                                     │  ResponseSample  │
//!                                     └────────┬─────────┘
//!                                              ▼
//!                                     ┌──────────────────┐
//!                                     │    aggregate     │
//!                                     └──────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use monkeycam_council::{aggregate, ResponseSample};
//!
//! let sample = ResponseSample::from_texts(["True", "True", "garbage"]);
//! let result = aggregate(&sample);
//!
//! assert!(result.monkeys_detected);
//! assert!(!result.well_formed);
//! ```

pub mod classifier;
pub mod consensus;
pub mod council;
pub mod error;

pub use classifier::gemini::GeminiClassifier;
pub use classifier::{ImagePayload, VisionClassifier, MONKEY_INSTRUCTION};
pub use consensus::{
    aggregate, AggregationResult, ClassifierResponse, ResponseSample, Token, VoteTally,
    SAMPLE_SIZE,
};
pub use council::{CouncilOutcome, DetectionCouncil};
pub use error::CouncilError;

/// Result type for council operations.
pub type Result<T> = std::result::Result<T, CouncilError>;
