//! Verdict types for detection results.

use serde::{Deserialize, Serialize};
use std::fmt;

use monkeycam_council::AggregationResult;
use monkeycam_locator::TimeSlot;

/// The decision shown to the user after a detection run.
///
/// Derived from an [`AggregationResult`]:
/// - `MonkeysPresent`: the majority saw monkeys
/// - `NoMonkeys`: the majority did not, and every answer was clean
/// - `Inconclusive`: no majority for monkeys and at least one answer was garbage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Monkeys were in the snapshot.
    MonkeysPresent,

    /// No monkeys were in the snapshot.
    NoMonkeys,

    /// The model answered badly; the user should re-run.
    Inconclusive,
}

impl Verdict {
    /// Applies the three-way presentation policy.
    ///
    /// `well_formed` only matters when no monkeys were detected.
    pub fn from_aggregation(result: &AggregationResult) -> Self {
        if result.monkeys_detected {
            Self::MonkeysPresent
        } else if result.well_formed {
            Self::NoMonkeys
        } else {
            Self::Inconclusive
        }
    }

    /// Returns true if monkeys were detected.
    pub fn is_positive(&self) -> bool {
        matches!(self, Self::MonkeysPresent)
    }

    /// Returns true if the user should run the detection again.
    pub fn needs_rerun(&self) -> bool {
        matches!(self, Self::Inconclusive)
    }

    /// Text shown to the user above the snapshot.
    pub fn message(&self) -> &'static str {
        match self {
            Self::MonkeysPresent => "There were monkeys at the selected time!",
            Self::NoMonkeys => {
                "Monkeys were not there at the selected time.\n\
                 Maybe they returned to the mountain?\n\
                 Please double-check with the photo:"
            }
            Self::Inconclusive => {
                "Issue with the model's answer. Please rerun it.\n\
                 Sorry for the inconvenience.\n\
                 Here's the photo for you to check:"
            }
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MonkeysPresent => write!(f, "MONKEYS"),
            Self::NoMonkeys => write!(f, "NO MONKEYS"),
            Self::Inconclusive => write!(f, "INCONCLUSIVE"),
        }
    }
}

/// Non-fatal conditions raised during a detection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Warning {
    /// No slot was chosen; the default was used.
    NoSlotSelected {
        /// The slot used instead.
        used: TimeSlot,
    },

    /// The page carried more than one image.
    MultipleImages {
        /// Number of images on the page.
        count: usize,
        /// The image that was classified.
        chosen: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSlotSelected { used } => {
                write!(f, "No timeslot selected, showing for {}.", used)
            }
            Self::MultipleImages { count, chosen } => {
                write!(
                    f,
                    "Fetched {} images, proceed with caution on the output! Using {}",
                    count, chosen
                )
            }
        }
    }
}
