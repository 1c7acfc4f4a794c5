//! Majority-vote aggregation over classifier responses.
//!
//! Three responses from the same image are reduced to a single
//! verdict plus a data-quality flag. Malformed responses are
//! reported, never raised.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal token a classifier returns when it sees monkeys.
pub const TRUE_TOKEN: &str = "True";

/// Literal token a classifier returns when it sees none.
pub const FALSE_TOKEN: &str = "False";

/// Number of classifier responses in one sample.
pub const SAMPLE_SIZE: usize = 3;

/// A recognized classifier answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// The classifier answered `"True"`.
    True,
    /// The classifier answered `"False"`.
    False,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::True => f.write_str(TRUE_TOKEN),
            Token::False => f.write_str(FALSE_TOKEN),
        }
    }
}

/// One free-text answer from the vision classifier.
///
/// The text is kept verbatim. Trimming happens before construction,
/// so `" True"` is malformed here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassifierResponse(String);

impl ClassifierResponse {
    /// Wraps raw classifier text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the text as received.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the recognized token, or `None` for anything else.
    pub fn token(&self) -> Option<Token> {
        match self.0.as_str() {
            TRUE_TOKEN => Some(Token::True),
            FALSE_TOKEN => Some(Token::False),
            _ => None,
        }
    }

    /// Returns true if the text is exactly one of the two tokens.
    pub fn is_well_formed(&self) -> bool {
        self.token().is_some()
    }
}

impl From<&str> for ClassifierResponse {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for ClassifierResponse {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for ClassifierResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Exactly three responses produced from the same image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSample([ClassifierResponse; SAMPLE_SIZE]);

impl ResponseSample {
    /// Creates a sample from three responses.
    pub fn new(responses: [ClassifierResponse; SAMPLE_SIZE]) -> Self {
        Self(responses)
    }

    /// Creates a sample from three text values.
    pub fn from_texts<S: Into<String>>(texts: [S; SAMPLE_SIZE]) -> Self {
        Self(texts.map(ClassifierResponse::new))
    }

    /// Returns the responses in the order they were produced.
    pub fn responses(&self) -> &[ClassifierResponse] {
        &self.0
    }
}

/// Count of each answer kind within a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteTally {
    /// Responses that were exactly `"True"`.
    pub trues: usize,
    /// Responses that were exactly `"False"`.
    pub falses: usize,
    /// Responses that were neither.
    pub malformed: usize,
}

impl VoteTally {
    /// Counts the responses in a sample.
    pub fn from_sample(sample: &ResponseSample) -> Self {
        let mut tally = Self::default();

        for response in sample.responses() {
            match response.token() {
                Some(Token::True) => tally.trues += 1,
                Some(Token::False) => tally.falses += 1,
                None => tally.malformed += 1,
            }
        }

        tally
    }

    /// Total number of responses counted.
    pub fn total(&self) -> usize {
        self.trues + self.falses + self.malformed
    }
}

impl fmt::Display for VoteTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} True, {} False, {} malformed",
            self.trues,
            self.total(),
            self.falses,
            self.malformed
        )
    }
}

/// Outcome of aggregating one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Every response was a recognized token.
    pub well_formed: bool,
    /// At least two of three responses were `"True"`.
    pub monkeys_detected: bool,
}

/// Reduces a sample to a majority-vote verdict.
///
/// `monkeys_detected` is computed from the raw `"True"` count even when
/// the sample is malformed, so one garbage answer next to two positives
/// is still a positive (flagged by `well_formed == false`).
pub fn aggregate(sample: &ResponseSample) -> AggregationResult {
    let tally = VoteTally::from_sample(sample);

    AggregationResult {
        well_formed: tally.trues + tally.falses == SAMPLE_SIZE,
        monkeys_detected: tally.trues > 1,
    }
}
