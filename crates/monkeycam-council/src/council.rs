//! Detection council: three sequential classifier samples, one verdict.
//!
//! The council owns no model. It borrows the process-wide classifier
//! handle, asks it the same question about the same image three times,
//! and hands the trimmed answers to [`aggregate`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::classifier::{ImagePayload, VisionClassifier, MONKEY_INSTRUCTION};
use crate::consensus::{
    aggregate, AggregationResult, ClassifierResponse, ResponseSample, VoteTally, SAMPLE_SIZE,
};
use crate::Result;

/// Everything the council learned about one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouncilOutcome {
    /// Name of the classifier that produced the sample.
    pub classifier: String,
    /// The trimmed responses, in order.
    pub sample: ResponseSample,
    /// Per-token counts.
    pub tally: VoteTally,
    /// The aggregated decision.
    pub result: AggregationResult,
}

/// Runs a classifier [`SAMPLE_SIZE`] times and aggregates the answers.
///
/// # Example
///
/// ```rust,ignore
/// let council = DetectionCouncil::new(&gemini);
/// let outcome = council.evaluate(&image).await?;
///
/// if outcome.result.monkeys_detected {
///     println!("monkeys!");
/// }
/// ```
pub struct DetectionCouncil<'a> {
    classifier: &'a dyn VisionClassifier,
    instruction: &'a str,
}

impl<'a> DetectionCouncil<'a> {
    /// Creates a council using the standard monkey instruction.
    pub fn new(classifier: &'a dyn VisionClassifier) -> Self {
        Self::with_instruction(classifier, MONKEY_INSTRUCTION)
    }

    /// Creates a council with a custom instruction.
    pub fn with_instruction(classifier: &'a dyn VisionClassifier, instruction: &'a str) -> Self {
        Self {
            classifier,
            instruction,
        }
    }

    /// Returns the instruction sent with every sample.
    pub fn instruction(&self) -> &str {
        self.instruction
    }

    /// Collects a sample from the classifier and aggregates it.
    ///
    /// Calls are made one after another, never concurrently. The first
    /// classifier error aborts the evaluation and is returned as is.
    pub async fn evaluate(&self, image: &ImagePayload) -> Result<CouncilOutcome> {
        let sample = self.collect_sample(image).await?;
        let tally = VoteTally::from_sample(&sample);
        let result = aggregate(&sample);

        if !result.well_formed {
            warn!("Malformed classifier sample: {}", tally);
        }
        info!(
            "Council verdict from {}: monkeys_detected={} ({})",
            self.classifier.name(),
            result.monkeys_detected,
            tally
        );

        Ok(CouncilOutcome {
            classifier: self.classifier.name().to_string(),
            sample,
            tally,
            result,
        })
    }

    async fn collect_sample(&self, image: &ImagePayload) -> Result<ResponseSample> {
        let mut responses: [ClassifierResponse; SAMPLE_SIZE] = Default::default();

        for (round, slot) in responses.iter_mut().enumerate() {
            let raw = self.classifier.classify(image, self.instruction).await?;
            debug!("Sample {}/{}: {:?}", round + 1, SAMPLE_SIZE, raw);
            *slot = ClassifierResponse::new(raw.trim());
        }

        Ok(ResponseSample::new(responses))
    }
}
