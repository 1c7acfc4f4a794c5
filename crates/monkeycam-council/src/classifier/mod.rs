//! Vision classifier abstraction.
//!
//! A classifier takes one image plus a fixed instruction and returns
//! free text. It is expected, not guaranteed, to answer `"True"` or
//! `"False"`.

pub mod gemini;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Result;

/// The instruction sent with every image.
pub const MONKEY_INSTRUCTION: &str = "\
Analyze the provided image. The goal is to detect the presence of monkeys.
If there are monkeys in the image, respond True.
Otherwise, respond False.
You should format your response as a binary.

Example 1: True
Example 2: False
";

/// MIME type assumed when the image server does not send one.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Binary image data handed to a classifier.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    /// Raw image bytes.
    pub bytes: Vec<u8>,
    /// MIME type, e.g. `image/jpeg`.
    pub mime_type: String,
}

impl ImagePayload {
    /// Creates a payload with an explicit MIME type.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Creates a JPEG payload.
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self::new(bytes, DEFAULT_IMAGE_MIME)
    }

    /// Size of the image in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if there are no image bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("len", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// A multimodal model that answers an instruction about an image.
///
/// # Implementors
///
/// - [`gemini::GeminiClassifier`]: Google Gemini REST API
#[async_trait]
pub trait VisionClassifier: Send + Sync {
    /// Returns the model name, for display and logs.
    fn name(&self) -> &str;

    /// Runs the model once on `image` with `instruction`.
    ///
    /// Returns the raw response text, untrimmed.
    async fn classify(&self, image: &ImagePayload, instruction: &str) -> Result<String>;
}
