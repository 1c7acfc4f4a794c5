//! Google Gemini client for image classification.
//!
//! Uses the `generativelanguage` REST API. See:
//! <https://ai.google.dev/api/generate-content>

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ImagePayload, VisionClassifier};
use crate::{CouncilError, Result};

/// Default base URL for the Gemini API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model the detector was built against.
pub const DEFAULT_MODEL: &str = "gemini-pro-vision";

/// Upper bound on model-list pages walked while checking availability.
const MAX_MODEL_PAGES: usize = 20;

/// Client for a single Gemini vision model.
///
/// Built once per process by [`GeminiClassifier::connect`] and then
/// shared by reference.
#[derive(Clone)]
pub struct GeminiClassifier {
    api_key: String,
    http: Client,
    base_url: String,
    model: String,
}

impl GeminiClassifier {
    /// Creates a client without checking that the model exists.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key: api_key.into(),
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: bare_model_name(&model.into()).to_string(),
        })
    }

    /// Creates a client and confirms the model is listed by the service.
    ///
    /// # Errors
    ///
    /// Returns [`CouncilError::ModelUnavailable`] if the model is not
    /// offered, or a transport/API error if the listing fails.
    pub async fn connect(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let classifier = Self::with_base_url(api_key, base_url, model, timeout)?;

        if !classifier.model_available().await? {
            return Err(CouncilError::ModelUnavailable(classifier.model.clone()));
        }

        info!("Connected to Gemini model '{}'", classifier.model);
        Ok(classifier)
    }

    /// Returns the model name without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Checks whether the configured model appears in the model listing.
    pub async fn model_available(&self) -> Result<bool> {
        let url = format!("{}/v1beta/models", self.base_url);
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_MODEL_PAGES {
            let mut request = self
                .http
                .get(&url)
                .header("x-goog-api-key", &self.api_key);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = request.send().await?;
            let response = check_status(response).await?;
            let listing: ModelList = response.json().await?;

            if listing
                .models
                .iter()
                .any(|m| bare_model_name(&m.name) == self.model)
            {
                return Ok(true);
            }

            match listing.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => return Ok(false),
            }
        }

        debug!("Model listing exceeded {} pages", MAX_MODEL_PAGES);
        Ok(false)
    }
}

#[async_trait]
impl VisionClassifier for GeminiClassifier {
    fn name(&self) -> &str {
        &self.model
    }

    async fn classify(&self, image: &ImagePayload, instruction: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: instruction.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type.clone(),
                            data: STANDARD.encode(&image.bytes),
                        },
                    },
                ],
            }],
        };

        debug!("Classifying {} byte image with {}", image.len(), self.model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;
        let generated: GenerateResponse = response.json().await?;

        let text: String = generated
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .ok_or(CouncilError::EmptyResponse)?;

        debug!("Model answered {:?}", text);
        Ok(text)
    }
}

/// Strips the `models/` prefix the listing endpoint uses.
fn bare_model_name(name: &str) -> &str {
    name.strip_prefix("models/").unwrap_or(name)
}

/// Maps a non-success status to a [`CouncilError`].
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status.as_u16() {
        401 | 403 => Err(CouncilError::AuthenticationFailed),
        code => {
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .map(|e| e.error.message)
                .unwrap_or_else(|_| status.to_string());
            Err(CouncilError::Api {
                status: code,
                message,
            })
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelEntry>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct ModelEntry {
    name: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}
