//! The detection pipeline facade.
//!
//! [`Detector`] ties the locator and the council together: it reads the
//! snapshot page, downloads one image, runs the three-sample vote and
//! maps the aggregation to a [`Verdict`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use monkeycam_council::{
    CouncilOutcome, DetectionCouncil, GeminiClassifier, ImagePayload,
    VisionClassifier,
};
use monkeycam_locator::{
    CameraFeed, DaySelector, DownloadedImage, ImageLocator, LocatorError, TimeSlot,
};

use crate::{
    config::{ClassifierConfig, MonkeycamConfig, SiteConfig},
    verdict::{Verdict, Warning},
    Result,
};

/// Everything produced by one successful detection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Archive day that was read.
    pub day: DaySelector,
    /// Slot that was read (after applying the default).
    pub slot: TimeSlot,
    /// Snapshot page URL.
    pub page_url: String,
    /// URL of the image that was classified.
    pub image_url: String,
    /// Number of images found on the page.
    pub image_count: usize,
    /// Non-fatal conditions raised on the way.
    pub warnings: Vec<Warning>,
    /// Classifier sample and aggregation.
    pub council: CouncilOutcome,
    /// Decision shown to the user.
    pub verdict: Verdict,
}

/// Result of a detection request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionOutcome {
    /// The site returned nothing for this slot.
    TryLater {
        /// Slot that was requested.
        slot: TimeSlot,
        /// Warnings raised before giving up.
        warnings: Vec<Warning>,
    },

    /// A page exists but holds no live snapshot. Classification was skipped.
    NoPhotoYet {
        /// Slot that was requested.
        slot: TimeSlot,
        /// Page that was read.
        page_url: String,
        /// Warnings raised before giving up.
        warnings: Vec<Warning>,
    },

    /// The snapshot was classified.
    Detected(Box<DetectionReport>),
}

impl DetectionOutcome {
    /// Returns the report if classification ran.
    pub fn report(&self) -> Option<&DetectionReport> {
        match self {
            Self::Detected(report) => Some(report),
            _ => None,
        }
    }

    /// Warnings raised during the run.
    pub fn warnings(&self) -> &[Warning] {
        match self {
            Self::TryLater { warnings, .. } | Self::NoPhotoYet { warnings, .. } => warnings,
            Self::Detected(report) => &report.warnings,
        }
    }
}

/// Availability of the external services, checked once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// Camera feed that is publishing, if any.
    pub camera: Option<CameraFeed>,
    /// Configured model name.
    pub model: String,
    /// Whether the model connected.
    pub model_ready: bool,
    /// Why the model did not connect.
    pub model_error: Option<String>,
}

impl ServiceStatus {
    /// Returns true if detection can run.
    pub fn detection_enabled(&self) -> bool {
        self.model_ready
            && self
                .camera
                .map(|feed| feed.supports_detection())
                .unwrap_or(false)
    }
}

/// Connects the Gemini classifier described by `config`.
///
/// This is the process-scoped model handle: call it once at startup and
/// pass the result by reference to every [`Detector`].
pub async fn connect_classifier(config: &ClassifierConfig) -> Result<GeminiClassifier> {
    let api_key = config.api_key()?;
    let classifier = GeminiClassifier::connect(
        api_key,
        config.base_url.as_str(),
        config.model.as_str(),
        config.timeout(),
    )
    .await?;
    Ok(classifier)
}

/// Checks the camera feeds and connects the classifier.
///
/// A missing API key or unavailable model is reported in the status
/// rather than returned as an error, so the front end can still start.
/// Camera probe transport failures propagate.
pub async fn probe_services(
    config: &MonkeycamConfig,
) -> Result<(ServiceStatus, Option<GeminiClassifier>)> {
    let locator = build_locator(&config.site)?;
    let camera = locator.which_camera_up().await?;

    let (classifier, model_error) = match connect_classifier(&config.classifier).await {
        Ok(classifier) => (Some(classifier), None),
        Err(e) => {
            warn!("Classifier unavailable: {}", e);
            (None, Some(e.to_string()))
        }
    };

    let status = ServiceStatus {
        camera,
        model: config.classifier.model.clone(),
        model_ready: classifier.is_some(),
        model_error,
    };
    Ok((status, classifier))
}

/// The snapshot detection pipeline.
///
/// # Example
///
/// ```rust,ignore
/// let gemini = connect_classifier(&config.classifier).await?;
/// let detector = Detector::new(config, &gemini)?;
///
/// match detector.detect(DaySelector::Today, Some(TimeSlot::Am10)).await? {
///     DetectionOutcome::Detected(report) => println!("{}", report.verdict.message()),
///     DetectionOutcome::NoPhotoYet { .. } => println!("no photo yet"),
///     DetectionOutcome::TryLater { .. } => println!("try again later"),
/// }
/// ```
pub struct Detector<'a> {
    /// Configuration.
    config: MonkeycamConfig,

    /// Snapshot page reader.
    locator: ImageLocator,

    /// Process-scoped vision model.
    classifier: &'a dyn VisionClassifier,
}

impl<'a> Detector<'a> {
    /// Creates a detector with the given configuration and classifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: MonkeycamConfig, classifier: &'a dyn VisionClassifier) -> Result<Self> {
        config.validate()?;

        let locator = build_locator(&config.site)?;

        info!(
            "Detector initialized for {} with model {}",
            config.site.base_url,
            classifier.name()
        );

        Ok(Self {
            config,
            locator,
            classifier,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &MonkeycamConfig {
        &self.config
    }

    /// Returns the snapshot locator.
    pub fn locator(&self) -> &ImageLocator {
        &self.locator
    }

    /// Runs the full pipeline for a day and an optional slot.
    ///
    /// 1. Apply the default slot if none was chosen (warning)
    /// 2. Read the snapshot page
    /// 3. Skip classification if the page holds no live snapshot
    /// 4. Pick one image (warning if there were several)
    /// 5. Download it once and run the three-sample council
    ///
    /// Transport and model errors propagate unchanged.
    pub async fn detect(
        &self,
        day: DaySelector,
        slot: Option<TimeSlot>,
    ) -> Result<DetectionOutcome> {
        let mut warnings = Vec::new();

        let slot = match slot {
            Some(slot) => slot,
            None => {
                let used = self.config.site.default_slot;
                warn!("No timeslot selected, using {}", used);
                warnings.push(Warning::NoSlotSelected { used });
                used
            }
        };

        debug!("Detecting monkeys for {} at {}", day, slot);

        let snapshot = match self.locator.locate(day, slot).await {
            Ok(snapshot) => snapshot,
            Err(LocatorError::Unavailable(url)) => {
                info!("Snapshot page {} unavailable", url);
                return Ok(DetectionOutcome::TryLater { slot, warnings });
            }
            Err(e) => return Err(e.into()),
        };

        if !snapshot.page_valid {
            return Ok(DetectionOutcome::NoPhotoYet {
                slot,
                page_url: snapshot.page_url.to_string(),
                warnings,
            });
        }

        let image_url = match self.config.site.image_choice.pick(&snapshot.image_urls) {
            Some(url) => url.clone(),
            None => {
                warn!("Snapshot page {} has no images", snapshot.page_url);
                return Ok(DetectionOutcome::NoPhotoYet {
                    slot,
                    page_url: snapshot.page_url.to_string(),
                    warnings,
                });
            }
        };

        if snapshot.image_count > 1 {
            warn!(
                "Page carries {} images, classifying {}",
                snapshot.image_count, image_url
            );
            warnings.push(Warning::MultipleImages {
                count: snapshot.image_count,
                chosen: image_url.to_string(),
            });
        }

        let image = self.locator.fetch_image(&image_url).await?;
        let payload = to_payload(image)?;

        let council = DetectionCouncil::new(self.classifier).evaluate(&payload).await?;
        let verdict = Verdict::from_aggregation(&council.result);

        info!("Verdict for {} at {}: {}", day, slot, verdict);

        Ok(DetectionOutcome::Detected(Box::new(DetectionReport {
            day,
            slot,
            page_url: snapshot.page_url.to_string(),
            image_url: image_url.to_string(),
            image_count: snapshot.image_count,
            warnings,
            council,
            verdict,
        })))
    }
}

/// Builds the locator described by the site configuration.
fn build_locator(site: &SiteConfig) -> Result<ImageLocator> {
    Ok(ImageLocator::new(&site.base_url, site.timeout())?
        .with_live_title(site.live_title.as_str())
        .with_path_mode(site.path_mode))
}

/// Wraps downloaded bytes for the classifier.
fn to_payload(image: DownloadedImage) -> Result<ImagePayload> {
    if image.bytes.is_empty() {
        return Err(LocatorError::EmptyImage(image.url.to_string()).into());
    }

    Ok(match image.content_type {
        Some(mime) if mime.starts_with("image/") => ImagePayload::new(image.bytes, mime),
        _ => ImagePayload::jpeg(image.bytes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use monkeycam_locator::Url;

    fn downloaded(bytes: Vec<u8>, content_type: Option<&str>) -> DownloadedImage {
        DownloadedImage {
            url: Url::parse("https://example.jp/a.jpg").unwrap(),
            bytes,
            content_type: content_type.map(str::to_string),
        }
    }

    #[test]
    fn test_payload_keeps_image_mime() {
        let payload = to_payload(downloaded(vec![1, 2], Some("image/png"))).unwrap();
        assert_eq!(payload.mime_type, "image/png");
    }

    #[test]
    fn test_payload_defaults_to_jpeg() {
        let payload = to_payload(downloaded(vec![1, 2], Some("text/html"))).unwrap();
        assert_eq!(payload.mime_type, "image/jpeg");

        let payload = to_payload(downloaded(vec![1, 2], None)).unwrap();
        assert_eq!(payload.mime_type, "image/jpeg");
    }

    #[test]
    fn test_empty_image_rejected() {
        assert!(to_payload(downloaded(Vec::new(), Some("image/jpeg"))).is_err());
    }

    #[test]
    fn test_detection_needs_primary_camera_and_model() {
        let mut status = ServiceStatus {
            camera: Some(CameraFeed::Primary),
            model: "gemini-pro-vision".to_string(),
            model_ready: true,
            model_error: None,
        };
        assert!(status.detection_enabled());

        status.camera = Some(CameraFeed::Secondary);
        assert!(!status.detection_enabled());

        status.camera = Some(CameraFeed::Primary);
        status.model_ready = false;
        assert!(!status.detection_enabled());

        status.model_ready = true;
        status.camera = None;
        assert!(!status.detection_enabled());
    }
}
