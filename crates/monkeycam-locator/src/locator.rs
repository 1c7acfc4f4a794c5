//! HTTP access to the camera site.
//!
//! The [`ImageLocator`] builds snapshot page URLs, fetches and parses
//! them, downloads images, and probes which camera feed is publishing.

use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::page::{SnapshotPage, LIVE_TITLE};
use crate::schedule::{DaySelector, TimeSlot};
use crate::{LocatorError, Result};

/// Public site of the Jigokudani Yaen-Koen monkey park.
pub const DEFAULT_BASE_URL: &str = "https://jigokudani-yaenkoen.co.jp";

const PRIMARY_LIVE_PATH: &str = "livecam/monkey/main.htm";
const SECONDARY_LIVE_PATH: &str = "livecam2/video.php";

/// How snapshot page URLs are formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMode {
    /// `/livecam/monkey/{day}/{hour}/main.htm`, one page per slot.
    #[default]
    Dated,
    /// `/livecam/monkey/main.htm`, the latest snapshot regardless of slot.
    Live,
}

/// A camera feed that is currently publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraFeed {
    /// The still-image live camera. Detection runs against this one.
    Primary,
    /// The video camera. Reported only.
    Secondary,
}

impl CameraFeed {
    /// Returns true if snapshots from this feed can be classified.
    pub fn supports_detection(&self) -> bool {
        matches!(self, CameraFeed::Primary)
    }
}

/// Result of reading one snapshot page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedSnapshot {
    /// The page that was read.
    pub page_url: Url,
    /// Absolute URLs of every image on the page.
    pub image_urls: Vec<Url>,
    /// Number of images found. One is expected.
    pub image_count: usize,
    /// The page title matched the live snapshot marker.
    pub page_valid: bool,
}

/// A downloaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedImage {
    /// Where the image came from.
    pub url: Url,
    /// Raw bytes.
    pub bytes: Vec<u8>,
    /// `Content-Type` header, if sent.
    pub content_type: Option<String>,
}

/// Reads snapshot pages and images from the camera site.
#[derive(Debug, Clone)]
pub struct ImageLocator {
    http: Client,
    base_url: Url,
    live_title: String,
    path_mode: PathMode,
}

impl ImageLocator {
    /// Creates a locator for the site at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::InvalidUrl`] if `base_url` is not an
    /// absolute URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }

        let base_url = Url::parse(&normalized).map_err(|e| LocatorError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            live_title: LIVE_TITLE.to_string(),
            path_mode: PathMode::default(),
        })
    }

    /// Sets the title that marks a valid snapshot page.
    pub fn with_live_title(mut self, title: impl Into<String>) -> Self {
        self.live_title = title.into();
        self
    }

    /// Sets how page URLs are formed.
    pub fn with_path_mode(mut self, mode: PathMode) -> Self {
        self.path_mode = mode;
        self
    }

    /// Returns the path mode in use.
    pub fn path_mode(&self) -> PathMode {
        self.path_mode
    }

    /// Directory that holds the page and its images.
    fn snapshot_dir(&self, day: DaySelector, slot: TimeSlot) -> Result<Url> {
        let relative = match self.path_mode {
            PathMode::Dated => format!("livecam/monkey/{}/{}/", day.path_segment(), slot.hour()),
            PathMode::Live => "livecam/monkey/".to_string(),
        };
        self.join(&relative)
    }

    /// URL of the snapshot page for a day and slot.
    pub fn page_url(&self, day: DaySelector, slot: TimeSlot) -> Result<Url> {
        let dir = self.snapshot_dir(day, slot)?;
        dir.join("main.htm").map_err(|e| LocatorError::InvalidUrl {
            url: dir.to_string(),
            reason: e.to_string(),
        })
    }

    fn join(&self, relative: &str) -> Result<Url> {
        self.base_url
            .join(relative)
            .map_err(|e| LocatorError::InvalidUrl {
                url: relative.to_string(),
                reason: e.to_string(),
            })
    }

    /// Fetches the snapshot page for a day and slot and extracts its images.
    ///
    /// # Errors
    ///
    /// - [`LocatorError::Unavailable`] if the page is missing or empty
    /// - [`LocatorError::Http`] if the request itself fails
    pub async fn locate(&self, day: DaySelector, slot: TimeSlot) -> Result<LocatedSnapshot> {
        let page_url = self.page_url(day, slot)?;
        debug!("Fetching snapshot page {}", page_url);

        let html = match self.fetch_text(&page_url).await? {
            Some(html) => html,
            None => return Err(LocatorError::Unavailable(page_url.to_string())),
        };

        let page = SnapshotPage::parse(&html);
        let page_valid = page.has_title(&self.live_title);
        let image_urls = page.image_urls(&self.snapshot_dir(day, slot)?);
        let image_count = image_urls.len();

        if !page_valid {
            warn!(
                "Page {} has title {:?}, expected {:?}",
                page_url, page.title, self.live_title
            );
        }
        info!(
            "Located {} image(s) for {} {} (valid: {})",
            image_count, day, slot, page_valid
        );

        Ok(LocatedSnapshot {
            page_url,
            image_urls,
            image_count,
            page_valid,
        })
    }

    /// Downloads an image.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::Status`] for a non-success response.
    pub async fn fetch_image(&self, url: &Url) -> Result<DownloadedImage> {
        debug!("Downloading image {}", url);

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LocatorError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .filter(|v| !v.is_empty());
        let bytes = response.bytes().await?.to_vec();

        Ok(DownloadedImage {
            url: url.clone(),
            bytes,
            content_type,
        })
    }

    /// Reports which camera feed is publishing, preferring the primary.
    ///
    /// A feed counts as up when its live page returns a non-empty body.
    pub async fn which_camera_up(&self) -> Result<Option<CameraFeed>> {
        let primary = self.join(PRIMARY_LIVE_PATH)?;
        if self.fetch_text(&primary).await?.is_some() {
            return Ok(Some(CameraFeed::Primary));
        }

        let secondary = self.join(SECONDARY_LIVE_PATH)?;
        if self.fetch_text(&secondary).await?.is_some() {
            info!("Primary camera down, secondary feed is up");
            return Ok(Some(CameraFeed::Secondary));
        }

        warn!("No camera feed is publishing");
        Ok(None)
    }

    /// GETs a page, returning `None` for error statuses and empty bodies.
    async fn fetch_text(&self, url: &Url) -> Result<Option<String>> {
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!("{} returned {}", url, status);
            return Ok(None);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(body))
    }
}
