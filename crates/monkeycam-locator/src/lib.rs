//! # Snapshot Locator
//!
//! Finds the camera snapshot for a day and hour on the Jigokudani
//! Yaen-Koen site.
//!
//! The site keeps one static page per hour slot for today (`day0`) and
//! yesterday (`day1`). A page is a valid snapshot only if its title is
//! the live-camera marker; its `<img>` sources are resolved to absolute
//! URLs next to the page.
//!
//! ```rust,ignore
//! use monkeycam_locator::{DaySelector, ImageLocator, TimeSlot};
//!
//! let locator = ImageLocator::new(DEFAULT_BASE_URL, Duration::from_secs(60))?;
//! let snapshot = locator.locate(DaySelector::Today, TimeSlot::Am9).await?;
//!
//! if snapshot.page_valid {
//!     let image = locator.fetch_image(&snapshot.image_urls[0]).await?;
//! }
//! ```

pub mod error;
pub mod locator;
pub mod page;
pub mod schedule;

pub use error::LocatorError;
pub use locator::{
    CameraFeed, DownloadedImage, ImageLocator, LocatedSnapshot, PathMode, DEFAULT_BASE_URL,
};
pub use page::{SnapshotPage, LIVE_TITLE};
pub use reqwest::Url;
pub use schedule::{DaySelector, Season, TimeSlot};

/// Result type for locator operations.
pub type Result<T> = std::result::Result<T, LocatorError>;
