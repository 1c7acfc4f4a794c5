//! Configuration types for monkeycam.
//!
//! Configuration is read from TOML. Every field has a default, so an
//! empty file (or no file) yields a working setup against the public
//! camera site and the Gemini API.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use monkeycam_council::classifier::gemini;
use monkeycam_locator::{PathMode, TimeSlot, Url, DEFAULT_BASE_URL, LIVE_TITLE};
use tracing::debug;

use crate::{CoreError, Result};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "monkeycam.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonkeycamConfig {
    /// Camera site settings.
    pub site: SiteConfig,

    /// Vision model settings.
    pub classifier: ClassifierConfig,
}

/// Which image to classify when a page carries several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageChoice {
    /// The first image in document order.
    #[default]
    First,
    /// The last image in document order.
    Last,
}

impl ImageChoice {
    /// Picks an item according to this policy.
    pub fn pick<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        match self {
            ImageChoice::First => items.first(),
            ImageChoice::Last => items.last(),
        }
    }
}

/// Camera site configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root URL of the camera site.
    pub base_url: String,

    /// Page title that marks a valid live snapshot.
    pub live_title: String,

    /// How snapshot page URLs are formed.
    pub path_mode: PathMode,

    /// Image picked when a page carries more than one.
    pub image_choice: ImageChoice,

    /// Slot used when the user selects none.
    pub default_slot: TimeSlot,

    /// Transport timeout for site requests.
    pub request_timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            live_title: LIVE_TITLE.to_string(),
            path_mode: PathMode::Dated,
            image_choice: ImageChoice::First,
            default_slot: TimeSlot::DEFAULT,
            request_timeout_secs: 60,
        }
    }
}

impl SiteConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Vision classifier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Root URL of the Gemini API.
    pub base_url: String,

    /// Model name, with or without the `models/` prefix.
    pub model: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Transport timeout for model requests.
    pub request_timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: gemini::DEFAULT_BASE_URL.to_string(),
            model: gemini::DEFAULT_MODEL.to_string(),
            api_key_env: "GOOGLE_API_KEY".to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl ClassifierConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Reads the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(CoreError::Council(
                monkeycam_council::CouncilError::MissingApiKey(self.api_key_env.clone()),
            )),
        }
    }
}

impl MonkeycamConfig {
    /// Parses configuration from TOML text and validates it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| CoreError::Config(format!("invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Loads `path` if given, else `./monkeycam.toml` if present, else defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            return Self::load(&fallback);
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))
    }

    /// Checks values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("site.base_url", &self.site.base_url),
            ("classifier.base_url", &self.classifier.base_url),
        ] {
            let url = Url::parse(value)
                .map_err(|e| CoreError::Config(format!("{} '{}': {}", name, value, e)))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(CoreError::Config(format!(
                    "{} must be http or https, got '{}'",
                    name, value
                )));
            }
        }

        if self.site.live_title.trim().is_empty() {
            return Err(CoreError::Config("site.live_title is empty".to_string()));
        }
        if self.classifier.model.trim().is_empty() {
            return Err(CoreError::Config("classifier.model is empty".to_string()));
        }
        if self.classifier.api_key_env.trim().is_empty() {
            return Err(CoreError::Config("classifier.api_key_env is empty".to_string()));
        }
        if self.site.request_timeout_secs == 0 || self.classifier.request_timeout_secs == 0 {
            return Err(CoreError::Config("request timeouts must be positive".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = MonkeycamConfig::default();
        assert_eq!(config.site.base_url, "https://jigokudani-yaenkoen.co.jp");
        assert_eq!(config.site.default_slot, TimeSlot::Am9);
        assert_eq!(config.site.path_mode, PathMode::Dated);
        assert_eq!(config.classifier.model, "gemini-pro-vision");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = MonkeycamConfig::from_toml_str("").unwrap();
        assert_eq!(config, MonkeycamConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = MonkeycamConfig::from_toml_str(
            r#"
            [site]
            path_mode = "live"
            image_choice = "last"
            default_slot = "11am"

            [classifier]
            model = "gemini-1.5-flash"
            "#,
        )
        .unwrap();

        assert_eq!(config.site.path_mode, PathMode::Live);
        assert_eq!(config.site.image_choice, ImageChoice::Last);
        assert_eq!(config.site.default_slot, TimeSlot::Am11);
        assert_eq!(config.classifier.model, "gemini-1.5-flash");
        assert_eq!(config.classifier.api_key_env, "GOOGLE_API_KEY");
    }

    #[test]
    fn test_unknown_slot_rejected() {
        let result = MonkeycamConfig::from_toml_str("[site]\ndefault_slot = \"7am\"\n");
        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn test_relative_base_url_rejected() {
        let result = MonkeycamConfig::from_toml_str("[site]\nbase_url = \"example.jp\"\n");
        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let result = MonkeycamConfig::from_toml_str("[classifier]\nbase_url = \"ftp://example.jp\"\n");
        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn test_empty_model_rejected() {
        let result = MonkeycamConfig::from_toml_str("[classifier]\nmodel = \"  \"\n");
        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = MonkeycamConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(MonkeycamConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[site]\nrequest_timeout_secs = 5").unwrap();

        let config = MonkeycamConfig::resolve(Some(file.path())).unwrap();
        assert_eq!(config.site.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_load_missing_file() {
        let result = MonkeycamConfig::load(Path::new("/nonexistent/monkeycam.toml"));
        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn test_image_choice_pick() {
        let items = [1, 2, 3];
        assert_eq!(ImageChoice::First.pick(&items), Some(&1));
        assert_eq!(ImageChoice::Last.pick(&items), Some(&3));
        assert_eq!(ImageChoice::First.pick::<i32>(&[]), None);
    }

    #[test]
    fn test_missing_api_key() {
        let config = ClassifierConfig {
            api_key_env: "MONKEYCAM_TEST_UNSET_KEY".to_string(),
            ..ClassifierConfig::default()
        };
        assert!(config.api_key().is_err());
    }
}
