//! Snapshot page parsing.
//!
//! A snapshot page is a small static HTML document with a fixed title
//! and one `<img>` tag. Only the title text and image sources matter.

use regex::Regex;
use reqwest::Url;
use std::sync::OnceLock;
use tracing::debug;

/// Title carried by a page that holds a live camera snapshot.
pub const LIVE_TITLE: &str = "JIGOKUDANI-YAENKOEN SVGA-LIVECAM";

fn title_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap())
}

fn img_src_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?is)<img\b[^>]*?\ssrc\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap()
    })
}

/// The parts of a snapshot page the locator cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPage {
    /// Text of the first `<title>` element, whitespace-trimmed.
    pub title: Option<String>,
    /// Raw `src` attribute of every `<img>`, in document order.
    pub image_sources: Vec<String>,
}

impl SnapshotPage {
    /// Extracts the title and image sources from HTML.
    pub fn parse(html: &str) -> Self {
        let title = title_pattern()
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string());

        let image_sources = img_src_pattern()
            .captures_iter(html)
            .filter_map(|c| c.get(1).or_else(|| c.get(2)).or_else(|| c.get(3)))
            .map(|m| m.as_str().trim().to_string())
            .collect();

        Self {
            title,
            image_sources,
        }
    }

    /// Returns true if the title matches `marker` exactly.
    pub fn has_title(&self, marker: &str) -> bool {
        self.title.as_deref() == Some(marker)
    }

    /// Resolves every image source against `base`.
    ///
    /// Sources that cannot form a URL are skipped.
    pub fn image_urls(&self, base: &Url) -> Vec<Url> {
        self.image_sources
            .iter()
            .filter_map(|src| match base.join(src) {
                Ok(url) => Some(url),
                Err(e) => {
                    debug!("Skipping image source {:?}: {}", src, e);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIVE_PAGE: &str = r#"<html>
<head><title>JIGOKUDANI-YAENKOEN SVGA-LIVECAM</title></head>
<body><img src="0900.jpg" width="800"></body>
</html>"#;

    #[test]
    fn test_parse_live_page() {
        let page = SnapshotPage::parse(LIVE_PAGE);

        assert!(page.has_title(LIVE_TITLE));
        assert_eq!(page.image_sources, vec!["0900.jpg".to_string()]);
    }

    #[test]
    fn test_title_mismatch() {
        let page = SnapshotPage::parse("<title>Not Found</title><img src='a.jpg'>");

        assert!(!page.has_title(LIVE_TITLE));
        assert_eq!(page.title.as_deref(), Some("Not Found"));
    }

    #[test]
    fn test_missing_title() {
        let page = SnapshotPage::parse("<html><body></body></html>");

        assert_eq!(page.title, None);
        assert!(!page.has_title(LIVE_TITLE));
        assert!(page.image_sources.is_empty());
    }

    #[test]
    fn test_collects_every_quote_style() {
        let html = r#"<IMG SRC="a.jpg"><img alt='x' src='b.jpg'/><img src=c.jpg>"#;
        let page = SnapshotPage::parse(html);

        assert_eq!(page.image_sources, vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn test_ignores_data_src() {
        let page = SnapshotPage::parse(r#"<img data-src="lazy.jpg" src="real.jpg">"#);

        assert_eq!(page.image_sources, vec!["real.jpg"]);
    }

    #[test]
    fn test_resolves_against_base() {
        let base = Url::parse("https://example.jp/livecam/monkey/day0/09/").unwrap();
        let page = SnapshotPage::parse(
            r#"<img src="0900.jpg"><img src="/logo.gif"><img src="https://cdn.example.jp/x.png">"#,
        );

        let urls: Vec<String> = page.image_urls(&base).iter().map(Url::to_string).collect();

        assert_eq!(
            urls,
            vec![
                "https://example.jp/livecam/monkey/day0/09/0900.jpg",
                "https://example.jp/logo.gif",
                "https://cdn.example.jp/x.png",
            ]
        );
    }
}
