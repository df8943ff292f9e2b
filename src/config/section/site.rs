//! `[site]` section configuration.
//!
//! Site-wide values the host generator already knows about. The feed
//! channel falls back to them when `[feed]` does not override.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Kitchen Radio"
//! url = "https://kitchen.example.com"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title, used as channel title unless `feed.title` is set.
    pub title: String,

    /// Site URL (e.g., "https://example.com"). Episode links are built from it.
    pub url: Option<String>,
}

impl SiteConfig {
    pub const TITLE: FieldPath = FieldPath::new("site.title");
    pub const URL: FieldPath = FieldPath::new("site.url");

    /// Base URL without trailing slash, ready for `"{base}/{path}"` joins.
    pub fn base_url(&self) -> &str {
        self.url.as_deref().unwrap_or_default().trim_end_matches('/')
    }

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `url` must be set (every link in the feed is absolute)
    /// - `url` must be a valid http(s) URL with a host
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let Some(url_str) = self.url.as_deref() else {
            diag.error_with_hint(
                Self::URL,
                format!("{} is required to build absolute feed links", Self::URL),
                format!("set {}, e.g.: \"https://example.com\"", Self::URL),
            );
            return;
        };

        match url::Url::parse(url_str) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        Self::URL,
                        format!(
                            "scheme '{}' not supported, must be http or https",
                            parsed.scheme()
                        ),
                        "use format like https://example.com",
                    );
                }
                if parsed.host_str().is_none() {
                    diag.error_with_hint(
                        Self::URL,
                        "URL must have a valid host",
                        "use format like https://example.com",
                    );
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    Self::URL,
                    format!("invalid URL: {}", e),
                    "use format like https://example.com",
                );
            }
        }
    }
}
