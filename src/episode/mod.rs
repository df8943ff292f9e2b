//! Episode records handed over by the content pipeline.
//!
//! # Module Structure
//!
//! | Module     | Purpose                                      |
//! |------------|----------------------------------------------|
//! | `manifest` | Load the episode list from TOML or JSON      |
//! | `select`   | Keep published items that carry podcast media |

pub mod manifest;
pub mod select;

pub use manifest::load_manifest;
pub use select::select_episodes;

use crate::utils::date::EpisodeDate;
use serde::Deserialize;
use std::borrow::Cow;

/// Status assumed when the manifest does not say.
pub const DEFAULT_STATUS: &str = "published";

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

/// One content item with its optional podcast attributes.
///
/// Immutable once loaded; the feed only ever borrows it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Episode {
    /// Title, may contain markup.
    pub title: String,
    /// Canonical URL relative to the site root.
    pub url: String,
    pub date: EpisodeDate,
    #[serde(default)]
    pub modified: Option<EpisodeDate>,
    #[serde(default = "default_status")]
    pub status: String,

    /// Long-form description (markup).
    #[serde(default)]
    pub description: Option<FieldValue>,
    /// Short summary (markup).
    #[serde(default)]
    pub summary: Option<FieldValue>,
    #[serde(default)]
    pub author: Option<FieldValue>,
    #[serde(default)]
    pub subtitle: Option<FieldValue>,
    /// Cover image path, joined onto the site URL.
    #[serde(default)]
    pub image: Option<FieldValue>,
    /// Media reference; items without it are not episodes.
    #[serde(default)]
    pub podcast: Option<FieldValue>,
    /// Media size in bytes.
    #[serde(default)]
    pub length: Option<FieldValue>,
    #[serde(default)]
    pub mimetype: Option<FieldValue>,
    #[serde(default)]
    pub duration: Option<FieldValue>,
    #[serde(default)]
    pub guid: Option<FieldValue>,
}

impl Episode {
    pub fn is_published(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case(DEFAULT_STATUS)
    }

    /// Timestamp shown as `pubDate`: modification time wins.
    pub fn pub_date(&self) -> EpisodeDate {
        self.modified.unwrap_or(self.date)
    }
}

/// Loosely typed optional attribute.
///
/// Strings and numbers become element text; other shapes are rejected
/// by [`FieldValue::to_text`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct FieldValue(serde_json::Value);

impl FieldValue {
    /// Text form of the value, or the name of its unsupported kind.
    pub fn to_text(&self) -> Result<Cow<'_, str>, &'static str> {
        match &self.0 {
            serde_json::Value::String(s) => Ok(Cow::Borrowed(s)),
            serde_json::Value::Number(n) => Ok(Cow::Owned(n.to_string())),
            serde_json::Value::Bool(_) => Err("boolean"),
            serde_json::Value::Array(_) => Err("list"),
            serde_json::Value::Object(_) => Err("table"),
            serde_json::Value::Null => Err("null"),
        }
    }
}

#[cfg(test)]
impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self(serde_json::Value::String(s.to_string()))
    }
}

#[cfg(test)]
impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
impl Episode {
    /// Minimal published episode without podcast attributes.
    pub fn new(title: &str, url: &str, date: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            date: EpisodeDate::parse(date).unwrap(),
            modified: None,
            status: default_status(),
            description: None,
            summary: None,
            author: None,
            subtitle: None,
            image: None,
            podcast: None,
            length: None,
            mimetype: None,
            duration: None,
            guid: None,
        }
    }

    pub fn with_podcast(mut self, media: &str) -> Self {
        self.podcast = Some(media.into());
        self
    }
}
