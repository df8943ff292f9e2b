//! `[feed]` section: podcast feed settings.
//!
//! The table is kept as a flat key/value mapping ([`Settings`]) exactly as
//! the host hands it over, then converted once into the typed
//! [`FeedSettings`]. Feed code never looks keys up by name.
//!
//! # Example
//!
//! ```toml
//! [feed]
//! path = "feeds/podcast.xml"    # unset or empty: feed generation is disabled
//! title = "Kitchen Radio"       # channel title (default: site.title)
//! summary = "Weekly cooking talk"
//! language = "en-us"
//! copyright = "CC BY 4.0"
//! explicit = "no"               # string or bool
//! subtitle = "Cooking, out loud"
//! author = "Jane Doe"
//! image = "https://kitchen.example.com/cover.jpg"
//! owner_name = "Jane Doe"       # owner block needs both name and email
//! owner_email = "jane@example.com"
//! category = ["Arts", "Food"]   # "Technology" or [parent, child]
//! timezone = "America/Sao_Paulo"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::date::parse_timezone;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Raw `[feed]` mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(BTreeMap<String, toml::Value>);

impl Settings {
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// `itunes:owner` contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub name: String,
    pub email: String,
}

/// `itunes:category`: flat, or parent containing one child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Single(String),
    Nested { parent: String, child: String },
}

/// Typed podcast feed settings.
///
/// `None` means the key was absent and the matching element is omitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedSettings {
    /// Channel title override; never empty.
    pub title: Option<String>,
    pub summary: Option<String>,
    pub language: Option<String>,
    pub copyright: Option<String>,
    pub explicit: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
    pub owner: Option<Owner>,
    pub category: Option<Category>,
    /// Feed output path relative to the output directory; never empty.
    pub path: Option<PathBuf>,
    pub timezone: Option<Tz>,
}

impl FeedSettings {
    pub const PATH: FieldPath = FieldPath::new("feed.path");
    pub const TITLE: FieldPath = FieldPath::new("feed.title");
    pub const SUMMARY: FieldPath = FieldPath::new("feed.summary");
    pub const LANGUAGE: FieldPath = FieldPath::new("feed.language");
    pub const COPYRIGHT: FieldPath = FieldPath::new("feed.copyright");
    pub const EXPLICIT: FieldPath = FieldPath::new("feed.explicit");
    pub const SUBTITLE: FieldPath = FieldPath::new("feed.subtitle");
    pub const AUTHOR: FieldPath = FieldPath::new("feed.author");
    pub const IMAGE: FieldPath = FieldPath::new("feed.image");
    pub const OWNER_NAME: FieldPath = FieldPath::new("feed.owner_name");
    pub const OWNER_EMAIL: FieldPath = FieldPath::new("feed.owner_email");
    pub const CATEGORY: FieldPath = FieldPath::new("feed.category");
    pub const TIMEZONE: FieldPath = FieldPath::new("feed.timezone");

    const KNOWN: [FieldPath; 13] = [
        Self::PATH,
        Self::TITLE,
        Self::SUMMARY,
        Self::LANGUAGE,
        Self::COPYRIGHT,
        Self::EXPLICIT,
        Self::SUBTITLE,
        Self::AUTHOR,
        Self::IMAGE,
        Self::OWNER_NAME,
        Self::OWNER_EMAIL,
        Self::CATEGORY,
        Self::TIMEZONE,
    ];

    /// Convert the raw mapping, recording every problem in `diag`.
    ///
    /// Fields with errors are left `None`; callers must turn `diag` into a
    /// result before using the returned settings.
    pub fn from_settings(settings: &Settings, diag: &mut ConfigDiagnostics) -> Self {
        for key in settings.keys() {
            if !Self::KNOWN.iter().any(|field| field.key() == key) {
                diag.warn(format!("feed.{key}"), "unknown key, ignored");
            }
        }

        let mut reader = Reader { settings, diag };
        let mut parsed = Self {
            title: reader.string(Self::TITLE).filter(|s| !s.trim().is_empty()),
            summary: reader.string(Self::SUMMARY),
            language: reader.string(Self::LANGUAGE),
            copyright: reader.string(Self::COPYRIGHT),
            explicit: reader.explicit(),
            subtitle: reader.string(Self::SUBTITLE),
            author: reader.string(Self::AUTHOR),
            image: reader.string(Self::IMAGE),
            owner: None,
            category: reader.category(),
            path: reader
                .string(Self::PATH)
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            timezone: reader.timezone(),
        };

        let owner_name = reader.string(Self::OWNER_NAME);
        let owner_email = reader.string(Self::OWNER_EMAIL);
        parsed.owner = match (owner_name, owner_email) {
            (Some(name), Some(email)) => Some(Owner { name, email }),
            (None, None) => None,
            (Some(_), None) | (None, Some(_)) => {
                reader.diag.warn(
                    "feed.owner_*",
                    format!(
                        "`itunes:owner` needs both {} and {}, omitting it",
                        Self::OWNER_NAME.key(),
                        Self::OWNER_EMAIL.key()
                    ),
                );
                None
            }
        };

        parsed
    }

    /// Where the feed goes, or `None` when generation is disabled.
    pub fn output_path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}

/// Typed accessors over the raw mapping.
struct Reader<'a> {
    settings: &'a Settings,
    diag: &'a mut ConfigDiagnostics,
}

impl Reader<'_> {
    fn string(&mut self, field: FieldPath) -> Option<String> {
        let settings = self.settings;
        match settings.get(field.key())? {
            toml::Value::String(s) => Some(s.clone()),
            other => {
                self.diag.error(
                    field,
                    format!("expected a string, found {}", other.type_str()),
                );
                None
            }
        }
    }

    /// `explicit` also takes a bool, rendered the way directories expect it.
    fn explicit(&mut self) -> Option<String> {
        match self.settings.get(FeedSettings::EXPLICIT.key())? {
            toml::Value::Boolean(flag) => Some(if *flag { "yes" } else { "no" }.to_string()),
            _ => self.string(FeedSettings::EXPLICIT),
        }
    }

    fn category(&mut self) -> Option<Category> {
        let field = FeedSettings::CATEGORY;
        let settings = self.settings;
        match settings.get(field.key())? {
            toml::Value::String(s) => Some(Category::Single(s.clone())),
            toml::Value::Array(values) => {
                let mut names = Vec::with_capacity(values.len());
                for value in values {
                    match value.as_str() {
                        Some(name) => names.push(name.to_string()),
                        None => {
                            self.diag.error(
                                field,
                                format!("category names must be strings, found {}", value.type_str()),
                            );
                            return None;
                        }
                    }
                }
                let mut names = names.into_iter();
                match (names.next(), names.next(), names.next()) {
                    (Some(single), None, None) => Some(Category::Single(single)),
                    (Some(parent), Some(child), None) => Some(Category::Nested { parent, child }),
                    _ => {
                        self.diag.error_with_hint(
                            field,
                            format!("takes one or two values, found {}", values.len()),
                            "use \"Technology\" or [\"Arts\", \"Food\"] (parent, child)",
                        );
                        None
                    }
                }
            }
            other => {
                self.diag.error(
                    field,
                    format!("expected a string or list, found {}", other.type_str()),
                );
                None
            }
        }
    }

    fn timezone(&mut self) -> Option<Tz> {
        let name = self.string(FeedSettings::TIMEZONE)?;
        match parse_timezone(&name) {
            Ok(tz) => Some(tz),
            Err(e) => {
                self.diag.error_with_hint(
                    FeedSettings::TIMEZONE,
                    e.to_string(),
                    "use an IANA name such as \"Europe/Berlin\"",
                );
                None
            }
        }
    }
}
