//! Type-safe config field path.

use owo_colors::OwoColorize;
use std::fmt;

/// A dotted path to a config field, e.g. `feed.category`.
///
/// Each section declares its paths as constants so diagnostics never
/// drift from the actual TOML layout.
///
/// # Example
///
/// ```ignore
/// impl SiteConfig {
///     pub const URL: FieldPath = FieldPath::new("site.url");
/// }
///
/// diag.error(SiteConfig::URL, "required");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Last path segment, i.e. the key inside its table.
    pub fn key(&self) -> &'static str {
        self.0.rsplit('.').next().unwrap_or(self.0)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key() {
        assert_eq!(FieldPath::new("feed.owner_name").key(), "owner_name");
        assert_eq!(FieldPath::new("site").key(), "site");
    }

    #[test]
    fn test_display_contains_path() {
        let shown = FieldPath::new("site.url").to_string();
        assert!(shown.contains("site.url"));
    }
}
