//! Configuration management for `tola-podcast.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   ├── feed       # [feed] raw settings + typed FeedSettings
//! │   └── site       # [site]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # PodcastConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section   | Purpose                                            |
//! |-----------|----------------------------------------------------|
//! | `[site]`  | Site title and URL                                 |
//! | `[build]` | Output directory, episode manifest, minification   |
//! | `[feed]`  | Podcast feed settings (flat key/value mapping)     |

pub mod section;
pub mod types;
mod util;

use util::{find_config_file, resolve_path};

pub use section::{BuildConfig, Category, FeedSettings, Owner, Settings, SiteConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing tola-podcast.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PodcastConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site information
    #[serde(default)]
    pub site: SiteConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Raw podcast feed settings
    #[serde(default)]
    pub feed: Settings,

    /// Typed view of `feed`, filled by [`PodcastConfig::validate`]
    #[serde(skip)]
    pub settings: FeedSettings,
}

impl PodcastConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root
    /// is the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = find_config_file(&cwd, &cli.config)
            .ok_or_else(|| ConfigError::NotFound(cli.config.clone()))?;

        let mut config = Self::from_path(&config_path)?;
        config.config_path = config_path;
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    #[cfg(test)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Directory the feed path is resolved against.
    pub fn output_dir(&self) -> &Path {
        &self.build.output
    }

    /// Full path of the feed file, or `None` when generation is disabled.
    pub fn feed_output_path(&self) -> Option<PathBuf> {
        self.settings
            .output_path()
            .map(|path| self.output_dir().join(path))
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Resolve root, apply CLI overrides and normalize paths.
    fn finalize(&mut self, cli: &Cli) {
        self.root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        if cli.is_verbose() {
            crate::logger::set_verbose(true);
        }
        if let Commands::Build { build_args } = &cli.command {
            self.apply_build_args(build_args);
        }
        Self::update_option(&mut self.build.episodes, cli.episodes_override());

        self.build.output = resolve_path(&self.root, &self.build.output);
        self.build.episodes = resolve_path(&self.root, &self.build.episodes);
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        Self::update_option(&mut self.build.output, args.output.as_ref());
        Self::update_option(&mut self.build.minify, args.minify.as_ref());

        if let Some(ref url) = args.site_url {
            self.site.url = Some(url.clone());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the whole config and build the typed feed settings.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&mut self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        let settings = FeedSettings::from_settings(&self.feed, &mut diag);

        // Channel title must resolve to something
        if settings.title.is_none() && self.site.title.trim().is_empty() {
            diag.error_with_hint(
                SiteConfig::TITLE,
                "channel title is empty",
                format!("set {} or {}", SiteConfig::TITLE, FeedSettings::TITLE),
            );
        }

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)?;

        self.settings = settings;
        Ok(())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with minimal required `[site]` fields.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> PodcastConfig {
    let config = format!("[site]\ntitle = \"Test\"\nurl = \"http://x.test\"\n{extra}");
    let (parsed, ignored) = PodcastConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Parse and validate, as `load` would after reading the file.
#[cfg(test)]
pub fn test_config(extra: &str) -> PodcastConfig {
    let mut config = test_parse_config(extra);
    config.validate().unwrap();
    config
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(PodcastConfig::from_str("[site\ntitle = \"My Show\"").is_err());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\ntitle = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = PodcastConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.site.title, "Test");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_site_description_is_unknown_field() {
        let content = "[site]\ntitle = \"Test\"\ndescription = \"Cooking, out loud\"";
        let (_, ignored) = PodcastConfig::parse_with_ignored(content).unwrap();
        assert_eq!(ignored, ["site.description"]);
    }

    #[test]
    fn test_feed_keys_are_not_unknown_fields() {
        let content = "[feed]\npath = \"podcast.xml\"\nanything = 1";
        let (config, ignored) = PodcastConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
        assert!(config.feed.get("anything").is_some());
    }

    #[test]
    fn test_validate_fills_settings() {
        let config = test_config("[feed]\npath = \"podcast.xml\"\ncategory = \"Technology\"");
        assert_eq!(
            config.settings.category,
            Some(Category::Single("Technology".into()))
        );
        assert_eq!(
            config.feed_output_path(),
            Some(PathBuf::from("public/podcast.xml"))
        );
    }

    #[test]
    fn test_validate_reports_every_error() {
        let mut config = PodcastConfig::from_str(
            "[site]\nurl = \"not a url\"\n[feed]\ncategory = [\"A\", \"B\", \"C\"]",
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err}");
        };
        // url, category, and unresolvable title
        assert_eq!(diag.errors().len(), 3);
    }

    #[test]
    fn test_feed_title_satisfies_channel_title() {
        let mut config = PodcastConfig::from_str(
            "[site]\nurl = \"http://x.test\"\n[feed]\ntitle = \"Kitchen Radio\"",
        )
        .unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_feed_title_reported_with_other_errors() {
        let mut config = PodcastConfig::from_str(
            "[site]\nurl = \"not a url\"\n[feed]\ntitle = \"  \"",
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err}");
        };
        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, [SiteConfig::URL.as_str(), SiteConfig::TITLE.as_str()]);
    }

    #[test]
    fn test_load_applies_cli_overrides() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("tola-podcast.toml");
        fs::write(
            &config_path,
            "[site]\ntitle = \"Show\"\nurl = \"http://x.test\"\n[feed]\npath = \"podcast.xml\"",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "tola-podcast",
            "-C",
            config_path.to_str().unwrap(),
            "build",
            "-o",
            "dist",
            "-U",
            "https://cdn.example.com/",
        ])
        .unwrap();
        let config = PodcastConfig::load(&cli).unwrap();

        assert_eq!(config.root, dir.path());
        assert_eq!(config.output_dir(), dir.path().join("dist"));
        assert_eq!(config.build.episodes, dir.path().join("episodes.toml"));
        assert_eq!(config.site.base_url(), "https://cdn.example.com");
        assert_eq!(
            config.feed_output_path(),
            Some(dir.path().join("dist/podcast.xml"))
        );
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.toml");
        let cli =
            Cli::try_parse_from(["tola-podcast", "-C", missing.to_str().unwrap(), "build"])
                .unwrap();
        let err = PodcastConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
