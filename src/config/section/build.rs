//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "public"            # Output directory (relative to site root)
//! episodes = "episodes.toml"   # Episode manifest from the content pipeline
//! minify = false               # Write the feed without indentation
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Build output directory; the feed path is resolved inside it.
    pub output: PathBuf,

    /// Episode manifest (`.toml` or `.json`).
    pub episodes: PathBuf,

    /// Minify the XML output.
    pub minify: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: "public".into(),
            episodes: "episodes.toml".into(),
            minify: false,
        }
    }
}
