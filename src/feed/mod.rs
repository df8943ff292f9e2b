//! Podcast feed generation.
//!
//! - `item`: episode → ordered `<item>` elements
//! - `channel`: channel elements, document assembly
//! - `sink`: XML writer interface and its quick-xml implementation

pub mod channel;
pub mod item;
pub mod sink;

pub use channel::render_feed;

use crate::{
    config::PodcastConfig,
    debug,
    episode::{Episode, select_episodes},
    log,
};
use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

/// Select episodes and write the feed file.
///
/// Does nothing when `feed.path` is unset or empty. Returns the path
/// written, if any. The document is rendered in memory before the file
/// is created.
pub fn build_podcast_feed(
    config: &PodcastConfig,
    articles: Vec<Episode>,
) -> Result<Option<PathBuf>> {
    let Some(feed_path) = config.feed_output_path() else {
        debug!("feed"; "podcast feed disabled");
        return Ok(None);
    };

    let total = articles.len();
    let episodes = select_episodes(articles);
    log_selection(total, episodes.len());

    let xml = render_feed(&config.settings, &config.site, &episodes, config.build.minify)?;

    if let Some(parent) = feed_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&feed_path, xml)
        .with_context(|| format!("Failed to write podcast feed to {}", feed_path.display()))?;

    log!("feed"; "{}", feed_path.file_name().unwrap_or_default().to_string_lossy());
    Ok(Some(feed_path))
}

/// Report how many articles made it into the feed.
pub fn log_selection(total: usize, selected: usize) {
    if selected == total {
        log!("feed"; "selected all {} articles", total);
    } else {
        log!("feed"; "selected {} of {} articles (others unpublished or without podcast)", selected, total);
    }
}
