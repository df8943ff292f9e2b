//! `validate` command: dry run of the feed build.

use crate::{
    config::PodcastConfig,
    episode::{load_manifest, select_episodes},
    feed::{log_selection, render_feed},
    log,
};
use anyhow::Result;

/// Load the manifest and render the feed in memory without writing it.
///
/// Returns the number of episodes the feed would contain.
pub fn validate_feed(config: &PodcastConfig) -> Result<usize> {
    let articles = load_manifest(&config.build.episodes)?;
    let total = articles.len();
    let episodes = select_episodes(articles);
    log_selection(total, episodes.len());

    let xml = render_feed(&config.settings, &config.site, &episodes, config.build.minify)?;

    match config.feed_output_path() {
        Some(path) => {
            log!("validate"; "ok, {} bytes would be written to {}", xml.len(), path.display());
        }
        None => log!("validate"; "ok, but feed generation is disabled (feed.path not set)"),
    }
    Ok(episodes.len())
}
