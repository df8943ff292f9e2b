//! `build` command: load the manifest and write the feed.

use crate::{
    config::{FeedSettings, PodcastConfig},
    debug,
    episode::load_manifest,
    feed::build_podcast_feed,
    log,
};
use anyhow::Result;

/// Generate the podcast feed.
pub fn build_feed(config: &PodcastConfig) -> Result<()> {
    if config.feed_output_path().is_none() {
        log!("build"; "podcast feed disabled, set {} to enable", FeedSettings::PATH);
        return Ok(());
    }

    let articles = load_manifest(&config.build.episodes)?;
    debug!("build"; "loaded {} articles from {}", articles.len(), config.build.episodes.display());

    build_podcast_feed(config, articles)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use std::fs;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
[[episode]]
title = "<b>Ep 1</b>"
url = "ep1"
date = "2014-06-13 04:59"
podcast = "ep1.mp3"
"#;

    #[test]
    fn test_build_writes_feed() {
        let dir = TempDir::new().unwrap();
        let mut config =
            test_config("[feed]\npath = \"podcast.xml\"\ntimezone = \"America/Sao_Paulo\"");
        config.build.output = dir.path().join("public");
        config.build.episodes = dir.path().join("episodes.toml");
        fs::write(&config.build.episodes, MANIFEST).unwrap();

        build_feed(&config).unwrap();

        let xml = fs::read_to_string(dir.path().join("public/podcast.xml")).unwrap();
        assert!(xml.contains("<pubDate>Fri, 13 Jun 2014 04:59:00 -0300</pubDate>"));
        assert!(xml.contains("<guid>http://x.test/ep1</guid>"));
    }

    #[test]
    fn test_disabled_feed_skips_manifest() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config("");
        config.build.output = dir.path().join("public");
        config.build.episodes = dir.path().join("missing.toml");

        build_feed(&config).unwrap();
        assert!(!dir.path().join("public").exists());
    }

    #[test]
    fn test_missing_manifest_fails() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config("[feed]\npath = \"podcast.xml\"");
        config.build.output = dir.path().join("public");
        config.build.episodes = dir.path().join("missing.toml");

        let err = build_feed(&config).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
        assert!(!dir.path().join("public/podcast.xml").exists());
    }
}
