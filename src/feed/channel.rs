//! RSS 2.0 channel with iTunes extensions.
//!
//! # Output
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <rss xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd" version="2.0">
//!   <channel>
//!     <title>Kitchen Radio</title>
//!     <link>https://kitchen.example.com/</link>
//!     <description>Weekly cooking talk</description>
//!     <itunes:category text="Arts">
//!       <itunes:category text="Food"/>
//!     </itunes:category>
//!     <item>...</item>
//!   </channel>
//! </rss>
//! ```

use super::item::ItemElements;
use super::sink::{XmlSink, XmlWriter};
use crate::{
    config::{Category, FeedSettings, SiteConfig},
    episode::Episode,
};
use anyhow::{Result, bail};

pub const ITUNES_NS: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";

/// One feed document, written once and dropped.
#[derive(Debug)]
pub struct PodcastFeed<'a> {
    settings: &'a FeedSettings,
    base_url: &'a str,
    title: &'a str,
    description: &'a str,
    items: Vec<ItemElements>,
}

impl<'a> PodcastFeed<'a> {
    /// Resolve channel title and description.
    ///
    /// The title is `feed.title` when set, else the site title; an empty
    /// result is a configuration error.
    pub fn new(settings: &'a FeedSettings, site: &'a SiteConfig) -> Result<Self> {
        let title = settings
            .title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or(site.title.as_str());
        if title.trim().is_empty() {
            bail!(
                "channel title is empty: set {} or {}",
                FeedSettings::TITLE,
                SiteConfig::TITLE
            );
        }

        Ok(Self {
            settings,
            base_url: site.base_url(),
            title,
            description: settings.summary.as_deref().unwrap_or_default(),
            items: Vec::new(),
        })
    }

    pub fn add_episode(&mut self, episode: &Episode) {
        let item = ItemElements::from_episode(episode, self.base_url, self.settings.timezone);
        self.items.push(item);
    }

    /// Write the whole document.
    pub fn write(&self, sink: &mut impl XmlSink) -> Result<()> {
        sink.start_document()?;
        sink.start_element("rss", &[("xmlns:itunes", ITUNES_NS), ("version", "2.0")])?;
        sink.start_element("channel", &[])?;

        self.write_channel_elements(sink)?;
        for item in &self.items {
            sink.start_element("item", &[])?;
            item.write(sink)?;
            sink.end_element("item")?;
        }

        sink.end_element("channel")?;
        sink.end_element("rss")
    }

    fn write_channel_elements(&self, sink: &mut impl XmlSink) -> Result<()> {
        let settings = self.settings;
        let link = format!("{}/", self.base_url);

        sink.add_quick_element("title", Some(self.title), &[])?;
        sink.add_quick_element("link", Some(link.as_str()), &[])?;
        sink.add_quick_element("description", Some(self.description), &[])?;

        let optional_text = [
            ("language", &settings.language),
            ("copyright", &settings.copyright),
            ("itunes:explicit", &settings.explicit),
            ("itunes:subtitle", &settings.subtitle),
            ("itunes:author", &settings.author),
            ("itunes:summary", &settings.summary),
        ];
        for (name, value) in optional_text {
            if let Some(text) = value.as_deref() {
                sink.add_quick_element(name, Some(text), &[])?;
            }
        }

        if let Some(image) = settings.image.as_deref() {
            sink.add_quick_element("itunes:image", None, &[("href", image)])?;
        }

        if let Some(owner) = &settings.owner {
            sink.start_element("itunes:owner", &[])?;
            sink.add_quick_element("itunes:name", Some(owner.name.as_str()), &[])?;
            sink.add_quick_element("itunes:email", Some(owner.email.as_str()), &[])?;
            sink.end_element("itunes:owner")?;
        }

        match &settings.category {
            Some(Category::Single(text)) => {
                sink.add_quick_element("itunes:category", None, &[("text", text.as_str())])?;
            }
            Some(Category::Nested { parent, child }) => {
                sink.start_element("itunes:category", &[("text", parent.as_str())])?;
                sink.add_quick_element("itunes:category", None, &[("text", child.as_str())])?;
                sink.end_element("itunes:category")?;
            }
            None => {}
        }

        Ok(())
    }
}

/// Serialize `episodes` into a complete feed document.
pub fn render_feed(
    settings: &FeedSettings,
    site: &SiteConfig,
    episodes: &[Episode],
    minify: bool,
) -> Result<String> {
    let mut feed = PodcastFeed::new(settings, site)?;
    for episode in episodes {
        feed.add_episode(episode);
    }

    let mut writer = XmlWriter::new(minify);
    feed.write(&mut writer)?;
    writer.into_string()
}
