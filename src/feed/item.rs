//! Per-episode `<item>` elements.
//!
//! Every episode becomes an [`ItemElements`] set before anything is
//! written, so unsupported values are dropped here and the writer only
//! ever sees text or attribute lists.

use super::sink::XmlSink;
use crate::{
    episode::{Episode, FieldValue},
    log,
    utils::html::strip_tags,
};
use anyhow::Result;
use chrono_tz::Tz;
use std::collections::BTreeMap;

/// Enclosure type when the episode does not declare one.
pub const DEFAULT_MIME: &str = "audio/mpeg";

/// Element value: text content or an attribute-only element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementValue {
    Text(String),
    Attributes(Vec<(&'static str, String)>),
}

/// Item element names. Declaration order is emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ItemKey {
    Title,
    Link,
    Description,
    Author,
    Subtitle,
    Summary,
    Image,
    Enclosure,
    Guid,
    PubDate,
    Duration,
}

impl ItemKey {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Link => "link",
            Self::Description => "description",
            Self::Author => "itunes:author",
            Self::Subtitle => "itunes:subtitle",
            Self::Summary => "itunes:summary",
            Self::Image => "itunes:image",
            Self::Enclosure => "enclosure",
            Self::Guid => "guid",
            Self::PubDate => "pubDate",
            Self::Duration => "itunes:duration",
        }
    }
}

/// The elements of one `<item>`; absent keys are not written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemElements(BTreeMap<ItemKey, ElementValue>);

impl ItemElements {
    /// Map an episode onto item elements.
    ///
    /// `base_url` has no trailing slash. Unsupported optional values are
    /// reported and left out; the rest of the item is unaffected.
    pub fn from_episode(episode: &Episode, base_url: &str, tz: Option<Tz>) -> Self {
        let mut item = Self::default();
        let text_field = |key: ItemKey, value: Option<&FieldValue>| -> Option<String> {
            match value?.to_text() {
                Ok(text) => Some(text.into_owned()),
                Err(kind) => {
                    log!("warning"; "{}: ignoring {} value for `{}`", episode.url, kind, key.tag());
                    None
                }
            }
        };

        let link = format!("{}/{}", base_url, episode.url);

        let summary = match text_field(ItemKey::Description, episode.description.as_ref()) {
            Some(description) => description,
            None => text_field(ItemKey::Summary, episode.summary.as_ref())
                .map(|summary| strip_tags(&summary))
                .unwrap_or_default(),
        };

        let author = text_field(ItemKey::Author, episode.author.as_ref());
        let subtitle =
            text_field(ItemKey::Subtitle, episode.subtitle.as_ref()).map(|s| strip_tags(&s));
        let image = text_field(ItemKey::Image, episode.image.as_ref());
        let duration = text_field(ItemKey::Duration, episode.duration.as_ref());
        let guid = text_field(ItemKey::Guid, episode.guid.as_ref());

        let enclosure = text_field(ItemKey::Enclosure, episode.podcast.as_ref()).map(|url| {
            let mut attrs = vec![("url", url)];
            if let Some(length) = text_field(ItemKey::Enclosure, episode.length.as_ref()) {
                attrs.push(("length", length));
            }
            let mime = text_field(ItemKey::Enclosure, episode.mimetype.as_ref());
            attrs.push(("type", mime.unwrap_or_else(|| DEFAULT_MIME.to_string())));
            attrs
        });

        item.text(ItemKey::Title, strip_tags(&episode.title));
        item.text(ItemKey::Description, summary.clone());
        item.text(ItemKey::Summary, summary);
        item.text(ItemKey::PubDate, episode.pub_date().to_rfc2822(tz));
        item.text(ItemKey::Guid, guid.unwrap_or_else(|| link.clone()));
        item.text(ItemKey::Link, link);

        if let Some(author) = author {
            item.text(ItemKey::Author, author);
        }
        if let Some(subtitle) = subtitle {
            item.text(ItemKey::Subtitle, subtitle);
        }
        if let Some(image) = image {
            let href = format!("{}{}", base_url, image);
            item.attributes(ItemKey::Image, vec![("href", href)]);
        }
        if let Some(attrs) = enclosure {
            item.attributes(ItemKey::Enclosure, attrs);
        }
        if let Some(duration) = duration {
            item.text(ItemKey::Duration, duration);
        }

        item
    }

    fn text(&mut self, key: ItemKey, text: String) {
        self.0.insert(key, ElementValue::Text(text));
    }

    fn attributes(&mut self, key: ItemKey, attrs: Vec<(&'static str, String)>) {
        self.0.insert(key, ElementValue::Attributes(attrs));
    }

    #[cfg(test)]
    pub fn get(&self, key: ItemKey) -> Option<&ElementValue> {
        self.0.get(&key)
    }

    /// Text content of `key`, if it is a text element.
    #[cfg(test)]
    pub fn text_of(&self, key: ItemKey) -> Option<&str> {
        match self.get(key)? {
            ElementValue::Text(text) => Some(text),
            ElementValue::Attributes(_) => None,
        }
    }

    /// Elements in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemKey, &ElementValue)> {
        self.0.iter().map(|(key, value)| (*key, value))
    }

    /// Write the elements (without the surrounding `<item>`).
    pub fn write(&self, sink: &mut impl XmlSink) -> Result<()> {
        for (key, value) in self.iter() {
            match value {
                ElementValue::Text(text) => {
                    sink.add_quick_element(key.tag(), Some(text.as_str()), &[])?
                }
                ElementValue::Attributes(attrs) => {
                    let attrs: Vec<(&str, &str)> = attrs
                        .iter()
                        .map(|(name, value)| (*name, value.as_str()))
                        .collect();
                    sink.add_quick_element(key.tag(), None, &attrs)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::parse_timezone;
    use serde_json::json;

    const BASE: &str = "http://x.test";

    fn episode() -> Episode {
        Episode::new("<b>Ep 1</b>", "ep1", "2014-06-13 04:59").with_podcast("ep1.mp3")
    }

    fn attrs(pairs: &[(&'static str, &str)]) -> ElementValue {
        ElementValue::Attributes(pairs.iter().map(|(k, v)| (*k, v.to_string())).collect())
    }

    #[test]
    fn test_minimal_episode() {
        let item = ItemElements::from_episode(&episode(), BASE, None);

        assert_eq!(item.text_of(ItemKey::Title), Some("Ep 1"));
        assert_eq!(item.text_of(ItemKey::Link), Some("http://x.test/ep1"));
        assert_eq!(item.text_of(ItemKey::Guid), Some("http://x.test/ep1"));
        assert_eq!(item.text_of(ItemKey::Description), Some(""));
        assert_eq!(item.text_of(ItemKey::Summary), Some(""));
        assert_eq!(
            item.text_of(ItemKey::PubDate),
            Some("Fri, 13 Jun 2014 04:59:00 -0000")
        );
        assert_eq!(
            item.get(ItemKey::Enclosure),
            Some(&attrs(&[("url", "ep1.mp3"), ("type", "audio/mpeg")]))
        );
        for key in [ItemKey::Author, ItemKey::Subtitle, ItemKey::Image, ItemKey::Duration] {
            assert!(item.get(key).is_none(), "{key:?}");
        }
    }

    #[test]
    fn test_emission_order() {
        let mut episode = episode();
        episode.author = Some("Jane".into());
        episode.subtitle = Some("Sub".into());
        episode.image = Some("/cover.jpg".into());
        episode.duration = Some("7:04".into());

        let item = ItemElements::from_episode(&episode, BASE, None);
        let tags: Vec<&str> = item.iter().map(|(key, _)| key.tag()).collect();
        assert_eq!(
            tags,
            [
                "title",
                "link",
                "description",
                "itunes:author",
                "itunes:subtitle",
                "itunes:summary",
                "itunes:image",
                "enclosure",
                "guid",
                "pubDate",
                "itunes:duration",
            ]
        );
        assert_eq!(
            item.get(ItemKey::Image),
            Some(&attrs(&[("href", "http://x.test/cover.jpg")]))
        );
    }

    #[test]
    fn test_description_wins_over_summary() {
        let mut episode = episode();
        episode.summary = Some("<p>Short &amp; sweet</p>".into());
        let item = ItemElements::from_episode(&episode, BASE, None);
        assert_eq!(item.text_of(ItemKey::Summary), Some("Short & sweet"));
        assert_eq!(item.text_of(ItemKey::Description), Some("Short & sweet"));

        episode.description = Some("<p>Full notes</p>".into());
        let item = ItemElements::from_episode(&episode, BASE, None);
        assert_eq!(item.text_of(ItemKey::Summary), Some("<p>Full notes</p>"));
        assert_eq!(item.text_of(ItemKey::Description), Some("<p>Full notes</p>"));
    }

    #[test]
    fn test_markup_stripped_from_title_and_subtitle() {
        let mut episode = Episode::new("<em>Cooking</em> <b>live</b>", "ep", "2024-01-01")
            .with_podcast("ep.mp3");
        episode.subtitle = Some("<i>with</i> guests".into());
        let item = ItemElements::from_episode(&episode, BASE, None);

        for key in [ItemKey::Title, ItemKey::Subtitle] {
            let text = item.text_of(key).unwrap();
            assert!(!text.contains('<') && !text.contains('>'), "{text}");
        }
        assert_eq!(item.text_of(ItemKey::Title), Some("Cooking live"));
        assert_eq!(item.text_of(ItemKey::Subtitle), Some("with guests"));
    }

    #[test]
    fn test_explicit_guid() {
        let mut episode = episode();
        episode.guid = Some("urn:uuid:1234".into());
        let item = ItemElements::from_episode(&episode, BASE, None);
        assert_eq!(item.text_of(ItemKey::Guid), Some("urn:uuid:1234"));
    }

    #[test]
    fn test_enclosure_with_length_and_type() {
        let mut episode = episode();
        episode.length = Some(json!(872731).into());
        episode.mimetype = Some("audio/x-m4a".into());
        let item = ItemElements::from_episode(&episode, BASE, None);
        assert_eq!(
            item.get(ItemKey::Enclosure),
            Some(&attrs(&[
                ("url", "ep1.mp3"),
                ("length", "872731"),
                ("type", "audio/x-m4a")
            ]))
        );
    }

    #[test]
    fn test_pub_date_localized_and_modified_wins() {
        let tz = Some(parse_timezone("America/Sao_Paulo").unwrap());
        let mut episode = episode();
        let item = ItemElements::from_episode(&episode, BASE, tz);
        assert_eq!(
            item.text_of(ItemKey::PubDate),
            Some("Fri, 13 Jun 2014 04:59:00 -0300")
        );

        episode.modified = crate::utils::date::EpisodeDate::parse("2014-06-20T10:00:00+02:00");
        let item = ItemElements::from_episode(&episode, BASE, tz);
        assert_eq!(
            item.text_of(ItemKey::PubDate),
            Some("Fri, 20 Jun 2014 10:00:00 +0200")
        );
    }

    #[test]
    fn test_unsupported_values_are_omitted() {
        let mut episode = episode();
        episode.author = Some(json!(true).into());
        episode.duration = Some(json!(["7", "04"]).into());
        episode.length = Some(json!({"bytes": 1}).into());
        episode.subtitle = Some("Still here".into());

        let item = ItemElements::from_episode(&episode, BASE, None);
        assert!(item.get(ItemKey::Author).is_none());
        assert!(item.get(ItemKey::Duration).is_none());
        assert_eq!(
            item.get(ItemKey::Enclosure),
            Some(&attrs(&[("url", "ep1.mp3"), ("type", "audio/mpeg")]))
        );
        assert_eq!(item.text_of(ItemKey::Subtitle), Some("Still here"));
    }

    #[test]
    fn test_numeric_duration_is_text() {
        let mut episode = episode();
        episode.duration = Some(json!(424).into());
        let item = ItemElements::from_episode(&episode, BASE, None);
        assert_eq!(item.text_of(ItemKey::Duration), Some("424"));
    }
}
