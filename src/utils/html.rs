//! Markup helpers for feed text.
//!
//! Episode titles, subtitles and summaries come out of the content pipeline
//! as rendered HTML fragments. Podcast directories expect plain text, so:
//! - `strip_tags()` - drop comments and tags, collapse whitespace, decode entities
//! - `unescape()` - decode HTML entities back to characters

use quick_xml::escape::resolve_html5_entity;
use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

/// Comments first so `<!-- <b> -->` is removed as a whole.
static RE_MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").unwrap());

// =============================================================================
// Tag Stripping
// =============================================================================

/// Strip markup from an HTML fragment, returning plain text.
///
/// Whitespace runs (including newlines) collapse to a single space and the
/// result is trimmed. Entities are decoded *after* tags are removed, so
/// `&lt;b&gt;` survives as literal text `<b>` (the XML writer escapes it
/// again on output).
///
/// # Example
/// ```ignore
/// assert_eq!(strip_tags("<b>Ep 1</b>"), "Ep 1");
/// assert_eq!(strip_tags("a <i>b</i>\n  c"), "a b c");
/// ```
pub fn strip_tags(s: &str) -> String {
    let without_tags = RE_MARKUP.replace_all(s, "");
    let collapsed = without_tags.split_whitespace().collect::<Vec<_>>().join(" ");
    unescape(&collapsed).into_owned()
}

// =============================================================================
// Entity Decoding
// =============================================================================

/// Unescape HTML entities back to characters.
///
/// Handles the full HTML5 named set (`&rsquo;`, `&mdash;`, ...) and numeric
/// character references. Unknown entities are kept verbatim.
pub fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        // Longest HTML5 name is 31 bytes; anything longer is a bare ampersand
        let Some(semi) = tail[1..].find(';').filter(|&i| i > 0 && i <= 32) else {
            result.push('&');
            rest = &tail[1..];
            continue;
        };

        let entity = &tail[1..=semi];
        match decode_entity(entity) {
            Some(text) => result.push_str(&text),
            None => {
                result.push('&');
                result.push_str(entity);
                result.push(';');
            }
        }
        rest = &tail[semi + 2..];
    }
    result.push_str(rest);

    Cow::Owned(result)
}

fn decode_entity(entity: &str) -> Option<Cow<'static, str>> {
    let code = if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse().ok()
    } else {
        return resolve_html5_entity(entity).map(Cow::Borrowed);
    };
    code.and_then(char::from_u32)
        .map(|c| Cow::Owned(c.to_string()))
}

// =============================================================================
// Tests
// =============================================================================
