//! Episode timestamp handling.
//!
//! Content pipelines hand over dates either without an offset
//! (`2024-06-15 14:30`) or with one (`2024-06-15T14:30:00-03:00`).
//! `EpisodeDate` keeps that distinction so the feed can localize naive
//! values to the configured timezone and leave explicit offsets alone.
//!
//! # Examples
//!
//! ```ignore
//! let dt = EpisodeDate::parse("2014-06-13 04:59").unwrap();
//! let tz: Tz = "America/Sao_Paulo".parse().unwrap();
//! assert_eq!(dt.to_rfc2822(Some(tz)), "Fri, 13 Jun 2014 04:59:00 -0300");
//! assert_eq!(dt.to_rfc2822(None), "Fri, 13 Jun 2014 04:59:00 -0000");
//! ```

use anyhow::{Result, anyhow};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// RFC 2822 layout with a numeric offset.
const RFC2822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// RFC 2822 layout for values with no known offset (`-0000` means "unknown").
const RFC2822_NAIVE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S -0000";

/// Accepted layouts for naive timestamps, tried in order.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// A publication or modification timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeDate {
    /// No offset given; interpreted in the site timezone when one is set.
    Naive(NaiveDateTime),
    /// Carries its own offset, never re-localized.
    Aware(DateTime<FixedOffset>),
}

impl EpisodeDate {
    /// Parse `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]` (space or `T`), or RFC 3339.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self::Aware(dt));
        }

        if let Some(dt) = NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        {
            return Some(Self::Naive(dt));
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(Self::Naive)
    }

    /// Attach the site timezone to naive values.
    ///
    /// Ambiguous wall-clock times take the earlier offset. Times inside a DST
    /// gap keep their clock reading and get the offset in force before the
    /// transition (`02:30` in Berlin on spring-forward day is `+0100`).
    pub fn localize(self, tz: Option<Tz>) -> Self {
        match (self, tz) {
            (Self::Naive(naive), Some(tz)) => tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|local| local.fixed_offset())
                .or_else(|| {
                    let before = naive.checked_sub_signed(TimeDelta::days(1))?;
                    let offset = tz.offset_from_utc_datetime(&before).fix();
                    offset.from_local_datetime(&naive).single()
                })
                .map_or(self, Self::Aware),
            (other, _) => other,
        }
    }

    /// Format for `<pubDate>`, localizing naive values first.
    pub fn to_rfc2822(self, tz: Option<Tz>) -> String {
        match self.localize(tz) {
            Self::Aware(dt) => dt.format(RFC2822_FORMAT).to_string(),
            Self::Naive(dt) => dt.format(RFC2822_NAIVE_FORMAT).to_string(),
        }
    }
}

impl fmt::Display for EpisodeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Naive(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Self::Aware(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

impl<'de> Deserialize<'de> for EpisodeDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date `{raw}`")))
    }
}

/// Resolve an IANA timezone name such as `Europe/Berlin`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| anyhow!("unknown timezone `{name}`: {e}"))
}
