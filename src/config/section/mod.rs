//! Configuration section definitions.
//!
//! Each module corresponds to a section in `tola-podcast.toml`:
//!
//! | Module  | TOML Section | Purpose                                   |
//! |---------|--------------|-------------------------------------------|
//! | `build` | `[build]`    | Output directory, episode manifest, minify |
//! | `feed`  | `[feed]`     | Podcast channel settings                  |
//! | `site`  | `[site]`     | Site title and URL                        |

pub mod build;
pub mod feed;
pub mod site;

pub use build::BuildConfig;
pub use feed::{Category, FeedSettings, Owner, Settings};
pub use site::SiteConfig;
