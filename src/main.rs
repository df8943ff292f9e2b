//! tola-podcast - podcast RSS feed generator for tola sites.

mod cli;
mod config;
mod episode;
mod feed;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, build::build_feed, validate::validate_feed};
use config::PodcastConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = PodcastConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => build_feed(&config),
        Commands::Validate { .. } => validate_feed(&config).map(|_| ()),
    }
}
