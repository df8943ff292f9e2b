//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Podcast feed generator for tola sites
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: tola-podcast.toml)
    #[arg(short = 'C', long, default_value = "tola-podcast.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate the podcast feed
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Check config and episode manifest without writing anything
    #[command(visible_alias = "v")]
    Validate {
        #[command(flatten)]
        args: ValidateArgs,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Episode manifest exported by the content pipeline (.toml or .json)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub episodes: Option<PathBuf>,

    /// Write the feed without indentation
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Override site URL for deployment.
    ///
    /// Useful for CI/CD deployments where the production URL differs from
    /// the one in tola-podcast.toml.
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Validate command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Episode manifest to check instead of the configured one
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub episodes: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Cli {
    /// Episode manifest override for the current command.
    pub fn episodes_override(&self) -> Option<&PathBuf> {
        match &self.command {
            Commands::Build { build_args } => build_args.episodes.as_ref(),
            Commands::Validate { args } => args.episodes.as_ref(),
        }
    }

    pub fn is_verbose(&self) -> bool {
        match &self.command {
            Commands::Build { build_args } => build_args.verbose,
            Commands::Validate { args } => args.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_defaults() {
        let cli = Cli::try_parse_from(["tola-podcast", "build"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("tola-podcast.toml"));
        let Commands::Build { build_args } = &cli.command else {
            panic!("expected build command");
        };
        assert!(build_args.output.is_none());
        assert!(build_args.minify.is_none());
        assert!(!cli.is_verbose());
    }

    #[test]
    fn test_parse_build_overrides() {
        let cli = Cli::try_parse_from([
            "tola-podcast",
            "-C",
            "site/podcast.toml",
            "b",
            "-o",
            "dist",
            "-e",
            "eps.json",
            "--minify",
            "-U",
            "https://cdn.example.com",
            "-V",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("site/podcast.toml"));
        assert_eq!(cli.episodes_override(), Some(&PathBuf::from("eps.json")));
        assert!(cli.is_verbose());
        let Commands::Build { build_args } = &cli.command else {
            panic!("expected build command");
        };
        assert_eq!(build_args.output, Some(PathBuf::from("dist")));
        assert_eq!(build_args.minify, Some(true));
        assert_eq!(build_args.site_url.as_deref(), Some("https://cdn.example.com"));
    }

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from(["tola-podcast", "validate", "-e", "x.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate { .. }));
        assert_eq!(cli.episodes_override(), Some(&PathBuf::from("x.toml")));
    }

    #[test]
    fn test_requires_subcommand() {
        assert!(Cli::try_parse_from(["tola-podcast"]).is_err());
    }
}
