//! CLI commands and argument parsing

use crate::request::{LibraryStatus, MediaKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse Kitsu libraries page by page
#[derive(Parser, Debug)]
#[command(name = "kitsu-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a user's library one page at a time
    Browse {
        /// User id whose library to fetch
        #[arg(short, long)]
        user: u64,

        /// Media kind (anime or manga)
        #[arg(short, long, default_value = "anime")]
        kind: MediaKind,

        /// Only include these statuses (comma-separated)
        #[arg(long, value_delimiter = ',')]
        status: Vec<LibraryStatus>,

        /// Maximum pages to fetch (0 = until the last page)
        #[arg(short, long, default_value = "1")]
        pages: usize,

        /// Entries per page (overrides the config file)
        #[arg(long)]
        limit: Option<u32>,

        /// Start from the last page and walk backwards
        #[arg(long)]
        reverse: bool,
    },

    /// Validate the configuration and print the effective settings
    Validate,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one entry per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_browse() {
        let cli = Cli::try_parse_from([
            "kitsu-pager",
            "browse",
            "--user",
            "42",
            "--kind",
            "manga",
            "--status",
            "current,completed",
            "--pages",
            "0",
            "--reverse",
        ])
        .unwrap();

        match cli.command {
            Commands::Browse {
                user,
                kind,
                status,
                pages,
                limit,
                reverse,
            } => {
                assert_eq!(user, 42);
                assert_eq!(kind, MediaKind::Manga);
                assert_eq!(status, vec![LibraryStatus::Current, LibraryStatus::Completed]);
                assert_eq!(pages, 0);
                assert_eq!(limit, None);
                assert!(reverse);
            }
            Commands::Validate => panic!("Expected browse"),
        }
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "kitsu-pager",
            "validate",
            "-C",
            "pager.yaml",
            "--format",
            "pretty",
            "-v",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Validate));
        assert_eq!(cli.config, Some(PathBuf::from("pager.yaml")));
        assert_eq!(cli.format, OutputFormat::Pretty);
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        let result = Cli::try_parse_from(["kitsu-pager", "browse", "--user", "1", "--kind", "drama"]);
        assert!(result.is_err());
    }
}
