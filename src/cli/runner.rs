//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::Config;
use crate::decode::{LibraryEntry, LibraryEntryParser};
use crate::error::{Error, Result, ResultExt};
use crate::http::HttpClient;
use crate::pagination::{Direction, PageResult, PaginatedFetcher, RequestExecutor};
use crate::request::{LibraryRequest, LibraryStatus, MediaKind};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

/// Options for a `browse` run
#[derive(Debug, Clone)]
struct BrowseOptions {
    user: u64,
    kind: MediaKind,
    statuses: Vec<LibraryStatus>,
    pages: usize,
    limit: Option<u32>,
    reverse: bool,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Browse {
                user,
                kind,
                status,
                pages,
                limit,
                reverse,
            } => {
                self.browse(BrowseOptions {
                    user: *user,
                    kind: *kind,
                    statuses: status.clone(),
                    pages: *pages,
                    limit: *limit,
                    reverse: *reverse,
                })
                .await
            }
            Commands::Validate => self.validate(),
        }
    }

    /// Load the config file, or defaults when none was given
    fn load_config(&self) -> Result<Config> {
        match &self.cli.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("Failed to load config '{}'", path.display())),
            None => Config::from_env(),
        }
    }

    fn validate(&self) -> Result<()> {
        let mut config = self.load_config()?;
        if config.auth.token.is_some() {
            config.auth.token = Some("<redacted>".to_string());
        }

        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&config)?),
            OutputFormat::Pretty => {
                println!("Configuration is valid");
                print!("{}", serde_yaml::to_string(&config)?);
            }
        }
        Ok(())
    }

    async fn browse(&self, options: BrowseOptions) -> Result<()> {
        let config = self.load_config()?;
        let client = HttpClient::with_config(config.http_client_config())?;

        let template = LibraryRequest::new(options.user, options.kind)
            .with_statuses(options.statuses.iter().copied())
            .with_page_limit(options.limit.unwrap_or(config.library.page_limit))
            .with_media(config.library.include_media);

        let executor: Arc<dyn RequestExecutor> = Arc::new(client);
        let (fetcher, mut pages) =
            PaginatedFetcher::channel(template, executor, Arc::new(LibraryEntryParser::new()));

        let started_at = Instant::now();
        fetcher.start();
        let mut page = Self::receive(&mut pages).await?;

        if options.reverse && page.is_ok() && fetcher.links().last.is_some() {
            debug!("Jumping to the last page");
            fetcher.last();
            page = Self::receive(&mut pages).await?;
        }

        let step = if options.reverse {
            Direction::Previous
        } else {
            Direction::Next
        };

        let mut page_count = 0usize;
        let mut entry_count = 0usize;
        loop {
            match page {
                Ok(entries) => {
                    page_count += 1;
                    entry_count += entries.len();
                    debug!("Page {page_count}: {} entries", entries.len());
                    self.emit(&entries)?;
                }
                Err(e) if e.is_missing_page() => {
                    debug!("{e}");
                    break;
                }
                Err(e) => return Err(e),
            }

            if options.pages != 0 && page_count >= options.pages {
                break;
            }

            fetcher.navigate(step);
            page = Self::receive(&mut pages).await?;
        }

        info!(
            "Fetched {entry_count} entries across {page_count} pages in {:?}",
            started_at.elapsed()
        );
        Ok(())
    }

    async fn receive(
        pages: &mut UnboundedReceiver<PageResult<LibraryEntry>>,
    ) -> Result<PageResult<LibraryEntry>> {
        pages
            .recv()
            .await
            .ok_or_else(|| Error::Other("pagination worker stopped".to_string()))
    }

    fn emit(&self, entries: &[LibraryEntry]) -> Result<()> {
        for entry in entries {
            match self.cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string(entry)?),
                OutputFormat::Pretty => println!("{}", format_entry(entry)),
            }
        }
        Ok(())
    }
}

/// One-line human-readable rendering of an entry
fn format_entry(entry: &LibraryEntry) -> String {
    let status = entry
        .status
        .map_or_else(|| "-".to_string(), |s| s.to_string());
    let title = entry
        .media
        .as_ref()
        .and_then(|m| m.title.as_deref())
        .unwrap_or("(untitled)");
    let rating = entry
        .rating
        .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));

    format!(
        "{:>10}  {:<10} {:>5}  {:>4}  {title}",
        entry.id, status, entry.progress, rating
    )
}
