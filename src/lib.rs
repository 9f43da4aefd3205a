// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]

//! # kitsu-pager
//!
//! Link-following pagination over the Kitsu JSON:API.
//!
//! A [`PaginatedFetcher`] issues a seed request built from a
//! [`RequestTemplate`], then walks the collection by following the
//! `first`/`prev`/`next`/`last` links of whichever page arrived most
//! recently. Navigation calls never block: they are queued and executed one
//! at a time, so pages are delivered in call order.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kitsu_pager::{
//!     HttpClient, LibraryEntryParser, LibraryRequest, MediaKind, PaginatedFetcher,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> kitsu_pager::Result<()> {
//!     let client = Arc::new(HttpClient::new()?);
//!     let (fetcher, mut pages) = PaginatedFetcher::channel(
//!         LibraryRequest::new(42, MediaKind::Anime),
//!         client,
//!         Arc::new(LibraryEntryParser::new()),
//!     );
//!
//!     fetcher.start();
//!     while let Some(page) = pages.recv().await {
//!         let Ok(entries) = page else { break };
//!         println!("{} entries", entries.len());
//!         fetcher.next();
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                       PaginatedFetcher                        │
//! │  start()  next()  prev()  first()  last()  →  command queue   │
//! └───────────────────────────────────────────────────────────────┘
//!                                │ one worker, FIFO
//! ┌──────────────────┬───────────┴──────────┬─────────────────────┐
//! │ RequestTemplate  │   RequestExecutor    │       Parser        │
//! ├──────────────────┼──────────────────────┼─────────────────────┤
//! │ LibraryRequest   │ HttpClient           │ ResourceParser      │
//! │                  │ Retry / Rate limit   │ LibraryEntryParser  │
//! └──────────────────┴──────────────────────┴─────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Bearer token authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Link-following pagination
pub mod pagination;

/// Seed requests
pub mod request;

/// Page parsers
pub mod decode;

/// YAML configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::Config;
pub use decode::{LibraryEntry, LibraryEntryParser, Parser, Resource, ResourceParser};
pub use http::{HttpClient, HttpClientConfig};
pub use pagination::{Direction, LinkSet, PageResult, PaginatedFetcher, RequestExecutor};
pub use request::{LibraryRequest, LibraryStatus, MediaKind, Request, RequestTemplate};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
