//! CLI module
//!
//! Command-line interface for browsing a user's library page by page.
//!
//! # Commands
//!
//! - `browse` - Walk a library forwards (or backwards from the last page)
//! - `validate` - Check the configuration file

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
