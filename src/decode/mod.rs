//! Response parsing
//!
//! Turns a decoded response envelope into domain items. The fetcher is
//! generic over the `Parser`, so callers can inject their own mapping; two
//! parsers ship with the crate:
//!
//! - `ResourceParser` - raw JSON:API resources from `data`
//! - `LibraryEntryParser` - typed library entries with their side-loaded media

mod parsers;
mod types;

pub use parsers::{LibraryEntryParser, ResourceParser};
pub use types::{LibraryEntry, MediaSummary, Parser, Resource, ResourceIdentifier};
