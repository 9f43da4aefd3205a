//! Pagination module
//!
//! Link-following pagination over JSON:API style collections.
//!
//! # Overview
//!
//! A `PaginatedFetcher` issues a seed request, reads the `links` container
//! of every successful response into a `LinkSet`, and then follows those
//! links on `next()`, `prev()`, `first()` and `last()`. Requests run one at a
//! time on a dedicated worker task, in the order they were asked for, and a
//! failed request never disturbs the current `LinkSet`.

mod fetcher;
mod types;

pub use fetcher::PaginatedFetcher;
pub use types::{Direction, LinkSet, PageResult, RequestExecutor};
