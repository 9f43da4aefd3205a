//! Request descriptors
//!
//! A `Request` is a plain value describing one GET against the catalogue API.
//! Seed requests come from a `RequestTemplate`, which is rebuilt on every use
//! so no page cursor ever leaks from one fetch into the next. Follow-up pages
//! use the server-supplied link verbatim via `Request::for_link`.

mod library;
mod types;

pub use library::{LibraryRequest, LibraryStatus, MediaKind, DEFAULT_PAGE_LIMIT, DEFAULT_SORT};
pub use types::{Request, RequestTemplate};
