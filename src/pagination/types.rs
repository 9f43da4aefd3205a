//! Pagination types and traits

use crate::error::{Error, Result};
use crate::request::Request;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Items of one page, or the reason the page could not be produced
pub type PageResult<T> = Result<Vec<T>>;

/// Navigation links of the most recent page
///
/// Read from the `links` object of a response envelope. Every field is
/// independently optional. On the wire the previous page is `prev`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSet {
    /// Link to the first page
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub first: Option<String>,
    /// Link to the next page
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub next: Option<String>,
    /// Link to the previous page
    #[serde(
        rename = "prev",
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub previous: Option<String>,
    /// Link to the last page
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub last: Option<String>,
}

impl LinkSet {
    /// Create an empty link set
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the link set from a response envelope
    ///
    /// A missing `links` key, or one that is not an object, yields an empty
    /// set. Values that are not strings are treated as absent.
    pub fn from_envelope(envelope: &Value) -> Self {
        match envelope.get("links") {
            Some(links @ Value::Object(_)) => Self::deserialize(links).unwrap_or_else(|e| {
                debug!("Ignoring unreadable 'links' object: {e}");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Check whether at least one link is present
    pub fn has_any_links(&self) -> bool {
        self.first.is_some() || self.next.is_some() || self.previous.is_some() || self.last.is_some()
    }

    /// Get the link for a direction
    pub fn get(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::First => self.first.as_deref(),
            Direction::Previous => self.previous.as_deref(),
            Direction::Next => self.next.as_deref(),
            Direction::Last => self.last.as_deref(),
        }
    }

    /// Get the link for a direction, or the matching "no such page" error
    pub fn resolve(&self, direction: Direction) -> Result<&str> {
        if !self.has_any_links() {
            return Err(direction.missing_error());
        }
        self.get(direction).ok_or_else(|| direction.missing_error())
    }
}

fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(link) => Ok(Some(link)),
        _ => Ok(None),
    }
}

/// A navigation target within a paginated collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    First,
    Previous,
    Next,
    Last,
}

impl Direction {
    /// Error reported when the link for this direction is unavailable
    pub fn missing_error(self) -> Error {
        match self {
            Direction::First => Error::NoFirstPage,
            Direction::Previous => Error::NoPreviousPage,
            Direction::Next => Error::NoNextPage,
            Direction::Last => Error::NoLastPage,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::First => "first",
            Direction::Previous => "prev",
            Direction::Next => "next",
            Direction::Last => "last",
        };
        f.write_str(name)
    }
}

/// Performs requests on behalf of a fetcher
///
/// Returns the raw response body. Any error is handed to the page callback
/// unchanged.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Execute a request and return its body
    async fn execute(&self, request: &Request) -> Result<String>;
}
