//! Library entry requests
//!
//! Builds the seed request for a user's library on a Kitsu-style JSON:API
//! service: `GET /library-entries` filtered by user and media kind.

use super::types::{Request, RequestTemplate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of entries per page
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Default sort order, most recently updated first
pub const DEFAULT_SORT: &str = "-updatedAt";

/// Kind of media tracked in a library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Anime,
    Manga,
}

impl MediaKind {
    /// Wire name of the kind, also the relationship name of the media
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Anime => "anime",
            MediaKind::Manga => "manga",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anime" => Ok(MediaKind::Anime),
            "manga" => Ok(MediaKind::Manga),
            other => Err(format!("unknown media kind '{other}'")),
        }
    }
}

/// Status of a library entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LibraryStatus {
    Current,
    Planned,
    Completed,
    OnHold,
    Dropped,
}

impl LibraryStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryStatus::Current => "current",
            LibraryStatus::Planned => "planned",
            LibraryStatus::Completed => "completed",
            LibraryStatus::OnHold => "on_hold",
            LibraryStatus::Dropped => "dropped",
        }
    }
}

impl fmt::Display for LibraryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LibraryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" => Ok(LibraryStatus::Current),
            "planned" => Ok(LibraryStatus::Planned),
            "completed" => Ok(LibraryStatus::Completed),
            "on_hold" | "on-hold" => Ok(LibraryStatus::OnHold),
            "dropped" => Ok(LibraryStatus::Dropped),
            other => Err(format!("unknown library status '{other}'")),
        }
    }
}

/// Seed request for one user's library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryRequest {
    /// Owner of the library
    pub user_id: u64,
    /// Media kind to list
    pub kind: MediaKind,
    /// Only include entries with these statuses (empty = all)
    pub statuses: Vec<LibraryStatus>,
    /// Entries per page
    pub page_limit: u32,
    /// Offset of the first page
    pub initial_offset: u32,
    /// Whether to side-load the media resource of each entry
    pub include_media: bool,
    /// Sort expression
    pub sort: String,
}

impl LibraryRequest {
    /// Create a library request with default paging
    pub fn new(user_id: u64, kind: MediaKind) -> Self {
        Self {
            user_id,
            kind,
            statuses: Vec::new(),
            page_limit: DEFAULT_PAGE_LIMIT,
            initial_offset: 0,
            include_media: true,
            sort: DEFAULT_SORT.to_string(),
        }
    }

    /// Filter by statuses
    #[must_use]
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = LibraryStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit;
        self
    }

    /// Set the offset of the first page
    #[must_use]
    pub fn with_initial_offset(mut self, offset: u32) -> Self {
        self.initial_offset = offset;
        self
    }

    /// Toggle side-loading of media
    #[must_use]
    pub fn with_media(mut self, include: bool) -> Self {
        self.include_media = include;
        self
    }

    /// Set the sort expression
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }
}

impl RequestTemplate for LibraryRequest {
    fn build(&self) -> Request {
        let mut request = Request::get("/library-entries")
            .query("filter[userId]", self.user_id.to_string())
            .query("filter[kind]", self.kind.as_str())
            .query("page[limit]", self.page_limit.to_string())
            .query("page[offset]", self.initial_offset.to_string());

        if !self.statuses.is_empty() {
            let statuses: Vec<&str> = self.statuses.iter().map(LibraryStatus::as_str).collect();
            request = request.query("filter[status]", statuses.join(","));
        }

        if self.include_media {
            request = request.query("include", self.kind.as_str());
        }

        if !self.sort.is_empty() {
            request = request.query("sort", self.sort.as_str());
        }

        request
    }
}
