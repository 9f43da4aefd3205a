//! Parser trait and parsed item types

use crate::request::{LibraryStatus, MediaKind};
use crate::types::{JsonObject, JsonValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maps a response envelope to the items of one page
///
/// Parsing is total: anything that cannot be mapped is skipped rather than
/// failing the page.
pub trait Parser: Send + Sync {
    /// Item produced for each record on the page
    type Item: Send + 'static;

    /// Extract the items from a response envelope
    fn parse(&self, envelope: &JsonValue) -> Vec<Self::Item>;
}

/// A JSON:API resource object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource id
    pub id: String,
    /// Resource type, e.g. `libraryEntries`
    #[serde(rename = "type")]
    pub kind: String,
    /// Resource attributes
    #[serde(default)]
    pub attributes: JsonObject,
    /// Resource relationships
    #[serde(default)]
    pub relationships: JsonObject,
}

impl Resource {
    /// Get a string attribute
    pub fn str_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(JsonValue::as_str)
    }

    /// Get an unsigned integer attribute
    pub fn u64_attr(&self, name: &str) -> Option<u64> {
        self.attributes.get(name).and_then(JsonValue::as_u64)
    }

    /// Get the target of a to-one relationship
    pub fn related(&self, name: &str) -> Option<ResourceIdentifier> {
        let data = self.relationships.get(name)?.get("data")?;
        ResourceIdentifier::deserialize(data).ok()
    }
}

/// Type and id pointing at another resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// Resource type
    #[serde(rename = "type")]
    pub kind: String,
    /// Resource id
    pub id: String,
}

/// Media referenced by a library entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSummary {
    /// Media id
    pub id: String,
    /// Anime or manga
    pub kind: MediaKind,
    /// Canonical title, when the media was side-loaded
    pub title: Option<String>,
}

/// One entry of a user's library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryEntry {
    /// Entry id
    pub id: String,
    /// Watch/read status
    pub status: Option<LibraryStatus>,
    /// Episodes watched or chapters read
    pub progress: u32,
    /// Times rewatched or reread
    pub reconsume_count: u32,
    /// Rating on a 10 point scale
    pub rating: Option<f64>,
    /// Last modification on the server
    pub updated_at: Option<DateTime<Utc>>,
    /// The tracked media
    pub media: Option<MediaSummary>,
}
