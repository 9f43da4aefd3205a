//! Parser implementations

use super::types::{LibraryEntry, MediaSummary, Parser, Resource};
use crate::request::{LibraryStatus, MediaKind};
use crate::types::JsonValue;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

// ============================================================================
// Resource Parser
// ============================================================================

/// Parses the resources in an envelope's `data` member
#[derive(Debug, Clone, Default)]
pub struct ResourceParser;

impl ResourceParser {
    /// Create a new resource parser
    pub fn new() -> Self {
        Self
    }
}

impl Parser for ResourceParser {
    type Item = Resource;

    fn parse(&self, envelope: &JsonValue) -> Vec<Resource> {
        resources_at(envelope, "data")
    }
}

/// Read the resources under `key`, which may hold an array or a single object
fn resources_at(envelope: &JsonValue, key: &str) -> Vec<Resource> {
    let values = match envelope.get(key) {
        Some(JsonValue::Array(items)) => items.iter().collect(),
        Some(item @ JsonValue::Object(_)) => vec![item],
        _ => Vec::new(),
    };

    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value.clone()) {
            Ok(resource) => Some(resource),
            Err(e) => {
                debug!("Skipping malformed resource in '{key}': {e}");
                None
            }
        })
        .collect()
}

// ============================================================================
// Library Entry Parser
// ============================================================================

/// Parses library entries and resolves their side-loaded media
#[derive(Debug, Clone, Default)]
pub struct LibraryEntryParser;

impl LibraryEntryParser {
    /// Create a new library entry parser
    pub fn new() -> Self {
        Self
    }

    fn entry(resource: &Resource, titles: &HashMap<(String, String), String>) -> LibraryEntry {
        let media = [MediaKind::Anime, MediaKind::Manga]
            .into_iter()
            .find_map(|kind| {
                resource
                    .related(kind.as_str())
                    .map(|target| (kind, target))
            })
            .map(|(kind, target)| MediaSummary {
                title: titles.get(&(target.kind, target.id.clone())).cloned(),
                id: target.id,
                kind,
            });

        LibraryEntry {
            id: resource.id.clone(),
            status: resource
                .str_attr("status")
                .and_then(|s| s.parse::<LibraryStatus>().ok()),
            progress: resource.u64_attr("progress").unwrap_or(0) as u32,
            reconsume_count: resource.u64_attr("reconsumeCount").unwrap_or(0) as u32,
            rating: resource
                .u64_attr("ratingTwenty")
                .map(|twenty| twenty as f64 / 2.0),
            updated_at: resource.str_attr("updatedAt").and_then(parse_timestamp),
            media,
        }
    }
}

impl Parser for LibraryEntryParser {
    type Item = LibraryEntry;

    fn parse(&self, envelope: &JsonValue) -> Vec<LibraryEntry> {
        let titles: HashMap<(String, String), String> = resources_at(envelope, "included")
            .into_iter()
            .filter_map(|media| {
                let title = media.str_attr("canonicalTitle")?.to_string();
                Some(((media.kind, media.id), title))
            })
            .collect();

        resources_at(envelope, "data")
            .iter()
            .filter(|resource| is_library_entry(&resource.kind))
            .map(|resource| Self::entry(resource, &titles))
            .collect()
    }
}

fn is_library_entry(kind: &str) -> bool {
    matches!(kind, "libraryEntries" | "library-entries" | "library_entries")
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
