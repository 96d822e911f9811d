use std::fmt;

use wikigate_common::constants::{is_common_meta_id, is_edit_specific_meta_id};
use wikigate_common::{Article, MetaValue, MetadataEntry};

use crate::explorers::ExplorerSnapshot;
use crate::text::url_origin;

/// At least one citation is present in the `references` entry.
pub fn has_citations(article: &Article) -> bool {
    match article.references() {
        Ok(references) => !references.is_empty(),
        Err(e) => {
            tracing::debug!(wiki = %article.id, error = %e, "References could not be read");
            false
        }
    }
}

/// Why a metadata entry was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataViolation {
    /// Not a common, edit-specific, or explorer id.
    UnknownId(String),
    /// Explorer entry whose value is not a URL on the explorer's origin.
    ExplorerUrl { id: String, value: String },
}

impl MetadataViolation {
    pub fn id(&self) -> &str {
        match self {
            MetadataViolation::UnknownId(id) => id,
            MetadataViolation::ExplorerUrl { id, .. } => id,
        }
    }
}

impl fmt::Display for MetadataViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataViolation::UnknownId(id) => write!(f, "Invalid metadata id: {id}"),
            MetadataViolation::ExplorerUrl { id, .. } => write!(f, "Explorer {id} value is not valid"),
        }
    }
}

fn check_entry(entry: &MetadataEntry, explorers: &ExplorerSnapshot) -> Option<MetadataViolation> {
    if let Some(explorer) = explorers.get(&entry.id) {
        let value = match entry.resolve() {
            Ok(MetaValue::Text(text)) => text,
            _ => String::new(),
        };
        let violation = || MetadataViolation::ExplorerUrl {
            id: entry.id.clone(),
            value: value.clone(),
        };

        let Some(origin) = url_origin(&value) else {
            return Some(violation());
        };

        return match url_origin(&explorer.base_url) {
            Some(expected) if expected == origin => None,
            Some(_) => Some(violation()),
            None => {
                tracing::warn!(
                    explorer = %explorer.id,
                    base_url = %explorer.base_url,
                    "Explorer has an unparseable base URL"
                );
                Some(violation())
            }
        };
    }

    if is_common_meta_id(&entry.id) || is_edit_specific_meta_id(&entry.id) {
        None
    } else {
        Some(MetadataViolation::UnknownId(entry.id.clone()))
    }
}

/// Every rejected entry, in submission order.
pub fn metadata_violations(
    metadata: &[MetadataEntry],
    explorers: &ExplorerSnapshot,
) -> Vec<MetadataViolation> {
    metadata
        .iter()
        .filter_map(|entry| check_entry(entry, explorers))
        .collect()
}

/// The whole set is rejected if any single entry is invalid.
pub fn is_metadata_valid(metadata: &[MetadataEntry], explorers: &ExplorerSnapshot) -> bool {
    metadata_violations(metadata, explorers).is_empty()
}
