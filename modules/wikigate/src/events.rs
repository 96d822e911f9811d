use wikigate_common::constants::EVENT_LINK_DESCRIPTION;
use wikigate_common::{Article, Tag};

pub fn is_event_wiki(article: &Article) -> bool {
    article.has_tag(Tag::Events)
}

/// An event wiki must cite the event's official website with an "Event Link" description.
/// Unreadable references count as missing.
pub fn is_event_url_missing(article: &Article) -> bool {
    if !is_event_wiki(article) {
        return false;
    }

    match article.references() {
        Ok(references) => !references
            .iter()
            .any(|r| r.description().to_lowercase() == EVENT_LINK_DESCRIPTION),
        Err(e) => {
            tracing::warn!(wiki = %article.id, error = %e, "Unreadable references on event wiki");
            true
        }
    }
}

/// An event wiki must carry at least one event record.
pub fn is_event_date_missing(article: &Article) -> bool {
    is_event_wiki(article) && article.event_records().is_empty()
}

pub fn is_event_wiki_valid(article: &Article) -> bool {
    !is_event_url_missing(article) && !is_event_date_missing(article)
}
