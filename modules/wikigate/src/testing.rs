// Test helpers for the validation pipeline.
//
// Two lookups in addition to StaticExplorers:
// - FailingExplorers (ExplorerLookup) — registry is unreachable
// - CountingExplorers (ExplorerLookup) — fixed list, counts snapshot calls
//
// Plus fixtures for a minimal valid article and an event article.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use explorer_client::{Explorer, ExplorerError};
use wikigate_common::{Article, Category, CategoryId, Event, Image, MetadataEntry, TagRef};

use crate::explorers::{ExplorerLookup, ExplorerSnapshot};

/// `n` space-separated words.
pub fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
}

pub fn explorer(id: &str, base_url: &str) -> Explorer {
    Explorer {
        id: id.to_string(),
        base_url: base_url.to_string(),
        explorer: id.trim_end_matches("_profile").to_string(),
        hidden: false,
    }
}

/// The smallest article that passes every rule.
pub fn valid_article() -> Article {
    Article::builder()
        .id("test-wiki")
        .title("T")
        .content(words(100))
        .summary("0123456789")
        .images(vec![Image {
            id: "QmImage".to_string(),
            kind: "image/jpeg".to_string(),
        }])
        .categories(vec![Category {
            id: CategoryId::Defi,
            title: "DeFi".to_string(),
        }])
        .metadata(vec![MetadataEntry::new("references", r#"[{"description":"x"}]"#)])
        .build()
}

/// A valid article tagged `Events` with an event link citation and one dated event.
pub fn event_article() -> Article {
    let mut article = valid_article();
    article.tags = vec![TagRef::new("Events")];
    article.metadata = vec![MetadataEntry::new(
        "references",
        r#"[{"description":"Event Link","url":"https://ethdenver.com"}]"#,
    )];
    article.events = Some(vec![Event {
        date: Some("2024-02-23".to_string()),
        title: Some("ETHDenver".to_string()),
        ..Default::default()
    }]);
    article
}

// ---------------------------------------------------------------------------
// FailingExplorers
// ---------------------------------------------------------------------------

/// Registry that is never reachable.
pub struct FailingExplorers;

#[async_trait]
impl ExplorerLookup for FailingExplorers {
    async fn snapshot(&self) -> Result<Arc<ExplorerSnapshot>, ExplorerError> {
        Err(ExplorerError::Network("connection refused".to_string()))
    }
}

// ---------------------------------------------------------------------------
// CountingExplorers
// ---------------------------------------------------------------------------

/// Fixed explorer list that records how often it was consulted.
pub struct CountingExplorers {
    snapshot: Arc<ExplorerSnapshot>,
    calls: AtomicUsize,
}

impl CountingExplorers {
    pub fn new(explorers: Vec<Explorer>) -> Self {
        Self {
            snapshot: Arc::new(ExplorerSnapshot::new(explorers)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExplorerLookup for CountingExplorers {
    async fn snapshot(&self) -> Result<Arc<ExplorerSnapshot>, ExplorerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.snapshot.clone())
    }
}
