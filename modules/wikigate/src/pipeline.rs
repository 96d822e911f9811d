use std::sync::Arc;

use explorer_client::{ExplorerClient, ExplorerError};
use serde::Serialize;
use thiserror::Error;
use wikigate_common::constants::{
    WIKI_CONTENT_MIN_WORDS, WIKI_SUMMARY_MAX_LENGTH, WIKI_TITLE_MAX_LENGTH,
};
use wikigate_common::{Article, Config, TagPolicy, ValidatorCode};

use crate::events::{is_event_date_missing, is_event_url_missing};
use crate::explorers::{ExplorerCache, ExplorerLookup};
use crate::links::are_content_links_verified;
use crate::media::{is_any_media_uploading, is_media_valid};
use crate::metadata::{has_citations, metadata_violations};
use crate::text::{count_words, utf16_len};

/// Validation could not reach a verdict. Distinct from an invalid article.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Validation temporarily unavailable: {0}")]
    Unavailable(#[from] ExplorerError),
}

/// The checks an article goes through, in evaluation order.
///
/// The order is part of the editor contract: the most easily fixed problem is
/// reported first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    TitlePresent,
    TitleLength,
    ContentPresent,
    ContentWordCount,
    ContentLinks,
    ImagePresent,
    CategoryPresent,
    SummaryLength,
    MediaUploading,
    CitationPresent,
    EventLink,
    EventDate,
    MediaValid,
    TagsRecognized,
    MetadataValid,
}

impl Rule {
    pub const ORDER: [Rule; 15] = [
        Rule::TitlePresent,
        Rule::TitleLength,
        Rule::ContentPresent,
        Rule::ContentWordCount,
        Rule::ContentLinks,
        Rule::ImagePresent,
        Rule::CategoryPresent,
        Rule::SummaryLength,
        Rule::MediaUploading,
        Rule::CitationPresent,
        Rule::EventLink,
        Rule::EventDate,
        Rule::MediaValid,
        Rule::TagsRecognized,
        Rule::MetadataValid,
    ];

    pub fn field(&self) -> &'static str {
        match self {
            Rule::TitlePresent | Rule::TitleLength => "title",
            Rule::ContentPresent | Rule::ContentWordCount | Rule::ContentLinks => "content",
            Rule::ImagePresent => "images",
            Rule::CategoryPresent => "categories",
            Rule::SummaryLength => "summary",
            Rule::MediaUploading | Rule::MediaValid => "media",
            Rule::CitationPresent | Rule::MetadataValid => "metadata",
            Rule::EventLink | Rule::EventDate => "events",
            Rule::TagsRecognized => "tags",
        }
    }

    pub fn code(&self) -> ValidatorCode {
        match self {
            Rule::TitlePresent | Rule::TitleLength => ValidatorCode::TitleError,
            Rule::ContentPresent | Rule::ContentWordCount => ValidatorCode::WordCountError,
            Rule::ContentLinks => ValidatorCode::ExternalUrlError,
            Rule::ImagePresent => ValidatorCode::ImageError,
            Rule::CategoryPresent => ValidatorCode::CategoryError,
            Rule::SummaryLength => ValidatorCode::SummaryError,
            Rule::MediaUploading | Rule::MediaValid => ValidatorCode::MediaError,
            Rule::CitationPresent | Rule::MetadataValid => ValidatorCode::MetadataError,
            Rule::EventLink | Rule::EventDate => ValidatorCode::EventsError,
            Rule::TagsRecognized => ValidatorCode::TagError,
        }
    }

    /// Whether the rule needs the explorer registry.
    pub fn needs_explorers(&self) -> bool {
        matches!(self, Rule::MetadataValid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub rule: Rule,
    pub field: String,
    pub code: ValidatorCode,
    pub message: String,
}

impl ValidationIssue {
    fn new(rule: Rule, message: impl Into<String>) -> Self {
        Self {
            rule,
            field: rule.field().to_string(),
            code: rule.code(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "issues", rename_all = "snake_case")]
pub enum Verdict {
    Valid,
    Invalid(Vec<ValidationIssue>),
}

impl Verdict {
    fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        if issues.is_empty() {
            Verdict::Valid
        } else {
            Verdict::Invalid(issues)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Verdict::Valid => &[],
            Verdict::Invalid(issues) => issues,
        }
    }

    /// The message shown to the editor in fail-fast mode.
    pub fn error(&self) -> Option<&str> {
        self.issues().first().map(|i| i.message.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Stop at the first failing rule.
    #[default]
    FailFast,
    /// Evaluate every rule and report all failures in rule order.
    CollectAll,
}

/// Evaluate one synchronous rule. Returns the failure message, if any.
fn check(rule: Rule, article: &Article, tag_policy: TagPolicy) -> Option<String> {
    match rule {
        Rule::TitlePresent => article
            .title
            .is_empty()
            .then(|| "Add a Title at the top for this Wiki to continue".to_string()),
        Rule::TitleLength => (utf16_len(&article.title) > WIKI_TITLE_MAX_LENGTH)
            .then(|| format!("Title should be less than {WIKI_TITLE_MAX_LENGTH} characters")),
        Rule::ContentPresent => article
            .content
            .is_empty()
            .then(|| "Add a Content section to continue".to_string()),
        Rule::ContentWordCount => {
            let words = count_words(&article.content);
            (words < WIKI_CONTENT_MIN_WORDS).then(|| {
                format!(
                    "Add a minimum of {WIKI_CONTENT_MIN_WORDS} words in the content section to continue. You have written {words}"
                )
            })
        }
        Rule::ContentLinks => (!are_content_links_verified(&article.content))
            .then(|| "Please remove all external links from the content".to_string()),
        Rule::ImagePresent => article
            .images
            .is_empty()
            .then(|| "Add a main image on the right column to continue".to_string()),
        Rule::CategoryPresent => article
            .categories
            .is_empty()
            .then(|| "Add one category to continue".to_string()),
        Rule::SummaryLength => (utf16_len(&article.summary) > WIKI_SUMMARY_MAX_LENGTH)
            .then(|| format!("Summary exceeds maximum limit of {WIKI_SUMMARY_MAX_LENGTH}")),
        Rule::MediaUploading => is_any_media_uploading(article.media_items())
            .then(|| "Some media are still uploading, please wait".to_string()),
        Rule::CitationPresent => {
            (!has_citations(article)).then(|| "Please add at least one citation".to_string())
        }
        Rule::EventLink => is_event_url_missing(article).then(|| {
            "Please cite the event official website with 'Event Link' description".to_string()
        }),
        Rule::EventDate => is_event_date_missing(article).then(|| {
            "Please open the \"Edit Wiki Details Modal\" and enter a valid event date".to_string()
        }),
        Rule::MediaValid => {
            (!is_media_valid(article.media_items())).then(|| "Media is invalid".to_string())
        }
        Rule::TagsRecognized => match tag_policy {
            TagPolicy::Drop => None,
            TagPolicy::Reject => {
                let unknown = article.unrecognized_tags();
                (!unknown.is_empty()).then(|| format!("Unrecognized tag: {}", unknown.join(", ")))
            }
        },
        Rule::MetadataValid => None,
    }
}

fn static_issues(article: &Article, mode: ValidationMode, tag_policy: TagPolicy) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for rule in Rule::ORDER.into_iter().filter(|r| !r.needs_explorers()) {
        if let Some(message) = check(rule, article, tag_policy) {
            tracing::debug!(wiki = %article.id, rule = ?rule, message = %message, "Validation rule failed");
            issues.push(ValidationIssue::new(rule, message));
            if mode == ValidationMode::FailFast {
                break;
            }
        }
    }

    issues
}

/// Run every rule that does not need the explorer registry.
pub fn validate_static(article: &Article, mode: ValidationMode, tag_policy: TagPolicy) -> Verdict {
    Verdict::from_issues(static_issues(article, mode, tag_policy))
}

/// Article validator backed by an explorer lookup.
pub struct Validator {
    explorers: Arc<dyn ExplorerLookup>,
    tag_policy: TagPolicy,
}

impl Validator {
    pub fn new(explorers: Arc<dyn ExplorerLookup>) -> Self {
        Self {
            explorers,
            tag_policy: TagPolicy::default(),
        }
    }

    pub fn with_tag_policy(mut self, tag_policy: TagPolicy) -> Self {
        self.tag_policy = tag_policy;
        self
    }

    /// Build a validator that reads explorers from the configured registry through a TTL cache.
    pub fn from_config(config: &Config) -> Result<Self, ExplorerError> {
        let client = ExplorerClient::new(&config.explorer_api_url, config.explorer_fetch_timeout)?;
        let cache = ExplorerCache::new(client, config.explorer_cache_ttl, config.explorer_page_limit)
            .with_retry_backoff(config.explorer_retry_backoff);
        Ok(Self::new(Arc::new(cache)).with_tag_policy(config.tag_policy))
    }

    pub fn tag_policy(&self) -> TagPolicy {
        self.tag_policy
    }

    /// Fail-fast validation: at most one issue is reported.
    pub async fn validate(&self, article: &Article) -> Result<Verdict, ValidationError> {
        self.validate_with(article, ValidationMode::FailFast).await
    }

    pub async fn validate_with(
        &self,
        article: &Article,
        mode: ValidationMode,
    ) -> Result<Verdict, ValidationError> {
        let mut issues = static_issues(article, mode, self.tag_policy);
        if mode == ValidationMode::FailFast && !issues.is_empty() {
            return Ok(Verdict::from_issues(issues));
        }

        let snapshot = self.explorers.snapshot().await?;
        let violations = metadata_violations(&article.metadata, &snapshot);
        if !violations.is_empty() {
            for v in &violations {
                tracing::debug!(wiki = %article.id, violation = %v, "Metadata entry rejected");
            }

            match mode {
                ValidationMode::FailFast => issues.push(ValidationIssue::new(
                    Rule::MetadataValid,
                    "Invalid metadata Ids or explorer metadata",
                )),
                ValidationMode::CollectAll => {
                    issues.extend(violations.iter().map(|v| ValidationIssue {
                        field: format!("metadata.{}", v.id()),
                        ..ValidationIssue::new(Rule::MetadataValid, v.to_string())
                    }))
                }
            }
        }

        let verdict = Verdict::from_issues(issues);
        if verdict.is_valid() {
            tracing::debug!(wiki = %article.id, "Article passed validation");
        }
        Ok(verdict)
    }
}
