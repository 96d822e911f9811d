use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::WikiGateError;

pub const DEFAULT_EXPLORER_API_URL: &str = "https://graph.everipedia.org/graphql";
pub const DEFAULT_EXPLORER_CACHE_TTL_HOURS: u64 = 12;
pub const DEFAULT_EXPLORER_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_EXPLORER_RETRY_BACKOFF_SECS: u64 = 60;
/// The explorer registry is only ever read one page deep.
pub const DEFAULT_EXPLORER_PAGE_LIMIT: u32 = 30;

/// What to do with tag ids outside the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagPolicy {
    /// Silently drop them before validation.
    #[default]
    Drop,
    /// Fail validation with a tag error.
    Reject,
}

impl FromStr for TagPolicy {
    type Err = WikiGateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(TagPolicy::Drop),
            "reject" => Ok(TagPolicy::Reject),
            other => Err(WikiGateError::Config(format!(
                "unknown tag policy '{other}', expected 'drop' or 'reject'"
            ))),
        }
    }
}

/// Validator configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub explorer_api_url: String,
    pub explorer_cache_ttl: Duration,
    pub explorer_fetch_timeout: Duration,
    /// How long a stale snapshot is served after a failed refresh before retrying.
    pub explorer_retry_backoff: Duration,
    pub explorer_page_limit: u32,
    pub tag_policy: TagPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            explorer_api_url: DEFAULT_EXPLORER_API_URL.to_string(),
            explorer_cache_ttl: Duration::from_secs(DEFAULT_EXPLORER_CACHE_TTL_HOURS * 3600),
            explorer_fetch_timeout: Duration::from_secs(DEFAULT_EXPLORER_FETCH_TIMEOUT_SECS),
            explorer_retry_backoff: Duration::from_secs(DEFAULT_EXPLORER_RETRY_BACKOFF_SECS),
            explorer_page_limit: DEFAULT_EXPLORER_PAGE_LIMIT,
            tag_policy: TagPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, WikiGateError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WikiGateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ttl_hours: u64 = parse_or(&lookup, "EXPLORER_CACHE_TTL_HOURS", DEFAULT_EXPLORER_CACHE_TTL_HOURS)?;
        let timeout_secs: u64 = parse_or(
            &lookup,
            "EXPLORER_FETCH_TIMEOUT_SECS",
            DEFAULT_EXPLORER_FETCH_TIMEOUT_SECS,
        )?;
        let backoff_secs: u64 = parse_or(
            &lookup,
            "EXPLORER_RETRY_BACKOFF_SECS",
            DEFAULT_EXPLORER_RETRY_BACKOFF_SECS,
        )?;
        let ttl_secs = ttl_hours.checked_mul(3600).ok_or_else(|| {
            WikiGateError::Config(format!(
                "EXPLORER_CACHE_TTL_HOURS is out of range: {ttl_hours}"
            ))
        })?;
        let page_limit: u32 = parse_or(&lookup, "EXPLORER_PAGE_LIMIT", DEFAULT_EXPLORER_PAGE_LIMIT)?;
        if page_limit == 0 {
            return Err(WikiGateError::Config(
                "EXPLORER_PAGE_LIMIT must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            explorer_api_url: lookup("EXPLORER_API_URL")
                .unwrap_or_else(|| DEFAULT_EXPLORER_API_URL.to_string()),
            explorer_cache_ttl: Duration::from_secs(ttl_secs),
            explorer_fetch_timeout: Duration::from_secs(timeout_secs),
            explorer_retry_backoff: Duration::from_secs(backoff_secs),
            explorer_page_limit: page_limit,
            tag_policy: parse_or(&lookup, "WIKIGATE_TAG_POLICY", TagPolicy::default())?,
        })
    }

    pub fn log_summary(&self) {
        tracing::info!(
            explorer_api_url = %self.explorer_api_url,
            explorer_cache_ttl_secs = self.explorer_cache_ttl.as_secs(),
            explorer_fetch_timeout_secs = self.explorer_fetch_timeout.as_secs(),
            explorer_retry_backoff_secs = self.explorer_retry_backoff.as_secs(),
            explorer_page_limit = self.explorer_page_limit,
            tag_policy = ?self.tag_policy,
            "Validator configuration"
        );
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, WikiGateError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| WikiGateError::Config(format!("{key} has an invalid value: '{raw}'"))),
        None => Ok(default),
    }
}
