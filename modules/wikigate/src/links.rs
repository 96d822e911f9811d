use std::sync::LazyLock;

use regex::Regex;
use wikigate_common::constants::{
    FIRST_PARTY_DOMAIN_SUFFIX, FIRST_PARTY_HOSTS, WHITELISTED_DOMAINS, WHITELISTED_LINK_NAMES,
};

use crate::text::{extract_markdown_links, hostname, is_valid_url, MarkdownLink};

static WHITELISTED_DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    let domains: Vec<String> = WHITELISTED_DOMAINS.iter().map(|d| regex::escape(d)).collect();
    Regex::new(&format!(r"^https?://(www\.)?({})", domains.join("|"))).unwrap()
});

/// Whether a single link may stay in article content.
pub fn is_link_verified(link: &MarkdownLink<'_>) -> bool {
    // Named embeds carry an editor token instead of a URL.
    if !link.text.is_empty()
        && !link.target.is_empty()
        && WHITELISTED_LINK_NAMES.contains(&link.text)
        && !is_valid_url(link.target)
    {
        return true;
    }

    if !link.target.is_empty() && !link.is_anchor() {
        return WHITELISTED_DOMAIN_RE.is_match(link.target);
    }

    true
}

/// True when every markdown link in `content` points at an allowed destination.
pub fn are_content_links_verified(content: &str) -> bool {
    extract_markdown_links(content).iter().all(|link| {
        let verified = is_link_verified(link);
        if !verified {
            tracing::debug!(text = link.text, target = link.target, "Unverified content link");
        }
        verified
    })
}

fn is_first_party_host(host: &str) -> bool {
    FIRST_PARTY_HOSTS.contains(&host) || host.ends_with(FIRST_PARTY_DOMAIN_SUFFIX)
}

/// Number of links in `content` that point at first-party wiki hosts.
pub fn count_internal_links(content: &str) -> usize {
    extract_markdown_links(content)
        .iter()
        .filter(|link| !link.target.is_empty() && !link.is_anchor())
        .filter(|link| hostname(link.target).is_some_and(is_first_party_host))
        .count()
}
