use std::sync::LazyLock;

use regex::Regex;
use url::Url;

static MARKDOWN_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

static HOSTNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://([^/?#]+)(?:[/?#]|$)").unwrap());

/// Count words separated by single ASCII spaces. Runs of spaces produce empty
/// tokens that are skipped; tabs and newlines are not separators.
pub fn count_words(text: &str) -> usize {
    text.split(' ').filter(|w| !w.is_empty()).count()
}

/// Length in UTF-16 code units, the unit the editor enforces its limits in.
/// Characters outside the Basic Multilingual Plane count twice.
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// True if `s` parses as an absolute URL.
pub fn is_valid_url(s: &str) -> bool {
    Url::parse(s).is_ok()
}

/// Serialized origin (scheme, host, port) of an absolute URL.
pub fn url_origin(s: &str) -> Option<String> {
    Url::parse(s).ok().map(|u| u.origin().ascii_serialization())
}

/// Host part of an http(s) URL, taken verbatim from the string.
pub fn hostname(url: &str) -> Option<&str> {
    HOSTNAME_RE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// A `[text](target)` link found in markdown content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownLink<'a> {
    pub text: &'a str,
    pub target: &'a str,
}

impl MarkdownLink<'_> {
    pub fn is_anchor(&self) -> bool {
        self.target.starts_with('#')
    }
}

pub fn extract_markdown_links(content: &str) -> Vec<MarkdownLink<'_>> {
    MARKDOWN_LINK_RE
        .captures_iter(content)
        .map(|cap| MarkdownLink {
            text: cap.get(1).map_or("", |m| m.as_str()),
            target: cap.get(2).map_or("", |m| m.as_str()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf16_length_counts_surrogate_pairs() {
        assert_eq!(utf16_len(""), 0);
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("é"), 1);
        assert_eq!(utf16_len("🚀"), 2);
        assert_eq!(utf16_len(&"🚀".repeat(31)), 62);
    }

    #[test]
    fn count_words_collapses_spaces_only() {
        assert_eq!(count_words("a b"), 2);
        assert_eq!(count_words("a  b"), 2);
        assert_eq!(count_words("  a   b  "), 2);
        assert_eq!(count_words("a\tb"), 1);
        assert_eq!(count_words("a\nb c"), 2);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn url_validity() {
        assert!(is_valid_url("https://iq.wiki/wiki/bitcoin"));
        assert!(is_valid_url("mailto:someone@example.com"));
        assert!(!is_valid_url("//iq.wiki/wiki"));
        assert!(!is_valid_url("iq.wiki"));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn origin_ignores_path_and_query() {
        assert_eq!(
            url_origin("https://etherscan.io/address/0xabc?tab=1").as_deref(),
            Some("https://etherscan.io")
        );
        assert_eq!(
            url_origin("http://localhost:8080/x").as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(url_origin("not a url"), None);
    }

    #[test]
    fn hostname_is_extracted_case_insensitively() {
        assert_eq!(hostname("HTTPS://iq.wiki/wiki/x"), Some("iq.wiki"));
        assert_eq!(hostname("https://blog.everipedia.org"), Some("blog.everipedia.org"));
        assert_eq!(hostname("ftp://iq.wiki"), None);
    }

    #[test]
    fn extracts_multiple_links_per_line() {
        let links = extract_markdown_links("see [one](https://a.io) and [two](#two)\n[three]()");
        assert_eq!(
            links,
            vec![
                MarkdownLink { text: "one", target: "https://a.io" },
                MarkdownLink { text: "two", target: "#two" },
                MarkdownLink { text: "three", target: "" },
            ]
        );
        assert!(links[1].is_anchor());
    }

    #[test]
    fn links_do_not_span_lines() {
        assert!(extract_markdown_links("[a\nb](https://x.io)").is_empty());
    }
}
