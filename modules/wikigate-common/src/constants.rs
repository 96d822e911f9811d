// --- Structural limits ---

pub const WIKI_TITLE_MAX_LENGTH: usize = 60;
pub const WIKI_SUMMARY_MAX_LENGTH: usize = 255;
pub const WIKI_CONTENT_MIN_WORDS: usize = 100;
pub const MAX_MEDIA_COUNT: usize = 25;
pub const IPFS_HASH_LENGTH: usize = 46;

/// Media ids carry this suffix until the upload has finished.
pub const MEDIA_UPLOAD_PENDING_SUFFIX: &str = "default";

// --- Score shape ---

pub const MIN_CONTENT_WORD_COUNT: usize = 10;
pub const GOOD_CONTENT_WORD_COUNT: usize = 500;
pub const IDEAL_CONTENT_WORD_COUNT: usize = 1500;

pub const CONTENT_SCORE_WEIGHT: f64 = 0.8;
pub const INTERNAL_LINKS_SCORE_WEIGHT: f64 = 0.5;
pub const CITATIONS_SCORE_WEIGHT: f64 = 0.5;
pub const MEDIA_SCORE_WEIGHT: f64 = 0.3;
pub const TAGS_SCORE_WEIGHT: f64 = 0.3;
pub const SUMMARY_SCORE_WEIGHT: f64 = 0.5;
pub const SOCIAL_SCORE_WEIGHT: f64 = 0.5;

pub const IDEAL_INTERNAL_LINKS_COUNT: usize = 10;
pub const IDEAL_CITATIONS_COUNT: usize = 10;
pub const IDEAL_MEDIA_COUNT: usize = 5;
pub const IDEAL_TAGS_COUNT: usize = 3;
pub const IDEAL_SUMMARY_LENGTH: usize = 100;
pub const IDEAL_SOCIAL_MEDIA_COUNT: usize = 4;

// --- Link allow-lists ---

/// Domain prefixes external content links may point at.
pub const WHITELISTED_DOMAINS: &[&str] = &[
    "youtube.com/watch",
    "youtu.be",
    "vimeo.com",
    "alpha.everipedia.org/wiki",
    "beta.everipedia.org/wiki",
    "iq.wiki/wiki",
    "ipfs.everipedia.org/ipfs",
];

/// Link texts the editor uses for embeds; their targets are not URLs.
pub const WHITELISTED_LINK_NAMES: &[&str] = &["YOUTUBE@VID", "DUNE@EMBED"];

/// Hosts counted as internal links by the scorer.
pub const FIRST_PARTY_HOSTS: &[&str] = &["everipedia.org", "iq.wiki"];

/// Any subdomain of this domain is first-party as well.
pub const FIRST_PARTY_DOMAIN_SUFFIX: &str = ".everipedia.org";

// --- Metadata ids ---

pub const REFERENCES_META_ID: &str = "references";

/// Description a citation must carry to count as an event's official website.
pub const EVENT_LINK_DESCRIPTION: &str = "event link";

pub const COMMON_META_IDS: &[&str] = &[
    REFERENCES_META_ID,
    "website",
    "contract_url",
    "location",
    "email_url",
    "facebook_profile",
    "instagram_profile",
    "twitter_profile",
    "linkedin_profile",
    "youtube_profile",
    "discord_profile",
    "reddit_profile",
    "telegram_profile",
    "github_profile",
    "coinmarketcap_url",
    "coingecko_profile",
    "opensea_profile",
    "medium_profile",
    "mirror_profile",
    "tiktok_profile",
    "etherscan_profile",
    "arbiscan_profile",
    "polygonscan_profile",
    "bscscan_profile",
    "optimistic_etherscan_profile",
    "basescan_profile",
    "ftmscan_profile",
    "solscan_profile",
    "avascan_profile",
    "nearblocks_profile",
    "troscan_profile",
    "xrpscan_profile",
    "kavascan_profile",
    "tonscan_profile",
    "celoscan_profile",
    "cronoscan_profile",
    "zkscan_profile",
    "explorer_injective_profile",
    "blastscan_profile",
];

/// Ids written by the editor when an existing wiki is revised.
pub const EDIT_SPECIFIC_META_IDS: &[&str] = &[
    "previous_cid",
    "commit-message",
    "words-changed",
    "percent-changed",
    "blocks-changed",
    "wiki-score",
];

pub fn is_common_meta_id(id: &str) -> bool {
    COMMON_META_IDS.contains(&id)
}

pub fn is_edit_specific_meta_id(id: &str) -> bool {
    EDIT_SPECIFIC_META_IDS.contains(&id)
}
