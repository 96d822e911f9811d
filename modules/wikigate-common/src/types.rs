use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::constants::REFERENCES_META_ID;
use crate::error::WikiGateError;
use crate::metadata::{MetadataEntry, Reference};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Zh,
    Ko,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CategoryId {
    Nfts,
    Defi,
    Exchanges,
    Cryptocurrencies,
    Daos,
    People,
    Dapps,
    Organizations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum MediaType {
    #[serde(rename = "GALLERY")]
    Gallery,
    #[serde(rename = "ICON")]
    Icon,
    /// Any type string the editor does not know about.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum MediaSource {
    #[serde(rename = "IPFS_IMG")]
    IpfsImg,
    #[serde(rename = "IPFS_VID")]
    IpfsVid,
    #[serde(rename = "YOUTUBE")]
    Youtube,
    #[serde(rename = "VIMEO")]
    Vimeo,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    Created,
    Default,
    Multidate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventAction {
    Delete,
    Edit,
    Create,
}

/// The fixed tag vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Tag {
    Artists,
    #[serde(rename = "AI")]
    Ai,
    BinanceSmartChain,
    Blockchains,
    #[serde(rename = "CEXes")]
    Cexes,
    Collections,
    Collectors,
    Conference,
    #[serde(rename = "DEXes")]
    Dexes,
    Developers,
    Entertainment,
    Ethereum,
    Events,
    Forum,
    Founders,
    Festival,
    Games,
    Glossary,
    Hackathon,
    Marketplaces,
    Memecoins,
    Organizations,
    Online,
    #[serde(rename = "PeopleInDeFi")]
    PeopleInDefi,
    Polkadot,
    Polygon,
    Protocols,
    Solana,
    Speakers,
    Stablecoins,
    Venture,
}

impl Tag {
    pub const ALL: [Tag; 31] = [
        Tag::Artists,
        Tag::Ai,
        Tag::BinanceSmartChain,
        Tag::Blockchains,
        Tag::Cexes,
        Tag::Collections,
        Tag::Collectors,
        Tag::Conference,
        Tag::Dexes,
        Tag::Developers,
        Tag::Entertainment,
        Tag::Ethereum,
        Tag::Events,
        Tag::Forum,
        Tag::Founders,
        Tag::Festival,
        Tag::Games,
        Tag::Glossary,
        Tag::Hackathon,
        Tag::Marketplaces,
        Tag::Memecoins,
        Tag::Organizations,
        Tag::Online,
        Tag::PeopleInDefi,
        Tag::Polkadot,
        Tag::Polygon,
        Tag::Protocols,
        Tag::Solana,
        Tag::Speakers,
        Tag::Stablecoins,
        Tag::Venture,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Artists => "Artists",
            Tag::Ai => "AI",
            Tag::BinanceSmartChain => "BinanceSmartChain",
            Tag::Blockchains => "Blockchains",
            Tag::Cexes => "CEXes",
            Tag::Collections => "Collections",
            Tag::Collectors => "Collectors",
            Tag::Conference => "Conference",
            Tag::Dexes => "DEXes",
            Tag::Developers => "Developers",
            Tag::Entertainment => "Entertainment",
            Tag::Ethereum => "Ethereum",
            Tag::Events => "Events",
            Tag::Forum => "Forum",
            Tag::Founders => "Founders",
            Tag::Festival => "Festival",
            Tag::Games => "Games",
            Tag::Glossary => "Glossary",
            Tag::Hackathon => "Hackathon",
            Tag::Marketplaces => "Marketplaces",
            Tag::Memecoins => "Memecoins",
            Tag::Organizations => "Organizations",
            Tag::Online => "Online",
            Tag::PeopleInDefi => "PeopleInDeFi",
            Tag::Polkadot => "Polkadot",
            Tag::Polygon => "Polygon",
            Tag::Protocols => "Protocols",
            Tag::Solana => "Solana",
            Tag::Speakers => "Speakers",
            Tag::Stablecoins => "Stablecoins",
            Tag::Venture => "Venture",
        }
    }

    /// Look up a tag by its exact wire id.
    pub fn from_id(id: &str) -> Option<Tag> {
        Tag::ALL.into_iter().find(|t| t.as_str() == id)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error codes reported alongside validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidatorCode {
    ValidWiki,
    IdError,
    TitleError,
    LanguageError,
    UserError,
    WordCountError,
    CategoryError,
    SummaryError,
    ImageError,
    TagError,
    ExternalUrlError,
    MetadataError,
    MediaError,
    GlobalRateLimit,
    LinkedWikis,
    EventsError,
}

impl std::fmt::Display for ValidatorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValidatorCode::ValidWiki => "VALID_WIKI",
            ValidatorCode::IdError => "ID_ERROR",
            ValidatorCode::TitleError => "TITLE_ERROR",
            ValidatorCode::LanguageError => "LANGUAGE_ERROR",
            ValidatorCode::UserError => "USER_ERROR",
            ValidatorCode::WordCountError => "WORD_COUNT_ERROR",
            ValidatorCode::CategoryError => "CATEGORY_ERROR",
            ValidatorCode::SummaryError => "SUMMARY_ERROR",
            ValidatorCode::ImageError => "IMAGE_ERROR",
            ValidatorCode::TagError => "TAG_ERROR",
            ValidatorCode::ExternalUrlError => "EXTERNAL_URL_ERROR",
            ValidatorCode::MetadataError => "METADATA_ERROR",
            ValidatorCode::MediaError => "MEDIA_ERROR",
            ValidatorCode::GlobalRateLimit => "GLOBAL_RATE_LIMIT",
            ValidatorCode::LinkedWikis => "LINKED_WIKIS",
            ValidatorCode::EventsError => "EVENTS_ERROR",
        };
        f.write_str(s)
    }
}

// --- Article parts ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Image {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
}

/// A tag as submitted; the id may be outside the vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TagRef {
    pub id: String,
}

impl TagRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Media {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MediaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub source: MediaSource,
}

impl Media {
    pub fn new(id: impl Into<String>, source: MediaSource) -> Self {
        Self {
            id: id.into(),
            size: None,
            name: None,
            kind: None,
            caption: None,
            thumbnail: None,
            source,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_kind(mut self, kind: MediaType) -> Self {
        self.kind = Some(kind);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<EventType>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub multi_date_start: Option<String>,
    #[serde(default)]
    pub multi_date_end: Option<String>,
    #[serde(default)]
    pub continent: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub action: Option<EventAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProfileLinks {
    pub twitter: Option<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProfileData {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub links: Option<Vec<ProfileLinks>>,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Opaque reference to the submitting user or original author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UserRef {
    pub id: String,
    #[serde(default)]
    pub profile: Option<ProfileData>,
}

/// Related wikis by relation kind. Every kind defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LinkedWikis {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schemars(with = "Vec<String>")]
    pub founders: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schemars(with = "Vec<String>")]
    pub blockchains: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schemars(with = "Vec<String>")]
    pub speakers: Vec<String>,
}

/// A related wiki by id with its display title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WikiReference {
    pub id: String,
    pub title: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_version() -> u32 {
    1
}

// --- Article ---

/// A submitted wiki article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[builder(default, setter(into))]
    #[serde(default)]
    pub id: String,
    #[builder(default, setter(into))]
    #[serde(default)]
    pub title: String,
    #[builder(default, setter(into))]
    #[serde(default)]
    pub content: String,
    #[builder(default, setter(into))]
    #[serde(default)]
    pub summary: String,
    #[builder(default)]
    #[serde(default)]
    pub images: Vec<Image>,
    #[builder(default)]
    #[serde(default)]
    pub categories: Vec<Category>,
    #[builder(default)]
    #[serde(default)]
    pub tags: Vec<TagRef>,
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub media: Option<Vec<Media>>,
    #[builder(default)]
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub events: Option<Vec<Event>>,
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub user: Option<UserRef>,
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub author: Option<UserRef>,
    #[builder(default)]
    #[serde(default)]
    pub language: Language,
    #[builder(default = 1)]
    #[serde(default = "default_version")]
    pub version: u32,
    #[builder(default)]
    #[serde(default)]
    pub linked_wikis: LinkedWikis,
    #[builder(default)]
    #[serde(default)]
    pub founder_wikis: Vec<WikiReference>,
    #[builder(default)]
    #[serde(default)]
    pub blockchain_wikis: Vec<WikiReference>,
    #[builder(default, setter(strip_option, into))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipfs: Option<String>,
    #[builder(default)]
    #[serde(default)]
    pub hidden: bool,
    #[builder(default)]
    #[serde(default)]
    pub promoted: i64,
    #[builder(default)]
    #[serde(default)]
    pub views: i64,
}

impl Article {
    pub fn media_items(&self) -> &[Media] {
        self.media.as_deref().unwrap_or_default()
    }

    pub fn event_records(&self) -> &[Event] {
        self.events.as_deref().unwrap_or_default()
    }

    pub fn metadata_entry(&self, id: &str) -> Option<&MetadataEntry> {
        self.metadata.iter().find(|m| m.id == id)
    }

    /// True when any submitted tag id equals the tag's wire id.
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.iter().any(|t| t.id == tag.as_str())
    }

    /// Tags drawn from the vocabulary, in submission order.
    pub fn recognized_tags(&self) -> Vec<Tag> {
        self.tags.iter().filter_map(|t| Tag::from_id(&t.id)).collect()
    }

    /// Tag ids outside the vocabulary.
    pub fn unrecognized_tags(&self) -> Vec<&str> {
        self.tags
            .iter()
            .filter(|t| Tag::from_id(&t.id).is_none())
            .map(|t| t.id.as_str())
            .collect()
    }

    /// Drop tags outside the vocabulary.
    pub fn retain_recognized_tags(&mut self) {
        self.tags.retain(|t| Tag::from_id(&t.id).is_some());
    }

    /// Citations from the `references` metadata entry. An absent entry yields none.
    pub fn references(&self) -> Result<Vec<Reference>, WikiGateError> {
        match self.metadata_entry(REFERENCES_META_ID) {
            Some(entry) => Ok(entry.resolve()?.into_references()),
            None => Ok(Vec::new()),
        }
    }
}
