use std::sync::LazyLock;

use regex::Regex;
use wikigate_common::constants::{IPFS_HASH_LENGTH, MAX_MEDIA_COUNT, MEDIA_UPLOAD_PENDING_SUFFIX};
use wikigate_common::{Media, MediaSource, MediaType};

use crate::text::utf16_len;

static YOUTUBE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(?:youtu\.be/|v/|vi/|u/\w/|embed/|shorts/|watch\?v=)([^#&?]*).*").unwrap()
});

/// Per-item shape check keyed on the media source.
pub fn is_media_item_valid(media: &Media) -> bool {
    match media.source {
        MediaSource::IpfsImg | MediaSource::IpfsVid => utf16_len(&media.id) == IPFS_HASH_LENGTH,
        MediaSource::Youtube => match media.name.as_deref() {
            Some(name) => {
                media.id == format!("https://www.youtube.com/watch?v={name}")
                    && YOUTUBE_ID_RE.is_match(&media.id)
            }
            None => false,
        },
        MediaSource::Vimeo => match media.name.as_deref() {
            Some(name) => media.id == format!("https://vimeo.com/{name}"),
            None => false,
        },
        MediaSource::Unknown => !matches!(media.kind, Some(MediaType::Unknown)),
    }
}

pub fn is_media_content_valid(media: &[Media]) -> bool {
    media.iter().all(is_media_item_valid)
}

/// Collection limits: total count and a single icon.
pub fn is_media_count_within_limits(media: &[Media]) -> bool {
    let icons = media
        .iter()
        .filter(|m| m.kind == Some(MediaType::Icon))
        .count();
    media.len() <= MAX_MEDIA_COUNT && icons <= 1
}

pub fn is_media_valid(media: &[Media]) -> bool {
    is_media_content_valid(media) && is_media_count_within_limits(media)
}

/// True while any item still carries the upload-pending id suffix.
pub fn is_any_media_uploading(media: &[Media]) -> bool {
    media
        .iter()
        .any(|m| m.id.ends_with(MEDIA_UPLOAD_PENDING_SUFFIX))
}
