use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A point-in-time capture of a post, as handed over by the fetching client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PostSnapshot {
    pub id: String,

    #[serde(default)]
    pub author: Author,

    #[serde(default)]
    pub full_text: String,

    #[serde(default)]
    pub entities: Entities,

    #[serde(default)]
    pub extended_media: Vec<MediaItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Author {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Entities {
    #[serde(default)]
    pub hashtags: Vec<Hashtag>,

    /// Short-URL token (`https://t.co/...`) to its expanded URL.
    #[serde(default)]
    pub urls: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hashtag {
    pub text: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    Video,
    AnimatedGif,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaItem {
    pub kind: MediaKind,

    #[serde(default)]
    pub media_url: String,

    /// The short-URL token that referenced this media in the post text.
    #[serde(default)]
    pub source_url: Option<String>,

    #[serde(default)]
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variant {
    pub content_type: String,
    #[serde(default)]
    pub bitrate: Option<u64>,
    pub url: String,
}

/// What the URL classifier learned about the request URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParsedUrlHint {
    /// The raw request URL.
    pub url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub status_id: Option<String>,
    #[serde(default)]
    pub is_direct_image_url: bool,
    #[serde(default)]
    pub orig_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NormalizedMetadata {
    pub image_urls: Vec<String>,
    pub preview_urls: Vec<String>,
    pub page_url: Option<String>,
    pub profile_url: Option<String>,
    pub intent_url: Option<String>,
    pub tag_name: String,
    pub artist_name: String,
    pub commentary_plain: String,
    pub commentary_formatted: String,
    pub tags: Vec<(String, String)>,
    pub normalized_tags: Vec<String>,
    pub canonical_source_url: Option<String>,
}
