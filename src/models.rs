use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The single comic the cache may hold. Only ever created for "today"; the
/// image is stored as a self-contained `data:` URL so the whole struct
/// survives in a text-only store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedComic {
    pub date: String,
    pub image_data: String,
    pub caption: String,
    pub source_url: String,
}

/// What a successful page fetch yields before any caching decision is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComicPage {
    pub image_src: String,
    pub caption: String,
    pub resolved_url: String,
    pub requested_date: NaiveDate,
}

/// Payload for `GET /api/comic`. `image` is either a `data:` URL (today's
/// cached strip) or the live remote image URL (any other date).
#[derive(Debug, Serialize, Deserialize)]
pub struct ComicResponse {
    pub date: String,
    pub caption: String,
    pub image: String,
    pub source_url: String,
    pub cached: bool,
}
