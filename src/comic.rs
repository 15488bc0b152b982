//! The load-a-comic pipeline behind both the popup's API and the background
//! refresher: clamp the date, try the cache, fetch the page, and promote
//! today's strip into the single cache slot.

use crate::dates;
use crate::errors::ComicError;
use crate::models::{CachedComic, ComicPage, ComicResponse};
use crate::state::AppState;
use crate::storage;
use chrono::NaiveDate;
use tracing::{info, warn};

/// Resolve the comic for `requested`, clamped into [min_date, today].
///
/// Only today's strip is ever cached: for today the image bytes are fetched
/// and encoded so the result is self-contained, while any other date is
/// served with the live remote image URL. Every failure short-circuits before
/// the cache write, so an error can never leave a partial entry behind.
pub async fn resolve_comic(
    state: &AppState,
    requested: NaiveDate,
) -> Result<ComicResponse, ComicError> {
    let today = dates::today();
    let date = dates::clamp_to_available(requested, today);
    let key = dates::date_key(date);

    if date == today {
        let cache = state.cache.lock().await;
        if let Some(comic) = cache.get(&key) {
            return Ok(from_cached(comic));
        }
    }

    let page = state.fetcher.fetch_page(date).await?;

    if date == today {
        return cache_today(state, page).await;
    }

    Ok(from_page(key, page))
}

/// Make sure today's strip is resident, fetching it if needed. Returns
/// whether a fetch actually happened; used by the background refresher.
pub async fn ensure_today_cached(state: &AppState) -> Result<bool, ComicError> {
    let key = dates::date_key(dates::today());
    {
        let cache = state.cache.lock().await;
        if cache.has(&key) {
            return Ok(false);
        }
    }

    resolve_comic(state, dates::today()).await?;
    Ok(true)
}

async fn cache_today(state: &AppState, page: ComicPage) -> Result<ComicResponse, ComicError> {
    let image_data = state.fetcher.fetch_image_data_url(&page.image_src).await?;
    let comic = CachedComic {
        date: dates::date_key(page.requested_date),
        image_data,
        caption: page.caption,
        source_url: page.resolved_url,
    };
    let response = from_cached(&comic);

    let mut cache = state.cache.lock().await;
    cache.put(comic);
    info!(date = %response.date, "cached today's comic");

    // The in-memory slot stays valid even if the write fails; the next put
    // rewrites the whole file.
    if let Err(err) = storage::persist_cache(&state.config.cache_path, &cache).await {
        warn!("failed to persist comic cache: {}", err.message);
    }

    Ok(response)
}

fn from_cached(comic: &CachedComic) -> ComicResponse {
    ComicResponse {
        date: comic.date.clone(),
        caption: comic.caption.clone(),
        image: comic.image_data.clone(),
        source_url: comic.source_url.clone(),
        cached: true,
    }
}

fn from_page(date: String, page: ComicPage) -> ComicResponse {
    ComicResponse {
        date,
        caption: page.caption,
        image: page.image_src,
        source_url: page.resolved_url,
        cached: false,
    }
}
