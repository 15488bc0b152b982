use crate::dates;
use crate::errors::ComicError;
use crate::extract;
use crate::models::ComicPage;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::NaiveDate;
use reqwest::Client;
use tracing::debug;
use url::Url;

const FALLBACK_IMAGE_TYPE: &str = "image/gif";

/// Fetches strip pages and images from the comic site. One-shot semantics:
/// no retries, every failure surfaces as a typed [`ComicError`].
#[derive(Debug, Clone)]
pub struct ComicFetcher {
    client: Client,
    site: Url,
}

impl ComicFetcher {
    pub fn new(site: Url) -> Self {
        Self {
            client: Client::new(),
            site,
        }
    }

    /// The page URL a date maps to: `<site>/strip/<date>`.
    pub fn strip_url(&self, date: NaiveDate) -> Url {
        let mut url = self.site.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("strip").push(&dates::date_key(date));
        }
        url
    }

    /// GET the page for `date`, extract the strip markup, and validate that
    /// the page's canonical link resolves to the requested URL. The site
    /// silently serves the nearest strip when a date has none; the canonical
    /// link is how that redirect shows up.
    pub async fn fetch_page(&self, date: NaiveDate) -> Result<ComicPage, ComicError> {
        let page_url = self.strip_url(date);
        let key = dates::date_key(date);

        let html = self
            .client
            .get(page_url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| ComicError::Fetch {
                url: page_url.to_string(),
                source,
            })?
            .text()
            .await
            .map_err(|source| ComicError::Fetch {
                url: page_url.to_string(),
                source,
            })?;

        let markup =
            extract::extract_strip(&html, &page_url).ok_or_else(|| ComicError::Validation {
                requested: key.clone(),
                detail: format!("page {page_url} does not carry the strip markup"),
            })?;

        if !urls_match(&markup.link_href, &page_url) {
            return Err(ComicError::Validation {
                requested: key,
                detail: format!("page resolves to {}", markup.link_href),
            });
        }

        debug!(date = %key, image = %markup.image_src, "strip page resolved");

        Ok(ComicPage {
            image_src: markup.image_src,
            caption: markup.caption,
            resolved_url: markup.link_href,
            requested_date: date,
        })
    }

    /// GET the strip image and encode it as a `data:` URL so it can live in
    /// the text-only cache and be used directly as an image source.
    pub async fn fetch_image_data_url(&self, image_src: &str) -> Result<String, ComicError> {
        let response = self
            .client
            .get(image_src)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| ComicError::Fetch {
                url: image_src.to_string(),
                source,
            })?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string())
            .unwrap_or_else(|| FALLBACK_IMAGE_TYPE.to_string());

        let bytes = response.bytes().await.map_err(|source| ComicError::Fetch {
            url: image_src.to_string(),
            source,
        })?;

        Ok(format!(
            "data:{content_type};base64,{}",
            BASE64.encode(&bytes)
        ))
    }
}

/// Trailing-slash-insensitive URL comparison; anything unparseable mismatches.
fn urls_match(candidate: &str, expected: &Url) -> bool {
    match Url::parse(candidate) {
        Ok(candidate) => {
            candidate.origin() == expected.origin()
                && candidate.path().trim_end_matches('/') == expected.path().trim_end_matches('/')
        }
        Err(_) => false,
    }
}
