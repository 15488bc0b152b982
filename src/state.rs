use crate::cache::ComicCache;
use crate::config::AppConfig;
use crate::fetch::ComicFetcher;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub cache: Arc<Mutex<ComicCache>>,
    pub fetcher: Arc<ComicFetcher>,
}

impl AppState {
    pub fn new(config: AppConfig, cache: ComicCache) -> Self {
        let fetcher = ComicFetcher::new(config.site_url.clone());
        Self {
            config: Arc::new(config),
            cache: Arc::new(Mutex::new(cache)),
            fetcher: Arc::new(fetcher),
        }
    }
}
