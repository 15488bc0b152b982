use std::env;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_SITE_URL: &str = "https://dilbert.com";
const DEFAULT_CACHE_PATH: &str = "data/comic-cache.json";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REFRESH_MINUTES: u64 = 15;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub site_url: Url,
    pub cache_path: PathBuf,
    /// Cadence of the background today's-comic refresh; 0 disables it.
    pub refresh_minutes: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let site_url = match env::var("COMIC_SITE_URL") {
            Ok(raw) => Url::parse(&raw)?,
            Err(_) => Url::parse(DEFAULT_SITE_URL)?,
        };

        let cache_path = env::var("COMIC_CACHE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CACHE_PATH));

        let refresh_minutes = env::var("COMIC_REFRESH_MINUTES")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REFRESH_MINUTES);

        Ok(Self {
            port,
            site_url,
            cache_path,
            refresh_minutes,
        })
    }
}
