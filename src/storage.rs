use crate::cache::ComicCache;
use crate::errors::AppError;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::error;

pub async fn load_cache(path: &Path) -> ComicCache {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<BTreeMap<String, String>>(&bytes) {
            Ok(entries) => ComicCache::from_entries(&entries),
            Err(err) => {
                error!("failed to parse cache file: {err}");
                ComicCache::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => ComicCache::new(),
        Err(err) => {
            error!("failed to read cache file: {err}");
            ComicCache::new()
        }
    }
}

pub async fn persist_cache(path: &Path, cache: &ComicCache) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(&cache.to_entries()).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
