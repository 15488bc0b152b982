use crate::comic;
use crate::state::AppState;
use std::time::Duration;
use tokio::time;
use tracing::{info, warn};

/// Periodically pre-caches today's comic so the popup usually opens on a
/// cache hit. The first tick fires immediately; each later tick is a cheap
/// no-op while the resident entry still matches today.
pub async fn run(state: AppState) {
    let minutes = state.config.refresh_minutes;
    if minutes == 0 {
        info!("background comic refresh disabled");
        return;
    }

    let mut ticker = time::interval(Duration::from_secs(minutes * 60));
    loop {
        ticker.tick().await;
        if let Err(err) = comic::ensure_today_cached(&state).await {
            warn!("background comic refresh failed: {err}");
        }
    }
}
