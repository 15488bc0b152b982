use daily_comic::{app, config::AppConfig, refresh, state::AppState, storage};
use std::net::SocketAddr;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env()?;
    if let Some(parent) = config.cache_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let cache = storage::load_cache(&config.cache_path).await;
    let port = config.port;
    let state = AppState::new(config, cache);

    tokio::spawn(refresh::run(state.clone()));

    let router = app::router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
