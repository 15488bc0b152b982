pub mod app;
pub mod cache;
pub mod comic;
pub mod config;
pub mod dates;
pub mod errors;
pub mod extract;
pub mod fetch;
pub mod handlers;
pub mod models;
pub mod refresh;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
pub use storage::{load_cache, persist_cache};
