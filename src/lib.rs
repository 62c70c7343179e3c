pub mod app;
pub mod auth;
pub mod config;
pub mod draft;
pub mod errors;
pub mod handlers;
pub mod journal;
pub mod models;
pub mod prompts;
pub mod songs;
pub mod state;
pub mod stats;
pub mod storage;
pub mod streak;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use journal::JournalStore;
pub use state::AppState;
pub use storage::SlotStore;
