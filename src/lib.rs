pub mod app;
pub mod config;
pub mod cycle;
pub mod demo;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod ideas;
pub mod models;
pub mod pages;
pub mod session;
pub mod state;
pub mod storage;

pub use app::router;
pub use config::{ClientConfig, ServerConfig};
pub use state::AppState;
pub use storage::load_dashboard;
