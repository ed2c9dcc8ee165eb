pub mod app;
pub mod config;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;
pub mod visuals;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
pub use store::CycleLogStore;
