pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod schema;
pub mod seed;
pub mod series;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use models::Entry;
pub use normalize::normalize;
pub use schema::MetricField;
pub use state::AppState;
pub use storage::{load_store, persist_store};
pub use store::{EntryStore, ImportMode};
