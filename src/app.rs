use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/today", get(handlers::get_today))
        .route("/api/entries", get(handlers::list_entries).post(handlers::save_entry))
        .route("/api/field", post(handlers::update_field))
        .route("/api/series", get(handlers::get_series))
        .route("/api/export", get(handlers::export_entries))
        .route("/api/import", post(handlers::import_entries))
        .route("/api/generate-dummy", post(handlers::seed_entries))
        .with_state(state)
}
