use crate::config::AppConfig;
use crate::errors::{AppError, TrackerError};
use crate::models::{
    DatedEntry, Entry, FieldUpdateRequest, ImportSummary, SaveResponse, SeedResponse, SeriesResponse, WindowQuery,
};
use crate::normalize::date_key;
use crate::schema::MetricField;
use crate::seed::generate_dummy;
use crate::series::{assemble, build_window};
use crate::state::AppState;
use crate::storage::persist_store;
use crate::store::{EntryStore, export_filename};
use crate::ui::render_index;
use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderName, header},
    response::Html,
};
use chrono::{Local, NaiveDate};
use serde_json::Value;
use std::num::NonZeroU32;
use tracing::{error, info};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let date = today();
    let store = state.store.lock().await;
    let entry = store.entry_for(date);
    Html(render_index(&date_key(date), &entry, &state.config))
}

pub async fn get_today(State(state): State<AppState>) -> Json<Entry> {
    let store = state.store.lock().await;
    Json(store.today())
}

pub async fn save_entry(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<SaveResponse>, AppError> {
    if !payload.is_object() {
        return Err(AppError::bad_request("entry must be a JSON object"));
    }

    let date = today();
    let mut store = state.store.lock().await;
    let entry = store.upsert(date, &payload);
    let saved = persist_logged(&state.config, &store).await;

    Ok(Json(SaveResponse {
        date: date_key(date),
        entry,
        saved,
    }))
}

pub async fn update_field(
    State(state): State<AppState>,
    Json(payload): Json<FieldUpdateRequest>,
) -> Result<Json<SaveResponse>, AppError> {
    let field: MetricField = payload
        .field
        .trim()
        .parse()
        .map_err(|err: crate::schema::UnknownField| AppError::bad_request(err.to_string()))?;

    let date = today();
    let mut store = state.store.lock().await;
    let entry = store.apply_field_update(date, field, payload.value);
    let saved = persist_logged(&state.config, &store).await;

    Ok(Json(SaveResponse {
        date: date_key(date),
        entry,
        saved,
    }))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<Vec<DatedEntry>>, AppError> {
    let days = window_days(&state.config, query.days)?;
    let end = today();
    let window = build_window(days, end);
    let start = window.first().copied().unwrap_or(end);

    let store = state.store.lock().await;
    let entries = store
        .range(start, end)
        .into_iter()
        .map(|(date, entry)| DatedEntry {
            date: date.to_string(),
            entry: entry.clone(),
        })
        .collect();
    Ok(Json(entries))
}

pub async fn get_series(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<SeriesResponse>, AppError> {
    let days = window_days(&state.config, query.days)?;
    let store = state.store.lock().await;
    Ok(Json(assemble(&store, days, today())))
}

pub async fn export_entries(
    State(state): State<AppState>,
) -> Result<([(HeaderName, String); 2], String), AppError> {
    let store = state.store.lock().await;
    let body = serde_json::to_string_pretty(&*store).map_err(AppError::internal)?;
    let disposition = format!("attachment; filename=\"{}\"", export_filename(today()));

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// The merged store is persisted before it replaces the live one, so a
/// rejected payload or a failed write leaves history untouched.
pub async fn import_entries(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ImportSummary>, AppError> {
    let payload: Value =
        serde_json::from_slice(&body).map_err(|err| TrackerError::ImportFormat(err.to_string()))?;

    let mut store = state.store.lock().await;
    let mut candidate = store.clone();
    let summary = candidate.bulk_merge(&payload, state.config.import_mode)?;
    commit(&state.config, &mut store, candidate).await?;

    info!(
        "imported {} entries ({} skipped, mode {})",
        summary.imported, summary.skipped, state.config.import_mode
    );
    Ok(Json(summary))
}

pub async fn seed_entries(State(state): State<AppState>) -> Result<Json<SeedResponse>, AppError> {
    let mut store = state.store.lock().await;
    let mut candidate = store.clone();
    let generated = {
        let mut rng = rand::thread_rng();
        generate_dummy(&mut candidate, today(), &mut rng)
    };
    commit(&state.config, &mut store, candidate).await?;

    info!("generated {generated} dummy entries");
    Ok(Json(SeedResponse { generated }))
}

async fn commit(config: &AppConfig, live: &mut EntryStore, candidate: EntryStore) -> Result<(), TrackerError> {
    persist_store(&config.data_path, &candidate).await.inspect_err(|err| {
        error!("failed to persist entries, keeping previous state: {err}");
    })?;
    *live = candidate;
    Ok(())
}

/// Write-path persistence: a failure is logged and reported, never raised.
async fn persist_logged(config: &AppConfig, store: &EntryStore) -> bool {
    match persist_store(&config.data_path, store).await {
        Ok(()) => true,
        Err(err) => {
            error!("failed to persist entries: {err}");
            false
        }
    }
}

fn window_days(config: &AppConfig, days: Option<i64>) -> Result<NonZeroU32, AppError> {
    let days = days.unwrap_or_else(|| i64::from(config.default_window_days));
    u32::try_from(days)
        .ok()
        .filter(|days| *days <= config.max_window_days)
        .and_then(NonZeroU32::new)
        .ok_or_else(|| {
            AppError::bad_request(format!(
                "days must be between 1 and {}",
                config.max_window_days
            ))
        })
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use std::path::PathBuf;

    /// A data path whose parent is a regular file, so every write fails.
    async fn unwritable_state(name: &str) -> (AppState, PathBuf) {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let blocker = std::env::temp_dir().join(format!("mood_tracker_{name}_{}_{nanos}", std::process::id()));
        tokio::fs::write(&blocker, b"file").await.unwrap();

        let config = AppConfig {
            data_path: blocker.join("entries.json"),
            ..AppConfig::default()
        };
        (AppState::new(config, EntryStore::new()), blocker)
    }

    #[test]
    fn window_days_defaults_and_bounds() {
        let config = AppConfig::default();
        assert_eq!(window_days(&config, None).unwrap().get(), 14);
        assert_eq!(window_days(&config, Some(7)).unwrap().get(), 7);
        assert_eq!(window_days(&config, Some(91)).unwrap().get(), 91);
        assert!(window_days(&config, Some(0)).is_err());
        assert!(window_days(&config, Some(-7)).is_err());
        assert!(window_days(&config, Some(92)).is_err());
    }

    #[tokio::test]
    async fn failed_save_keeps_write_in_memory() {
        let (state, blocker) = unwritable_state("save").await;

        let Json(response) = save_entry(State(state.clone()), Json(json!({ "mood": 5 })))
            .await
            .unwrap();
        assert!(!response.saved);
        assert_eq!(response.entry.mood, 5);

        let Json(today) = get_today(State(state.clone())).await;
        assert_eq!(today.mood, 5);

        let Json(response) = update_field(
            State(state.clone()),
            Json(FieldUpdateRequest {
                field: "sleep_hours".to_string(),
                value: json!(9),
            }),
        )
        .await
        .unwrap();
        assert!(!response.saved);
        assert_eq!(state.store.lock().await.today().sleep_hours, 9);
        let _ = tokio::fs::remove_file(&blocker).await;
    }

    #[tokio::test]
    async fn failed_import_leaves_store_unchanged() {
        let (state, blocker) = unwritable_state("import").await;
        state.store.lock().await.upsert(today(), &json!({ "mood": 2 }));
        let before = state.store.lock().await.clone();

        let body = Bytes::from(json!({ "2020-01-01": { "mood": 4 } }).to_string());
        let err = import_entries(State(state.clone()), body).await.unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

        let store = state.store.lock().await;
        assert!(store.get("2020-01-01").is_none());
        assert_eq!(*store, before);
        drop(store);
        let _ = tokio::fs::remove_file(&blocker).await;
    }

    #[tokio::test]
    async fn failed_seed_leaves_store_unchanged() {
        let (state, blocker) = unwritable_state("seed").await;

        let err = seed_entries(State(state.clone())).await.unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(state.store.lock().await.is_empty());
        let _ = tokio::fs::remove_file(&blocker).await;
    }

    #[tokio::test]
    async fn malformed_import_is_a_bad_request() {
        let (state, blocker) = unwritable_state("malformed").await;

        let err = import_entries(State(state.clone()), Bytes::from_static(b"[1, 2, 3]"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("check the file format"));
        let _ = tokio::fs::remove_file(&blocker).await;
    }
}
