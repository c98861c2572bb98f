use crate::errors::TrackerError;
use crate::store::EntryStore;
use serde_json::Value;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, warn};

/// Reads the persisted store. A missing, unreadable or malformed file
/// degrades to an empty store.
pub async fn load_store(path: &Path) -> EntryStore {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) if value.is_object() => {
                let store = EntryStore::from_persisted(&value);
                info!("loaded {} entries from {}", store.len(), path.display());
                store
            }
            Ok(_) => {
                warn!("data file {} is not an object, starting empty", path.display());
                EntryStore::default()
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                EntryStore::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => EntryStore::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            EntryStore::default()
        }
    }
}

pub async fn persist_store(path: &Path, store: &EntryStore) -> Result<(), TrackerError> {
    let payload = serde_json::to_vec_pretty(store)
        .map_err(|err| TrackerError::PersistenceUnavailable(err.to_string()))?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, payload).await?;
    Ok(())
}
