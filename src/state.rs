use crate::config::AppConfig;
use crate::store::EntryStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<Mutex<EntryStore>>,
}

impl AppState {
    pub fn new(config: AppConfig, store: EntryStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(Mutex::new(store)),
        }
    }
}
