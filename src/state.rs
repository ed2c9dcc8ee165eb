use crate::config::AppConfig;
use crate::storage::FileStorage;
use crate::store::CycleLogStore;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type SharedStore = Arc<Mutex<CycleLogStore<FileStorage>>>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub tile_base_unit: u32,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let storage = FileStorage::new(config.data_dir.clone());
        let store = CycleLogStore::open(storage, config.subject_id.clone());
        Self {
            store: Arc::new(Mutex::new(store)),
            tile_base_unit: config.tile_base_unit,
        }
    }
}
