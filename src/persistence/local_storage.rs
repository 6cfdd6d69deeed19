//! LocalStorage-backed store (WASM only)

use anyhow::anyhow;

use super::{ProgressStore, codec};
use crate::progression::ProgressionRecord;

/// Stores the record under a single LocalStorage key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    /// LocalStorage key used when none is given
    pub const STORAGE_KEY: &'static str = "snake_unlocks_progress";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::STORAGE_KEY)
    }
}

impl ProgressStore for LocalStorageStore {
    fn load(&self) -> ProgressionRecord {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(json)) = storage.get_item(&self.key) {
                log::info!("Loaded progress from LocalStorage");
                return codec::decode(&json);
            }
        }

        log::info!("No progress found, starting fresh");
        ProgressionRecord::default()
    }

    fn save(&mut self, record: &ProgressionRecord) -> anyhow::Result<()> {
        let storage = Self::storage().ok_or_else(|| anyhow!("LocalStorage unavailable"))?;
        let json = codec::encode(record)?;
        // setItem replaces the value in one step
        storage
            .set_item(&self.key, &json)
            .map_err(|e| anyhow!("LocalStorage write failed: {:?}", e))?;
        log::debug!("Progress saved to LocalStorage");
        Ok(())
    }
}
