//! Save/load of the progression record
//!
//! Features:
//! - Human-diffable JSON, compatible with existing `data.json` saves
//! - Field-by-field recovery of damaged saves
//! - Write-then-rename on native so a crash never corrupts the last good save
//! - LocalStorage on the web

pub mod codec;
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use crate::progression::ProgressionRecord;

/// Durable home of the progression record
pub trait ProgressStore {
    /// Load the stored record; a missing or unreadable record yields the default
    fn load(&self) -> ProgressionRecord;

    /// Replace the stored record
    fn save(&mut self, record: &ProgressionRecord) -> anyhow::Result<()>;
}

/// In-memory store holding the encoded document (tests and throwaway sessions)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub document: Option<String>,
    pub saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            saves: 0,
        }
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> ProgressionRecord {
        match &self.document {
            Some(json) => codec::decode(json),
            None => ProgressionRecord::default(),
        }
    }

    fn save(&mut self, record: &ProgressionRecord) -> anyhow::Result<()> {
        self.document = Some(codec::encode(record)?);
        self.saves += 1;
        Ok(())
    }
}

impl<S: ProgressStore + ?Sized> ProgressStore for Box<S> {
    fn load(&self) -> ProgressionRecord {
        (**self).load()
    }

    fn save(&mut self, record: &ProgressionRecord) -> anyhow::Result<()> {
        (**self).save(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_loads_default() {
        let store = MemoryStore::new();
        assert_eq!(store.load(), ProgressionRecord::default());
    }

    #[test]
    fn test_save_load_idempotent() {
        let mut store = MemoryStore::with_document(
            r#"{"unlocked_colors": [[0, 255, 0], "red_hollow"], "snake_color": "red_hollow",
                "milestones_reached": [10, 20], "total_apples": 40, "games_played": 11}"#,
        );
        let record = store.load();
        store.save(&record).unwrap();
        let first = store.document.clone().unwrap();

        let reloaded = store.load();
        assert_eq!(reloaded, record);
        store.save(&reloaded).unwrap();
        assert_eq!(store.document.as_deref(), Some(first.as_str()));
        assert_eq!(store.saves, 2);
    }
}
