//! File-backed store (native)

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::{ProgressStore, codec};
use crate::progression::ProgressionRecord;

/// Stores the record as a JSON file, replacing it atomically on save
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling temp file the next save is written to before the rename
    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "progress".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Write `json` to `tmp`, flush it to disk, then move it over the save file
    fn replace_with(&self, tmp: &Path, json: &str) -> anyhow::Result<()> {
        let mut file =
            fs::File::create(tmp).with_context(|| format!("creating {}", tmp.display()))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("writing {}", tmp.display()))?;
        file.sync_all()
            .with_context(|| format!("syncing {}", tmp.display()))?;
        drop(file);
        fs::rename(tmp, &self.path).with_context(|| {
            format!("replacing {} with {}", self.path.display(), tmp.display())
        })
    }
}

impl ProgressStore for FileStore {
    fn load(&self) -> ProgressionRecord {
        match fs::read_to_string(&self.path) {
            Ok(json) => {
                let record = codec::decode(&json);
                log::info!(
                    "Loaded progress from {} ({} apples, {} games)",
                    self.path.display(),
                    record.total_apples,
                    record.games_played
                );
                record
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No progress at {}, starting fresh", self.path.display());
                ProgressionRecord::default()
            }
            Err(e) => {
                log::warn!("Could not read {}: {}, starting fresh", self.path.display(), e);
                ProgressionRecord::default()
            }
        }
    }

    fn save(&mut self, record: &ProgressionRecord) -> anyhow::Result<()> {
        let json = codec::encode(record)?;

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating save directory {}", dir.display()))?;
            }
        }

        let tmp = self.tmp_path();
        if let Err(e) = self.replace_with(&tmp, &json) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Could not remove {}: {}", tmp.display(), cleanup);
                }
            }
            return Err(e);
        }

        log::debug!("Progress saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cosmetics::{Cosmetic, Rgb};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("data.json"));
        assert_eq!(store.load(), ProgressionRecord::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("data.json"));

        let mut record = ProgressionRecord::default();
        record.unlocked.push(Cosmetic::SolidColor(Rgb(0, 0, 255)));
        record.selected = Cosmetic::SolidColor(Rgb(0, 0, 255));
        record.total_apples = 31;
        record.apple_milestones_reached = vec![10, 20, 25, 30];
        store.save(&record).unwrap();

        assert_eq!(store.load(), record);
        assert!(!store.tmp_path().exists());

        // Saving what was loaded leaves the bytes unchanged
        let before = fs::read_to_string(store.path()).unwrap();
        let loaded = store.load();
        store.save(&loaded).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn test_corrupt_file_recovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{\"total_apples\": 9, \"games_played\": tr").unwrap();
        let store = FileStore::new(path);
        assert_eq!(store.load(), ProgressionRecord::default());
    }

    #[test]
    fn test_failed_save_removes_tmp() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory where the save file should be makes the rename fail
        let path = dir.path().join("data.json");
        fs::create_dir_all(path.join("blocker")).unwrap();
        let mut store = FileStore::new(path);

        assert!(store.save(&ProgressionRecord::default()).is_err());
        assert!(!store.tmp_path().exists());
        assert!(store.path().is_dir());
    }
}
