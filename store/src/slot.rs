use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use pairmatch_core::SaveSnapshot;

use crate::{Result, SaveRecord, SnapshotStore, StoreError};

const APP_NAME: &str = "pairmatch";

pub const DEFAULT_SLOT: &str = "savegame";

/// Snapshot slot backed by `<dir>/<slot>.json`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotStore {
    dir: PathBuf,
    slot: String,
}

impl SlotStore {
    pub fn new(dir: impl Into<PathBuf>, slot: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            slot: slot.into(),
        }
    }

    /// Default slot inside the platform's local data directory, or the working directory when there is none.
    pub fn in_data_dir() -> Self {
        let dir = dirs::data_local_dir()
            .map(|data_dir| data_dir.join(APP_NAME))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir, DEFAULT_SLOT)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.slot))
    }

    fn tmp_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json.tmp", self.slot))
    }
}

impl SnapshotStore for SlotStore {
    fn save(&mut self, snapshot: &SaveSnapshot) -> Result<()> {
        let bytes = SaveRecord::new(snapshot.clone()).encode()?;
        fs::create_dir_all(&self.dir).map_err(StoreError::WriteFailed)?;

        let tmp_path = self.tmp_path();
        let written =
            write_synced(&tmp_path, &bytes).and_then(|()| fs::rename(&tmp_path, self.path()));
        if let Err(err) = written {
            log::warn!("Failed to save {}: {}", self.path().display(), err);
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::WriteFailed(err));
        }

        log::info!("Game saved to {}", self.path().display());
        Ok(())
    }

    fn load(&self) -> Result<Option<SaveSnapshot>> {
        let path = self.path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("No save at {}", path.display());
                return Ok(None);
            }
            Err(err) => return Err(StoreError::Unreadable(err)),
        };

        let record = SaveRecord::decode(&bytes)
            .inspect_err(|err| log::warn!("Ignoring save at {}: {}", path.display(), err))?;
        log::info!("Loaded game saved at {}", record.saved_at);
        Ok(Some(record.snapshot))
    }

    fn clear(&mut self) -> Result<()> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("Deleted {}", path.display());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("Nothing to delete at {}", path.display());
                Ok(())
            }
            Err(err) => Err(StoreError::WriteFailed(err)),
        }
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
