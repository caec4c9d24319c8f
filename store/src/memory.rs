use pairmatch_core::SaveSnapshot;

use crate::{Result, SaveRecord, SnapshotStore};

/// In-process slot for hosts without a writable filesystem.
///
/// Holds the encoded record rather than the snapshot so loads go through the same decoding as files do.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    record: Option<Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            record: Some(bytes.into()),
        }
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        self.record.as_deref()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, snapshot: &SaveSnapshot) -> Result<()> {
        let bytes = SaveRecord::new(snapshot.clone()).encode()?;
        self.record = Some(bytes);
        Ok(())
    }

    fn load(&self) -> Result<Option<SaveSnapshot>> {
        self.record
            .as_deref()
            .map(|bytes| SaveRecord::decode(bytes).map(|record| record.snapshot))
            .transpose()
    }

    fn clear(&mut self) -> Result<()> {
        self.record = None;
        Ok(())
    }
}
