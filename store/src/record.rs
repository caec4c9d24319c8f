use pairmatch_core::SaveSnapshot;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Result, StoreError};

pub const SAVE_RECORD_VERSION: u32 = 1;

/// On-disk envelope around a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    pub version: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub saved_at: OffsetDateTime,
    pub snapshot: SaveSnapshot,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

impl SaveRecord {
    pub fn new(snapshot: SaveSnapshot) -> Self {
        Self {
            version: SAVE_RECORD_VERSION,
            saved_at: OffsetDateTime::now_utc(),
            snapshot,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(StoreError::Encode)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let probe: VersionProbe = serde_json::from_slice(bytes).map_err(StoreError::Corrupt)?;
        if probe.version != SAVE_RECORD_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: probe.version,
            });
        }
        serde_json::from_slice(bytes).map_err(StoreError::Corrupt)
    }
}
