use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Snapshot could not be read")]
    Unreadable(#[source] io::Error),
    #[error("Snapshot is corrupt")]
    Corrupt(#[source] serde_json::Error),
    #[error("Snapshot version {found} is not supported")]
    UnsupportedVersion { found: u32 },
    #[error("Snapshot could not be written")]
    WriteFailed(#[source] io::Error),
    #[error("Snapshot could not be encoded")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    /// Load failures; callers treat these like an empty slot.
    pub fn is_unreadable(&self) -> bool {
        matches!(
            self,
            Self::Unreadable(_) | Self::Corrupt(_) | Self::UnsupportedVersion { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
