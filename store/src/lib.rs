//! Local persistence for pairmatch sessions.
//!
//! A single slot holds the latest [`SaveSnapshot`] wrapped in a versioned [`SaveRecord`]. Failures never reach
//! gameplay: unreadable slots are treated as empty and failed writes leave the previous record in place.

use pairmatch_core::SaveSnapshot;

pub use error::*;
pub use memory::*;
pub use record::*;
pub use resume::*;
pub use slot::*;

mod error;
mod memory;
mod record;
mod resume;
mod slot;

pub trait SnapshotStore {
    /// Replaces the stored snapshot; on error the previous one is still loadable.
    fn save(&mut self, snapshot: &SaveSnapshot) -> Result<()>;

    /// `Ok(None)` when nothing has been saved.
    fn load(&self) -> Result<Option<SaveSnapshot>>;

    /// Removes the stored snapshot. Clearing an empty slot succeeds.
    fn clear(&mut self) -> Result<()>;
}
