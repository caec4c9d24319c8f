use pairmatch_core::{GameError, GameSession, Phase};

use crate::SnapshotStore;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resumed {
    Restored(Phase),
    Fresh(FreshStart),
}

/// Why a saved game was not resumed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FreshStart {
    NoSnapshot,
    Unreadable,
    Rejected(GameError),
}

/// Restores the stored game into `session`, or starts a new one with `seed` when there is nothing usable.
///
/// Only fails when the session's own grid cannot be built.
pub fn resume_or_new<S>(
    store: &S,
    session: &mut GameSession,
    seed: u64,
) -> pairmatch_core::Result<Resumed>
where
    S: SnapshotStore + ?Sized,
{
    let reason = match store.load() {
        Ok(Some(snapshot)) => match session.restore(&snapshot) {
            Ok(phase) => return Ok(Resumed::Restored(phase)),
            Err(err) => {
                log::warn!("Saved game rejected, starting a new game: {}", err);
                FreshStart::Rejected(err)
            }
        },
        Ok(None) => {
            log::info!("No saved game, starting a new game");
            FreshStart::NoSnapshot
        }
        Err(err) => {
            log::warn!("Saved game unavailable, starting a new game: {}", err);
            FreshStart::Unreadable
        }
    };

    session.restart(seed)?;
    Ok(Resumed::Fresh(reason))
}

/// Saves `session`, logging failures. Gameplay is never affected by the result.
pub fn save_progress<S>(store: &mut S, session: &GameSession) -> crate::Result<()>
where
    S: SnapshotStore + ?Sized,
{
    store
        .save(&session.save())
        .inspect_err(|err| log::warn!("Progress not saved: {}", err))
}
