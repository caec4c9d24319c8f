use thiserror::Error;

use crate::{CardId, CellCount, Dim, TokenId};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid {rows}x{columns} must have a positive, even number of cells")]
    InvalidGridShape { rows: Dim, columns: Dim },
    #[error("Palette has no kinds to build pairs from")]
    EmptyPalette,
    #[error("Snapshot holds {found} cards but the grid has {expected}")]
    SnapshotShapeMismatch { expected: CellCount, found: usize },
    #[error("Snapshot token {0:?} is not in the palette")]
    UnresolvableToken(TokenId),
    #[error("Snapshot counters ({matches} matches in {turns} turns) cannot occur on this grid")]
    ImpossibleCounters { matches: u32, turns: u32 },
    #[error("Snapshot card id {0} is out of range or repeated")]
    InvalidCardId(CardId),
}

pub type Result<T> = core::result::Result<T, GameError>;
