#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use error::*;
pub use generator::*;
pub use resolver::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod card;
mod error;
mod generator;
mod resolver;
mod session;
mod snapshot;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: Dim,
    pub columns: Dim,
}

impl GridSpec {
    pub const fn new(rows: Dim, columns: Dim) -> Self {
        Self { rows, columns }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.columns)
    }

    pub const fn pair_count(&self) -> CellCount {
        self.total_cells() / 2
    }

    pub fn validate(self) -> Result<Self> {
        let total = self.total_cells();
        if total == 0 || total % 2 != 0 {
            Err(GameError::InvalidGridShape {
                rows: self.rows,
                columns: self.columns,
            })
        } else {
            Ok(self)
        }
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

/// Grace periods during which both picked faces stay visible before the pair is removed or hidden again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealDelays {
    pub matched: Duration,
    pub mismatched: Duration,
}

impl RevealDelays {
    pub const fn for_verdict(&self, verdict: Verdict) -> Duration {
        match verdict {
            Verdict::Match => self.matched,
            Verdict::Mismatch => self.mismatched,
        }
    }
}

impl Default for RevealDelays {
    fn default() -> Self {
        Self {
            matched: Duration::from_millis(500),
            mismatched: Duration::from_millis(1000),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid: GridSpec,
    pub palette: Palette,
    pub delays: RevealDelays,
}

impl GameConfig {
    pub fn new(grid: GridSpec, palette: Palette) -> Self {
        Self {
            grid,
            palette,
            delays: RevealDelays::default(),
        }
    }

    pub fn with_delays(mut self, delays: RevealDelays) -> Self {
        self.delays = delays;
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Match,
    Mismatch,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    NoChange,
    FirstPicked(CardId),
    Resolving {
        first: CardId,
        second: CardId,
        verdict: Verdict,
    },
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolveOutcome {
    NoChange,
    Removed { first: CardId, second: CardId },
    Hidden { first: CardId, second: CardId },
}

impl ResolveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    OnePicked,
    Resolving,
}

impl Phase {
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Resolving)
    }
}
