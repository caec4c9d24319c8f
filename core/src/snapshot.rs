use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: CardId,
    pub token: TokenId,
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl From<&Card> for CardRecord {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id(),
            token: card.token(),
            is_flipped: card.is_flipped(),
            is_matched: card.is_matched(),
        }
    }
}

/// Everything needed to resume a session exactly where it was saved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSnapshot {
    pub grid_rows: Dim,
    pub grid_columns: Dim,
    pub match_count: u32,
    pub turns_count: u32,
    pub cards: Vec<CardRecord>,
}

impl SaveSnapshot {
    pub fn grid(&self) -> GridSpec {
        GridSpec::new(self.grid_rows, self.grid_columns)
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Rebuilds the cards in id order, checking the records against the grid and palette they are restored into.
    ///
    /// Only the card count is compared with the grid, a snapshot saved on a differently shaped grid of the same
    /// area is accepted.
    pub fn to_cards(&self, grid: GridSpec, palette: &Palette) -> Result<Vec<Card>> {
        let expected = grid.total_cells();
        if self.card_count() != usize::from(expected) {
            return Err(GameError::SnapshotShapeMismatch {
                expected,
                found: self.card_count(),
            });
        }
        if self.match_count > u32::from(grid.pair_count()) || self.match_count > self.turns_count {
            return Err(GameError::ImpossibleCounters {
                matches: self.match_count,
                turns: self.turns_count,
            });
        }

        let mut slots: Vec<Option<Card>> = vec![None; self.cards.len()];
        for record in &self.cards {
            if !palette.resolves(record.token) {
                return Err(GameError::UnresolvableToken(record.token));
            }
            let slot = slots
                .get_mut(usize::from(record.id))
                .ok_or(GameError::InvalidCardId(record.id))?;
            if slot.is_some() {
                return Err(GameError::InvalidCardId(record.id));
            }
            *slot = Some(Card::with_state(
                record.id,
                record.token,
                record.is_flipped,
                record.is_matched,
            ));
        }

        // every slot is filled: ids are in range, unique, and as many as there are slots
        Ok(slots.into_iter().flatten().collect())
    }
}
