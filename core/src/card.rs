use serde::{Deserialize, Serialize};

use crate::{CardId, TokenId};

/// What the presentation layer should show for a card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Hidden,
    Revealed(TokenId),
    Removed,
}

impl CardFace {
    pub const fn is_in_play(self) -> bool {
        !matches!(self, Self::Removed)
    }
}

impl Default for CardFace {
    fn default() -> Self {
        Self::Hidden
    }
}

/// A single grid cell.
///
/// Cards only change through the resolver and the session; everything outside the crate reads them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    token: TokenId,
    is_flipped: bool,
    is_matched: bool,
}

impl Card {
    pub const fn new(id: CardId, token: TokenId) -> Self {
        Self {
            id,
            token,
            is_flipped: false,
            is_matched: false,
        }
    }

    pub(crate) const fn with_state(
        id: CardId,
        token: TokenId,
        is_flipped: bool,
        is_matched: bool,
    ) -> Self {
        Self {
            id,
            token,
            is_flipped,
            is_matched,
        }
    }

    pub const fn id(&self) -> CardId {
        self.id
    }

    pub const fn token(&self) -> TokenId {
        self.token
    }

    pub const fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    pub const fn is_matched(&self) -> bool {
        self.is_matched
    }

    /// Flipped and still in play, i.e. one of the pending picks.
    pub const fn is_pending(&self) -> bool {
        self.is_flipped && !self.is_matched
    }

    pub const fn face(&self) -> CardFace {
        if self.is_matched {
            CardFace::Removed
        } else if self.is_flipped {
            CardFace::Revealed(self.token)
        } else {
            CardFace::Hidden
        }
    }

    pub fn is_match(&self, other: &Card) -> bool {
        self.id != other.id && self.token == other.token
    }

    pub(crate) fn flip_up(&mut self) -> bool {
        if self.is_flipped {
            return false;
        }
        self.is_flipped = true;
        true
    }

    pub(crate) fn flip_down(&mut self) -> bool {
        if !self.is_flipped {
            return false;
        }
        self.is_flipped = false;
        true
    }

    pub(crate) fn mark_matched(&mut self) {
        self.is_matched = true;
    }
}
