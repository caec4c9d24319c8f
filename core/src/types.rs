use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Single grid axis used for row and column counts.
pub type Dim = u8;

/// Count type used for total-cell and pair counts.
pub type CellCount = u16;

/// Stable index of a card inside its grid, `0..rows*columns`.
pub type CardId = u16;

pub const fn mult(a: Dim, b: Dim) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Face shared by the two cards of a pair, stored as an index into the [`Palette`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(pub u16);

impl TokenId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Ordered set of distinct kinds that tokens resolve against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    kinds: Vec<String>,
}

impl Palette {
    pub fn new<I, S>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kinds: kinds.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Token for the `n`-th pair of a grid, cycling through the kinds when there are more pairs than kinds.
    pub fn cycled_token(&self, n: usize) -> Option<TokenId> {
        if self.kinds.is_empty() {
            return None;
        }
        let index = n % self.kinds.len();
        index.try_into().ok().map(TokenId)
    }

    pub fn get(&self, token: TokenId) -> Option<&str> {
        self.kinds.get(token.index()).map(String::as_str)
    }

    pub fn resolves(&self, token: TokenId) -> bool {
        token.index() < self.kinds.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.kinds.iter().map(String::as_str)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            kinds: [
                "anchor", "bell", "crown", "diamond", "feather", "key", "leaf", "star",
            ]
            .iter()
            .map(|kind| kind.to_string())
            .collect(),
        }
    }
}
