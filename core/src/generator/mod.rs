use crate::*;
use alloc::vec::Vec;
pub use shuffled::*;

mod shuffled;

pub trait PairGenerator {
    /// Produces `2 * pair_count` tokens in which every token present appears exactly twice.
    fn generate(self, pair_count: CellCount, palette: &Palette) -> Vec<TokenId>;
}
