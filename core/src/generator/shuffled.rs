use super::*;

/// Lays out `pair_count` pairs taken from the palette in order (wrapping when the palette is shorter than the
/// pair count) and shuffles them uniformly.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffledPairGenerator {
    seed: u64,
}

impl ShuffledPairGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl PairGenerator for ShuffledPairGenerator {
    fn generate(self, pair_count: CellCount, palette: &Palette) -> Vec<TokenId> {
        use rand::prelude::*;

        if pair_count == 0 {
            return Vec::new();
        }
        if palette.is_empty() {
            log::warn!(
                "Cannot lay out {} pairs from an empty palette, generated nothing",
                pair_count
            );
            return Vec::new();
        }
        if usize::from(pair_count) > palette.len() {
            log::debug!(
                "Palette of {} kinds reused for {} pairs",
                palette.len(),
                pair_count
            );
        }

        let mut tokens = Vec::with_capacity(usize::from(pair_count) * 2);
        for n in 0..usize::from(pair_count) {
            let Some(token) = palette.cycled_token(n) else {
                break;
            };
            tokens.push(token);
            tokens.push(token);
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        tokens.shuffle(&mut rng);
        tokens
    }
}
