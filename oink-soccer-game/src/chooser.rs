//! Deterministic weighted selection.
//!
//! Candidates keep their declaration order and are sampled with one uniform
//! integer draw against the running prefix sums, so a given random stream
//! always maps to the same item regardless of platform or hash seeds.

use rand::Rng;

use crate::error::MatchError;

/// Prefix-sum sampler over a fixed candidate table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedChooser<T> {
    items: Vec<T>,
    prefix: Vec<u64>,
    total: u64,
}

impl<T> WeightedChooser<T> {
    /// Build a chooser from `(item, weight)` pairs in the given order.
    ///
    /// Zero-weight candidates are dropped; they could never be drawn.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfiguration`] naming `pool` when no
    /// candidate carries a positive weight.
    pub fn new<I>(pool: &'static str, choices: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = (T, u32)>,
    {
        let mut items = Vec::new();
        let mut prefix = Vec::new();
        let mut total = 0_u64;
        for (item, weight) in choices {
            if weight == 0 {
                continue;
            }
            total += u64::from(weight);
            items.push(item);
            prefix.push(total);
        }
        if total == 0 {
            return Err(MatchError::InvalidConfiguration { pool });
        }
        Ok(Self {
            items,
            prefix,
            total,
        })
    }

    /// Draw one item with probability proportional to its weight.
    pub fn pick<R>(&self, rng: &mut R) -> &T
    where
        R: Rng + ?Sized,
    {
        let roll = rng.gen_range(1..=self.total);
        let idx = self.prefix.partition_point(|&edge| edge < roll);
        &self.items[idx]
    }

    #[must_use]
    pub const fn total_weight(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Copy> WeightedChooser<T> {
    /// Draw and copy out the chosen item.
    pub fn pick_copied<R>(&self, rng: &mut R) -> T
    where
        R: Rng + ?Sized,
    {
        *self.pick(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn rejects_empty_and_all_zero_tables() {
        let empty: Result<WeightedChooser<u8>, _> = WeightedChooser::new("empty", Vec::new());
        assert_eq!(
            empty.unwrap_err(),
            MatchError::InvalidConfiguration { pool: "empty" }
        );

        let zeros = WeightedChooser::new("zeros", [('a', 0), ('b', 0)]);
        assert!(matches!(
            zeros,
            Err(MatchError::InvalidConfiguration { pool: "zeros" })
        ));
    }

    #[test]
    fn zero_weight_items_are_never_drawn() {
        let chooser = WeightedChooser::new("mixed", [('a', 0), ('b', 5), ('c', 0)]).unwrap();
        assert_eq!(chooser.len(), 1);
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        for _ in 0..200 {
            assert_eq!(chooser.pick_copied(&mut rng), 'b');
        }
    }

    #[test]
    fn same_seed_yields_same_sequence() {
        let chooser = WeightedChooser::new("letters", [('a', 3), ('b', 4), ('c', 7)]).unwrap();
        let mut first = ChaCha20Rng::seed_from_u64(42);
        let mut second = ChaCha20Rng::seed_from_u64(42);
        let a: Vec<char> = (0..64).map(|_| chooser.pick_copied(&mut first)).collect();
        let b: Vec<char> = (0..64).map(|_| chooser.pick_copied(&mut second)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn frequencies_track_weights() {
        let chooser = WeightedChooser::new("split", [(true, 1), (false, 3)]).unwrap();
        assert_eq!(chooser.total_weight(), 4);
        let mut rng = ChaCha20Rng::seed_from_u64(0xBEEF);
        let draws = 20_000;
        let hits = (0..draws).filter(|_| chooser.pick_copied(&mut rng)).count();
        let observed = crate::numbers::usize_to_f64(hits) / crate::numbers::usize_to_f64(draws);
        assert!((observed - 0.25).abs() < 0.02, "observed {observed:.4}");
    }
}
