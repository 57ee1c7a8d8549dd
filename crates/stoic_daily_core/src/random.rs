//! Uniform random pick from a list.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks list entries uniformly at random.
///
/// Shared by reference; the generator sits behind a mutex so resolvers can
/// draw from it through `&self`.
#[derive(Debug)]
pub struct RandomSelector {
    rng: Mutex<StdRng>,
}

impl RandomSelector {
    /// Selector seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible selector.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Uniform index in `[0, len)`, or `None` when `len` is zero.
    pub fn index(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        Some(rng.gen_range(0..len))
    }

    /// Uniformly pick one item, or `None` for an empty slice.
    pub fn pick<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        self.index(items.len()).and_then(|i| items.get(i))
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_yields_none() {
        let selector = RandomSelector::seeded(1);
        let empty: [u8; 0] = [];
        assert!(selector.pick(&empty).is_none());
    }

    #[test]
    fn test_single_item_always_picked() {
        let selector = RandomSelector::seeded(7);
        for _ in 0..50 {
            assert_eq!(selector.pick(&["only"]), Some(&"only"));
        }
    }

    #[test]
    fn test_every_index_is_reached() {
        let selector = RandomSelector::from_entropy();
        let items: Vec<usize> = (0..10).collect();
        let mut seen = [false; 10];

        // 10_000 draws over 10 items: the chance of missing one is ~10 * 0.9^10000
        for _ in 0..10_000 {
            let picked = selector.pick(&items).unwrap();
            seen[*picked] = true;
        }

        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = RandomSelector::seeded(42);
        let b = RandomSelector::seeded(42);
        let picks_a: Vec<_> = (0..20).map(|_| a.index(100)).collect();
        let picks_b: Vec<_> = (0..20).map(|_| b.index(100)).collect();
        assert_eq!(picks_a, picks_b);
    }
}
