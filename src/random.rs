use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of randomness for simulated opponents.
pub trait RandomGenerator {
    /// Returns a value in `0..bound`. `bound` must be non-zero.
    fn next_below(&mut self, bound: usize) -> usize;

    fn choose<'a, K>(&mut self, items: &'a [K]) -> Option<&'a K> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_below(items.len()))
    }
}

/// Draws from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRandomGenerator;

impl RandomGenerator for StandardRandomGenerator {
    fn next_below(&mut self, bound: usize) -> usize {
        rand::rng().random_range(0..bound)
    }
}

/// A reproducible generator: the same seed always yields the same games.
#[derive(Debug, Clone)]
pub struct SeededRandomGenerator {
    rng: StdRng,
}

impl SeededRandomGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededRandomGenerator {
    fn default() -> Self {
        SeededRandomGenerator::new(3819201)
    }
}

impl RandomGenerator for SeededRandomGenerator {
    fn next_below(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRandomGenerator::new(42);
        let mut b = SeededRandomGenerator::new(42);
        let first: Vec<usize> = (0..20).map(|_| a.next_below(9)).collect();
        let second: Vec<usize> = (0..20).map(|_| b.next_below(9)).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|&x| x < 9));
    }

    #[test]
    fn choose_from_empty_slice() {
        let mut generator = StandardRandomGenerator;
        let empty: [u8; 0] = [];
        assert_eq!(generator.choose(&empty), None);

        let moves = [4u8];
        assert_eq!(generator.choose(&moves), Some(&4));
    }
}
