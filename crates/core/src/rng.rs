//! RNG module - deterministic tile spawning
//!
//! The game core draws all of its randomness from a small seeded LCG so that a
//! session started with the same seed replays the same tile spawns. Ranges are
//! taken from the high bits of each output (multiply-shift), since the low bits
//! of a power-of-two LCG cycle with short periods.

use crate::types::{TileValue, FOUR_TILE_ONE_IN};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max). Returns 0 when `max` is 0.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// True with probability `1 / n`.
    pub fn one_in(&mut self, n: u32) -> bool {
        n > 0 && self.next_range(n) == 0
    }

    /// Value for a freshly spawned tile: 4 one time in ten, otherwise 2.
    pub fn spawn_value(&mut self) -> TileValue {
        if self.one_in(FOUR_TILE_ONE_IN) {
            4
        } else {
            2
        }
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut a = SimpleRng::new(0);
        let mut b = SimpleRng::new(1);
        assert_eq!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..=16 {
            for _ in 0..200 {
                assert!(rng.next_range(max) < max);
            }
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_next_range_covers_all_cells() {
        let mut rng = SimpleRng::new(99);
        let mut seen = [false; 16];
        for _ in 0..1000 {
            seen[rng.next_range(16) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_spawn_value_distribution() {
        let mut rng = SimpleRng::new(2048);
        let mut fours = 0;
        let draws = 10_000;
        for _ in 0..draws {
            match rng.spawn_value() {
                2 => {}
                4 => fours += 1,
                other => panic!("unexpected spawn value {}", other),
            }
        }
        // Expect ~10%; allow a generous band.
        assert!((700..1300).contains(&fours), "fours = {}", fours);
    }
}
