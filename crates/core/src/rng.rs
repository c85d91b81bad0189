//! RNG module - random shape selection
//!
//! Hands are filled by drawing uniformly from the shape catalog. The draw goes
//! through the [`ShapeSource`] trait so a session can be driven by a seeded
//! generator in play and by a fixed script in tests.
//!
//! Also provides a simple LCG for deterministic games.

/// Source of uniform picks over the shape catalog
pub trait ShapeSource {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Multiply-shift keeps the high bits; the low bits of an LCG cycle with
    /// short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current generator state (reseeding with it replays the rest of the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ShapeSource for SimpleRng {
    fn pick(&mut self, len: usize) -> usize {
        self.next_range(len as u32) as usize
    }
}

/// Replays a fixed list of catalog indices, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    picks: Vec<usize>,
    pos: usize,
}

impl ScriptedSource {
    pub fn new(picks: impl Into<Vec<usize>>) -> Self {
        Self {
            picks: picks.into(),
            pos: 0,
        }
    }

    /// Number of picks handed out so far
    pub fn drawn(&self) -> usize {
        self.pos
    }
}

impl ShapeSource for ScriptedSource {
    fn pick(&mut self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let v = self.picks[self.pos % self.picks.len()];
        self.pos += 1;
        v % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_zero_seed_is_not_stuck() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), rng.next_u32());
    }

    #[test]
    fn test_pick_stays_in_range_and_covers_catalog() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [0u32; 9];
        for _ in 0..9_000 {
            let i = rng.pick(9);
            assert!(i < 9);
            seen[i] += 1;
        }
        // Roughly uniform: every bucket within 30% of the mean
        for count in seen {
            assert!((700..=1300).contains(&count), "bucket count {count}");
        }
    }

    #[test]
    fn test_scripted_source_cycles_and_wraps() {
        let mut src = ScriptedSource::new(vec![1, 2, 10]);
        assert_eq!(src.pick(9), 1);
        assert_eq!(src.pick(9), 2);
        assert_eq!(src.pick(9), 1); // 10 % 9
        assert_eq!(src.pick(9), 1);
        assert_eq!(src.drawn(), 4);
    }
}
