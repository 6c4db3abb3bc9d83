// Random source abstraction for the synthetic data generators
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use std::sync::{Mutex, PoisonError};

pub trait RandomSource: Send + Sync {
    /// Draw an integer uniformly from the half-open `range`.
    fn uniform(&self, range: Range<u32>) -> u32;
}

/// `SmallRng`-backed source shared between handlers.
pub struct SeededSource {
    rng: Mutex<SmallRng>,
}

impl SeededSource {
    /// Reproducible source for a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }
}

impl RandomSource for SeededSource {
    fn uniform(&self, range: Range<u32>) -> u32 {
        // A panic mid-draw leaves the generator state intact, so a poisoned
        // lock is still usable.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(range)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_source_is_reproducible() {
        let a = SeededSource::new(7);
        let b = SeededSource::new(7);
        let left: Vec<u32> = (0..32).map(|_| a.uniform(0..1_000)).collect();
        let right: Vec<u32> = (0..32).map(|_| b.uniform(0..1_000)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_seeded_source_stays_in_half_open_range() {
        let source = SeededSource::new(42);
        for _ in 0..10_000 {
            let v = source.uniform(5..20);
            assert!((5..20).contains(&v));
        }
    }
}
