//! Seedable randomness for deck shuffling.
//!
//! Every round is reproducible from the seed the RNG was created with.
//! Unseeded sessions draw their seed from OS entropy and still expose it,
//! so a memorable round can be replayed with `--seed`.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG used for shuffling.
///
/// ChaCha8 is fast and portable: the same seed deals the same sequence of
/// boards on every platform.
#[derive(Clone, Debug)]
pub struct DeckRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl DeckRng {
    /// Creates an RNG from a fixed seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates an RNG with a seed drawn from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Returns the seed this RNG started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RngCore for DeckRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_determinism() {
        let mut rng1 = DeckRng::new(42);
        let mut rng2 = DeckRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range(0..1000), rng2.gen_range(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = DeckRng::new(1);
        let mut rng2 = DeckRng::new(2);

        let seq1: Vec<u32> = (0..10).map(|_| rng1.gen_range(0..1000)).collect();
        let seq2: Vec<u32> = (0..10).map(|_| rng2.gen_range(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_seed_is_reported() {
        assert_eq!(DeckRng::new(7).seed(), 7);
        let rng = DeckRng::from_entropy();
        assert_eq!(DeckRng::new(rng.seed()).seed(), rng.seed());
    }
}
