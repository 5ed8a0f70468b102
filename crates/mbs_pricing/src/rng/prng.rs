//! Pseudo-random number generator wrapper for Monte Carlo simulations.
//!
//! This module provides [`PricerRng`], a seeded PRNG wrapper with
//! reproducible, non-overlapping sub-streams.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// SplitMix64 finaliser, used to spread seed and stream bits over the key.
#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Monte Carlo simulation random number generator.
///
/// # Sub-streams
///
/// [`PricerRng::for_stream`] builds the 256-bit key of the underlying
/// ChaCha generator from both the base seed and the stream index. Distinct
/// `(seed, stream)` pairs always give distinct keys, so the streams of
/// different trials never overlap.
///
/// # Examples
///
/// ```rust
/// use mbs_pricing::rng::PricerRng;
///
/// let mut a = PricerRng::for_stream(42, 0);
/// let mut b = PricerRng::for_stream(42, 0);
/// assert_eq!(a.gen_normal(), b.gen_normal());
/// ```
#[derive(Clone, Debug)]
pub struct PricerRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// The seed used for initialisation (stored for reproducibility tracking).
    seed: u64,
    /// Sub-stream index within the seed.
    stream: u64,
}

impl PricerRng {
    /// Creates a generator on stream 0 of the given seed.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self::for_stream(seed, 0)
    }

    /// Creates the generator for sub-stream `stream` of `seed`.
    pub fn for_stream(seed: u64, stream: u64) -> Self {
        let mut key = [0u8; 32];
        key[0..8].copy_from_slice(&splitmix64(seed).to_le_bytes());
        key[8..16].copy_from_slice(&splitmix64(stream ^ 0xA5A5_A5A5_A5A5_A5A5).to_le_bytes());
        key[16..24].copy_from_slice(&seed.to_le_bytes());
        key[24..32].copy_from_slice(&stream.to_le_bytes());
        Self {
            inner: StdRng::from_seed(key),
            seed,
            stream,
        }
    }

    /// Draws a fresh base seed from operating system entropy.
    ///
    /// Used when the caller does not fix a seed; the returned value should be
    /// logged so the run can be reproduced.
    pub fn entropy_seed() -> u64 {
        rand::thread_rng().next_u64()
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the sub-stream index.
    #[inline]
    pub fn stream(&self) -> u64 {
        self.stream
    }

    /// Generates a single uniform random value in [0, 1).
    #[inline]
    pub fn gen_uniform(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Generates a single standard normal variate (mean=0, std=1).
    ///
    /// Uses the Ziggurat algorithm via `rand_distr::StandardNormal`.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Fills the buffer with standard normal (mean=0, std=1) variates.
    ///
    /// This is a zero-allocation operation; the buffer must be pre-allocated
    /// by the caller.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_seed_reproducibility() {
        let mut rng1 = PricerRng::from_seed(12345);
        let mut rng2 = PricerRng::from_seed(12345);
        for _ in 0..100 {
            assert_eq!(rng1.gen_normal(), rng2.gen_normal());
        }
        assert_eq!(rng1.seed(), 12345);
        assert_eq!(rng1.stream(), 0);
    }

    #[test]
    fn test_streams_differ() {
        let mut a = PricerRng::for_stream(7, 0);
        let mut b = PricerRng::for_stream(7, 1);
        let xs: Vec<f64> = (0..16).map(|_| a.gen_uniform()).collect();
        let ys: Vec<f64> = (0..16).map(|_| b.gen_uniform()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_seed_and_stream_not_interchangeable() {
        let mut a = PricerRng::for_stream(1, 2);
        let mut b = PricerRng::for_stream(2, 1);
        assert_ne!(a.gen_uniform(), b.gen_uniform());
    }

    #[test]
    fn test_uniform_range() {
        let mut rng = PricerRng::from_seed(42);
        for _ in 0..10_000 {
            let value = rng.gen_uniform();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_fill_normal_matches_single_draws() {
        let mut a = PricerRng::for_stream(99, 3);
        let mut b = PricerRng::for_stream(99, 3);
        let mut buffer = vec![0.0; 64];
        a.fill_normal(&mut buffer);
        for &value in &buffer {
            assert_eq!(value, b.gen_normal());
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Normal moments should be approximately correct for any stream.
        #[test]
        fn prop_normal_moments(seed in any::<u64>(), stream in any::<u64>()) {
            let mut rng = PricerRng::for_stream(seed, stream);
            let n = 50_000;
            let mut buffer = vec![0.0; n];
            rng.fill_normal(&mut buffer);

            let mean = buffer.iter().sum::<f64>() / n as f64;
            let variance = buffer.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / n as f64;

            prop_assert!(mean.abs() < 0.05, "mean {} (seed={}, stream={})", mean, seed, stream);
            prop_assert!((variance - 1.0).abs() < 0.1, "variance {}", variance);
        }
    }
}
