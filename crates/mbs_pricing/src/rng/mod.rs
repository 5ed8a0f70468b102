//! # Random Number Generation Infrastructure
//!
//! Seeded pseudo-random number generation for Monte Carlo trials.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: All generators are seeded; the same seed gives the same sequence
//! - **Independent sub-streams**: Every trial owns a generator keyed by
//!   `(base_seed, trial_index)`, so results never depend on how trials are
//!   scheduled across threads
//! - **Efficiency**: Zero-allocation batch operations via `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use mbs_pricing::rng::PricerRng;
//!
//! // Generator for trial 7 of a run seeded with 42
//! let mut rng = PricerRng::for_stream(42, 7);
//! let z = rng.gen_normal();
//!
//! let mut buffer = vec![0.0; 348];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::PricerRng;
