//! # mbs_pricing: Monte Carlo Valuation Engine
//!
//! ## Layer 3 (Engine) Role
//!
//! mbs_pricing turns the curve, model and instrument layers into a price:
//! - [`rng`]: Seeded random streams, one independent sub-stream per trial
//! - [`mc`]: Simulation configuration and Hull-White short-rate path generation
//! - [`amortization`]: Per-path amortisation, prepayment and discounting walk
//! - [`simulation`]: Fan-out of trials over rayon and aggregation of path values
//! - [`valuation`]: One-shot entry point with the default market set-up
//!
//! ## Usage Example
//!
//! ```rust
//! use mbs_pricing::valuation::ValuationInputs;
//!
//! let inputs = ValuationInputs {
//!     n_paths: 64,
//!     seed: Some(42),
//!     ..ValuationInputs::default()
//! };
//!
//! let result = inputs.value().unwrap();
//! let summary = result.summary().unwrap();
//! assert_eq!(summary.n_succeeded, 64);
//! assert!(summary.mean_npv > 0.0);
//! ```

#![warn(missing_docs)]

pub mod amortization;
pub mod mc;
pub mod rng;
pub mod simulation;
pub mod valuation;
