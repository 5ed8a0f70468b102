//! # mbs_core: Foundation Layer for Mortgage Bond Valuation
//!
//! ## Layer 1 (Foundation) Role
//!
//! mbs_core is the bottom layer of the valuation workspace, providing:
//! - Yield curve construction and queries (`market_data::curves`)
//! - Market data errors: `MarketDataError` (`market_data::error`)
//! - The crate-wide valuation error: `ValuationError` (`types::error`)
//! - Standard normal distribution and annuity helpers (`math`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other mbs_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use mbs_core::market_data::curves::{CurvePoint, YieldCurve, ZeroCurve};
//! use mbs_core::math::annuity_payment;
//!
//! let curve = ZeroCurve::from_points(&[
//!     CurvePoint::new(1.0, 0.0205),
//!     CurvePoint::new(10.0, 0.027606),
//!     CurvePoint::new(30.0, 0.0282),
//! ])
//! .unwrap();
//! let df = curve.discount_factor(5.0).unwrap();
//! assert!(df > 0.0 && df < 1.0);
//!
//! // Monthly payment on 1,000,000 at 2.5% over 348 months
//! let payment = annuity_payment(0.025_f64 / 12.0, 348, 1_000_000.0).unwrap();
//! assert!(payment > 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `CurvePoint`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
