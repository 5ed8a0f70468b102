//! Market data structures for mortgage bond valuation.
//!
//! This module provides the yield curve abstraction consumed by the short-rate
//! model: zero rates, discount factors and forward rates at arbitrary horizons.
//!
//! # Components
//!
//! - [`curves`]: Yield curve trait and implementations (ZeroCurve, FlatCurve)
//! - [`error`]: Market data error types (MarketDataError)
//!
//! # Example
//!
//! ```
//! use mbs_core::market_data::curves::{YieldCurve, FlatCurve};
//!
//! let curve = FlatCurve::new(0.05_f64);
//! let df = curve.discount_factor(1.0).unwrap();
//! assert!((df - 0.951229).abs() < 1e-5);
//! ```

pub mod curves;
pub mod error;

pub use curves::{CurveInterpolation, CurvePoint, FlatCurve, YieldCurve, ZeroCurve};
pub use error::MarketDataError;
