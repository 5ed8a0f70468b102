//! Curve abstractions for discounting and short-rate model fitting.
//!
//! This module provides:
//! - [`YieldCurve`]: Generic trait for discount factor and rate calculations
//! - [`CurvePoint`]: A single (tenor, zero rate) pillar
//! - [`ZeroCurve`]: Pillar-based interpolated zero curve
//! - [`CurveInterpolation`]: Interpolation method selection
//! - [`FlatCurve`]: Constant rate yield curve implementation

mod flat;
mod point;
mod traits;
mod zero;

pub use flat::FlatCurve;
pub use point::CurvePoint;
pub use traits::YieldCurve;
pub use zero::{CurveInterpolation, ZeroCurve};
