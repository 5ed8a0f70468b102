//! Constant-rate term structure.

use super::traits::check_horizon;
use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Term structure with the same zero rate at every horizon.
///
/// Forwards equal the rate exactly, so a Hull-White model fitted to a flat
/// curve has a drift term free of finite-difference noise. Handy in tests.
///
/// ```
/// use mbs_core::market_data::curves::{YieldCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.05_f64);
/// assert_eq!(curve.zero_rate(7.0).unwrap(), 0.05);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCurve<T: Float> {
    rate: T,
}

impl<T: Float> FlatCurve<T> {
    /// Curve at the given continuously compounded rate.
    #[inline]
    pub fn new(rate: T) -> Self {
        Self { rate }
    }

    /// The constant rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }
}

impl<T: Float> YieldCurve<T> for FlatCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        check_horizon(t)?;
        Ok((-self.rate * t).exp())
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(super::traits::invalid_maturity(t));
        }
        Ok(self.rate)
    }

    fn instantaneous_forward(&self, t: T) -> Result<T, MarketDataError> {
        check_horizon(t)?;
        Ok(self.rate)
    }
}
