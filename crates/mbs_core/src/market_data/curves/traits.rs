//! The term-structure interface consumed by short-rate models.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Window (in years) used for the finite-difference instantaneous forward.
pub(crate) const FORWARD_BUMP: f64 = 1e-4;

/// `InvalidMaturity` carrying `t` as f64.
pub(crate) fn invalid_maturity<T: Float>(t: T) -> MarketDataError {
    MarketDataError::InvalidMaturity {
        t: t.to_f64().unwrap_or(f64::NAN),
    }
}

/// Rejects negative horizons.
#[inline]
pub(crate) fn check_horizon<T: Float>(t: T) -> Result<(), MarketDataError> {
    if t < T::zero() {
        Err(invalid_maturity(t))
    } else {
        Ok(())
    }
}

/// A continuously compounded term structure.
///
/// Only [`YieldCurve::discount_factor`] is required; rates and forwards are
/// derived from it unless an implementation can answer them directly.
///
/// Every implementation must satisfy `D(0) = 1` and `D(t) > 0` for `t >= 0`,
/// and must reject negative horizons with `MarketDataError::InvalidMaturity`.
///
/// # Example
///
/// ```
/// use mbs_core::market_data::curves::{YieldCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.03_f64);
///
/// let df = curve.discount_factor(2.0).unwrap();
/// assert!((df - (-0.06_f64).exp()).abs() < 1e-15);
///
/// // The short-rate model is anchored on f(0, t)
/// let f = curve.instantaneous_forward(10.0).unwrap();
/// assert!((f - 0.03).abs() < 1e-12);
/// ```
pub trait YieldCurve<T: Float> {
    /// Discount factor `D(t)` for horizon `t` in years.
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Zero rate `r(t) = -ln D(t) / t`; undefined at `t = 0`.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(invalid_maturity(t));
        }
        Ok(-self.discount_factor(t)?.ln() / t)
    }

    /// Simple continuously compounded forward over `[t1, t2]`:
    /// `ln(D(t1) / D(t2)) / (t2 - t1)`.
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        let tau = t2 - t1;
        if tau <= T::zero() {
            return Err(invalid_maturity(tau));
        }
        let growth = self.discount_factor(t1)? / self.discount_factor(t2)?;
        Ok(growth.ln() / tau)
    }

    /// Instantaneous forward `f(0, t)`.
    ///
    /// Finite difference over a 1e-4 year window around `t`;
    /// near zero the window is pushed right so it starts at `0`.
    fn instantaneous_forward(&self, t: T) -> Result<T, MarketDataError> {
        check_horizon(t)?;
        let h = T::from(FORWARD_BUMP).unwrap_or_else(T::epsilon);
        let half = h / (T::one() + T::one());
        let start = if t > half { t - half } else { T::zero() };
        self.forward_rate(start, start + h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Curve with `D(t) = exp(-(b0 t + b1 t^2 / 2))`, so `f(0, t) = b0 + b1 t`.
    struct LinearForward {
        b0: f64,
        b1: f64,
    }

    impl YieldCurve<f64> for LinearForward {
        fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
            check_horizon(t)?;
            Ok((-(self.b0 * t + 0.5 * self.b1 * t * t)).exp())
        }
    }

    fn curve() -> LinearForward {
        LinearForward { b0: 0.02, b1: 0.001 }
    }

    #[test]
    fn test_zero_rate_is_average_forward() {
        // r(t) = b0 + b1 t / 2
        assert_relative_eq!(curve().zero_rate(4.0).unwrap(), 0.022, epsilon = 1e-14);
    }

    #[test]
    fn test_zero_rate_rejects_origin() {
        assert_eq!(
            curve().zero_rate(0.0).unwrap_err(),
            MarketDataError::InvalidMaturity { t: 0.0 }
        );
    }

    #[test]
    fn test_forward_rate_over_interval() {
        // Average of b0 + b1 t over [2, 6]
        assert_relative_eq!(curve().forward_rate(2.0, 6.0).unwrap(), 0.024, epsilon = 1e-14);
        assert!(curve().forward_rate(3.0, 3.0).is_err());
    }

    #[test]
    fn test_instantaneous_forward_tracks_slope() {
        for t in [0.5, 5.0, 25.0] {
            let f = curve().instantaneous_forward(t).unwrap();
            assert_relative_eq!(f, 0.02 + 0.001 * t, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_instantaneous_forward_window_starts_at_zero() {
        // Window [0, h] gives b0 + b1 h / 2
        let f0 = curve().instantaneous_forward(0.0).unwrap();
        assert_relative_eq!(f0, 0.02 + 0.0005 * FORWARD_BUMP, epsilon = 1e-10);
        assert!(curve().instantaneous_forward(-1.0).is_err());
    }
}
