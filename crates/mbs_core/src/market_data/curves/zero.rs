//! Interpolated zero curve built from market pillars.

use super::traits::{check_horizon, invalid_maturity};
use super::{CurvePoint, YieldCurve};
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Interpolation method for zero curves.
///
/// Determines how rates or discount factors are interpolated between
/// pillar points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveInterpolation {
    /// Linear interpolation on zero rates.
    ///
    /// Interpolates the zero rate linearly between pillar points,
    /// then computes the discount factor as exp(-r*t).
    #[default]
    Linear,

    /// Log-linear interpolation on discount factors.
    ///
    /// Interpolates ln(D(t)) linearly, which is equivalent to
    /// assuming a constant forward rate between pillars.
    LogLinear,
}

/// Zero curve defined by an ordered set of (tenor, zero rate) pillars.
///
/// Pillars are validated once at construction and never change afterwards.
/// Queries before the first pillar or beyond the last one use flat
/// extrapolation of the boundary zero rate unless extrapolation is disabled.
///
/// # Example
///
/// ```
/// use mbs_core::market_data::curves::{CurvePoint, YieldCurve, ZeroCurve};
///
/// let curve: ZeroCurve<f64> = ZeroCurve::from_points(&[
///     CurvePoint::new(1.0, 0.02),
///     CurvePoint::new(2.0, 0.03),
/// ])
/// .unwrap();
///
/// let r = curve.zero_rate(1.5).unwrap();
/// assert!((r - 0.025).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct ZeroCurve<T: Float> {
    /// Strictly increasing pillar tenors (years)
    tenors: Vec<T>,
    /// Zero rates at the pillars
    rates: Vec<T>,
    /// Interpolation method
    method: CurveInterpolation,
    /// Whether to allow flat extrapolation
    allow_extrapolation: bool,
}

impl<T: Float> ZeroCurve<T> {
    /// Build a linearly interpolated curve with flat extrapolation.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InsufficientData` - Fewer than 2 pillars
    /// * `MarketDataError::InvalidMaturity` - A non-positive tenor
    /// * `MarketDataError::NonMonotonicTenor` - Tenors not strictly increasing
    /// * `MarketDataError::NonFiniteRate` - A NaN or infinite rate
    pub fn from_points(points: &[CurvePoint<T>]) -> Result<Self, MarketDataError> {
        Self::new(points, CurveInterpolation::Linear, true)
    }

    /// Build a curve with an explicit interpolation method and extrapolation policy.
    pub fn new(
        points: &[CurvePoint<T>],
        method: CurveInterpolation,
        allow_extrapolation: bool,
    ) -> Result<Self, MarketDataError> {
        if points.len() < 2 {
            return Err(MarketDataError::InsufficientData {
                got: points.len(),
                need: 2,
            });
        }

        for (i, point) in points.iter().enumerate() {
            let tenor = point.tenor.to_f64().unwrap_or(f64::NAN);
            if point.tenor.is_nan() || point.tenor <= T::zero() || point.tenor.is_infinite() {
                return Err(invalid_maturity(point.tenor));
            }
            if !point.rate.is_finite() {
                return Err(MarketDataError::NonFiniteRate { tenor });
            }
            if i > 0 && point.tenor <= points[i - 1].tenor {
                return Err(MarketDataError::NonMonotonicTenor {
                    index: i,
                    tenor,
                    previous: points[i - 1].tenor.to_f64().unwrap_or(f64::NAN),
                });
            }
        }

        Ok(Self {
            tenors: points.iter().map(|p| p.tenor).collect(),
            rates: points.iter().map(|p| p.rate).collect(),
            method,
            allow_extrapolation,
        })
    }

    /// Return the tenor domain (first pillar, last pillar).
    #[inline]
    pub fn domain(&self) -> (T, T) {
        (self.tenors[0], self.tenors[self.tenors.len() - 1])
    }

    /// Return the interpolation method.
    #[inline]
    pub fn method(&self) -> CurveInterpolation {
        self.method
    }

    /// Return the pillars the curve was built from.
    pub fn points(&self) -> Vec<CurvePoint<T>> {
        self.tenors
            .iter()
            .zip(self.rates.iter())
            .map(|(&tenor, &rate)| CurvePoint::new(tenor, rate))
            .collect()
    }

    /// Index `i` such that `tenors[i] <= t < tenors[i+1]`, clamped to [0, n-2].
    #[inline]
    fn find_segment(&self, t: T) -> usize {
        let pos = self.tenors.partition_point(|&ti| ti <= t);
        pos.saturating_sub(1).min(self.tenors.len() - 2)
    }

    /// Boundary zero rate for `t` outside the pillar range, if allowed.
    fn extrapolated_rate(&self, t: T) -> Result<Option<T>, MarketDataError> {
        let (t_min, t_max) = self.domain();
        if t >= t_min && t <= t_max {
            return Ok(None);
        }
        if !self.allow_extrapolation {
            return Err(MarketDataError::OutOfBounds {
                x: t.to_f64().unwrap_or(0.0),
                min: t_min.to_f64().unwrap_or(0.0),
                max: t_max.to_f64().unwrap_or(0.0),
            });
        }
        if t < t_min {
            Ok(Some(self.rates[0]))
        } else {
            Ok(Some(self.rates[self.rates.len() - 1]))
        }
    }

    fn interpolate_linear(&self, t: T) -> Result<T, MarketDataError> {
        if let Some(rate) = self.extrapolated_rate(t)? {
            return Ok(rate);
        }
        let i = self.find_segment(t);
        let (t0, t1) = (self.tenors[i], self.tenors[i + 1]);
        let (r0, r1) = (self.rates[i], self.rates[i + 1]);
        Ok(r0 + (r1 - r0) * (t - t0) / (t1 - t0))
    }

    fn interpolate_log_linear(&self, t: T) -> Result<T, MarketDataError> {
        if let Some(rate) = self.extrapolated_rate(t)? {
            return Ok((-rate * t).exp());
        }
        let i = self.find_segment(t);
        let (t0, t1) = (self.tenors[i], self.tenors[i + 1]);
        let log_df0 = -self.rates[i] * t0;
        let log_df1 = -self.rates[i + 1] * t1;
        Ok((log_df0 + (log_df1 - log_df0) * (t - t0) / (t1 - t0)).exp())
    }
}

impl<T: Float> YieldCurve<T> for ZeroCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        check_horizon(t)?;
        if t == T::zero() {
            return Ok(T::one());
        }

        match self.method {
            CurveInterpolation::Linear => {
                let rate = self.interpolate_linear(t)?;
                Ok((-rate * t).exp())
            }
            CurveInterpolation::LogLinear => self.interpolate_log_linear(t),
        }
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(invalid_maturity(t));
        }

        match self.method {
            CurveInterpolation::Linear => self.interpolate_linear(t),
            CurveInterpolation::LogLinear => {
                let df = self.interpolate_log_linear(t)?;
                Ok(-df.ln() / t)
            }
        }
    }
}
