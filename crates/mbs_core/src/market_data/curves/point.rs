//! Curve pillar type.

use num_traits::Float;

/// A single zero-curve pillar: tenor in years and the continuously
/// compounded zero rate at that tenor.
///
/// # Example
///
/// ```
/// use mbs_core::market_data::curves::CurvePoint;
///
/// let point = CurvePoint::new(5.0_f64, 0.024289);
/// assert_eq!(point.tenor, 5.0);
/// assert_eq!(point.rate, 0.024289);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint<T: Float> {
    /// Tenor in years (must be positive)
    pub tenor: T,
    /// Zero rate at the tenor
    pub rate: T,
}

impl<T: Float> CurvePoint<T> {
    /// Create a pillar.
    #[inline]
    pub fn new(tenor: T, rate: T) -> Self {
        Self { tenor, rate }
    }
}

impl<T: Float> From<(T, T)> for CurvePoint<T> {
    fn from((tenor, rate): (T, T)) -> Self {
        Self::new(tenor, rate)
    }
}
