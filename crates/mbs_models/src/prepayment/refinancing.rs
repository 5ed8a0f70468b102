//! Refinancing-incentive prepayment model.
//!
//! For a loan with fixed payment `yd`, outstanding balance `bal` and `nper`
//! months remaining, at annual market rate `r`:
//!
//! ```text
//! new_yd = annuity(r / 12, nper, bal)
//! gain   = yd / new_yd - 1
//! p      = 0                        if nper == 0 or gain < 0
//! p      = Phi(gain; 0, dispersion) otherwise
//! ```
//!
//! The sign convention of `gain` is kept exactly as written; valuations
//! depend on it.

use mbs_core::math::{annuity_payment, normal_cdf};
use mbs_core::types::ValuationError;

use super::PrepaymentModel;
use crate::instruments::MONTHS_PER_YEAR;

/// Standard deviation of the normal response to the refinancing gain.
pub const DEFAULT_DISPERSION: f64 = 0.05;

/// Largest probability returned, keeping results strictly below one.
pub const MAX_PREPAYMENT_PROBABILITY: f64 = 1.0 - f64::EPSILON;

/// Prepayment propensity driven by the refinancing gain.
///
/// # Example
///
/// ```
/// use mbs_models::prepayment::{PrepaymentModel, RefinancingPrepayment};
///
/// let model = RefinancingPrepayment::default();
///
/// // No remaining term: nothing to refinance into
/// assert_eq!(model.probability(0.01, 500_000.0, 0, 4_000.0).unwrap(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RefinancingPrepayment {
    dispersion: f64,
}

impl RefinancingPrepayment {
    /// Create a model with the given response dispersion.
    pub fn new(dispersion: f64) -> Result<Self, ValuationError> {
        if !(dispersion.is_finite() && dispersion > 0.0) {
            return Err(ValuationError::config(
                "prepayment_dispersion",
                dispersion,
                "must be positive",
            ));
        }
        Ok(Self { dispersion })
    }

    /// Response dispersion.
    #[inline]
    pub fn dispersion(&self) -> f64 {
        self.dispersion
    }

    /// Refinancing gain `yd / new_yd - 1` at annual rate `rate`.
    ///
    /// # Errors
    ///
    /// `ValuationError::Numerical` when `remaining_periods` is zero or the
    /// market payment is not a positive finite number.
    pub fn refinancing_gain(
        &self,
        rate: f64,
        balance: f64,
        remaining_periods: u32,
        scheduled_payment: f64,
    ) -> Result<f64, ValuationError> {
        let monthly_rate = rate / f64::from(MONTHS_PER_YEAR);
        let market_payment = annuity_payment(monthly_rate, remaining_periods, balance)?;
        if !(market_payment.is_finite() && market_payment > 0.0) {
            return Err(ValuationError::numerical(format!(
                "market payment {market_payment} on balance {balance} is not positive"
            )));
        }
        Ok(scheduled_payment / market_payment - 1.0)
    }
}

impl Default for RefinancingPrepayment {
    fn default() -> Self {
        Self {
            dispersion: DEFAULT_DISPERSION,
        }
    }
}

impl PrepaymentModel for RefinancingPrepayment {
    fn probability(
        &self,
        rate: f64,
        balance: f64,
        remaining_periods: u32,
        scheduled_payment: f64,
    ) -> Result<f64, ValuationError> {
        if remaining_periods == 0 {
            return Ok(0.0);
        }

        let gain = self.refinancing_gain(rate, balance, remaining_periods, scheduled_payment)?;
        if gain < 0.0 {
            return Ok(0.0);
        }

        let p = normal_cdf(gain, 0.0, self.dispersion);
        Ok(p.clamp(0.0, MAX_PREPAYMENT_PROBABILITY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mbs_core::math::norm_cdf;
    use proptest::prelude::*;

    const PAYMENT: f64 = 4_145.0;

    #[test]
    fn test_zero_remaining_periods_returns_zero() {
        let model = RefinancingPrepayment::default();
        for rate in [-0.02, 0.0, 0.01, 0.25] {
            for balance in [0.0, 1.0, 1e6] {
                assert_eq!(model.probability(rate, balance, 0, PAYMENT).unwrap(), 0.0);
            }
        }
    }

    #[test]
    fn test_negative_gain_returns_zero() {
        // Market rate above coupon: market payment exceeds the scheduled one
        let model = RefinancingPrepayment::default();
        let p = model.probability(0.05, 1_000_000.0, 348, PAYMENT).unwrap();
        assert_eq!(p, 0.0);
    }

    #[test]
    fn test_positive_gain_uses_normal_cdf() {
        let model = RefinancingPrepayment::default();
        let (rate, balance, nper) = (0.005, 1_000_000.0, 348);
        let gain = model.refinancing_gain(rate, balance, nper, PAYMENT).unwrap();
        assert!(gain > 0.0);

        let p = model.probability(rate, balance, nper, PAYMENT).unwrap();
        assert_relative_eq!(p, norm_cdf(gain / 0.05), epsilon = 1e-15);
        assert!(p >= 0.5);
    }

    #[test]
    fn test_gain_definition() {
        let model = RefinancingPrepayment::default();
        let market = annuity_payment(0.02 / 12.0, 120, 300_000.0).unwrap();
        let gain = model.refinancing_gain(0.02, 300_000.0, 120, 3_000.0).unwrap();
        assert_relative_eq!(gain, 3_000.0 / market - 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_huge_gain_stays_below_one() {
        let model = RefinancingPrepayment::default();
        let p = model.probability(-0.05, 1_000.0, 300, 1_000.0).unwrap();
        assert!(p < 1.0);
        assert!(p > 0.99);
    }

    #[test]
    fn test_invalid_dispersion() {
        assert!(RefinancingPrepayment::new(0.0).is_err());
        assert_eq!(RefinancingPrepayment::new(0.1).unwrap().dispersion(), 0.1);
    }

    proptest! {
        #[test]
        fn prop_probability_in_unit_interval(
            rate in -0.05f64..0.25,
            balance in 1.0f64..2e6,
            nper in 0u32..400,
            payment in 1.0f64..20_000.0,
        ) {
            let model = RefinancingPrepayment::default();
            let p = model.probability(rate, balance, nper, payment).unwrap();
            prop_assert!((0.0..1.0).contains(&p));
        }

        #[test]
        fn prop_probability_monotone_in_scheduled_payment(
            rate in 0.0f64..0.1,
            balance in 1_000.0f64..1e6,
            nper in 1u32..360,
            payment in 1.0f64..10_000.0,
            bump in 0.0f64..1_000.0,
        ) {
            // A larger scheduled payment means a larger gain
            let model = RefinancingPrepayment::default();
            let low = model.probability(rate, balance, nper, payment).unwrap();
            let high = model.probability(rate, balance, nper, payment + bump).unwrap();
            prop_assert!(high >= low);
        }
    }
}
