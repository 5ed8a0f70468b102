//! Borrower prepayment models.
//!
//! A prepayment model maps the current market rate and the loan's state to the
//! fraction of the outstanding balance repaid early in the current month.
//!
//! - [`PrepaymentModel`]: Trait consulted once per period by the amortisation walk
//! - [`RefinancingPrepayment`]: Normal-CDF response to the refinancing gain

mod refinancing;

pub use refinancing::{RefinancingPrepayment, DEFAULT_DISPERSION, MAX_PREPAYMENT_PROBABILITY};

use mbs_core::types::ValuationError;

/// Monthly prepayment propensity.
pub trait PrepaymentModel {
    /// Probability in [0, 1) that the balance is prepaid this month.
    ///
    /// # Arguments
    ///
    /// * `rate` - Current annualised short rate
    /// * `balance` - Outstanding balance
    /// * `remaining_periods` - Months left until scheduled maturity
    /// * `scheduled_payment` - The bond's fixed monthly payment
    fn probability(
        &self,
        rate: f64,
        balance: f64,
        remaining_periods: u32,
        scheduled_payment: f64,
    ) -> Result<f64, ValuationError>;
}

impl<P: PrepaymentModel + ?Sized> PrepaymentModel for &P {
    fn probability(
        &self,
        rate: f64,
        balance: f64,
        remaining_periods: u32,
        scheduled_payment: f64,
    ) -> Result<f64, ValuationError> {
        (**self).probability(rate, balance, remaining_periods, scheduled_payment)
    }
}
