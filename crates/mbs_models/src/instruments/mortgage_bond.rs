//! Fixed-rate amortising mortgage bond.

use mbs_core::math::annuity_payment;
use mbs_core::types::ValuationError;

/// Number of payment periods per year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Fixed-rate, level-payment mortgage bond.
///
/// The monthly payment is derived once at construction from the annuity
/// formula and stays fixed for the life of the bond. Extra principal repaid
/// early shortens the tail of the schedule; it never re-derives the payment.
///
/// # Example
///
/// ```
/// use mbs_models::instruments::MortgageBond;
///
/// let bond = MortgageBond::from_years(1_000_000.0, 0.025, 29).unwrap();
/// assert_eq!(bond.term_months(), 348);
/// assert!((bond.monthly_rate() - 0.025 / 12.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MortgageBond {
    principal: f64,
    coupon: f64,
    term_months: u32,
    monthly_payment: f64,
}

impl MortgageBond {
    /// Create a bond from its principal, annual coupon rate and term in months.
    ///
    /// # Errors
    ///
    /// `ValuationError::Configuration` if the principal is not positive, the
    /// coupon is negative (or non-finite), or the term is zero.
    pub fn new(principal: f64, coupon: f64, term_months: u32) -> Result<Self, ValuationError> {
        if !(principal.is_finite() && principal > 0.0) {
            return Err(ValuationError::config("principal", principal, "must be positive"));
        }
        if !(coupon.is_finite() && coupon >= 0.0) {
            return Err(ValuationError::config("coupon", coupon, "must be non-negative"));
        }
        if term_months == 0 {
            return Err(ValuationError::config("term_months", term_months, "must be positive"));
        }

        let monthly_payment =
            annuity_payment(coupon / f64::from(MONTHS_PER_YEAR), term_months, principal)?;

        Ok(Self {
            principal,
            coupon,
            term_months,
            monthly_payment,
        })
    }

    /// Create a bond with a term expressed in whole years.
    pub fn from_years(principal: f64, coupon: f64, term_years: u32) -> Result<Self, ValuationError> {
        if term_years == 0 {
            return Err(ValuationError::config("term_years", term_years, "must be positive"));
        }
        let term_months = term_years.checked_mul(MONTHS_PER_YEAR).ok_or_else(|| {
            ValuationError::config("term_years", term_years, "too large")
        })?;
        Self::new(principal, coupon, term_months)
    }

    /// Original principal.
    #[inline]
    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// Annual coupon rate.
    #[inline]
    pub fn coupon(&self) -> f64 {
        self.coupon
    }

    /// Coupon rate per monthly period.
    #[inline]
    pub fn monthly_rate(&self) -> f64 {
        self.coupon / f64::from(MONTHS_PER_YEAR)
    }

    /// Term in months.
    #[inline]
    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    /// Term in years (fractional when the term is not a whole number of years).
    #[inline]
    pub fn term_years(&self) -> f64 {
        f64::from(self.term_months) / f64::from(MONTHS_PER_YEAR)
    }

    /// Fixed scheduled monthly payment.
    #[inline]
    pub fn monthly_payment(&self) -> f64 {
        self.monthly_payment
    }
}
