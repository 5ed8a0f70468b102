//! Level annuity payment.

use crate::types::ValuationError;
use num_traits::Float;

/// Level periodic payment that fully amortises `present_value` over `periods`
/// periods at the periodic rate `rate`.
///
/// ```text
/// pmt = pv * r / (1 - (1 + r)^-n)      (r != 0)
/// pmt = pv / n                          (r == 0)
/// ```
///
/// # Errors
///
/// * `ValuationError::Numerical` - `periods == 0`, `rate <= -1`, or a
///   non-finite result
///
/// # Examples
///
/// ```
/// use mbs_core::math::annuity_payment;
///
/// let pmt = annuity_payment(0.01_f64, 12, 1000.0).unwrap();
/// assert!((pmt - 88.848788).abs() < 1e-6);
///
/// assert!(annuity_payment(0.01_f64, 0, 1000.0).is_err());
/// ```
pub fn annuity_payment<T: Float>(rate: T, periods: u32, present_value: T) -> Result<T, ValuationError> {
    if periods == 0 {
        return Err(ValuationError::numerical(
            "annuity payment requires at least one period",
        ));
    }
    if !rate.is_finite() || rate <= -T::one() {
        return Err(ValuationError::numerical(format!(
            "annuity rate {} outside (-1, inf)",
            rate.to_f64().unwrap_or(f64::NAN)
        )));
    }

    let n = T::from(periods).unwrap_or_else(T::max_value);
    if rate == T::zero() {
        return Ok(present_value / n);
    }

    // 1 - (1 + r)^-n, computed via ln_1p/exp_m1 to keep precision for tiny r
    let denominator = -(-n * rate.ln_1p()).exp_m1();
    let payment = present_value * rate / denominator;
    if !payment.is_finite() {
        return Err(ValuationError::numerical(format!(
            "annuity payment is not finite (rate {}, periods {})",
            rate.to_f64().unwrap_or(f64::NAN),
            periods
        )));
    }
    Ok(payment)
}
