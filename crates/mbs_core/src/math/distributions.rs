//! Standard normal distribution functions.
//!
//! This module provides implementations generic over `T: Float` of:
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `normal_cdf`: CDF of a normal with arbitrary mean and standard deviation

use num_traits::Float;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Converts an f64 literal into `T`.
#[inline]
fn lit<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::zero)
}

/// Complementary error function approximation using Horner's method.
///
/// Uses the Abramowitz and Stegun approximation (formula 7.1.26) which provides
/// maximum error of 1.5e-7 for all x.
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let abs_x = x.abs();

    // Abramowitz and Stegun constants (7.1.26)
    let a1 = lit::<T>(0.254829592);
    let a2 = lit::<T>(-0.284496736);
    let a3 = lit::<T>(1.421413741);
    let a4 = lit::<T>(-1.453152027);
    let a5 = lit::<T>(1.061405429);
    let p = lit::<T>(0.3275911);

    let t = one / (one + p * abs_x);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    // erfc(-x) = 2 - erfc(x)
    if x < T::zero() {
        lit::<T>(2.0) - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1).
///
/// # Mathematical Definition
/// Φ(x) = (1/2) * erfc(-x / sqrt(2))
///
/// # Examples
/// ```
/// use mbs_core::math::norm_cdf;
///
/// let cdf_0 = norm_cdf(0.0_f64);
/// assert!((cdf_0 - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    lit::<T>(0.5) * erfc_approx(-x / lit::<T>(SQRT_2))
}

/// Normal cumulative distribution function with the given mean and standard deviation.
///
/// Returns a step function at `mean` when `std_dev` is zero.
///
/// # Examples
/// ```
/// use mbs_core::math::normal_cdf;
///
/// // One standard deviation above the mean
/// let p = normal_cdf(0.05_f64, 0.0, 0.05);
/// assert!((p - 0.841345).abs() < 1e-6);
/// ```
#[inline]
pub fn normal_cdf<T: Float>(x: T, mean: T, std_dev: T) -> T {
    if std_dev <= T::zero() {
        return if x < mean { T::zero() } else { T::one() };
    }
    norm_cdf((x - mean) / std_dev)
}
