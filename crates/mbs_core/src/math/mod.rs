//! Numerical helpers shared by the model and pricing layers.
//!
//! - [`distributions`]: Standard normal CDF
//! - [`annuity`]: Level payment that amortises a balance

pub mod annuity;
pub mod distributions;

pub use annuity::annuity_payment;
pub use distributions::{norm_cdf, normal_cdf};
