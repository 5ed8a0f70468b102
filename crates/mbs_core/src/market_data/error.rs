//! Market data error types.
//!
//! This module provides structured error handling for yield curve
//! construction and lookups.

use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `InvalidMaturity`: Negative (or non-positive, for pillars) time
/// - `OutOfBounds`: Query outside the pillar range with extrapolation disabled
/// - `InsufficientData`: Not enough pillars for construction
/// - `NonMonotonicTenor`: Pillar tenors not strictly increasing (includes duplicates)
/// - `NonFiniteRate`: NaN or infinite zero rate at a pillar
///
/// # Examples
///
/// ```
/// use mbs_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidMaturity { t: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid maturity (negative time).
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Query point outside valid domain.
    #[error("Out of bounds: {x} not in [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Tenors are not strictly increasing.
    #[error("Non-monotonic tenor at pillar {index}: {tenor} does not exceed {previous}")]
    NonMonotonicTenor {
        /// Index of the offending pillar
        index: usize,
        /// Tenor at that pillar
        tenor: f64,
        /// Tenor of the preceding pillar
        previous: f64,
    },

    /// Zero rate is NaN or infinite.
    #[error("Non-finite rate at tenor {tenor}")]
    NonFiniteRate {
        /// Tenor of the offending pillar
        tenor: f64,
    },
}
