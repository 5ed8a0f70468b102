//! Error types for structured error handling.
//!
//! This module provides [`ValuationError`], the single error type returned by
//! the curve, model and simulation layers. Every variant carries enough context
//! to tell the user which input was rejected.

use crate::market_data::MarketDataError;
use std::fmt::Display;
use thiserror::Error;

/// Categorised valuation errors.
///
/// # Variants
/// - `Configuration`: A user-supplied value violates its constraint
/// - `CurveConstruction`: The zero curve could not be built from its pillars
/// - `Numerical`: Division by zero, invalid domain or non-finite result
///
/// # Examples
/// ```
/// use mbs_core::types::ValuationError;
///
/// let err = ValuationError::config("principal", -5.0, "must be positive");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid configuration: principal = -5 (must be positive)"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValuationError {
    /// A configuration value is outside its valid domain.
    #[error("Invalid configuration: {parameter} = {value} ({reason})")]
    Configuration {
        /// Name of the offending parameter
        parameter: &'static str,
        /// Rendered value that was rejected
        value: String,
        /// Constraint that was violated
        reason: &'static str,
    },

    /// Curve pillars were rejected by the curve provider.
    #[error("Curve construction failed: {0}")]
    CurveConstruction(#[from] MarketDataError),

    /// Numerical failure (division by zero, invalid domain, non-finite value).
    #[error("Numerical error: {0}")]
    Numerical(String),
}

impl ValuationError {
    /// Shorthand for a [`ValuationError::Configuration`] error.
    pub fn config(parameter: &'static str, value: impl Display, reason: &'static str) -> Self {
        ValuationError::Configuration {
            parameter,
            value: value.to_string(),
            reason,
        }
    }

    /// Shorthand for a [`ValuationError::Numerical`] error.
    pub fn numerical(msg: impl Into<String>) -> Self {
        ValuationError::Numerical(msg.into())
    }

    /// Returns true for errors raised while validating user input.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ValuationError::Configuration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_display_names_parameter() {
        let err = ValuationError::config("sigma", 0.0, "must be positive");
        let msg = err.to_string();
        assert!(msg.contains("sigma"));
        assert!(msg.contains("must be positive"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_numerical_display() {
        let err = ValuationError::numerical("annuity with zero periods");
        assert_eq!(err.to_string(), "Numerical error: annuity with zero periods");
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_from_market_data_error() {
        let err: ValuationError = MarketDataError::InsufficientData { got: 1, need: 2 }.into();
        match err {
            ValuationError::CurveConstruction(MarketDataError::InsufficientData { got, need }) => {
                assert_eq!((got, need), (1, 2));
            }
            _ => panic!("Expected CurveConstruction variant"),
        }
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = ValuationError::numerical("boom");
        let _: &dyn std::error::Error = &err;
    }
}
