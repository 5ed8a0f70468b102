//! Hull-White one-factor interest rate model.
//!
//! The Hull-White model is a short-rate model described by:
//! ```text
//! dr(t) = [theta(t) - a * r(t)] * dt + sigma * dW(t)
//! ```
//! where:
//! - r(t) = short rate at time t
//! - a = mean reversion speed (must be positive)
//! - sigma = volatility (must be positive)
//! - theta(t) = time-dependent drift fitted to the initial yield curve
//! - dW(t) = Wiener process increment
//!
//! ## Exact transition
//!
//! With f(0, t) the instantaneous forward rate of the initial curve and
//! ```text
//! alpha(t) = f(0, t) + sigma^2 / (2 a^2) * (1 - exp(-a t))^2
//! ```
//! the rate one step ahead is normal with
//! ```text
//! mean     = r(t) * exp(-a dt) + alpha(t + dt) - alpha(t) * exp(-a dt)
//! variance = sigma^2 / (2 a) * (1 - exp(-2 a dt))
//! ```
//! and r(0) = f(0, 0).
//!
//! ## Usage
//!
//! ```
//! use mbs_models::models::{HullWhiteModel, HullWhiteParams, ShortRateModel};
//! use mbs_core::market_data::curves::FlatCurve;
//!
//! let params = HullWhiteParams::new(0.05_f64, 0.01).unwrap();
//! let model = HullWhiteModel::new(params, FlatCurve::new(0.03)).unwrap();
//! assert!((model.initial_rate() - 0.03).abs() < 1e-10);
//!
//! let law = model.transition(0.0, 1.0 / 12.0).unwrap();
//! let next = law.sample(model.initial_rate(), 0.5);
//! assert!(next > 0.03);
//! ```

use mbs_core::market_data::curves::YieldCurve;
use mbs_core::market_data::MarketDataError;
use mbs_core::types::ValuationError;
use num_traits::Float;

use super::short_rate::{ShortRateModel, TransitionLaw};

/// Hull-White model parameters.
///
/// # Fields
///
/// * `mean_reversion` - Mean reversion speed (a), must be positive
/// * `volatility` - Short rate volatility (sigma), must be positive
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HullWhiteParams<T: Float> {
    /// Mean reversion speed (a > 0)
    pub mean_reversion: T,
    /// Volatility of short rate (sigma > 0)
    pub volatility: T,
}

impl<T: Float> HullWhiteParams<T> {
    /// Create new Hull-White parameters with validation.
    ///
    /// # Errors
    ///
    /// `ValuationError::Configuration` naming `a` or `sigma` when it is not
    /// a positive finite number.
    ///
    /// # Example
    ///
    /// ```
    /// use mbs_models::models::HullWhiteParams;
    ///
    /// assert!(HullWhiteParams::new(0.05, 0.01).is_ok());
    /// assert!(HullWhiteParams::new(-0.05, 0.01).is_err());
    /// ```
    pub fn new(mean_reversion: T, volatility: T) -> Result<Self, ValuationError> {
        if !(mean_reversion.is_finite() && mean_reversion > T::zero()) {
            return Err(ValuationError::config(
                "a",
                mean_reversion.to_f64().unwrap_or(f64::NAN),
                "mean reversion must be positive",
            ));
        }
        if !(volatility.is_finite() && volatility > T::zero()) {
            return Err(ValuationError::config(
                "sigma",
                volatility.to_f64().unwrap_or(f64::NAN),
                "volatility must be positive",
            ));
        }
        Ok(Self {
            mean_reversion,
            volatility,
        })
    }

    /// Conditional variance of r(t + dt) given r(t).
    pub fn step_variance(&self, dt: T) -> T {
        let a = self.mean_reversion;
        let sigma = self.volatility;
        let two = T::one() + T::one();
        // 1 - exp(-2 a dt) via exp_m1 for small a * dt
        sigma * sigma / (two * a) * -(-two * a * dt).exp_m1()
    }

    /// Convexity term sigma^2 / (2 a^2) * (1 - exp(-a t))^2 of alpha(t).
    fn convexity(&self, t: T) -> T {
        let a = self.mean_reversion;
        let sigma = self.volatility;
        let two = T::one() + T::one();
        let one_minus_decay = -(-a * t).exp_m1();
        sigma * sigma / (two * a * a) * one_minus_decay * one_minus_decay
    }
}

/// Hull-White one-factor model fitted to an initial yield curve.
#[derive(Clone, Debug)]
pub struct HullWhiteModel<T: Float, C> {
    params: HullWhiteParams<T>,
    curve: C,
    initial_rate: T,
}

impl<T: Float, C: YieldCurve<T>> HullWhiteModel<T, C> {
    /// Build the model, reading r(0) = f(0, 0) from the curve.
    pub fn new(params: HullWhiteParams<T>, curve: C) -> Result<Self, ValuationError> {
        let initial_rate = curve.instantaneous_forward(T::zero())?;
        Ok(Self {
            params,
            curve,
            initial_rate,
        })
    }

    /// Model parameters.
    #[inline]
    pub fn params(&self) -> &HullWhiteParams<T> {
        &self.params
    }

    /// Initial yield curve.
    #[inline]
    pub fn curve(&self) -> &C {
        &self.curve
    }

    /// alpha(t) = f(0, t) + sigma^2 / (2 a^2) * (1 - exp(-a t))^2
    pub fn alpha(&self, t: T) -> Result<T, MarketDataError> {
        Ok(self.curve.instantaneous_forward(t)? + self.params.convexity(t))
    }
}

impl<T: Float, C: YieldCurve<T>> ShortRateModel<T> for HullWhiteModel<T, C> {
    fn initial_rate(&self) -> T {
        self.initial_rate
    }

    fn transition(&self, t: T, dt: T) -> Result<TransitionLaw<T>, MarketDataError> {
        if dt <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: dt.to_f64().unwrap_or(0.0),
            });
        }
        let decay = (-self.params.mean_reversion * dt).exp();
        let drift = self.alpha(t + dt)? - self.alpha(t)? * decay;
        Ok(TransitionLaw {
            decay,
            drift,
            variance: self.params.step_variance(dt),
        })
    }

    fn model_name(&self) -> &'static str {
        "HullWhite1F"
    }
}
