//! ShortRateModel trait for one-factor Gaussian short-rate dynamics.
//!
//! A model exposes its Markov transition law rather than raw drift and
//! diffusion coefficients: for a step from `t` to `t + dt` the conditional
//! distribution of the next rate given the current one is normal with
//!
//! ```text
//! E[r(t+dt) | r(t) = x] = x * decay + drift
//! Var[r(t+dt) | r(t) = x] = variance
//! ```
//!
//! Path generators sample this law directly, so the discretisation is exact
//! for models in this family.

use mbs_core::market_data::MarketDataError;
use num_traits::Float;

/// Conditional one-step law of an affine Gaussian short-rate model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionLaw<T: Float> {
    /// Multiplier applied to the current rate
    pub decay: T,
    /// Deterministic shift added after decay
    pub drift: T,
    /// Conditional variance of the next rate
    pub variance: T,
}

impl<T: Float> TransitionLaw<T> {
    /// Conditional mean of the next rate given the current `rate`.
    #[inline]
    pub fn conditional_mean(&self, rate: T) -> T {
        rate * self.decay + self.drift
    }

    /// Conditional standard deviation of the next rate.
    #[inline]
    pub fn std_dev(&self) -> T {
        self.variance.sqrt()
    }

    /// Next rate given the current `rate` and a standard normal draw `z`.
    #[inline]
    pub fn sample(&self, rate: T, z: T) -> T {
        self.conditional_mean(rate) + self.std_dev() * z
    }
}

/// One-factor short-rate model defined by its transition law.
pub trait ShortRateModel<T: Float> {
    /// Short rate at time zero.
    fn initial_rate(&self) -> T;

    /// Transition law for the step from `t` to `t + dt` (years).
    ///
    /// # Errors
    ///
    /// Propagates curve lookup failures from the underlying term structure.
    fn transition(&self, t: T, dt: T) -> Result<TransitionLaw<T>, MarketDataError>;

    /// Model name for diagnostics.
    fn model_name(&self) -> &'static str;
}
