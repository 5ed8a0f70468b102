//! Short-rate path generation for Monte Carlo simulation.
//!
//! Paths are sampled from the exact Gaussian transition law of the short-rate
//! model on a uniform grid, so there is no discretisation bias at the grid
//! points. The laws depend only on the grid, not on the path, so they are
//! computed once per generator and reused for every trial.
//!
//! # Memory Layout
//!
//! A [`RatePath`] of `n_steps` steps stores `n_steps + 1` rates; index 0 holds
//! the initial short rate `r(0)`.

use mbs_core::types::ValuationError;
use mbs_models::models::{ShortRateModel, TransitionLaw};
use tracing::debug;

use crate::rng::PricerRng;

/// One simulated trajectory of annualised short rates.
#[derive(Clone, Debug, PartialEq)]
pub struct RatePath {
    rates: Vec<f64>,
}

impl RatePath {
    /// Wraps a sequence of rates.
    #[inline]
    pub fn new(rates: Vec<f64>) -> Self {
        Self { rates }
    }

    /// Deterministic path holding `rate` at every one of `n_steps + 1` points.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mbs_pricing::mc::RatePath;
    ///
    /// let path = RatePath::constant(0.05, 348);
    /// assert_eq!(path.len(), 349);
    /// ```
    pub fn constant(rate: f64, n_steps: usize) -> Self {
        Self {
            rates: vec![rate; n_steps + 1],
        }
    }

    /// Rates in time order.
    #[inline]
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Number of stored rates (steps + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// True when the path holds no rates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Number of steps (`len - 1`).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.rates.len().saturating_sub(1)
    }
}

impl From<Vec<f64>> for RatePath {
    fn from(rates: Vec<f64>) -> Self {
        Self::new(rates)
    }
}

/// Generator of short-rate paths on a uniform grid.
///
/// # Examples
///
/// ```rust
/// use mbs_core::market_data::curves::FlatCurve;
/// use mbs_models::models::{HullWhiteModel, HullWhiteParams};
/// use mbs_pricing::mc::PathGenerator;
/// use mbs_pricing::rng::PricerRng;
///
/// let params = HullWhiteParams::new(0.0009, 0.022).unwrap();
/// let model = HullWhiteModel::new(params, FlatCurve::new(0.03)).unwrap();
/// let generator = PathGenerator::new(&model, 29.0, 348).unwrap();
///
/// let path = generator.generate(&mut PricerRng::from_seed(42));
/// assert_eq!(path.len(), 349);
/// assert!((path.rates()[0] - 0.03).abs() < 1e-6);
/// ```
#[derive(Clone, Debug)]
pub struct PathGenerator {
    initial_rate: f64,
    dt: f64,
    laws: Vec<TransitionLaw<f64>>,
}

impl PathGenerator {
    /// Builds a generator over `[0, horizon_years]` split into `n_steps` steps.
    ///
    /// # Errors
    ///
    /// - Configuration error if `n_steps` is zero or the horizon is not
    ///   positive and finite
    /// - Curve error if the model cannot evaluate a transition on the grid
    pub fn new<M>(model: &M, horizon_years: f64, n_steps: usize) -> Result<Self, ValuationError>
    where
        M: ShortRateModel<f64> + ?Sized,
    {
        if n_steps == 0 {
            return Err(ValuationError::config("n_steps", n_steps, "must be positive"));
        }
        if !horizon_years.is_finite() || horizon_years <= 0.0 {
            return Err(ValuationError::config(
                "horizon_years",
                horizon_years,
                "must be positive and finite",
            ));
        }

        let dt = horizon_years / n_steps as f64;
        let laws = (0..n_steps)
            .map(|step| model.transition(step as f64 * dt, dt))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            model = model.model_name(),
            horizon_years,
            n_steps,
            dt,
            initial_rate = model.initial_rate(),
            "path generator ready"
        );

        Ok(Self {
            initial_rate: model.initial_rate(),
            dt,
            laws,
        })
    }

    /// Number of steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.laws.len()
    }

    /// Step size in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Short rate at time zero, shared by every path.
    #[inline]
    pub fn initial_rate(&self) -> f64 {
        self.initial_rate
    }

    /// Grid times in years, `n_steps + 1` values from 0 to the horizon.
    pub fn time_grid(&self) -> Vec<f64> {
        (0..=self.laws.len()).map(|step| step as f64 * self.dt).collect()
    }

    /// Draws one path, consuming one standard normal per step from `rng`.
    pub fn generate(&self, rng: &mut PricerRng) -> RatePath {
        let mut rates = Vec::with_capacity(self.laws.len() + 1);
        let mut rate = self.initial_rate;
        rates.push(rate);
        for law in &self.laws {
            rate = law.sample(rate, rng.gen_normal());
            rates.push(rate);
        }
        RatePath::new(rates)
    }
}
