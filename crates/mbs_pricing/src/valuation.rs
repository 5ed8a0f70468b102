//! One-shot valuation entry point.
//!
//! [`ValuationInputs`] carries every user-facing parameter of a run with
//! defaults describing a 29-year 2.5% callable mortgage bond on a
//! 1,000,000 nominal, valued against a 1y-30y swap curve. Validation happens
//! up front so a bad input is reported before any curve or path is built.

use mbs_core::market_data::curves::{CurveInterpolation, CurvePoint, ZeroCurve};
use mbs_core::types::ValuationError;
use mbs_models::instruments::MortgageBond;
use mbs_models::models::{HullWhiteModel, HullWhiteParams};
use mbs_models::prepayment::{RefinancingPrepayment, DEFAULT_DISPERSION};

use crate::mc::{SimulationConfig, DEFAULT_RETAINED_PATHS, MAX_PATHS};
use crate::simulation::{SimulationAggregator, SimulationResult, ValuationContext};

/// Default swap curve pillars as `(tenor_years, zero_rate)`.
pub const DEFAULT_SWAP_CURVE: [(f64, f64); 12] = [
    (1.0, 0.0205),
    (2.0, 0.020879),
    (3.0, 0.022006),
    (4.0, 0.023196),
    (5.0, 0.024289),
    (6.0, 0.025137),
    (7.0, 0.025853),
    (8.0, 0.026505),
    (9.0, 0.027091),
    (10.0, 0.027606),
    (15.0, 0.0295),
    (30.0, 0.0282),
];

/// [`DEFAULT_SWAP_CURVE`] as curve points.
pub fn default_swap_curve() -> Vec<CurvePoint<f64>> {
    DEFAULT_SWAP_CURVE.iter().copied().map(CurvePoint::from).collect()
}

/// Complete set of inputs for one valuation run.
#[derive(Clone, Debug, PartialEq)]
pub struct ValuationInputs {
    /// Bond nominal.
    pub principal: f64,
    /// Annual coupon rate (decimal).
    pub coupon: f64,
    /// Term in whole years.
    pub term_years: u32,
    /// Hull-White mean-reversion speed `a`.
    pub mean_reversion: f64,
    /// Hull-White volatility `sigma`.
    pub volatility: f64,
    /// Number of Monte Carlo trials.
    pub n_paths: usize,
    /// Zero-curve pillars.
    pub curve: Vec<CurvePoint<f64>>,
    /// Interpolation on the zero curve.
    pub interpolation: CurveInterpolation,
    /// Width of the prepayment response to the refinancing gain.
    pub prepayment_dispersion: f64,
    /// Base seed; `None` draws one from entropy.
    pub seed: Option<u64>,
    /// Leading rate paths kept for charting.
    pub retained_paths: usize,
    /// Run trials on the rayon pool.
    pub parallel: bool,
}

impl Default for ValuationInputs {
    fn default() -> Self {
        Self {
            principal: 1_000_000.0,
            coupon: 0.025,
            term_years: 29,
            mean_reversion: 0.0009,
            volatility: 0.022,
            n_paths: 500,
            curve: default_swap_curve(),
            interpolation: CurveInterpolation::Linear,
            prepayment_dispersion: DEFAULT_DISPERSION,
            seed: None,
            retained_paths: DEFAULT_RETAINED_PATHS,
            parallel: true,
        }
    }
}

fn positive_finite(parameter: &'static str, value: f64) -> Result<(), ValuationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValuationError::config(parameter, value, "must be positive and finite"))
    }
}

impl ValuationInputs {
    /// Checks every input, reporting the first offending value.
    ///
    /// # Errors
    ///
    /// Configuration error naming the parameter. Fewer than two curve points
    /// is reported here as a configuration error on `curve`; malformed pillars
    /// are left to the curve and surface as curve construction errors.
    pub fn validate(&self) -> Result<(), ValuationError> {
        positive_finite("principal", self.principal)?;
        if !self.coupon.is_finite() || self.coupon < 0.0 {
            return Err(ValuationError::config(
                "coupon",
                self.coupon,
                "must be non-negative and finite",
            ));
        }
        if self.term_years == 0 {
            return Err(ValuationError::config("term_years", self.term_years, "must be positive"));
        }
        positive_finite("mean_reversion", self.mean_reversion)?;
        positive_finite("volatility", self.volatility)?;
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ValuationError::config(
                "n_paths",
                self.n_paths,
                "must be in [1, 10000000]",
            ));
        }
        if self.curve.len() < 2 {
            return Err(ValuationError::config(
                "curve",
                format!("{} point(s)", self.curve.len()),
                "needs at least 2 points",
            ));
        }
        positive_finite("prepayment_dispersion", self.prepayment_dispersion)?;
        Ok(())
    }

    /// The bond described by these inputs.
    pub fn bond(&self) -> Result<MortgageBond, ValuationError> {
        MortgageBond::from_years(self.principal, self.coupon, self.term_years)
    }

    /// Simulation configuration described by these inputs.
    pub fn simulation_config(&self) -> Result<SimulationConfig, ValuationError> {
        SimulationConfig::builder()
            .n_paths(self.n_paths)
            .maybe_seed(self.seed)
            .retained_paths(self.retained_paths)
            .parallel(self.parallel)
            .build()
    }

    /// Builds the immutable context shared by every trial.
    pub fn context(
        &self,
    ) -> Result<ValuationContext<HullWhiteModel<f64, ZeroCurve<f64>>>, ValuationError> {
        self.validate()?;
        let curve = ZeroCurve::new(&self.curve, self.interpolation, true)?;
        let params = HullWhiteParams::new(self.mean_reversion, self.volatility)?;
        let model = HullWhiteModel::new(params, curve)?;
        let prepayment = RefinancingPrepayment::new(self.prepayment_dispersion)?;
        Ok(ValuationContext::new(self.bond()?, model, prepayment))
    }

    /// Validates the inputs, then runs the simulation.
    ///
    /// # Errors
    ///
    /// Any configuration, curve construction or numerical error; see
    /// [`ValuationInputs::validate`] and [`SimulationAggregator::run`].
    pub fn value(&self) -> Result<SimulationResult, ValuationError> {
        let ctx = self.context()?;
        SimulationAggregator::new(self.simulation_config()?).run(&ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mbs_core::market_data::MarketDataError;

    #[test]
    fn test_defaults_validate() {
        let inputs = ValuationInputs::default();
        assert!(inputs.validate().is_ok());
        assert_eq!(inputs.curve.len(), 12);
        assert_eq!(inputs.bond().unwrap().term_months(), 348);
    }

    #[test]
    fn test_validate_names_parameter() {
        let cases: Vec<(ValuationInputs, &str)> = vec![
            (ValuationInputs { principal: 0.0, ..Default::default() }, "principal"),
            (ValuationInputs { coupon: -0.01, ..Default::default() }, "coupon"),
            (ValuationInputs { term_years: 0, ..Default::default() }, "term_years"),
            (ValuationInputs { mean_reversion: 0.0, ..Default::default() }, "mean_reversion"),
            (ValuationInputs { volatility: -0.2, ..Default::default() }, "volatility"),
            (ValuationInputs { n_paths: 0, ..Default::default() }, "n_paths"),
            (
                ValuationInputs { curve: default_swap_curve()[..1].to_vec(), ..Default::default() },
                "curve",
            ),
            (
                ValuationInputs { prepayment_dispersion: f64::NAN, ..Default::default() },
                "prepayment_dispersion",
            ),
        ];

        for (inputs, name) in cases {
            match inputs.validate() {
                Err(ValuationError::Configuration { parameter, .. }) => assert_eq!(parameter, name),
                other => panic!("expected configuration error for {}, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_duplicate_tenor_is_curve_error() {
        let mut curve = default_swap_curve();
        curve[1].tenor = 1.0;
        let inputs = ValuationInputs { curve, n_paths: 4, seed: Some(1), ..Default::default() };
        let err = inputs.value().unwrap_err();
        assert!(matches!(
            err,
            ValuationError::CurveConstruction(MarketDataError::NonMonotonicTenor { index: 1, .. })
        ));
    }

    #[test]
    fn test_value_small_run() {
        let inputs = ValuationInputs {
            n_paths: 16,
            seed: Some(3),
            retained_paths: 4,
            ..Default::default()
        };
        let result = inputs.value().unwrap();
        assert_eq!(result.npvs().len(), 16);
        assert_eq!(result.paths().len(), 4);
        assert_eq!(result.time_grid().len(), 349);
        assert_eq!(result.seed(), 3);

        let summary = result.summary().unwrap();
        assert!(summary.mean_npv > 0.0);
        assert!(summary.mean_pct_of_principal > 50.0 && summary.mean_pct_of_principal < 150.0);
    }
}
