//! Fan-out of independent trials and fan-in of their path values.
//!
//! ```text
//!            trial 0   trial 1   ...   trial N-1
//! rng        (s, 0)    (s, 1)          (s, N-1)     one sub-stream per trial
//! path       r[0..M]   r[0..M]         r[0..M]      PathGenerator::generate
//! value      npv_0     npv_1           npv_N-1      AmortizationEngine::value_path
//!               \         |               /
//!                 ordered collect -> SimulationResult
//! ```
//!
//! Every trial owns its random stream, keyed by the base seed and the trial
//! index, so the result is the same whether trials run on one thread or on
//! the whole rayon pool.

use std::ops::Range;

use mbs_core::types::ValuationError;
use mbs_models::models::ShortRateModel;
use mbs_models::prepayment::PrepaymentModel;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::context::ValuationContext;
use super::result::SimulationResult;
use crate::amortization::AmortizationEngine;
use crate::mc::{PathGenerator, RatePath, SimulationConfig};
use crate::rng::PricerRng;

/// Outcome of one trial before aggregation.
struct TrialOutcome {
    index: u64,
    npv: Result<f64, ValuationError>,
    path: Option<RatePath>,
}

/// Monte Carlo driver for a [`ValuationContext`].
///
/// # Examples
///
/// ```rust
/// use mbs_core::market_data::curves::FlatCurve;
/// use mbs_models::instruments::MortgageBond;
/// use mbs_models::models::{HullWhiteModel, HullWhiteParams};
/// use mbs_models::prepayment::RefinancingPrepayment;
/// use mbs_pricing::mc::SimulationConfig;
/// use mbs_pricing::simulation::{SimulationAggregator, ValuationContext};
///
/// let bond = MortgageBond::from_years(1_000_000.0, 0.025, 29).unwrap();
/// let params = HullWhiteParams::new(0.0009, 0.022).unwrap();
/// let model = HullWhiteModel::new(params, FlatCurve::new(0.03)).unwrap();
/// let ctx = ValuationContext::new(bond, model, RefinancingPrepayment::default());
///
/// let config = SimulationConfig::builder().n_paths(32).seed(7).build().unwrap();
/// let result = SimulationAggregator::new(config).run(&ctx).unwrap();
/// assert_eq!(result.npvs().len(), 32);
/// assert_eq!(result.paths().len(), 32);
/// ```
#[derive(Clone, Debug)]
pub struct SimulationAggregator {
    config: SimulationConfig,
    seed: u64,
}

impl SimulationAggregator {
    /// Creates a driver for the given configuration.
    ///
    /// The base seed is fixed here: the configured one, or a single draw from
    /// entropy shared by every batch this driver runs.
    pub fn new(config: SimulationConfig) -> Self {
        let seed = match config.seed() {
            Some(seed) => seed,
            None => {
                let seed = PricerRng::entropy_seed();
                info!(seed, "no seed configured, drew base seed from entropy");
                seed
            }
        };
        Self { config, seed }
    }

    /// The simulation configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Base seed shared by every batch run through this driver.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Runs all configured trials.
    ///
    /// # Errors
    ///
    /// - Errors from building the path generator (curve lookups)
    /// - Numerical error if every trial fails
    pub fn run<M, P>(&self, ctx: &ValuationContext<M, P>) -> Result<SimulationResult, ValuationError>
    where
        M: ShortRateModel<f64> + Sync,
        P: PrepaymentModel + Sync,
    {
        let n_paths = self.config.n_paths() as u64;
        self.run_trials(ctx, 0..n_paths)
    }

    /// Runs the trials with indices in `trials`.
    ///
    /// Trial `i` always uses sub-stream `i` of the base seed, so splitting a
    /// run into index ranges and merging the batches reproduces the full run.
    /// Rate paths are retained for trial indices below the configured
    /// retention count.
    ///
    /// # Errors
    ///
    /// Same as [`SimulationAggregator::run`]; an empty range is a
    /// configuration error.
    pub fn run_trials<M, P>(
        &self,
        ctx: &ValuationContext<M, P>,
        trials: Range<u64>,
    ) -> Result<SimulationResult, ValuationError>
    where
        M: ShortRateModel<f64> + Sync,
        P: PrepaymentModel + Sync,
    {
        if trials.is_empty() {
            return Err(ValuationError::config(
                "trials",
                format!("{}..{}", trials.start, trials.end),
                "range must not be empty",
            ));
        }

        let bond = ctx.bond();
        let seed = self.seed;
        let parallel = self.config.parallel();
        let retained = self.config.retained_paths() as u64;
        let n_trials = trials.end - trials.start;

        info!(
            model = ctx.model().model_name(),
            n_trials,
            first_trial = trials.start,
            seed,
            parallel,
            principal = bond.principal(),
            coupon = bond.coupon(),
            term_months = bond.term_months(),
            "starting simulation"
        );

        let generator = PathGenerator::new(ctx.model(), bond.term_years(), bond.term_months() as usize)?;
        let engine = AmortizationEngine::new(bond, ctx.prepayment());

        let trial = |index: u64| {
            let mut rng = PricerRng::for_stream(seed, index);
            let path = generator.generate(&mut rng);
            let npv = engine.value_path(&path).map(|valuation| valuation.npv);
            TrialOutcome {
                index,
                npv,
                path: (index < retained).then_some(path),
            }
        };

        let outcomes: Vec<TrialOutcome> = if parallel {
            trials.into_par_iter().map(trial).collect()
        } else {
            trials.map(trial).collect()
        };

        let mut npvs = Vec::with_capacity(outcomes.len());
        let mut paths = Vec::new();
        let mut failures = 0usize;
        let mut first_error = None;

        for outcome in outcomes {
            match outcome.npv {
                Ok(npv) => npvs.push(npv),
                Err(err) => {
                    warn!(trial = outcome.index, error = %err, "trial failed, excluded from estimate");
                    failures += 1;
                    first_error.get_or_insert(err);
                }
            }
            if let Some(path) = outcome.path {
                paths.push(path);
            }
        }

        if npvs.is_empty() {
            let reason = first_error
                .map(|err| err.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            return Err(ValuationError::numerical(format!(
                "all {} trials failed; first failure: {}",
                failures, reason
            )));
        }

        debug!(retained_paths = paths.len(), "collected trial outcomes");

        let result = SimulationResult::new(
            npvs,
            failures,
            paths,
            generator.time_grid(),
            bond.principal(),
            seed,
        );

        if let Ok(summary) = result.summary() {
            info!(
                mean_npv = summary.mean_npv,
                mean_pct = summary.mean_pct_of_principal,
                std_error = summary.std_error,
                succeeded = summary.n_succeeded,
                failures = summary.n_failed,
                "simulation complete"
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mbs_core::market_data::curves::FlatCurve;
    use mbs_models::instruments::MortgageBond;
    use mbs_models::models::{HullWhiteModel, HullWhiteParams};
    use mbs_models::prepayment::RefinancingPrepayment;

    type Ctx<P> = ValuationContext<HullWhiteModel<f64, FlatCurve<f64>>, P>;

    fn context<P: PrepaymentModel>(prepayment: P) -> Ctx<P> {
        let bond = MortgageBond::from_years(100_000.0, 0.025, 5).unwrap();
        let params = HullWhiteParams::new(0.05, 0.01).unwrap();
        let model = HullWhiteModel::new(params, FlatCurve::new(0.03)).unwrap();
        ValuationContext::new(bond, model, prepayment)
    }

    fn aggregator(n_paths: usize, parallel: bool) -> SimulationAggregator {
        let config = SimulationConfig::builder()
            .n_paths(n_paths)
            .seed(2024)
            .retained_paths(3)
            .parallel(parallel)
            .build()
            .unwrap();
        SimulationAggregator::new(config)
    }

    struct FailOnHighRates;

    impl PrepaymentModel for FailOnHighRates {
        fn probability(&self, rate: f64, _: f64, _: u32, _: f64) -> Result<f64, ValuationError> {
            if rate > 0.045 {
                Err(ValuationError::numerical("rate above threshold"))
            } else {
                Ok(0.0)
            }
        }
    }

    struct AlwaysFail;

    impl PrepaymentModel for AlwaysFail {
        fn probability(&self, _: f64, _: f64, _: u32, _: f64) -> Result<f64, ValuationError> {
            Err(ValuationError::numerical("always"))
        }
    }

    #[test]
    fn test_run_shapes() {
        let ctx = context(RefinancingPrepayment::default());
        let result = aggregator(20, true).run(&ctx).unwrap();
        assert_eq!(result.npvs().len(), 20);
        assert_eq!(result.failures(), 0);
        assert_eq!(result.paths().len(), 3);
        assert_eq!(result.time_grid().len(), 61);
        assert!(result.paths().iter().all(|p| p.len() == 61));
        assert_eq!(result.seed(), 2024);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let ctx = context(RefinancingPrepayment::default());
        let par = aggregator(40, true).run(&ctx).unwrap();
        let seq = aggregator(40, false).run(&ctx).unwrap();
        assert_eq!(par, seq);
    }

    #[test]
    fn test_ranges_merge_to_full_run() {
        let ctx = context(RefinancingPrepayment::default());
        let agg = aggregator(30, true);
        let full = agg.run(&ctx).unwrap();
        let merged = agg
            .run_trials(&ctx, 0..12)
            .unwrap()
            .merge(agg.run_trials(&ctx, 12..30).unwrap());
        assert_eq!(full.npvs(), merged.npvs());
        assert_eq!(full.paths(), merged.paths());
    }

    #[test]
    fn test_unseeded_batches_share_one_base_seed() {
        let ctx = context(RefinancingPrepayment::default());
        let config = SimulationConfig::builder()
            .n_paths(20)
            .retained_paths(0)
            .build()
            .unwrap();
        let agg = SimulationAggregator::new(config);
        let first = agg.run_trials(&ctx, 0..10).unwrap();
        let second = agg.run_trials(&ctx, 10..20).unwrap();
        assert_eq!(first.seed(), agg.seed());
        assert_eq!(second.seed(), agg.seed());

        let merged = first.merge(second);
        let replay_config = SimulationConfig::builder()
            .n_paths(20)
            .seed(merged.seed())
            .retained_paths(0)
            .build()
            .unwrap();
        let replay = SimulationAggregator::new(replay_config).run(&ctx).unwrap();
        assert_eq!(merged.npvs(), replay.npvs());
        assert_eq!(
            merged.summary().unwrap().mean_npv.to_bits(),
            replay.summary().unwrap().mean_npv.to_bits()
        );
    }

    #[test]
    fn test_partial_failures_are_counted() {
        // Paths starting at 3% that climb above 4.5% within five years fail.
        let ctx = context(FailOnHighRates);
        let result = aggregator(50, true).run(&ctx).unwrap();
        assert!(result.failures() > 0);
        assert!(!result.npvs().is_empty());
        assert_eq!(result.n_trials(), 50);
    }

    #[test]
    fn test_all_failures_is_error() {
        let ctx = context(AlwaysFail);
        let err = aggregator(5, false).run(&ctx).unwrap_err();
        assert!(format!("{}", err).contains("all 5 trials failed"));
    }

    #[test]
    fn test_empty_range_is_error() {
        let ctx = context(RefinancingPrepayment::default());
        assert!(aggregator(5, false).run_trials(&ctx, 3..3).is_err());
    }
}
