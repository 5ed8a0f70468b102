//! Simulation output and summary statistics.

use mbs_core::types::ValuationError;

use crate::mc::RatePath;

/// Compensated (Neumaier) sum of `values`.
fn compensated_sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for value in values {
        let t = sum + value;
        if sum.abs() >= value.abs() {
            compensation += (sum - t) + value;
        } else {
            compensation += (value - t) + sum;
        }
        sum = t;
    }
    sum + compensation
}

/// Point estimate and dispersion of the path values.
///
/// The mean is computed from the values in sorted order, so it depends only
/// on the set of path values and not on the order in which batches were
/// merged.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimulationSummary {
    /// Average path NPV.
    pub mean_npv: f64,
    /// Average path NPV as a percentage of the principal.
    pub mean_pct_of_principal: f64,
    /// Sample standard deviation of the path NPVs (0 for a single trial).
    pub std_dev: f64,
    /// Standard error of the mean.
    pub std_error: f64,
    /// Trials attempted.
    pub n_trials: usize,
    /// Trials contributing to the estimate.
    pub n_succeeded: usize,
    /// Trials excluded after a numerical failure.
    pub n_failed: usize,
}

impl SimulationSummary {
    /// Summarises `npvs` for a bond of the given `principal`.
    ///
    /// # Errors
    ///
    /// Numerical error if `npvs` is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mbs_pricing::simulation::SimulationSummary;
    ///
    /// let summary = SimulationSummary::from_npvs(&[90.0, 110.0], 0, 100.0).unwrap();
    /// assert_eq!(summary.mean_npv, 100.0);
    /// assert_eq!(summary.mean_pct_of_principal, 100.0);
    /// ```
    pub fn from_npvs(npvs: &[f64], failures: usize, principal: f64) -> Result<Self, ValuationError> {
        if npvs.is_empty() {
            return Err(ValuationError::numerical(
                "no successful trials to summarise",
            ));
        }

        let mut sorted = npvs.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len() as f64;
        let mean = compensated_sum(sorted.iter().copied()) / n;
        let std_dev = if sorted.len() > 1 {
            let ss = compensated_sum(sorted.iter().map(|&v| (v - mean) * (v - mean)));
            (ss / (n - 1.0)).sqrt()
        } else {
            0.0
        };

        Ok(Self {
            mean_npv: mean,
            mean_pct_of_principal: 100.0 * mean / principal,
            std_dev,
            std_error: std_dev / n.sqrt(),
            n_trials: npvs.len() + failures,
            n_succeeded: npvs.len(),
            n_failed: failures,
        })
    }
}

/// Raw output of a simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationResult {
    npvs: Vec<f64>,
    failures: usize,
    paths: Vec<RatePath>,
    time_grid: Vec<f64>,
    principal: f64,
    seed: u64,
}

impl SimulationResult {
    /// Assembles a result from its parts.
    pub fn new(
        npvs: Vec<f64>,
        failures: usize,
        paths: Vec<RatePath>,
        time_grid: Vec<f64>,
        principal: f64,
        seed: u64,
    ) -> Self {
        Self {
            npvs,
            failures,
            paths,
            time_grid,
            principal,
            seed,
        }
    }

    /// Path NPVs of the successful trials, in trial order.
    #[inline]
    pub fn npvs(&self) -> &[f64] {
        &self.npvs
    }

    /// Number of trials excluded after a failure.
    #[inline]
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Number of trials attempted.
    #[inline]
    pub fn n_trials(&self) -> usize {
        self.npvs.len() + self.failures
    }

    /// Retained rate paths, leading trials first.
    #[inline]
    pub fn paths(&self) -> &[RatePath] {
        &self.paths
    }

    /// Time grid in years shared by the retained paths.
    #[inline]
    pub fn time_grid(&self) -> &[f64] {
        &self.time_grid
    }

    /// Principal used to express the mean as a percentage.
    #[inline]
    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// Base seed of the run; rerunning with it reproduces the result.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Summary statistics over the successful trials.
    ///
    /// # Errors
    ///
    /// Numerical error if the result holds no successful trial.
    pub fn summary(&self) -> Result<SimulationSummary, ValuationError> {
        SimulationSummary::from_npvs(&self.npvs, self.failures, self.principal)
    }

    /// Concatenates another batch onto this one.
    ///
    /// Path values and failure counts are pooled; retained paths are
    /// appended. The seed, principal and time grid of `self` are kept unless
    /// `self` has no time grid.
    pub fn merge(mut self, other: SimulationResult) -> SimulationResult {
        self.npvs.extend(other.npvs);
        self.failures += other.failures;
        self.paths.extend(other.paths);
        if self.time_grid.is_empty() {
            self.time_grid = other.time_grid;
        }
        self
    }
}
