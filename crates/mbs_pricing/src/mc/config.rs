//! Monte Carlo simulation configuration.

use mbs_core::types::ValuationError;

/// Maximum number of simulation trials allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Number of rate paths kept for charting when not configured.
pub const DEFAULT_RETAINED_PATHS: usize = 50;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`SimulationConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use mbs_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_paths(500)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 500);
/// assert_eq!(config.retained_paths(), 50);
/// assert!(config.parallel());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of independent trials.
    n_paths: usize,
    /// Optional base seed for reproducibility.
    seed: Option<u64>,
    /// Number of leading rate paths kept in the result.
    retained_paths: usize,
    /// Run trials on the rayon pool.
    parallel: bool,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the number of trials.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the optional base seed.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns how many rate paths are retained for charting.
    #[inline]
    pub fn retained_paths(&self) -> usize {
        self.retained_paths
    }

    /// Returns whether trials run in parallel.
    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `n_paths` is 0 or greater than
    /// 10,000,000.
    pub fn validate(&self) -> Result<(), ValuationError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ValuationError::config(
                "n_paths",
                self.n_paths,
                "must be in [1, 10000000]",
            ));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug)]
pub struct SimulationConfigBuilder {
    n_paths: Option<usize>,
    seed: Option<u64>,
    retained_paths: usize,
    parallel: bool,
}

impl Default for SimulationConfigBuilder {
    fn default() -> Self {
        Self {
            n_paths: None,
            seed: None,
            retained_paths: DEFAULT_RETAINED_PATHS,
            parallel: true,
        }
    }
}

impl SimulationConfigBuilder {
    /// Sets the number of trials, in [1, 10_000_000].
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the base seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the base seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets how many leading rate paths to keep (0 keeps none).
    #[inline]
    pub fn retained_paths(mut self, retained_paths: usize) -> Self {
        self.retained_paths = retained_paths;
        self
    }

    /// Enables or disables the rayon fan-out.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `n_paths` is not set or invalid.
    pub fn build(self) -> Result<SimulationConfig, ValuationError> {
        let n_paths = self
            .n_paths
            .ok_or_else(|| ValuationError::config("n_paths", "<unset>", "must be specified"))?;

        let config = SimulationConfig {
            n_paths,
            seed: self.seed,
            retained_paths: self.retained_paths,
            parallel: self.parallel,
        };

        config.validate()?;
        Ok(config)
    }
}
