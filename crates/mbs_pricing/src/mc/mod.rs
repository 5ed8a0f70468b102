//! Monte Carlo simulation infrastructure.
//!
//! # Architecture
//!
//! ```text
//! SimulationAggregator
//! ├── SimulationConfig  (trial count, seed, retention, parallelism)
//! ├── PathGenerator     (precomputed transition laws on the monthly grid)
//! └── PricerRng         (one sub-stream per trial)
//! ```
//!
//! A [`PathGenerator`] is built once per run and shared read-only by every
//! trial; each trial draws a [`RatePath`] from its own random stream.

mod config;
mod paths;

pub use config::{
    SimulationConfig, SimulationConfigBuilder, DEFAULT_RETAINED_PATHS, MAX_PATHS,
};
pub use paths::{PathGenerator, RatePath};
