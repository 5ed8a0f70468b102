//! Valuation configuration management
//!
//! Handles loading configuration from TOML files and command-line overrides.
//! Every section and field is optional; missing values fall back to the
//! library defaults.
//!
//! ```toml
//! [bond]
//! principal = 1000000.0
//! coupon = 0.025
//! term_years = 29
//!
//! [model]
//! mean_reversion = 0.0009
//! volatility = 0.022
//! prepayment_dispersion = 0.05
//!
//! [simulation]
//! paths = 500
//! seed = 42
//! retained_paths = 50
//! parallel = true
//!
//! [curve]
//! interpolation = "linear"
//! points = [[1.0, 0.0205], [2.0, 0.020879], [30.0, 0.0282]]
//! ```

use std::path::Path;

use clap::ValueEnum;
use mbs_core::market_data::curves::{CurveInterpolation, CurvePoint};
use mbs_pricing::valuation::ValuationInputs;
use serde::{Deserialize, Serialize};

use crate::{CliError, Result};

/// Log levels accepted by `--log-level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Interpolation setting as written in the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    #[default]
    Linear,
    LogLinear,
}

impl From<Interpolation> for CurveInterpolation {
    fn from(value: Interpolation) -> Self {
        match value {
            Interpolation::Linear => CurveInterpolation::Linear,
            Interpolation::LogLinear => CurveInterpolation::LogLinear,
        }
    }
}

impl From<CurveInterpolation> for Interpolation {
    fn from(value: CurveInterpolation) -> Self {
        match value {
            CurveInterpolation::Linear => Interpolation::Linear,
            CurveInterpolation::LogLinear => Interpolation::LogLinear,
        }
    }
}

/// `[bond]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BondSection {
    pub principal: f64,
    pub coupon: f64,
    pub term_years: u32,
}

/// `[model]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelSection {
    pub mean_reversion: f64,
    pub volatility: f64,
    pub prepayment_dispersion: f64,
}

/// `[simulation]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSection {
    pub paths: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub retained_paths: usize,
    pub parallel: bool,
}

/// `[curve]` section; points are `[tenor_years, zero_rate]` pairs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CurveSection {
    pub interpolation: Interpolation,
    pub points: Vec<[f64; 2]>,
}

/// Complete file configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValuationConfig {
    pub bond: BondSection,
    pub model: ModelSection,
    pub simulation: SimulationSection,
    pub curve: CurveSection,
}

impl From<&ValuationInputs> for ValuationConfig {
    fn from(inputs: &ValuationInputs) -> Self {
        Self {
            bond: BondSection {
                principal: inputs.principal,
                coupon: inputs.coupon,
                term_years: inputs.term_years,
            },
            model: ModelSection {
                mean_reversion: inputs.mean_reversion,
                volatility: inputs.volatility,
                prepayment_dispersion: inputs.prepayment_dispersion,
            },
            simulation: SimulationSection {
                paths: inputs.n_paths,
                seed: inputs.seed,
                retained_paths: inputs.retained_paths,
                parallel: inputs.parallel,
            },
            curve: CurveSection {
                interpolation: inputs.interpolation.into(),
                points: inputs.curve.iter().map(|p| [p.tenor, p.rate]).collect(),
            },
        }
    }
}

impl Default for BondSection {
    fn default() -> Self {
        ValuationConfig::default().bond
    }
}

impl Default for ModelSection {
    fn default() -> Self {
        ValuationConfig::default().model
    }
}

impl Default for SimulationSection {
    fn default() -> Self {
        ValuationConfig::default().simulation
    }
}

impl Default for CurveSection {
    fn default() -> Self {
        ValuationConfig::default().curve
    }
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self::from(&ValuationInputs::default())
    }
}

/// Command-line overrides; `Some` values win over the file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub principal: Option<f64>,
    pub coupon: Option<f64>,
    pub term_years: Option<u32>,
    pub mean_reversion: Option<f64>,
    pub volatility: Option<f64>,
    pub paths: Option<usize>,
    pub seed: Option<u64>,
    pub sequential: bool,
}

impl ValuationConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if let Some(principal) = cli.principal {
            self.bond.principal = principal;
        }
        if let Some(coupon) = cli.coupon {
            self.bond.coupon = coupon;
        }
        if let Some(term_years) = cli.term_years {
            self.bond.term_years = term_years;
        }
        if let Some(a) = cli.mean_reversion {
            self.model.mean_reversion = a;
        }
        if let Some(sigma) = cli.volatility {
            self.model.volatility = sigma;
        }
        if let Some(paths) = cli.paths {
            self.simulation.paths = paths;
        }
        if cli.seed.is_some() {
            self.simulation.seed = cli.seed;
        }
        if cli.sequential {
            self.simulation.parallel = false;
        }
    }

    /// Library inputs described by this configuration
    pub fn to_inputs(&self) -> ValuationInputs {
        ValuationInputs {
            principal: self.bond.principal,
            coupon: self.bond.coupon,
            term_years: self.bond.term_years,
            mean_reversion: self.model.mean_reversion,
            volatility: self.model.volatility,
            n_paths: self.simulation.paths,
            curve: self
                .curve
                .points
                .iter()
                .map(|&[tenor, rate]| CurvePoint::new(tenor, rate))
                .collect(),
            interpolation: self.curve.interpolation.into(),
            prepayment_dispersion: self.model.prepayment_dispersion,
            seed: self.simulation.seed,
            retained_paths: self.simulation.retained_paths,
            parallel: self.simulation.parallel,
        }
    }
}
