//! Value command implementation
//!
//! Runs the Monte Carlo valuation and reports the average path NPV, optionally
//! exporting the retained short-rate paths as CSV for external charting.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use mbs_models::instruments::MortgageBond;
use mbs_models::prepayment::RefinancingPrepayment;
use mbs_pricing::simulation::{SimulationResult, SimulationSummary};
use mbs_pricing::valuation::ValuationInputs;
use serde::Serialize;
use tracing::info;

use crate::config::{CliOverrides, ValuationConfig};
use crate::{CliError, Result};

/// Output format for the summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Arguments of `mbsval value`
#[derive(Debug, Clone, Default, Args)]
pub struct ValueArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bond nominal
    #[arg(long)]
    pub principal: Option<f64>,

    /// Annual coupon rate (decimal, e.g. 0.025)
    #[arg(long)]
    pub coupon: Option<f64>,

    /// Term in whole years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Hull-White mean reversion speed
    #[arg(long)]
    pub mean_reversion: Option<f64>,

    /// Hull-White volatility
    #[arg(long)]
    pub volatility: Option<f64>,

    /// Number of Monte Carlo paths
    #[arg(short = 'n', long)]
    pub paths: Option<usize>,

    /// Base seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run all trials on the calling thread
    #[arg(long)]
    pub sequential: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write the retained rate paths to this CSV file
    #[arg(long)]
    pub paths_out: Option<PathBuf>,
}

impl ValueArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            principal: self.principal,
            coupon: self.coupon,
            term_years: self.term_years,
            mean_reversion: self.mean_reversion,
            volatility: self.volatility,
            paths: self.paths,
            seed: self.seed,
            sequential: self.sequential,
        }
    }
}

/// JSON report
#[derive(Debug, Serialize)]
struct Report<'a> {
    bond: MortgageBond,
    prepayment: RefinancingPrepayment,
    mean_reversion: f64,
    volatility: f64,
    seed: u64,
    summary: &'a SimulationSummary,
}

/// Run the value command
pub fn run(args: &ValueArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading configuration");
            ValuationConfig::from_file(path)?
        }
        None => ValuationConfig::default(),
    };
    config.merge_with_cli(&args.overrides());

    let inputs = config.to_inputs();
    inputs.validate()?;

    let result = inputs.value()?;
    let summary = result.summary()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Table => write_table(&mut out, &inputs, &result, &summary)?,
        OutputFormat::Json => write_json(&mut out, &inputs, &result, &summary)?,
    }

    if let Some(path) = &args.paths_out {
        let file = File::create(path).map_err(|e| {
            CliError::InvalidArgument(format!("cannot create {}: {}", path.display(), e))
        })?;
        write_paths_csv(file, &result)?;
        info!(
            path = %path.display(),
            paths = result.paths().len(),
            "rate paths exported"
        );
    }

    Ok(())
}

fn write_table<W: Write>(
    out: &mut W,
    inputs: &ValuationInputs,
    result: &SimulationResult,
    summary: &SimulationSummary,
) -> Result<()> {
    writeln!(out, "Mortgage bond valuation")?;
    writeln!(out, "  Principal:           {:>18.2}", inputs.principal)?;
    writeln!(out, "  Coupon:              {:>17.3}%", 100.0 * inputs.coupon)?;
    writeln!(out, "  Term (years):        {:>18}", inputs.term_years)?;
    writeln!(out, "  Mean reversion (a):  {:>18}", inputs.mean_reversion)?;
    writeln!(out, "  Volatility (sigma):  {:>18}", inputs.volatility)?;
    writeln!(out, "  Seed:                {:>18}", result.seed())?;
    writeln!(out)?;
    writeln!(out, "Results")?;
    writeln!(out, "  Average NPV:         {:>18.2}", summary.mean_npv)?;
    writeln!(out, "  As % of nominal:     {:>17.2}%", summary.mean_pct_of_principal)?;
    writeln!(out, "  Standard error:      {:>18.2}", summary.std_error)?;
    writeln!(
        out,
        "  Trials:              {:>18}",
        format!("{}/{}", summary.n_succeeded, summary.n_trials)
    )?;
    Ok(())
}

fn write_json<W: Write>(
    out: &mut W,
    inputs: &ValuationInputs,
    result: &SimulationResult,
    summary: &SimulationSummary,
) -> Result<()> {
    let report = Report {
        bond: inputs.bond()?,
        prepayment: RefinancingPrepayment::new(inputs.prepayment_dispersion)?,
        mean_reversion: inputs.mean_reversion,
        volatility: inputs.volatility,
        seed: result.seed(),
        summary,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

/// Writes `time_years, path_0, path_1, ...` with one row per grid point.
fn write_paths_csv<W: Write>(writer: W, result: &SimulationResult) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["time_years".to_string()];
    header.extend((0..result.paths().len()).map(|i| format!("path_{}", i)));
    csv.write_record(&header)?;

    for (step, time) in result.time_grid().iter().enumerate() {
        let mut row = Vec::with_capacity(result.paths().len() + 1);
        row.push(time.to_string());
        for path in result.paths() {
            let rate = path.rates().get(step).copied().unwrap_or(f64::NAN);
            row.push(rate.to_string());
        }
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(())
}
