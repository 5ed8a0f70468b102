//! mbsval - Monte Carlo valuation of prepayable mortgage bonds
//!
//! # Commands
//!
//! - `mbsval value [--config <file>] [overrides...]` - Run the valuation
//! - `mbsval defaults` - Print the default configuration as TOML
//!
//! # Architecture
//!
//! As the service layer, this crate turns files and flags into
//! `mbs_pricing` inputs and renders the results; it holds no pricing logic.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::value::ValueArgs;
use config::LogLevel;

/// Monte Carlo mortgage bond valuation
#[derive(Parser)]
#[command(name = "mbsval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value the bond by Monte Carlo simulation
    Value(ValueArgs),

    /// Print the default configuration as TOML
    Defaults,
}

/// Initialise tracing; logs go to stderr so stdout carries only results
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    match cli.command {
        Commands::Value(args) => commands::value::run(&args),
        Commands::Defaults => commands::defaults::run(),
    }
}
