//! Trial fan-out and aggregation.
//!
//! - [`ValuationContext`]: Immutable bond, rate model and prepayment model
//!   shared by reference with every trial
//! - [`SimulationAggregator`]: Runs trials on the rayon pool (or sequentially)
//!   and collects the path values in trial order
//! - [`SimulationResult`] / [`SimulationSummary`]: Path values, retained rate
//!   paths and the order-independent point estimate

mod aggregator;
mod context;
mod result;

pub use aggregator::SimulationAggregator;
pub use context::ValuationContext;
pub use result::{SimulationResult, SimulationSummary};
