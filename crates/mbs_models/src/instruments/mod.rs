//! Instrument definitions.

mod mortgage_bond;

pub use mortgage_bond::{MortgageBond, MONTHS_PER_YEAR};
