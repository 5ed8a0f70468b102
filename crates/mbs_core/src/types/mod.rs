//! Shared types for the valuation workspace.
//!
//! - [`ValuationError`]: Error kinds surfaced by every valuation component

pub mod error;

pub use error::ValuationError;
