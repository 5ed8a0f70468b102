//! # mbs_models: Instruments and Stochastic Models
//!
//! ## Layer 2 (Models) Role
//!
//! - [`instruments`]: The fixed-rate amortising mortgage bond contract
//! - [`models`]: Short-rate dynamics (Hull-White one-factor, exact Gaussian transition)
//! - [`prepayment`]: Borrower prepayment propensity driven by refinancing incentive
//!
//! ## Usage
//!
//! ```
//! use mbs_core::market_data::curves::FlatCurve;
//! use mbs_models::instruments::MortgageBond;
//! use mbs_models::models::{HullWhiteModel, HullWhiteParams, ShortRateModel};
//! use mbs_models::prepayment::{PrepaymentModel, RefinancingPrepayment};
//!
//! let bond = MortgageBond::from_years(1_000_000.0, 0.025, 29).unwrap();
//! let params = HullWhiteParams::new(0.0009, 0.022).unwrap();
//! let model = HullWhiteModel::new(params, FlatCurve::new(0.03)).unwrap();
//! let prepayment = RefinancingPrepayment::default();
//!
//! let r0 = model.initial_rate();
//! let p = prepayment
//!     .probability(r0, bond.principal(), bond.term_months(), bond.monthly_payment())
//!     .unwrap();
//! assert!((0.0..1.0).contains(&p));
//! ```

#![warn(missing_docs)]

pub mod instruments;
pub mod models;
pub mod prepayment;
