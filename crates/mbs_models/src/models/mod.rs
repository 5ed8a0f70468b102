//! Short-rate models.
//!
//! - [`ShortRateModel`]: Markov transition law of a Gaussian short-rate model
//! - [`TransitionLaw`]: One-step conditional mean and variance
//! - [`HullWhiteModel`]: One-factor Hull-White model fitted to a yield curve

pub mod hull_white;
pub mod short_rate;

pub use hull_white::{HullWhiteModel, HullWhiteParams};
pub use short_rate::{ShortRateModel, TransitionLaw};
