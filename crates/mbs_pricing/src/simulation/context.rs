//! Immutable inputs shared by every trial of a run.

use mbs_models::instruments::MortgageBond;
use mbs_models::prepayment::{PrepaymentModel, RefinancingPrepayment};

/// Everything a trial reads: the bond, the short-rate model and the
/// prepayment model.
///
/// Built once before the run and passed by shared reference; trials never
/// mutate it, so it can be read from any number of threads at once.
#[derive(Clone, Debug)]
pub struct ValuationContext<M, P = RefinancingPrepayment> {
    bond: MortgageBond,
    model: M,
    prepayment: P,
}

impl<M, P: PrepaymentModel> ValuationContext<M, P> {
    /// Bundles the run inputs.
    pub fn new(bond: MortgageBond, model: M, prepayment: P) -> Self {
        Self {
            bond,
            model,
            prepayment,
        }
    }

    /// The bond being valued.
    #[inline]
    pub fn bond(&self) -> &MortgageBond {
        &self.bond
    }

    /// The short-rate model.
    #[inline]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The prepayment model.
    #[inline]
    pub fn prepayment(&self) -> &P {
        &self.prepayment
    }
}
