//! Path-level amortisation walk.
//!
//! For each month the walk charges interest on the outstanding balance,
//! applies the scheduled principal and any prepayment, and discounts the
//! month's cash flow along the simulated short-rate path:
//!
//! ```text
//! interest  = balance * coupon / 12
//! scheduled = payment - interest
//! extra     = P(rate[m], balance, M - m, payment) * balance
//! cashflow  = payment + extra
//! balance  -= scheduled + extra            (floored at 0)
//! discount  = exp(-(1/12) * sum_{k<=m} rate[k])
//! ```

mod engine;

pub use engine::{
    AmortizationEngine, AmortizationState, LoanStatus, PathValuation, PeriodCashflow,
};
