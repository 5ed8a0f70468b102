//! Amortisation walk over a single short-rate path.

use mbs_core::types::ValuationError;
use mbs_models::instruments::{MortgageBond, MONTHS_PER_YEAR};
use mbs_models::prepayment::PrepaymentModel;

use crate::mc::RatePath;

/// Lifecycle of the loan within one walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LoanStatus {
    /// Balance outstanding; payments continue.
    #[default]
    Active,
    /// Balance fully repaid; no further cash flows.
    PaidOff,
}

/// Mutable state of one amortisation walk.
///
/// The balance never increases and never drops below zero; reaching zero
/// moves the loan to [`LoanStatus::PaidOff`] permanently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmortizationState {
    balance: f64,
    period: u32,
    status: LoanStatus,
}

impl AmortizationState {
    /// Opening state with the full principal outstanding.
    pub fn new(principal: f64) -> Self {
        Self {
            balance: principal,
            period: 0,
            status: if principal > 0.0 {
                LoanStatus::Active
            } else {
                LoanStatus::PaidOff
            },
        }
    }

    /// Outstanding balance.
    #[inline]
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Index of the next period to be processed.
    #[inline]
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Current status.
    #[inline]
    pub fn status(&self) -> LoanStatus {
        self.status
    }

    /// True while payments continue.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Active
    }

    /// Reduces the balance by `principal_paid` and advances one period.
    ///
    /// Returns the closing balance. Negative reductions are ignored so the
    /// balance can only fall.
    pub fn repay(&mut self, principal_paid: f64) -> f64 {
        let next = self.balance - principal_paid.max(0.0);
        if next <= 0.0 {
            self.balance = 0.0;
            self.status = LoanStatus::PaidOff;
        } else {
            self.balance = next;
        }
        self.period += 1;
        self.balance
    }
}

/// One row of the amortisation schedule along a path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeriodCashflow {
    /// Zero-based month index.
    pub period: u32,
    /// Annualised short rate used for this month.
    pub rate: f64,
    /// Balance before payment.
    pub opening_balance: f64,
    /// Coupon interest on the opening balance.
    pub interest: f64,
    /// Scheduled principal (`payment - interest`).
    pub scheduled_principal: f64,
    /// Prepayment probability returned by the model.
    pub prepayment_probability: f64,
    /// Unscheduled principal (`probability * opening_balance`).
    pub extra_principal: f64,
    /// Cash flow paid to the holder (`payment + extra`).
    pub cashflow: f64,
    /// Discount factor from time zero to this month.
    pub discount_factor: f64,
    /// Discounted cash flow.
    pub present_value: f64,
    /// Balance after payment, floored at zero.
    pub closing_balance: f64,
}

/// Outcome of valuing one path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathValuation {
    /// Sum of discounted cash flows.
    pub npv: f64,
    /// Balance left after the walk.
    pub final_balance: f64,
    /// Month in which the balance reached zero, if it did.
    pub payoff_period: Option<u32>,
    /// Months processed before stopping.
    pub periods_run: u32,
}

/// Amortisation walk for one bond under one prepayment model.
///
/// # Examples
///
/// ```rust
/// use mbs_models::instruments::MortgageBond;
/// use mbs_models::prepayment::RefinancingPrepayment;
/// use mbs_pricing::amortization::AmortizationEngine;
/// use mbs_pricing::mc::RatePath;
///
/// let bond = MortgageBond::from_years(1_000_000.0, 0.025, 29).unwrap();
/// let prepayment = RefinancingPrepayment::default();
/// let engine = AmortizationEngine::new(&bond, &prepayment);
///
/// let valuation = engine.value_path(&RatePath::constant(0.05, 348)).unwrap();
/// assert!(valuation.npv < bond.principal());
/// assert!(valuation.final_balance.abs() < 1e-6);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct AmortizationEngine<'a, P> {
    bond: &'a MortgageBond,
    prepayment: &'a P,
}

impl<'a, P: PrepaymentModel> AmortizationEngine<'a, P> {
    /// Creates an engine borrowing the bond and prepayment model.
    pub fn new(bond: &'a MortgageBond, prepayment: &'a P) -> Self {
        Self { bond, prepayment }
    }

    /// The bond being valued.
    #[inline]
    pub fn bond(&self) -> &MortgageBond {
        self.bond
    }

    /// Present value of the bond's cash flows along `path`.
    ///
    /// # Errors
    ///
    /// Numerical error if the path is shorter than the bond's term, a rate is
    /// not finite, the prepayment model fails, or the result is not finite.
    pub fn value_path(&self, path: &RatePath) -> Result<PathValuation, ValuationError> {
        let mut npv = 0.0;
        let mut payoff_period = None;
        let state = self.walk(path, |row| {
            npv += row.present_value;
            if row.closing_balance == 0.0 && payoff_period.is_none() {
                payoff_period = Some(row.period);
            }
        })?;

        if !npv.is_finite() {
            return Err(ValuationError::numerical(format!(
                "path NPV is not finite: {}",
                npv
            )));
        }

        Ok(PathValuation {
            npv,
            final_balance: state.balance(),
            payoff_period,
            periods_run: state.period(),
        })
    }

    /// Full per-period schedule along `path`, stopping at payoff.
    ///
    /// # Errors
    ///
    /// Same conditions as [`AmortizationEngine::value_path`], except that a
    /// non-finite total is not checked.
    pub fn schedule(&self, path: &RatePath) -> Result<Vec<PeriodCashflow>, ValuationError> {
        let mut rows = Vec::with_capacity(self.bond.term_months() as usize);
        self.walk(path, |row| rows.push(row))?;
        Ok(rows)
    }

    fn walk<F>(&self, path: &RatePath, mut visit: F) -> Result<AmortizationState, ValuationError>
    where
        F: FnMut(PeriodCashflow),
    {
        let term = self.bond.term_months();
        let rates = path.rates();
        if rates.len() < term as usize {
            return Err(ValuationError::numerical(format!(
                "rate path has {} points, bond needs {}",
                rates.len(),
                term
            )));
        }

        let months = f64::from(MONTHS_PER_YEAR);
        let payment = self.bond.monthly_payment();
        let monthly_coupon = self.bond.monthly_rate();
        let mut state = AmortizationState::new(self.bond.principal());
        let mut rate_sum = 0.0;

        for (m, &rate) in (0..term).zip(rates.iter()) {
            if !state.is_active() {
                break;
            }
            if !rate.is_finite() {
                return Err(ValuationError::numerical(format!(
                    "non-finite short rate {} at period {}",
                    rate, m
                )));
            }

            let opening_balance = state.balance();
            let probability =
                self.prepayment
                    .probability(rate, opening_balance, term - m, payment)?;
            let interest = opening_balance * monthly_coupon;
            let scheduled_principal = payment - interest;
            let extra_principal = probability * opening_balance;
            let cashflow = payment + extra_principal;
            let closing_balance = state.repay(scheduled_principal + extra_principal);

            rate_sum += rate;
            let discount_factor = (-rate_sum / months).exp();

            visit(PeriodCashflow {
                period: m,
                rate,
                opening_balance,
                interest,
                scheduled_principal,
                prepayment_probability: probability,
                extra_principal,
                cashflow,
                discount_factor,
                present_value: cashflow * discount_factor,
                closing_balance,
            });
        }

        Ok(state)
    }
}
