//! Reference scenarios for the amortisation walk and aggregation.
//!
//! # Test Categories
//!
//! 1. **Closed-form path value**: constant 5% path with no refinancing incentive
//! 2. **Full amortisation**: balance reaches zero by the final period
//! 3. **Prepayment edge cases**: no remaining periods, negative gain
//! 4. **Aggregation**: merge order never changes the point estimate
//! 5. **Invariants**: balance non-increasing and floored at zero on any path

use approx::assert_relative_eq;
use mbs_models::instruments::MortgageBond;
use mbs_models::prepayment::{PrepaymentModel, RefinancingPrepayment};
use mbs_pricing::amortization::AmortizationEngine;
use mbs_pricing::mc::{PathGenerator, RatePath};
use mbs_pricing::rng::PricerRng;
use mbs_pricing::simulation::{SimulationAggregator, SimulationResult};
use mbs_pricing::valuation::ValuationInputs;
use proptest::prelude::*;

/// 1,000,000 nominal, 2.5% coupon, 29 years.
fn standard_bond() -> MortgageBond {
    MortgageBond::from_years(1_000_000.0, 0.025, 29).unwrap()
}

// ============================================================================
// Closed-form path value
// ============================================================================

#[test]
fn test_constant_five_percent_path_matches_closed_form() {
    let bond = standard_bond();
    let prepayment = RefinancingPrepayment::default();
    let engine = AmortizationEngine::new(&bond, &prepayment);

    let valuation = engine.value_path(&RatePath::constant(0.05, 348)).unwrap();

    let payment = bond.monthly_payment();
    let expected: f64 = (0..348)
        .map(|m| payment * (-0.05 * (m + 1) as f64 / 12.0).exp())
        .sum();
    assert_relative_eq!(valuation.npv, expected, max_relative = 1e-10);
}

#[test]
fn test_constant_five_percent_path_never_prepays() {
    let bond = standard_bond();
    let prepayment = RefinancingPrepayment::default();
    let engine = AmortizationEngine::new(&bond, &prepayment);

    let rows = engine.schedule(&RatePath::constant(0.05, 348)).unwrap();
    assert!(rows.iter().all(|row| row.prepayment_probability == 0.0));
    assert!(rows.iter().all(|row| row.cashflow == bond.monthly_payment()));
}

// ============================================================================
// Full amortisation
// ============================================================================

#[test]
fn test_balance_fully_repaid_after_term() {
    let bond = standard_bond();
    let prepayment = RefinancingPrepayment::default();
    let engine = AmortizationEngine::new(&bond, &prepayment);

    let valuation = engine.value_path(&RatePath::constant(0.05, 348)).unwrap();
    assert_eq!(valuation.periods_run, 348);
    assert!(valuation.final_balance.abs() < 1e-6);
}

#[test]
fn test_simulated_paths_end_fully_repaid() {
    let inputs = ValuationInputs::default();
    let ctx = inputs.context().unwrap();
    let generator = PathGenerator::new(ctx.model(), 29.0, 348).unwrap();
    let engine = AmortizationEngine::new(ctx.bond(), ctx.prepayment());

    for trial in 0..20 {
        let path = generator.generate(&mut PricerRng::for_stream(77, trial));
        let valuation = engine.value_path(&path).unwrap();
        assert!(valuation.final_balance < 1e-6, "trial {}", trial);
        assert!(valuation.periods_run <= 348);
    }
}

// ============================================================================
// Prepayment edge cases
// ============================================================================

#[test]
fn test_no_remaining_periods_gives_zero_probability() {
    let prepayment = RefinancingPrepayment::default();
    let p = prepayment.probability(0.01, 500_000.0, 0, 4_000.0).unwrap();
    assert_eq!(p, 0.0);
}

#[test]
fn test_negative_gain_gives_zero_probability() {
    let bond = standard_bond();
    let prepayment = RefinancingPrepayment::default();
    let p = prepayment
        .probability(0.08, bond.principal(), bond.term_months(), bond.monthly_payment())
        .unwrap();
    assert_eq!(p, 0.0);
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn test_merge_order_does_not_change_mean() {
    let inputs = ValuationInputs {
        term_years: 10,
        n_paths: 60,
        seed: Some(11),
        ..Default::default()
    };
    let ctx = inputs.context().unwrap();
    let aggregator = SimulationAggregator::new(inputs.simulation_config().unwrap());

    let batches: Vec<SimulationResult> = [0..7, 7..25, 25..26, 26..60]
        .into_iter()
        .map(|range| aggregator.run_trials(&ctx, range).unwrap())
        .collect();

    let merge = |order: &[usize]| {
        order
            .iter()
            .map(|&i| batches[i].clone())
            .reduce(SimulationResult::merge)
            .unwrap()
    };

    let reference = merge(&[0, 1, 2, 3][..]).summary().unwrap().mean_npv;
    for order in [[3, 2, 1, 0], [1, 3, 0, 2], [2, 0, 3, 1]] {
        let mean = merge(&order[..]).summary().unwrap().mean_npv;
        assert_eq!(mean.to_bits(), reference.to_bits(), "order {:?}", order);
    }

    let full = aggregator.run(&ctx).unwrap().summary().unwrap().mean_npv;
    assert_eq!(full.to_bits(), reference.to_bits());
}

// ============================================================================
// Invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Along any rate path the balance never rises and never goes negative.
    #[test]
    fn prop_balance_monotone_and_floored(
        rates in prop::collection::vec(-0.01f64..0.08, 61),
        coupon in 0.0f64..0.08,
    ) {
        let bond = MortgageBond::from_years(250_000.0, coupon, 5).unwrap();
        let prepayment = RefinancingPrepayment::default();
        let engine = AmortizationEngine::new(&bond, &prepayment);

        let rows = engine.schedule(&RatePath::new(rates)).unwrap();
        let mut previous = bond.principal();
        for row in &rows {
            prop_assert!(row.closing_balance <= row.opening_balance);
            prop_assert!(row.opening_balance <= previous);
            prop_assert!(row.closing_balance >= 0.0);
            prop_assert!((0.0..1.0).contains(&row.prepayment_probability));
            previous = row.closing_balance;
        }
    }
}
