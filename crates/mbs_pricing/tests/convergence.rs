//! Monte Carlo convergence.
//!
//! The dispersion of the estimated mean across independent seeds must shrink
//! as the number of trials grows (variance of the mean ~ 1/N).

use mbs_pricing::valuation::ValuationInputs;

/// Sample variance of the estimated mean over `n_batches` seeds.
fn variance_of_mean(n_paths: usize, n_batches: u64) -> f64 {
    let means: Vec<f64> = (0..n_batches)
        .map(|batch| {
            let inputs = ValuationInputs {
                term_years: 10,
                n_paths,
                seed: Some(1_000 + batch),
                retained_paths: 0,
                ..Default::default()
            };
            inputs.value().unwrap().summary().unwrap().mean_npv
        })
        .collect();

    let n = means.len() as f64;
    let grand = means.iter().sum::<f64>() / n;
    means.iter().map(|m| (m - grand).powi(2)).sum::<f64>() / (n - 1.0)
}

#[test]
fn test_variance_of_mean_falls_with_trial_count() {
    let small = variance_of_mean(50, 20);
    let large = variance_of_mean(400, 20);

    assert!(small > 0.0);
    // Eight times the trials: expect roughly an eighth of the variance.
    assert!(
        large < 0.5 * small,
        "variance of mean did not fall: N=50 -> {}, N=400 -> {}",
        small,
        large
    );
}

#[test]
fn test_standard_error_falls_with_trial_count() {
    let run = |n_paths| {
        ValuationInputs {
            term_years: 10,
            n_paths,
            seed: Some(5),
            retained_paths: 0,
            ..Default::default()
        }
        .value()
        .unwrap()
        .summary()
        .unwrap()
        .std_error
    };

    assert!(run(800) < run(50));
}
