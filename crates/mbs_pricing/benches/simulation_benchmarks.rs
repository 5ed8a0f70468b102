//! Benchmarks for mbs_pricing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mbs_models::instruments::MortgageBond;
use mbs_models::prepayment::RefinancingPrepayment;
use mbs_pricing::amortization::AmortizationEngine;
use mbs_pricing::mc::{PathGenerator, RatePath, SimulationConfig};
use mbs_pricing::rng::PricerRng;
use mbs_pricing::simulation::SimulationAggregator;
use mbs_pricing::valuation::ValuationInputs;

fn benchmark_path_generation(c: &mut Criterion) {
    let ctx = ValuationInputs::default().context().unwrap();
    let generator = PathGenerator::new(ctx.model(), 29.0, 348).unwrap();

    c.bench_function("hull_white_path_348", |b| {
        let mut rng = PricerRng::from_seed(42);
        b.iter(|| generator.generate(black_box(&mut rng)))
    });
}

fn benchmark_amortization_walk(c: &mut Criterion) {
    let bond = MortgageBond::from_years(1_000_000.0, 0.025, 29).unwrap();
    let prepayment = RefinancingPrepayment::default();
    let engine = AmortizationEngine::new(&bond, &prepayment);
    let path = RatePath::new((0..=348).map(|m| 0.03 - 0.00004 * m as f64).collect());

    c.bench_function("amortization_walk_348", |b| {
        b.iter(|| engine.value_path(black_box(&path)))
    });
}

fn benchmark_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation");
    group.sample_size(10);

    let ctx = ValuationInputs::default().context().unwrap();

    for n_paths in [100, 500, 2_000] {
        for parallel in [false, true] {
            let config = SimulationConfig::builder()
                .n_paths(n_paths)
                .seed(42)
                .parallel(parallel)
                .build()
                .unwrap();
            let aggregator = SimulationAggregator::new(config);
            let label = if parallel { "parallel" } else { "sequential" };

            group.bench_with_input(BenchmarkId::new(label, n_paths), &ctx, |b, ctx| {
                b.iter(|| aggregator.run(black_box(ctx)))
            });
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_path_generation,
    benchmark_amortization_walk,
    benchmark_simulation
);
criterion_main!(benches);
