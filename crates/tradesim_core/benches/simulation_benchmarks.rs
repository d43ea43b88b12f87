//! Criterion benchmarks for tradesim_core
//!
//! Run with: cargo bench -p tradesim_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tradesim_core::config::{SharpeVariant, SimulationBuilder};
use tradesim_core::model::ReturnSeries;
use tradesim_core::path_metrics::PathMetrics;
use tradesim_core::simulation::SimulationEngine;

/// One trading year of deterministic pseudo-returns with flat days mixed in
fn create_history(periods: usize) -> ReturnSeries {
    let values: Vec<f64> = (0..periods)
        .map(|i| match i % 7 {
            0 => 0.0,
            k => ((i * 37 % 101) as f64 - 50.0) * (k as f64 / 3.0),
        })
        .collect();
    ReturnSeries::new(values).expect("benchmark history is valid")
}

fn bench_path_metrics(c: &mut Criterion) {
    let history = create_history(252);
    let metrics = PathMetrics::new(4_000.0, SharpeVariant::Annualized);

    c.bench_function("path_metrics_252", |b| {
        b.iter(|| metrics.compute(black_box(history.values())))
    });
}

fn bench_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation");
    let history = create_history(252);

    for trials in [100, 1_000, 10_000].iter() {
        let config = SimulationBuilder::new()
            .trials(*trials)
            .build()
            .expect("benchmark config is valid");
        let engine = SimulationEngine::new(config);

        group.bench_with_input(BenchmarkId::new("trials", trials), trials, |b, _| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(42);
                engine.run(black_box(&history), &mut rng, None)
            })
        });
    }

    group.finish();
}

fn bench_retained_paths(c: &mut Criterion) {
    let history = create_history(252);
    let config = SimulationBuilder::new()
        .trials(1_000)
        .retain_paths(true)
        .build()
        .expect("benchmark config is valid");
    let engine = SimulationEngine::new(config);

    c.bench_function("simulation_with_paths_1000", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            engine.run(black_box(&history), &mut rng, None)
        })
    });
}

criterion_group!(
    benches,
    bench_path_metrics,
    bench_simulation,
    bench_retained_paths
);
criterion_main!(benches);
