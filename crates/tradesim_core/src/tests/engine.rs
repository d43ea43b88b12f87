//! Full engine runs
//!
//! These tests verify that:
//! - A seed fully determines the result, independent of batch scheduling
//! - Cancellation stops a run with no partial result
//! - Confidence intervals bracket the mean and narrow as trials grow

use rand::rngs::{SmallRng, StdRng};
use rand::{Rng, SeedableRng};

use crate::config::SimulationBuilder;
use crate::error::SimulationError;
use crate::model::{Metric, MonteCarloProgress, ReturnSeries};
use crate::path_metrics::PathMetrics;
use crate::resample::Resampler;
use crate::simulation::{MAX_BATCH_SIZE, SimulationEngine};

fn history() -> ReturnSeries {
    ReturnSeries::new(vec![
        25.0, -10.0, 0.0, 15.5, -30.0, 5.0, 12.0, -7.5, 0.0, 40.0, -22.0, 3.0,
    ])
    .unwrap()
}

#[test]
fn test_same_seed_same_result() {
    let config = SimulationBuilder::new().trials(450).build().unwrap();
    let engine = SimulationEngine::new(config);

    let a = engine
        .run(&history(), &mut StdRng::seed_from_u64(99), None)
        .unwrap();
    let b = engine
        .run(&history(), &mut StdRng::seed_from_u64(99), None)
        .unwrap();
    assert_eq!(a.result, b.result);

    let c = engine
        .run(&history(), &mut StdRng::seed_from_u64(100), None)
        .unwrap();
    assert_ne!(a.result.trials, c.result.trials);
}

/// Rebuild the trials batch by batch on one thread and compare in order
#[test]
fn test_trial_order_matches_sequential_batches() {
    let series = history();
    let trials = 2 * MAX_BATCH_SIZE + 37;
    let config = SimulationBuilder::new()
        .initial_capital(500.0)
        .trials(trials)
        .build()
        .unwrap();
    let output = SimulationEngine::new(config.clone())
        .run(&series, &mut StdRng::seed_from_u64(7), None)
        .unwrap();

    let mut seeder = StdRng::seed_from_u64(7);
    let seeds: Vec<u64> = (0..trials.div_ceil(MAX_BATCH_SIZE))
        .map(|_| seeder.random())
        .collect();
    let resampler = Resampler::new(&series).unwrap();
    let metrics = PathMetrics::new(config.initial_capital, config.sharpe_variant());

    let mut expected = Vec::with_capacity(trials);
    for (i, seed) in seeds.into_iter().enumerate() {
        let mut rng = SmallRng::seed_from_u64(seed);
        let size = MAX_BATCH_SIZE.min(trials - i * MAX_BATCH_SIZE);
        for _ in 0..size {
            expected.push(metrics.compute(&resampler.sample_path(&mut rng)));
        }
    }
    assert_eq!(output.result.trials, expected);
}

#[test]
fn test_progress_counts_every_trial() {
    let config = SimulationBuilder::new().trials(321).build().unwrap();
    let progress = MonteCarloProgress::new();
    SimulationEngine::new(config)
        .run(&history(), &mut StdRng::seed_from_u64(1), Some(&progress))
        .unwrap();
    assert_eq!(progress.completed(), 321);
}

#[test]
fn test_cancelled_run_returns_no_result() {
    let config = SimulationBuilder::new().trials(500).build().unwrap();
    let progress = MonteCarloProgress::new();
    progress.cancel();

    let err = SimulationEngine::new(config)
        .run(&history(), &mut StdRng::seed_from_u64(1), Some(&progress))
        .unwrap_err();
    assert_eq!(err, SimulationError::Cancelled);
    assert_eq!(progress.completed(), 0);
}

#[test]
fn test_interval_brackets_mean() {
    let config = SimulationBuilder::new().trials(1_000).build().unwrap();
    let output = SimulationEngine::new(config)
        .run(&history(), &mut StdRng::seed_from_u64(3), None)
        .unwrap();

    for metric in [Metric::TerminalPnl, Metric::WinProbability, Metric::MaxDrawdown] {
        let summary = output.result.summary(metric).unwrap();
        assert!(summary.interval.contains(summary.mean), "{metric:?}");
        assert_eq!(summary.interval.confidence, 0.95);
    }
}

#[test]
fn test_interval_narrows_with_more_trials() {
    let width = |trials| {
        let config = SimulationBuilder::new().trials(trials).build().unwrap();
        let output = SimulationEngine::new(config)
            .run(&history(), &mut StdRng::seed_from_u64(11), None)
            .unwrap();
        output
            .result
            .summary(Metric::TerminalPnl)
            .unwrap()
            .interval
            .width()
    };

    // SEM shrinks by a factor of ten between these sizes
    assert!(width(10_000) < width(100));
}

#[test]
fn test_loss_free_history_summarizes_infinite_sentinels() {
    let series = ReturnSeries::new(vec![5.0, 2.0, 8.0, 1.0, 3.0]).unwrap();
    let config = SimulationBuilder::new()
        .initial_capital(100.0)
        .trials(300)
        .build()
        .unwrap();
    let output = SimulationEngine::new(config.clone())
        .run(&series, &mut StdRng::seed_from_u64(21), None)
        .unwrap();

    for metric in [Metric::RewardRatio, Metric::ProfitLossRatio] {
        let summary = output.result.summary(metric).unwrap();
        assert_eq!(summary.mean, f64::INFINITY, "{metric:?}");
        assert_eq!(summary.interval.low, f64::INFINITY);
        assert_eq!(summary.interval.high, f64::INFINITY);
        assert_eq!(summary.percentiles.len(), config.quantiles().len());
        assert!(summary.percentiles.iter().all(|&(_, v)| v == f64::INFINITY));
    }

    // no period ever loses, so no trial draws down
    let drawdown = output.result.summary(Metric::MaxDrawdown).unwrap();
    assert_eq!(drawdown.mean, 0.0);
    assert!(drawdown.percentiles.iter().all(|&(_, v)| v == 0.0));
}
