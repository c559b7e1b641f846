//! Integration tests for the two walkthroughs
//!
//! These tests verify the documented example end to end: generate, test,
//! difference, test again.

use approx::assert_relative_eq;
use time_series_basics::analysis::{
    decomposable_period, differencing, seasonality_strength, Stationarity,
};
use time_series_basics::prelude::*;

fn documented_example() -> SeriesComponents {
    SeriesGenerator::new(GeneratorConfig::default())
        .unwrap()
        .generate()
        .unwrap()
}

#[test]
fn test_generator_is_bit_identical_across_runs() {
    let first = documented_example();
    let second = documented_example();

    assert_eq!(first.series.dates, second.series.dates);
    for (a, b) in first.series.data.iter().zip(second.series.data.iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn test_trending_series_needs_differencing() {
    let parts = documented_example();

    let before = adf_test(&parts.series.data).unwrap();
    assert!(before.p_value >= SIGNIFICANCE_LEVEL);
    assert_eq!(before.stationarity(), Stationarity::NonStationary);

    let differenced = parts.series.difference().unwrap();
    assert_eq!(differenced.len(), parts.series.len() - 1);

    let after = adf_test(&differenced.data).unwrap();
    assert!(after.p_value < SIGNIFICANCE_LEVEL);
    assert!(after.is_stationary());
}

#[test]
fn test_random_walk_scenario() {
    let walk = random_walk(100, 42, 1.0).unwrap();
    assert_eq!(walk.len(), 100);

    let before = adf_test(&walk.data).unwrap();
    assert!(!before.is_stationary());

    let differenced = walk.difference().unwrap();
    assert_eq!(differenced.len(), 99);
    assert_eq!(differenced.dates[0], walk.dates[1]);

    let after = adf_test(&differenced.data).unwrap();
    assert!(after.is_stationary());
}

#[test]
fn test_differenced_walk_is_the_noise() {
    let walk = random_walk(100, 42, 1.0).unwrap();
    let noise = white_noise(100, 42, 1.0).unwrap();
    let differenced = walk.difference().unwrap();

    for (d, e) in differenced.data.iter().zip(noise.data[1..].iter()) {
        assert_relative_eq!(*d, *e, epsilon = 1e-9);
    }
}

#[test]
fn test_differencing_then_integrating_restores_series() {
    let parts = documented_example();
    let data = &parts.series.data;

    let diff = differencing::difference(data).unwrap();
    let restored = differencing::integrate(&diff, data[0]);

    assert_eq!(restored.len(), data.len());
    for (r, d) in restored.iter().zip(data.iter()) {
        assert_relative_eq!(*r, *d, epsilon = 1e-9);
    }
}

#[test]
fn test_differencing_a_ramp_removes_the_trend() {
    let config = GeneratorConfig {
        seasonal_amplitude: 0.0,
        noise_std: 0.0,
        ..Default::default()
    };
    let parts = SeriesGenerator::new(config).unwrap().generate().unwrap();
    let differenced = parts.series.difference().unwrap();

    for d in &differenced.data {
        assert_relative_eq!(*d, 10.0 / 99.0, epsilon = 1e-12);
    }
}

#[test]
fn test_short_series_fails_like_the_notebook() {
    let walk = random_walk(3, 42, 1.0).unwrap();
    let result = adf_test(&walk.data);
    assert!(matches!(
        result,
        Err(Error::InsufficientData { needed: 4, got: 3 })
    ));
}

#[test]
fn test_config_drives_the_pipeline() {
    let config = Config::from_toml_str(
        r#"
        [generator]
        n = 60
        seed = 7
        cycle_amplitude = 1.5
        cycle_period = 20.0

        [adf]
        lag_selection = "fixed"
        max_lag = 2
        "#,
    )
    .unwrap();

    let parts = SeriesGenerator::new(config.generator.clone())
        .unwrap()
        .generate()
        .unwrap();
    assert_eq!(parts.series.len(), 60);
    assert!(parts.cyclical.iter().any(|c| c.abs() > 1.0));

    let result = adf_test_with(&parts.series.data, &config.adf).unwrap();
    assert_eq!(result.used_lag, 2);
    assert_eq!(result.n_obs, 60 - 1 - 2);
}

#[test]
fn test_charts_render_for_generated_series() {
    let parts = documented_example();
    let chart = line_chart(&parts.series.data, 12, 72);
    assert_eq!(chart.lines().count(), 13);
    assert_eq!(chart.matches('*').count(), 72);

    let bars = bar_chart(&parts.noise[..5], "noise", 20);
    assert_eq!(bars.lines().filter(|l| l.contains('|')).count(), 5);
}

#[test]
fn test_documented_example_decomposes() {
    let config = GeneratorConfig::default();
    let parts = SeriesGenerator::new(config.clone())
        .unwrap()
        .generate()
        .unwrap();

    let seasonal_period = config.seasonal_period().unwrap();
    let period = decomposable_period(seasonal_period, parts.series.len()).unwrap();
    assert_eq!(period, 50);

    let decomposition =
        decompose(&parts.series.data, period, DecompositionModel::Additive).unwrap();
    assert_eq!(decomposition.trend.len(), 100);
    assert!(seasonality_strength(&decomposition) >= 0.0);
}
