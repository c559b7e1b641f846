//! Walkthrough: stationarity and differencing
//!
//! Runs the Augmented Dickey-Fuller test on a synthetic series, differences
//! it and tests again.
//!
//! Usage:
//! ```
//! cargo run --bin stationarity_check -- --series random-walk --seed 42
//! ```

use anyhow::Result;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use tabled::{Table, Tabled};
use time_series_basics::analysis::{
    adf_test_with, rolling_stationarity_check, AdfResult, DescriptiveStats, LagSelection,
    Regression, SIGNIFICANCE_LEVEL,
};
use time_series_basics::plot::line_chart;
use time_series_basics::synthetic::{random_walk, white_noise, SeriesGenerator};
use time_series_basics::{Config, PlotConfig, TimeSeries};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SeriesKind {
    /// Trend + seasonality + noise
    Trend,
    /// Cumulative sum of Gaussian steps
    RandomWalk,
    /// Independent Gaussian draws
    WhiteNoise,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LagChoice {
    Aic,
    Bic,
    Fixed,
}

impl From<LagChoice> for LagSelection {
    fn from(choice: LagChoice) -> Self {
        match choice {
            LagChoice::Aic => LagSelection::Aic,
            LagChoice::Bic => LagSelection::Bic,
            LagChoice::Fixed => LagSelection::Fixed,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Test stationarity before and after differencing")]
struct Args {
    /// Series to analyse
    #[arg(long, value_enum, default_value = "trend")]
    series: SeriesKind,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of daily observations
    #[arg(short, long)]
    n: Option<usize>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// ADF lag selection
    #[arg(long, value_enum)]
    lag_selection: Option<LagChoice>,

    /// Maximum number of lagged differences
    #[arg(long)]
    max_lag: Option<usize>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[derive(Tabled)]
struct AdfRow {
    #[tabled(rename = "Series")]
    series: String,
    #[tabled(rename = "ADF Statistic")]
    statistic: String,
    #[tabled(rename = "P-Value")]
    p_value: String,
    #[tabled(rename = "Lags")]
    lags: usize,
    #[tabled(rename = "Obs")]
    n_obs: usize,
    #[tabled(rename = "Crit 1% / 5% / 10%")]
    critical: String,
    #[tabled(rename = "Result")]
    result: String,
}

impl AdfRow {
    fn new(name: &str, adf: &AdfResult) -> Self {
        let cv = adf.critical_values;
        Self {
            series: name.to_string(),
            statistic: format!("{:.4}", adf.statistic),
            p_value: format!("{:.4}", adf.p_value),
            lags: adf.used_lag,
            n_obs: adf.n_obs,
            critical: format!(
                "{:.3} / {:.3} / {:.3}",
                cv.one_percent, cv.five_percent, cv.ten_percent
            ),
            result: if adf.is_stationary() {
                "Stationary".green().to_string()
            } else {
                "Non-stationary".red().to_string()
            },
        }
    }
}

fn build_series(kind: SeriesKind, config: &Config) -> Result<TimeSeries> {
    let gen = &config.generator;
    let series = match kind {
        SeriesKind::Trend => SeriesGenerator::new(gen.clone())?.generate()?.series,
        SeriesKind::RandomWalk => random_walk(gen.n, gen.seed, gen.noise_std)?,
        SeriesKind::WhiteNoise => white_noise(gen.n, gen.seed, gen.noise_std)?,
    };
    Ok(series)
}

fn print_rolling(data: &[f64], plot: &PlotConfig) {
    let window = (data.len() / 5).max(2);
    match rolling_stationarity_check(data, window) {
        Ok(rolling) => {
            println!("  Window size: {}", rolling.window);
            println!(
                "  Mean: {} (drift {:.4})",
                if rolling.is_stable_mean {
                    "Stable".green()
                } else {
                    "Unstable".red()
                },
                rolling.mean_variation
            );
            println!(
                "  Variance: {} (variation {:.4})",
                if rolling.is_stable_variance {
                    "Stable".green()
                } else {
                    "Unstable".red()
                },
                rolling.variance_variation
            );
            println!("\n  Rolling mean");
            println!("{}", line_chart(&rolling.rolling_means, plot.height / 2, plot.width));
        }
        Err(e) => println!("  {} {}", "→".yellow(), e),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level: Level = args.log_level.parse().unwrap_or(Level::WARN);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => Config::from_toml(path)?,
        None => Config::default(),
    };
    if let Some(n) = args.n {
        config.generator.n = n;
    }
    if let Some(seed) = args.seed {
        config.generator.seed = seed;
    }
    if let Some(choice) = args.lag_selection {
        config.adf.lag_selection = choice.into();
    }
    if args.max_lag.is_some() {
        config.adf.max_lag = args.max_lag;
    }
    info!(?config, series = ?args.series, "Configuration loaded");

    println!("{}", "=".repeat(60).blue());
    println!("{}", "Stationarity and Differencing".bold().blue());
    println!("{}", "=".repeat(60).blue());
    println!(
        "\nA series is stationary when its mean and variance do not change over time.\n\
         The Augmented Dickey-Fuller test has H0: the series has a unit root\n\
         (non-stationary). We call the series stationary when p < {}.",
        SIGNIFICANCE_LEVEL
    );

    let series = build_series(args.series, &config)?;
    let plot = &config.plot;

    println!(
        "\n{} {} ({} points, seed {})",
        "Analyzing:".cyan(),
        series.name,
        series.len(),
        config.generator.seed
    );
    println!("{}", line_chart(&series.data, plot.height, plot.width));
    println!("  {}\n", DescriptiveStats::new(&series.data));

    println!("{}", "Rolling Statistics".bold());
    println!("{}", "-".repeat(40));
    print_rolling(&series.data, plot);

    let before = adf_test_with(&series.data, &config.adf)?;

    // The first difference has no value for the first date; it is dropped
    let differenced = series.difference()?;
    println!("{}", "First Difference".bold());
    println!("{}", "-".repeat(40));
    println!(
        "  y'(t) = y(t) - y(t-1), {} points from {}",
        differenced.len(),
        differenced.start().map(|d| d.to_string()).unwrap_or_default()
    );
    println!("{}", line_chart(&differenced.data, plot.height, plot.width));

    let after = adf_test_with(&differenced.data, &config.adf)?;

    println!("{}", "Augmented Dickey-Fuller Test".bold());
    println!("{}", "-".repeat(40));
    println!(
        "  Regression: {}, lag selection: {:?}",
        config.adf.regression.as_str(),
        config.adf.lag_selection
    );
    let table = Table::new(vec![
        AdfRow::new("Original", &before),
        AdfRow::new("Differenced", &after),
    ]);
    println!("{}\n", table);

    println!("{}", "Interpretation:".bold());
    if before.is_stationary() {
        println!(
            "  {} The original series is already stationary (p = {:.4}).",
            "✓".green(),
            before.p_value
        );
    } else {
        println!(
            "  {} The original series is non-stationary (p = {:.4} ≥ {}).",
            "✗".red(),
            before.p_value,
            SIGNIFICANCE_LEVEL
        );
        if after.is_stationary() {
            println!(
                "  {} After differencing it is stationary (p = {:.4}).",
                "✓".green(),
                after.p_value
            );
        } else {
            println!(
                "  {} Still non-stationary after one difference; try differencing again.",
                "→".yellow()
            );
        }
    }

    if config.adf.regression != Regression::ConstantTrend && !before.is_stationary() {
        println!(
            "  {} A deterministic trend can also be tested with the constant + trend regression.",
            "→".yellow()
        );
    }

    println!("\n{}", "Done!".green().bold());
    Ok(())
}
