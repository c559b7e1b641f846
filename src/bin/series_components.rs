//! Walkthrough: the components of a time series
//!
//! Builds a synthetic daily series from a linear trend, a seasonal sine,
//! an optional long cycle and Gaussian noise, then shows each part.
//!
//! Usage:
//! ```
//! cargo run --bin series_components -- --n 100 --seed 42 --cycle-amplitude 2
//! ```

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tabled::{Table, Tabled};
use time_series_basics::analysis::{
    decomposable_period, decompose, seasonality_strength, trend_strength, DecompositionModel,
    DescriptiveStats,
};
use time_series_basics::plot::{bar_chart, line_chart};
use time_series_basics::synthetic::SeriesGenerator;
use time_series_basics::Config;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(author, version, about = "Show the components of a synthetic time series")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of daily observations
    #[arg(short, long)]
    n: Option<usize>,

    /// Noise seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Amplitude of the long-period cycle
    #[arg(long)]
    cycle_amplitude: Option<f64>,

    /// Seasonal period used for decomposition (defaults to one seasonal cycle, capped at n/2)
    #[arg(short, long)]
    period: Option<usize>,

    /// Rows of the component table to print
    #[arg(long, default_value = "10")]
    rows: usize,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Trend")]
    trend: String,
    #[tabled(rename = "Seasonal")]
    seasonal: String,
    #[tabled(rename = "Cycle")]
    cycle: String,
    #[tabled(rename = "Noise")]
    noise: String,
    #[tabled(rename = "Value")]
    value: String,
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
    if let Some(amplitude) = args.cycle_amplitude {
        config.generator.cycle_amplitude = amplitude;
    }
    info!(?config, "Configuration loaded");

    println!("{}", "=".repeat(60).blue());
    println!("{}", "Time Series Components".bold().blue());
    println!("{}", "=".repeat(60).blue());
    println!(
        "\nA time series is a sequence of observations ordered in time.\n\
         Here each observation is one day, and its value is the sum of:\n"
    );
    println!("  {}  long-term direction of the series", "Trend".bold());
    println!("  {}  repeats with a fixed period", "Seasonality".bold());
    println!("  {}  slower swings without a fixed calendar period", "Cyclicality".bold());
    println!("  {}  random variation left over", "Noise".bold());

    let generator = SeriesGenerator::new(config.generator.clone())?;
    let parts = generator.generate()?;
    let series = &parts.series;
    let plot = &config.plot;

    println!(
        "\n{} {} daily points from {} to {} (seed {})",
        "Generated:".green(),
        series.len(),
        series.start().map(|d| d.to_string()).unwrap_or_default(),
        series.end().map(|d| d.to_string()).unwrap_or_default(),
        config.generator.seed
    );

    let rows: Vec<ComponentRow> = (0..series.len().min(args.rows))
        .map(|i| ComponentRow {
            date: series.dates[i].to_string(),
            trend: format!("{:.3}", parts.trend[i]),
            seasonal: format!("{:.3}", parts.seasonal[i]),
            cycle: format!("{:.3}", parts.cyclical[i]),
            noise: format!("{:.3}", parts.noise[i]),
            value: format!("{:.3}", series.data[i]),
        })
        .collect();
    println!("\n{}\n", Table::new(rows));

    println!("{}", "Trend".bold());
    println!("{}", line_chart(&parts.trend, plot.height, plot.width));
    println!("{}", "Seasonality".bold());
    println!("{}", line_chart(&parts.seasonal, plot.height, plot.width));
    if config.generator.cycle_amplitude != 0.0 {
        println!("{}", "Cyclicality".bold());
        println!("{}", line_chart(&parts.cyclical, plot.height, plot.width));
    }
    println!("{}", "Noise".bold());
    println!("{}", line_chart(&parts.noise, plot.height, plot.width));
    println!("{}", "Series = trend + seasonality + cycle + noise".bold());
    println!("{}", line_chart(&series.data, plot.height, plot.width));

    println!("{}", "Descriptive Statistics".bold());
    println!("{}", "-".repeat(40));
    println!("  series: {}", DescriptiveStats::new(&series.data));
    println!("  noise:  {}\n", DescriptiveStats::new(&parts.noise));

    let n = series.len();
    let seasonal_period = args
        .period
        .or_else(|| config.generator.seasonal_period())
        .unwrap_or(n / 2);

    println!("{}", "Classical Decomposition".bold());
    println!("{}", "-".repeat(40));
    match decomposable_period(seasonal_period, n) {
        Some(period) => {
            if period < seasonal_period {
                println!(
                    "  {} One seasonal cycle is {} points; {} points hold two cycles of {} at most.",
                    "→".yellow(),
                    seasonal_period,
                    n,
                    period
                );
            }
            let decomposition = decompose(&series.data, period, DecompositionModel::Additive)?;
            println!("  Period: {}", period);
            println!(
                "  Trend strength: {:.3}   Seasonality strength: {:.3}",
                trend_strength(&decomposition),
                seasonality_strength(&decomposition)
            );
            println!("\n{}", "Estimated trend".bold());
            println!("{}", line_chart(&decomposition.trend, plot.height, plot.width));
            let indices = &decomposition.seasonal[..period];
            println!("{}", bar_chart(indices, "Seasonal indices", plot.width / 4));
        }
        None => {
            println!(
                "  {} Decomposition needs at least 4 points, have {}.",
                "→".yellow(),
                n
            );
        }
    }

    println!("\n{}", "Done!".green().bold());
    Ok(())
}
