use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use tradesim::report::{self, ReportTable};
use tradesim::settings::{self, Overrides};
use tradesim::worker::{QuarterLogger, run_with_progress};
use tradesim::{ChartFile, init_logging, loader};
use tradesim_core::config::{PresentationMode, SharpeVariant};
use tradesim_core::model::MonteCarloProgress;

#[derive(Parser, Debug)]
#[command(name = "tradesim")]
#[command(about = "Bootstrap Monte Carlo of trading returns against the actual history")]
struct Args {
    /// CSV/TSV file whose second column holds per-period returns
    file: PathBuf,

    /// Number of bootstrap trials (default 1000)
    #[arg(short = 'n', long)]
    trials: Option<usize>,

    /// Initial capital, same unit as the returns (default 4000)
    #[arg(short, long)]
    capital: Option<f64>,

    /// Report layout: classic or extended (default extended)
    #[arg(short, long, value_parser = settings::parse_mode)]
    mode: Option<PresentationMode>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Confidence level of the mean's interval (default 0.95)
    #[arg(long)]
    confidence: Option<f64>,

    /// Sharpe variant: non-zero-mean or annualized (default depends on mode)
    #[arg(long, value_parser = settings::parse_sharpe)]
    sharpe: Option<SharpeVariant>,

    /// YAML settings file (default: <config dir>/tradesim/config.yaml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write the table as tab-separated text
    #[arg(long)]
    tsv: Option<PathBuf>,

    /// Also write the full comparison as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write percentile bands and sample paths as CSV, replacing the file
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Log to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level, args.log_file.as_deref())?;

    let overrides = Overrides {
        initial_capital: args.capital,
        trial_count: args.trials,
        confidence: args.confidence,
        mode: args.mode,
        sharpe: args.sharpe,
        seed: args.seed,
        retain_paths: args.chart.is_some(),
    };
    let config = overrides.apply(settings::load_config(args.config.as_deref())?);
    config.validate().wrap_err("Invalid simulation settings")?;

    let series = loader::load_returns(&args.file)
        .wrap_err_with(|| format!("Failed to load returns from {}", args.file.display()))?;
    let stats = series.statistics();
    tracing::info!(
        periods = stats.periods,
        mean = stats.mean,
        std_dev = stats.std_dev,
        positive = stats.positive,
        negative = stats.negative,
        "historical returns"
    );

    let progress = MonteCarloProgress::new();
    let mut logger = QuarterLogger::default();
    let comparison = run_with_progress(&series, &config, &progress, |completed, total| {
        logger.observe(completed, total)
    })
    .wrap_err("Simulation failed")?;

    let table = ReportTable::from_comparison(&comparison, config.mode);
    println!("{}", report::run_summary(&comparison, &config));
    println!();
    print!("{}", table.render_text());

    if let Some(path) = &args.tsv {
        report::write_tsv(&table, path)?;
        tracing::info!(path = %path.display(), "TSV written");
    }
    if let Some(path) = &args.json {
        report::write_json(&comparison, path)?;
        tracing::info!(path = %path.display(), "JSON written");
    }
    if let (Some(path), Some(paths)) = (&args.chart, &comparison.paths) {
        ChartFile::new(path).write(paths)?;
    }

    Ok(())
}
