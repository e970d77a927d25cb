//! PathSim CLI — generate synthetic market paths from flags or scenario files.
//!
//! Commands:
//! - `generate` — one path, written as JSON (response envelope) or CSV
//! - `batch` — many independently seeded paths, written as JSON summaries
//! - `intervals` — list supported interval codes and their sampling rates

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pathsim_core::{Interval, SimulationConfig};
use pathsim_runner::{
    export_bars_csv, export_json, generate_scenarios, load_config, run_simulation, write_output,
    Collaborators, ScenarioSummary,
};

#[derive(Parser)]
#[command(
    name = "pathsim",
    about = "PathSim CLI — reproducible synthetic OHLCV market paths"
)]
struct Cli {
    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one synthetic path.
    Generate {
        #[command(flatten)]
        sim: SimArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Generate many paths in parallel, each with its own derived seed.
    Batch {
        #[command(flatten)]
        sim: SimArgs,

        /// Number of scenarios.
        #[arg(long, default_value_t = 10)]
        count: u64,

        /// Master seed the per-scenario seeds are derived from.
        #[arg(long, default_value_t = 42)]
        master_seed: u64,

        /// Write summaries to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List supported interval codes.
    Intervals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

/// Simulation parameters. Flags override values loaded from `--config`.
#[derive(Args, Debug, Clone, Default)]
struct SimArgs {
    /// TOML scenario file.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    symbol: Option<String>,

    #[arg(long)]
    company_name: Option<String>,

    #[arg(long)]
    start_price: Option<f64>,

    /// Target closing price of the last bar (overrides --drift).
    #[arg(long)]
    end_price: Option<f64>,

    #[arg(long)]
    days: Option<u32>,

    /// Per-step standard deviation of return.
    #[arg(long)]
    volatility: Option<f64>,

    /// Per-step mean return.
    #[arg(long, allow_negative_numbers = true)]
    drift: Option<f64>,

    #[arg(long)]
    volume_mean: Option<f64>,

    /// Interval code: 1m, 2m, 5m, 15m, 30m, 1h, 1d, 1wk, 1mo.
    #[arg(long)]
    interval: Option<String>,

    #[arg(long)]
    seed: Option<u64>,

    /// First bar date (YYYY-MM-DD).
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Override the close of one bar, as INDEX=PRICE. Repeatable.
    #[arg(long = "turning-point", value_parser = parse_turning_point)]
    turning_points: Vec<(usize, f64)>,
}

impl SimArgs {
    fn into_config(self) -> Result<SimulationConfig> {
        let mut cfg = match &self.config {
            Some(path) => load_config(path)?,
            None => SimulationConfig::default(),
        };
        if let Some(v) = self.symbol {
            cfg.symbol = v;
        }
        if let Some(v) = self.company_name {
            cfg.company_name = v;
        }
        if let Some(v) = self.start_price {
            cfg.start_price = v;
        }
        if self.end_price.is_some() {
            cfg.end_price = self.end_price;
        }
        if let Some(v) = self.days {
            cfg.days = v;
        }
        if let Some(v) = self.volatility {
            cfg.volatility = v;
        }
        if let Some(v) = self.drift {
            cfg.drift = v;
        }
        if let Some(v) = self.volume_mean {
            cfg.volume_mean = v;
        }
        if let Some(v) = self.interval {
            cfg.interval = v;
        }
        if self.seed.is_some() {
            cfg.random_seed = self.seed;
        }
        if let Some(v) = self.start_date {
            cfg.start_date = v;
        }
        cfg.turning_points.extend(self.turning_points);
        Ok(cfg)
    }
}

fn parse_turning_point(raw: &str) -> Result<(usize, f64), String> {
    let (index, price) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=PRICE, got '{raw}'"))?;
    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("bad index '{index}': {e}"))?;
    let price = price
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad price '{price}': {e}"))?;
    Ok((index, price))
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to init logging: {e}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Generate {
            sim,
            format,
            output,
        } => run_generate(sim, format, output.as_deref()),
        Commands::Batch {
            sim,
            count,
            master_seed,
            output,
        } => run_batch(sim, count, master_seed, output.as_deref()),
        Commands::Intervals => {
            print_intervals();
            Ok(())
        }
    }
}

fn run_generate(sim: SimArgs, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let config = sim.into_config()?;
    let response = run_simulation(&config, Collaborators::none())
        .with_context(|| format!("failed to generate path for {}", config.symbol))?;

    let rendered = match format {
        OutputFormat::Json => export_json(&response)?,
        OutputFormat::Csv => export_bars_csv(&response.data)?,
    };
    emit(output, &rendered)
}

fn run_batch(sim: SimArgs, count: u64, master_seed: u64, output: Option<&Path>) -> Result<()> {
    let config = sim.into_config()?;
    let runs = generate_scenarios(&config, master_seed, count)
        .with_context(|| format!("batch of {count} scenarios failed"))?;

    let summaries: Vec<&ScenarioSummary> = runs.iter().map(|r| &r.summary).collect();
    let rendered =
        serde_json::to_string_pretty(&summaries).context("failed to serialize batch summaries")?;
    emit(output, &rendered)
}

fn emit(output: Option<&Path>, contents: &str) -> Result<()> {
    match output {
        Some(path) => {
            write_output(path, contents)?;
            info!(path = %path.display(), bytes = contents.len(), "wrote output");
        }
        None => println!("{contents}"),
    }
    Ok(())
}

fn print_intervals() {
    println!("{:<6} {:>12}  {:<12}", "Code", "Bars/day", "Step");
    println!("{}", "-".repeat(32));
    for interval in Interval::ALL {
        let freq = interval.resolve();
        println!(
            "{:<6} {:>12.4}  {:<12}",
            interval.code(),
            freq.bars_per_day.as_f64(),
            format!("{:?}", freq.step)
        );
    }
}
