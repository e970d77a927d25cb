//! Parallel scenario batches.
//!
//! A batch runs `count` independent paths from one base config. Scenario `i`
//! is seeded with `RngHierarchy::sub_seed(symbol, i)`, so each scenario owns
//! its random source and the batch is identical whatever the rayon pool size.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use pathsim_core::rng::RngHierarchy;
use pathsim_core::{generate, Bar, SimulationConfig, SimulationError};

/// Headline numbers for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub iteration: u64,
    pub seed: u64,
    pub fingerprint: String,
    pub bar_count: usize,
    pub first_close: f64,
    pub last_close: f64,
    pub min_close: f64,
    pub max_close: f64,
    pub total_return_pct: f64,
}

impl ScenarioSummary {
    fn from_bars(iteration: u64, config: &SimulationConfig, bars: &[Bar]) -> Self {
        let closes = bars.iter().map(|b| b.current_price);
        let first_close = bars.first().map_or(config.start_price, |b| b.current_price);
        let last_close = bars.last().map_or(config.start_price, |b| b.current_price);
        Self {
            iteration,
            seed: config.random_seed.unwrap_or_default(),
            fingerprint: config.fingerprint(),
            bar_count: bars.len(),
            first_close,
            last_close,
            min_close: closes.clone().fold(f64::INFINITY, f64::min),
            max_close: closes.fold(f64::NEG_INFINITY, f64::max),
            total_return_pct: (last_close / config.start_price - 1.0) * 100.0,
        }
    }
}

/// One generated scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRun {
    pub summary: ScenarioSummary,
    pub bars: Vec<Bar>,
}

/// Generate `count` scenarios in parallel. Any `random_seed` on `base` is
/// replaced by the derived per-scenario seed.
pub fn generate_scenarios(
    base: &SimulationConfig,
    master_seed: u64,
    count: u64,
) -> Result<Vec<ScenarioRun>, SimulationError> {
    let hierarchy = RngHierarchy::new(master_seed);
    info!(symbol = %base.symbol, master_seed, count, "generating scenario batch");

    let runs = (0..count)
        .into_par_iter()
        .map(|iteration| {
            let config = base
                .clone()
                .with_seed(hierarchy.sub_seed(&base.symbol, iteration));
            let bars = generate(&config)?;
            Ok(ScenarioRun {
                summary: ScenarioSummary::from_bars(iteration, &config, &bars),
                bars,
            })
        })
        .collect::<Result<Vec<_>, SimulationError>>()?;

    info!(scenarios = runs.len(), "scenario batch complete");
    Ok(runs)
}
