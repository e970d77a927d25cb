//! Simulation runner — wires generation, collaborators, and the response envelope.
//!
//! Two entry points:
//! - `run_simulation()`: takes a ready `SimulationConfig`. Used by the CLI.
//! - `run_query()`: takes raw query parameters. Used by an HTTP host.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use pathsim_core::{generate, Bar, SimulationConfig, SimulationError};

use crate::collaborators::{
    candles, ChartRenderer, CollaboratorError, NarrativeSource, NewsItem,
};
use crate::config::ConfigError;
use crate::query::SimulationQuery;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("simulation error: {0}")]
    Simulation(#[from] SimulationError),
    #[error("collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),
}

/// Optional external collaborators. News is produced only when both are present.
#[derive(Clone, Copy, Default)]
pub struct Collaborators<'a> {
    pub renderer: Option<&'a dyn ChartRenderer>,
    pub narrator: Option<&'a dyn NarrativeSource>,
}

impl<'a> Collaborators<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(renderer: &'a dyn ChartRenderer, narrator: &'a dyn NarrativeSource) -> Self {
        Self {
            renderer: Some(renderer),
            narrator: Some(narrator),
        }
    }
}

/// JSON body returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResponse {
    pub stock: String,
    pub interval: String,
    /// Content hash of the input config; equal fingerprints with a seed
    /// mean equal `data`.
    pub fingerprint: String,
    pub data: Vec<Bar>,
    #[serde(default)]
    pub news: Vec<NewsItem>,
}

/// Generate bars for `config` and, if collaborators are wired, attach news.
pub fn run_simulation(
    config: &SimulationConfig,
    collaborators: Collaborators<'_>,
) -> Result<SimulationResponse, RunError> {
    let data = generate(config)?;
    info!(
        symbol = %config.symbol,
        interval = %config.interval,
        bars = data.len(),
        seeded = config.random_seed.is_some(),
        "generated synthetic path"
    );

    let news = match (collaborators.renderer, collaborators.narrator) {
        (Some(renderer), Some(narrator)) => {
            let chart = renderer.render(&config.symbol, &candles(&data))?;
            debug!(
                renderer = renderer.name(),
                bytes = chart.bytes.len(),
                "rendered chart"
            );
            let news = narrator.narrate(&chart)?;
            debug!(narrator = narrator.name(), items = news.len(), "narrated chart");
            news
        }
        _ => Vec::new(),
    };

    Ok(SimulationResponse {
        stock: config.symbol.clone(),
        interval: config.interval.clone(),
        fingerprint: config.fingerprint(),
        data,
        news,
    })
}

/// Map query parameters onto a config, then run it.
pub fn run_query(
    query: SimulationQuery,
    collaborators: Collaborators<'_>,
) -> Result<SimulationResponse, RunError> {
    let config = query.into_config()?;
    run_simulation(&config, collaborators)
}
