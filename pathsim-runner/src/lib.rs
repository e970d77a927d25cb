//! PathSim Runner — everything around a single `generate` call.
//!
//! This crate builds on `pathsim-core` to provide:
//! - TOML scenario files with turning-point tables
//! - HTTP query-parameter mapping with the endpoint defaults
//! - The `{stock, interval, fingerprint, data, news}` response envelope
//! - Chart-renderer and narrative-source collaborator interfaces
//! - JSON and CSV export
//! - Parallel scenario batches with hierarchical seeding

pub mod batch;
pub mod collaborators;
pub mod config;
pub mod export;
pub mod query;
pub mod runner;

pub use batch::{generate_scenarios, ScenarioRun, ScenarioSummary};
pub use collaborators::{
    candles, parse_news_envelope, Candle, ChartImage, ChartRenderer, CollaboratorError,
    NarrativeSource, NewsItem,
};
pub use config::{load_config, ConfigError, ScenarioFile};
pub use export::{export_bars_csv, export_json, import_json, write_output};
pub use query::SimulationQuery;
pub use runner::{run_query, run_simulation, Collaborators, RunError, SimulationResponse};
