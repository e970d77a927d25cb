//! Query-parameter mapping for the HTTP boundary.
//!
//! Parameters map 1:1 onto `SimulationConfig` fields, with `stock` standing in
//! for `symbol`. A parameter-only transport cannot carry `turning_points`, so
//! they are always empty on this path.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pathsim_core::SimulationConfig;

use crate::config::{parse_date, ConfigError};

/// Raw query parameters with the endpoint's defaults filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationQuery {
    pub stock: String,
    pub company_name: String,
    pub start_price: f64,
    pub end_price: Option<f64>,
    pub days: u32,
    pub volatility: f64,
    pub drift: f64,
    pub volume_mean: u64,
    pub interval: String,
    pub random_seed: Option<u64>,
    pub start_date: String,
}

impl Default for SimulationQuery {
    fn default() -> Self {
        Self {
            stock: "TIC".into(),
            company_name: "Test Inc".into(),
            start_price: 100.0,
            end_price: None,
            days: 365,
            volatility: 0.01,
            drift: 0.0005,
            volume_mean: 10_000_000,
            interval: "1d".into(),
            random_seed: None,
            start_date: "2023-01-01".into(),
        }
    }
}

impl SimulationQuery {
    pub fn into_config(self) -> Result<SimulationConfig, ConfigError> {
        Ok(SimulationConfig {
            symbol: self.stock,
            company_name: self.company_name,
            start_price: self.start_price,
            end_price: self.end_price,
            days: self.days,
            volatility: self.volatility,
            drift: self.drift,
            volume_mean: self.volume_mean as f64,
            interval: self.interval,
            random_seed: self.random_seed,
            turning_points: BTreeMap::new(),
            start_date: parse_date(&self.start_date)?,
        })
    }
}
