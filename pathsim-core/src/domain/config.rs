//! Simulation input.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Immutable input to [`crate::generate`].
///
/// `interval` stays a raw code here; it is resolved (and rejected with
/// `InvalidInterval` if unknown) inside `generate`. An empty
/// `turning_points` map means "no overrides".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub symbol: String,
    pub company_name: String,
    pub start_price: f64,
    #[serde(default)]
    pub end_price: Option<f64>,
    pub days: u32,
    /// Per-step standard deviation of return.
    pub volatility: f64,
    /// Per-step mean return. Replaced by a calibrated value when `end_price` is set.
    pub drift: f64,
    pub volume_mean: f64,
    pub interval: String,
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Bar index → override close price.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub turning_points: BTreeMap<usize, f64>,
    pub start_date: NaiveDate,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            symbol: "TIC".into(),
            company_name: "Test Inc".into(),
            start_price: 100.0,
            end_price: None,
            days: 365,
            volatility: 0.01,
            drift: 0.0005,
            volume_mean: 10_000_000.0,
            interval: "1d".into(),
            random_seed: None,
            turning_points: BTreeMap::new(),
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
        }
    }
}

impl SimulationConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_turning_point(mut self, index: usize, price: f64) -> Self {
        self.turning_points.insert(index, price);
        self
    }

    /// Field-level checks that do not depend on the resolved interval.
    ///
    /// Turning-point indices are range-checked later, once the bar count is known.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.days == 0 {
            return Err(SimulationError::config("days must be > 0"));
        }
        if !(self.start_price.is_finite() && self.start_price > 0.0) {
            return Err(SimulationError::config(format!(
                "start_price must be a positive number, got {}",
                self.start_price
            )));
        }
        if let Some(end) = self.end_price {
            if !(end.is_finite() && end > 0.0) {
                return Err(SimulationError::config(format!(
                    "end_price must be a positive number, got {end}"
                )));
            }
        }
        if !(self.volatility.is_finite() && self.volatility >= 0.0) {
            return Err(SimulationError::config(format!(
                "volatility must be >= 0, got {}",
                self.volatility
            )));
        }
        if !self.drift.is_finite() {
            return Err(SimulationError::config("drift must be finite"));
        }
        if !(self.volume_mean.is_finite() && self.volume_mean > 0.0) {
            return Err(SimulationError::config(format!(
                "volume_mean must be > 0, got {}",
                self.volume_mean
            )));
        }
        for (&index, &price) in &self.turning_points {
            if !(price.is_finite() && price > 0.0) {
                return Err(SimulationError::config(format!(
                    "turning point {index} has non-positive price {price}"
                )));
            }
        }
        Ok(())
    }

    /// BLAKE3 content hash over every input field, hex-encoded.
    ///
    /// Two configs with equal fingerprints (and a seed) produce identical bars.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hash_str(&mut hasher, &self.symbol);
        hash_str(&mut hasher, &self.company_name);
        hasher.update(&self.start_price.to_le_bytes());
        match self.end_price {
            Some(p) => {
                hasher.update(&[1]);
                hasher.update(&p.to_le_bytes());
            }
            None => {
                hasher.update(&[0]);
            }
        }
        hasher.update(&self.days.to_le_bytes());
        hasher.update(&self.volatility.to_le_bytes());
        hasher.update(&self.drift.to_le_bytes());
        hasher.update(&self.volume_mean.to_le_bytes());
        hash_str(&mut hasher, &self.interval);
        match self.random_seed {
            Some(s) => {
                hasher.update(&[1]);
                hasher.update(&s.to_le_bytes());
            }
            None => {
                hasher.update(&[0]);
            }
        }
        hasher.update(&(self.turning_points.len() as u64).to_le_bytes());
        for (&index, &price) in &self.turning_points {
            hasher.update(&(index as u64).to_le_bytes());
            hasher.update(&price.to_le_bytes());
        }
        hash_str(&mut hasher, &self.start_date.to_string());
        hasher.finalize().to_hex().to_string()
    }
}

// Length-prefixed so ("ab", "c") and ("a", "bc") hash differently.
fn hash_str(hasher: &mut blake3::Hasher, s: &str) {
    hasher.update(&(s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}
