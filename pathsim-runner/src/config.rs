//! TOML scenario files.
//!
//! ```toml
//! [simulation]
//! symbol = "TIC"
//! start_price = 100.0
//! end_price = 150.0
//! days = 365
//! interval = "1d"
//! random_seed = 7
//! start_date = "2023-01-01"
//!
//! [turning_points]
//! 90 = 120.0
//! 200 = 95.0
//! ```
//!
//! Every `[simulation]` key is optional and falls back to
//! `SimulationConfig::default()`. TOML keys are strings, so turning-point
//! indices are parsed here rather than by serde.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pathsim_core::SimulationConfig;

/// Errors from loading scenario files or query parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("turning point key '{0}' is not a bar index")]
    InvalidTurningPoint(String),

    #[error("invalid start_date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// On-disk scenario: a `[simulation]` table plus optional `[turning_points]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    #[serde(default)]
    pub simulation: SimulationSection,
    #[serde(default)]
    pub turning_points: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSection {
    pub symbol: Option<String>,
    pub company_name: Option<String>,
    pub start_price: Option<f64>,
    pub end_price: Option<f64>,
    pub days: Option<u32>,
    pub volatility: Option<f64>,
    pub drift: Option<f64>,
    pub volume_mean: Option<f64>,
    pub interval: Option<String>,
    pub random_seed: Option<u64>,
    pub start_date: Option<String>,
}

impl ScenarioFile {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Merge over the defaults. Value checks happen later, in `generate`.
    pub fn into_config(self) -> Result<SimulationConfig, ConfigError> {
        let defaults = SimulationConfig::default();
        let s = self.simulation;

        let start_date = match s.start_date {
            Some(raw) => parse_date(&raw)?,
            None => defaults.start_date,
        };

        let mut turning_points = BTreeMap::new();
        for (key, price) in self.turning_points {
            let index = key
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidTurningPoint(key.clone()))?;
            turning_points.insert(index, price);
        }

        Ok(SimulationConfig {
            symbol: s.symbol.unwrap_or(defaults.symbol),
            company_name: s.company_name.unwrap_or(defaults.company_name),
            start_price: s.start_price.unwrap_or(defaults.start_price),
            end_price: s.end_price.or(defaults.end_price),
            days: s.days.unwrap_or(defaults.days),
            volatility: s.volatility.unwrap_or(defaults.volatility),
            drift: s.drift.unwrap_or(defaults.drift),
            volume_mean: s.volume_mean.unwrap_or(defaults.volume_mean),
            interval: s.interval.unwrap_or(defaults.interval),
            random_seed: s.random_seed.or(defaults.random_seed),
            turning_points,
            start_date,
        })
    }
}

/// Load a scenario file straight into a `SimulationConfig`.
pub fn load_config(path: &Path) -> Result<SimulationConfig, ConfigError> {
    ScenarioFile::from_file(path)?.into_config()
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ConfigError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
[simulation]
symbol = "ACME"
company_name = "Acme Rockets"
start_price = 50.0
end_price = 75.0
days = 120
volatility = 0.02
drift = 0.001
volume_mean = 250000.0
interval = "1h"
random_seed = 7
start_date = "2024-02-29"

[turning_points]
10 = 60.0
"200" = 40.0
"#;

    #[test]
    fn parses_full_scenario() {
        let cfg = ScenarioFile::from_toml(FULL).unwrap().into_config().unwrap();
        assert_eq!(cfg.symbol, "ACME");
        assert_eq!(cfg.company_name, "Acme Rockets");
        assert_eq!(cfg.start_price, 50.0);
        assert_eq!(cfg.end_price, Some(75.0));
        assert_eq!(cfg.days, 120);
        assert_eq!(cfg.interval, "1h");
        assert_eq!(cfg.random_seed, Some(7));
        assert_eq!(cfg.start_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(cfg.turning_points.get(&10), Some(&60.0));
        assert_eq!(cfg.turning_points.get(&200), Some(&40.0));
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = ScenarioFile::from_toml("").unwrap().into_config().unwrap();
        assert_eq!(cfg, SimulationConfig::default());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg = ScenarioFile::from_toml("[simulation]\ndays = 30\n")
            .unwrap()
            .into_config()
            .unwrap();
        assert_eq!(cfg.days, 30);
        assert_eq!(cfg.symbol, "TIC");
        assert_eq!(cfg.volume_mean, 10_000_000.0);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = ScenarioFile::from_toml("[simulation]\nvolatilty = 0.1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_non_numeric_turning_point() {
        let err = ScenarioFile::from_toml("[turning_points]\nmidway = 10.0\n")
            .unwrap()
            .into_config()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTurningPoint(ref k) if k == "midway"));
    }

    #[test]
    fn rejects_bad_date() {
        let err = ScenarioFile::from_toml("[simulation]\nstart_date = \"01/02/2023\"\n")
            .unwrap()
            .into_config()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDate(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/scenario.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/scenario.toml"));
    }
}
