//! Closing-price path simulation.
//!
//! Recurrence: `price[0] = start_price`, then
//! `price[i] = price[i-1] × (1 + r_i)` with `r_i ~ Normal(drift, volatility)`.
//!
//! When `end_price` is set, `drift` is replaced by the constant per-step
//! return that compounds `start_price` into `end_price` over the path's
//! `total_intervals - 1` steps. The calibration ignores noise, so the last
//! price hits `end_price` exactly only when `volatility == 0`.
//!
//! Turning points are a final overwrite pass over the finished path.
//! Overriding `price[k]` does not regenerate `price[k+1..]`; the next bar
//! keeps the value drawn from the un-overridden walk, so a turning point can
//! show up as a one-bar spike.

use std::collections::BTreeMap;

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::domain::SimulationConfig;
use crate::error::SimulationError;

/// Generated closing prices, one per bar.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePath {
    prices: Vec<f64>,
    drift: f64,
}

impl PricePath {
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// The per-step drift actually used (calibrated if `end_price` was set).
    pub fn drift(&self) -> f64 {
        self.drift
    }
}

/// Constant per-step return taking `start` to `end` in `steps` compounding steps.
///
/// Returns `None` when there is no step to calibrate (a single-bar path).
pub fn calibrated_drift(start: f64, end: f64, steps: usize) -> Option<f64> {
    if steps == 0 {
        return None;
    }
    Some((end / start).powf(1.0 / steps as f64) - 1.0)
}

/// Simulate `total_intervals` closing prices, drawing from `rng`.
///
/// Draw order is fixed: `total_intervals - 1` normal returns, nothing else.
pub fn simulate_path<R: Rng + ?Sized>(
    config: &SimulationConfig,
    total_intervals: usize,
    rng: &mut R,
) -> Result<PricePath, SimulationError> {
    if total_intervals < 1 {
        return Err(SimulationError::config(format!(
            "{} days at interval '{}' yields no bars",
            config.days, config.interval
        )));
    }
    check_turning_points(&config.turning_points, total_intervals)?;

    let steps = total_intervals - 1;
    let drift = config
        .end_price
        .and_then(|end| calibrated_drift(config.start_price, end, steps))
        .unwrap_or(config.drift);
    let returns = Normal::new(drift, config.volatility)
        .map_err(|e| SimulationError::config(format!("return distribution: {e}")))?;

    let mut prices = Vec::with_capacity(total_intervals);
    let mut price = config.start_price;
    prices.push(price);
    for _ in 0..steps {
        let r = returns.sample(rng);
        price *= 1.0 + r;
        prices.push(price);
    }

    apply_turning_points(&mut prices, &config.turning_points);

    debug!(
        symbol = %config.symbol,
        bars = total_intervals,
        drift,
        calibrated = config.end_price.is_some() && steps > 0,
        turning_points = config.turning_points.len(),
        "simulated price path"
    );

    Ok(PricePath { prices, drift })
}

fn check_turning_points(
    turning_points: &BTreeMap<usize, f64>,
    total_intervals: usize,
) -> Result<(), SimulationError> {
    match turning_points.keys().next_back() {
        Some(&index) if index >= total_intervals => Err(SimulationError::config(format!(
            "turning point index {index} out of range (path has {total_intervals} bars)"
        ))),
        _ => Ok(()),
    }
}

fn apply_turning_points(prices: &mut [f64], turning_points: &BTreeMap<usize, f64>) {
    for (&index, &price) in turning_points {
        if let Some(slot) = prices.get_mut(index) {
            *slot = price;
        }
    }
}
