//! OHLCV bar synthesis from a closing-price path.
//!
//! Per bar, in draw order:
//! - `open  = close × (1 + u1)`, `u1 ~ U[-0.005, 0.005)`
//! - `high  = open  × (1 + u2)`, `u2 ~ U[0.001, 0.01)`
//! - `low   = open  × (1 - u3)`, `u3 ~ U[0.001, 0.01)`
//! - `volume = round(Normal(volume_mean, 0.1 × volume_mean))`
//!
//! No post-generation clamp is applied. `low < open < high` always holds, but
//! the close is not forced inside `[low, high]`, and volume is not floored at 0.

use rand::distributions::Uniform;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::domain::{Bar, SimulationConfig};
use crate::error::SimulationError;
use crate::path::PricePath;
use crate::timestamps::TimestampSequence;

const OPEN_JITTER: (f64, f64) = (-0.005, 0.005);
const WICK_RANGE: (f64, f64) = (0.001, 0.01);
const VOLUME_CV: f64 = 0.1;

/// Round to 2 decimal places for display fields.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Turn each closing price into a full bar, drawing from `rng`.
pub fn synthesize_bars<R: Rng + ?Sized>(
    config: &SimulationConfig,
    path: &PricePath,
    timestamps: &TimestampSequence,
    rng: &mut R,
) -> Result<Vec<Bar>, SimulationError> {
    if path.len() as u64 != timestamps.len() {
        return Err(SimulationError::config(format!(
            "price path has {} bars but timestamp sequence has {}",
            path.len(),
            timestamps.len()
        )));
    }

    let open_jitter = Uniform::new(OPEN_JITTER.0, OPEN_JITTER.1);
    let wick = Uniform::new(WICK_RANGE.0, WICK_RANGE.1);
    let volume = Normal::new(config.volume_mean, config.volume_mean * VOLUME_CV)
        .map_err(|e| SimulationError::config(format!("volume distribution: {e}")))?;

    let prices = path.prices();
    let mut bars = Vec::with_capacity(prices.len());

    for (i, (&close, timestamp)) in prices.iter().zip(timestamps.iter()).enumerate() {
        let previous_close = if i > 0 {
            prices[i - 1]
        } else {
            config.start_price
        };
        if previous_close == 0.0 {
            return Err(SimulationError::config(format!(
                "previous close is zero at bar {i}; change percent is undefined"
            )));
        }

        let open = close * (1.0 + open_jitter.sample(rng));
        let high = open * (1.0 + wick.sample(rng));
        let low = open * (1.0 - wick.sample(rng));
        let change = close - previous_close;
        let change_percent = change / previous_close * 100.0;
        let volume = volume.sample(rng).round() as i64;

        bars.push(Bar {
            symbol: config.symbol.clone(),
            company_name: config.company_name.clone(),
            current_price: round2(close),
            change: round2(change),
            change_percent: round2(change_percent),
            open: round2(open),
            high: round2(high),
            low: round2(low),
            previous_close: round2(previous_close),
            volume,
            timestamp,
        });
    }

    Ok(bars)
}
