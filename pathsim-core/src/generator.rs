//! End-to-end generation: config → bars.
//!
//! Stages run in dependency order:
//! 1. resolve the interval code
//! 2. validate fields and compute `total_intervals`
//! 3. lay out timestamps (no randomness)
//! 4. simulate the closing-price path
//! 5. synthesize OHLCV bars from the path
//!
//! Stages 4 and 5 share one random source owned by the call.

use rand::Rng;
use tracing::debug;

use crate::domain::{Bar, SimulationConfig};
use crate::error::SimulationError;
use crate::interval::resolve_interval;
use crate::path::simulate_path;
use crate::rng::simulation_rng;
use crate::synth::synthesize_bars;
use crate::timestamps::TimestampSequence;

/// Generate the full bar sequence for `config`.
///
/// With `random_seed` set the output is byte-identical across calls. Without
/// it, the call draws a private entropy-seeded source; concurrent calls never
/// share generator state.
pub fn generate(config: &SimulationConfig) -> Result<Vec<Bar>, SimulationError> {
    let mut rng = simulation_rng(config.random_seed);
    generate_with_rng(config, &mut rng)
}

/// Same as [`generate`] but draws from a caller-owned source, ignoring
/// `config.random_seed`.
pub fn generate_with_rng<R: Rng + ?Sized>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<Vec<Bar>, SimulationError> {
    let frequency = resolve_interval(&config.interval)?;
    config.validate()?;

    let total = frequency.total_intervals(config.days);
    let total_intervals = usize::try_from(total)
        .map_err(|_| SimulationError::config(format!("{total} bars exceed addressable memory")))?;
    debug!(
        interval = %config.interval,
        bars_per_day = frequency.bars_per_day.as_f64(),
        total_intervals,
        "resolved interval"
    );

    let timestamps = TimestampSequence::new(config.start_date, &frequency, total)?;
    let path = simulate_path(config, total_intervals, rng)?;
    synthesize_bars(config, &path, &timestamps, rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bogus_interval_fails_before_anything_else() {
        let cfg = SimulationConfig {
            days: 5,
            interval: "bogus".into(),
            ..Default::default()
        };
        assert_eq!(
            generate(&cfg).unwrap_err(),
            SimulationError::InvalidInterval {
                code: "bogus".into()
            }
        );
    }

    #[test]
    fn too_few_days_for_interval_is_invalid() {
        let cfg = SimulationConfig {
            days: 6,
            interval: "1wk".into(),
            ..Default::default()
        };
        assert!(matches!(
            generate(&cfg),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn caller_rng_overrides_config_seed() {
        use rand::SeedableRng;

        let cfg = SimulationConfig {
            days: 20,
            ..Default::default()
        }
        .with_seed(1);
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let explicit = generate_with_rng(&cfg, &mut rng).unwrap();
        assert_eq!(explicit, generate(&cfg).unwrap());

        let mut other = rand::rngs::StdRng::seed_from_u64(2);
        assert_ne!(generate_with_rng(&cfg, &mut other).unwrap(), explicit);
    }

    #[test]
    fn daily_bars_span_consecutive_days() {
        let cfg = SimulationConfig {
            days: 3,
            ..Default::default()
        }
        .with_seed(9);
        let bars = generate(&cfg).unwrap();
        let stamps: Vec<String> = bars
            .iter()
            .map(|b| crate::timestamps::format_timestamp(&b.timestamp))
            .collect();
        assert_eq!(
            stamps,
            vec![
                "2023-01-01T00:00:00Z",
                "2023-01-02T00:00:00Z",
                "2023-01-03T00:00:00Z"
            ]
        );
        assert!(bars.iter().all(|b| b.symbol == "TIC" && b.company_name == "Test Inc"));
    }
}
