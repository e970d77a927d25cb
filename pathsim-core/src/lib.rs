//! PathSim Core — reproducible synthetic OHLCV market paths.
//!
//! Turns a handful of statistical parameters into a sequence of bars:
//! - Interval resolution (code → calendar step + bars-per-day)
//! - Timestamp sequencing (pure, no randomness)
//! - Closing-price random walk with end-price calibration and turning points
//! - OHLCV bar synthesis around each close
//! - A single `generate(config)` entry point tying them together
//!
//! Generation is synchronous and does no I/O. Each call owns its random
//! source, so concurrent calls cannot perturb each other.

pub mod domain;
pub mod error;
pub mod generator;
pub mod interval;
pub mod path;
pub mod rng;
pub mod synth;
pub mod timestamps;

pub use domain::{Bar, SimulationConfig};
pub use error::SimulationError;
pub use generator::{generate, generate_with_rng};
pub use interval::{resolve_interval, Interval, ResolvedFrequency, Step};
pub use path::PricePath;
pub use timestamps::{TimestampSequence, TIMESTAMP_FORMAT};
