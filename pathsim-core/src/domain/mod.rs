//! Domain types: simulation input and generated bars.

pub mod bar;
pub mod config;

pub use bar::Bar;
pub use config::SimulationConfig;
