//! Error taxonomy for path generation.

use thiserror::Error;

use crate::interval::Interval;

/// Errors raised synchronously by [`crate::generate`].
///
/// Generation is pure and deterministic, so none of these are retryable
/// without changing the inputs. Callers translate them into user-facing
/// failures; the core never logs or swallows them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid interval '{code}' (choose from {})", Interval::codes().join(", "))]
    InvalidInterval { code: String },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl SimulationError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
