//! Error types shared across the simulation library.
//!
//! Three failure classes exist: bad setup input, numerical breakdown during
//! an evaluation, and registry lookups for ids that were never registered.
//! Any error aborts the current run; there are no retries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// Invalid setup input: step size, capacity, duplicate ids, bad body specs.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The numerics broke down at simulation time `t`.
    #[error("numerical error at t = {t} s: {reason}")]
    Numerical { t: f64, reason: String },

    /// A body id that is not in the registry.
    #[error("body not found: {0}")]
    NotFound(String),

    /// Scenario file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario file could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type SimResult<T> = Result<T, SimError>;
