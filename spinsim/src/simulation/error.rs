//! Error types for the spin lattice core
//!
//! Numerical edge cases (zero offset, parallel field) are handled in place
//! and never surface here. Only malformed configuration is an error.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Grid size outside `1..` or too large to index
    #[error("invalid grid size: {0} (must be a positive integer)")]
    InvalidGridSize(i64),

    /// Any other rejected configuration value
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type SimResult<T> = Result<T, SimError>;
