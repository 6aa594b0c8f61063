//! Core error type.
//!
//! The simulation engine itself never fails (bad configuration is clamped),
//! so these errors only surface from parsing helpers used while assembling
//! flights and configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid clock time {0:?}: expected HH:MM")]
    InvalidClock(String),

    #[error("invalid flight: {0}")]
    InvalidFlight(String),
}

/// Shorthand result type for `pax-core`.
pub type CoreResult<T> = Result<T, CoreError>;
