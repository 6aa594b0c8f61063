//! Transit-subsystem error type.

use thiserror::Error;

/// Errors produced by `pax-transit`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitError {
    /// A travel-time table is ragged or disagrees with its partner table.
    #[error("{table}: row {row} has {found} columns, expected {expected}")]
    MatrixShape {
        table:    &'static str,
        row:      usize,
        expected: usize,
        found:    usize,
    },

    /// The checkpoint→hold table needs one row per checkpoint.
    #[error("{table}: {found} rows, expected {expected}")]
    RowCount {
        table:    &'static str,
        expected: usize,
        found:    usize,
    },
}

pub type TransitResult<T> = Result<T, TransitError>;
