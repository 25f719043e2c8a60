//! Error types for draw sessions and snapshots.

use fairpick_core::types::{ParamsError, PoolError};
use fairpick_optimiser::OptimiserError;
use thiserror::Error;

/// Errors raised by the draw state machine.
///
/// None of these leave the machine in a partially updated state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    /// `pick` or `remaining_count` was called before `prepare`.
    #[error("No pool prepared: call prepare first")]
    NotPrepared,

    /// The roster does not have one name per pool index.
    #[error("Roster has {actual} names but the pool was built for {expected}: prepare again")]
    RosterMismatch {
        /// Roster size the pool was built for.
        expected: usize,
        /// Size of the offered roster.
        actual: usize,
    },

    /// The pool holds an index outside the roster.
    #[error("Pool rejected: {0}")]
    PoolOutOfRange(#[from] PoolError),

    /// Draw parameters rejected.
    #[error(transparent)]
    Params(#[from] ParamsError),

    /// The seed search failed.
    #[error("Optimisation failed: {0}")]
    Optimiser(#[from] OptimiserError),
}

/// Errors raised while writing, reading or restoring a snapshot.
///
/// A failed restore leaves the machine in its prior state.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// A required column is absent from the header.
    #[error("Snapshot is missing the '{column}' column")]
    MissingColumn {
        /// Column name.
        column: &'static str,
    },

    /// A `number` cell is not a positive integer.
    #[error("Row {row}: invalid number '{value}'")]
    InvalidNumber {
        /// 1-based data row.
        row: usize,
        /// Cell text.
        value: String,
    },

    /// An echoed setting cell could not be parsed.
    #[error("Row {row}: invalid value '{value}' in column '{column}'")]
    InvalidSetting {
        /// 1-based data row.
        row: usize,
        /// Column name.
        column: &'static str,
        /// Cell text.
        value: String,
    },

    /// `k`, `l` or `n` is neither in the snapshot nor supplied by the caller.
    #[error("Snapshot does not record '{name}' and no fallback was given")]
    MissingParameter {
        /// Parameter column.
        name: &'static str,
    },

    /// A history entry points past the roster.
    #[error("Row {row}: number {number} is outside a roster of {class_size}")]
    NumberOutOfRange {
        /// 1-based data row.
        row: usize,
        /// 1-based roster number.
        number: usize,
        /// Roster size.
        class_size: usize,
    },

    /// The history draws a name more often than the regenerated pool allows.
    #[error("History draws '{name}' {used} times but the pool only holds {available}")]
    HistoryExceedsPool {
        /// Roster name.
        name: String,
        /// Draws recorded in the history.
        used: usize,
        /// Occurrences in the pool.
        available: usize,
    },

    /// Draw parameters rejected.
    #[error(transparent)]
    Params(#[from] ParamsError),

    /// The restored session could not be prepared.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// CSV encoding or decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SnapshotError {
    /// Create an invalid-setting error
    pub fn invalid_setting(row: usize, column: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidSetting {
            row,
            column,
            value: value.into(),
        }
    }
}

impl From<OptimiserError> for SnapshotError {
    fn from(err: OptimiserError) -> Self {
        Self::Session(SessionError::Optimiser(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SessionError::RosterMismatch {
            expected: 40,
            actual: 39,
        };
        assert!(err.to_string().contains("39 names"));

        let err = SnapshotError::invalid_setting(3, "k", "three");
        assert_eq!(err.to_string(), "Row 3: invalid value 'three' in column 'k'");
    }

    #[test]
    fn test_optimiser_error_routes_through_session() {
        let err: SnapshotError = OptimiserError::EmptySearchSpace { strategy: "shuffle" }.into();
        assert!(matches!(
            err,
            SnapshotError::Session(SessionError::Optimiser(_))
        ));
    }
}
