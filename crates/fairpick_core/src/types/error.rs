//! Error types for structured error handling.
//!
//! This module provides:
//! - `ParamsError`: Invalid draw configuration (k, l, n)
//! - `PoolError`: Pools whose entries do not fit the roster

use thiserror::Error;

/// Invalid draw configuration, rejected before any search runs.
///
/// # Examples
/// ```
/// use fairpick_core::types::ParamsError;
///
/// let err = ParamsError::NonPositive { name: "sessions" };
/// assert_eq!(format!("{}", err), "Invalid parameter 'sessions': must be a positive integer");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    /// A count was zero.
    #[error("Invalid parameter '{name}': must be a positive integer")]
    NonPositive {
        /// Parameter name.
        name: &'static str,
    },

    /// `k * l` exceeds the supported number of draws.
    #[error("Total draws {sessions} x {picks_per_session} exceeds the maximum of {max}")]
    TooManyDraws {
        /// Number of sessions (k).
        sessions: usize,
        /// Picks per session (l).
        picks_per_session: usize,
        /// Supported maximum of `k * l`.
        max: usize,
    },
}

/// A pool that cannot be interpreted against a roster.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The pool was built for an empty roster.
    #[error("Pool requires a non-empty roster")]
    EmptyRoster,

    /// An entry is not a valid roster index.
    #[error("Pool entry {index} at position {position} is outside a roster of {class_size}")]
    IndexOutOfRange {
        /// Position of the entry in the pool.
        position: usize,
        /// The offending index.
        index: usize,
        /// Roster size the pool was checked against.
        class_size: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParamsError::TooManyDraws {
            sessions: 2_000,
            picks_per_session: 1_000,
            max: 1_000_000,
        };
        assert!(err.to_string().contains("2000 x 1000"));

        let err = PoolError::IndexOutOfRange {
            position: 3,
            index: 9,
            class_size: 5,
        };
        assert!(err.to_string().contains("entry 9 at position 3"));
    }
}
