//! Optimiser error types.

use fairpick_core::types::{ParamsError, PoolError};
use thiserror::Error;

/// Errors raised while searching for the fairest pool.
///
/// # Examples
///
/// ```
/// use fairpick_optimiser::OptimiserError;
///
/// let err = OptimiserError::EmptySearchSpace { strategy: "stream" };
/// assert!(format!("{}", err).contains("stream"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptimiserError {
    /// The draw parameters were rejected at the boundary.
    #[error(transparent)]
    Params(#[from] ParamsError),

    /// The winning sequence could not be turned into a pool.
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// The strategy enumerates no candidates.
    #[error("Strategy '{strategy}' has an empty search space")]
    EmptySearchSpace {
        /// Strategy name.
        strategy: &'static str,
    },
}
