//! Core draw types.
//!
//! - [`DrawParams`]: validated `(k, l, n)`
//! - [`Roster`], [`AbsenteeSet`]: names and per-pick exclusions
//! - [`Pool`], [`UsedHistory`]: draw outcomes and picks made against them

pub mod error;
mod params;
mod pool;
mod roster;

pub use error::{ParamsError, PoolError};
pub use params::{DrawParams, MAX_TOTAL_DRAWS};
pub use pool::{Pool, UsedHistory};
pub use roster::{AbsenteeSet, Roster};
