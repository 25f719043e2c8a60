//! # fairpick_optimiser
//!
//! Seed and generator search for Fairpick pools.
//!
//! This crate sits between the foundation layer (`fairpick_core`) and the
//! draw session layer (`fairpick_session`). It scans a fixed, deterministic
//! space of `(family, seed)` candidates and keeps the one whose draw counts
//! are most even across the roster.
//!
//! ## Architecture Position
//!
//! Layer 2. Depends on `fairpick_core` (L1) only.
//!
//! ## Modules
//!
//! - `strategy`: Candidate enumeration and pool generation (`StreamStrategy`, `ShuffleStrategy`)
//! - `search`: Exhaustive search with a stable tie-break, optionally on rayon
//! - `cache`: Explicit memoisation keyed on `(k, l, n, strategy)`
//!
//! ## Example
//!
//! ```rust
//! use fairpick_core::types::DrawParams;
//! use fairpick_optimiser::{OptimiserCache, StrategyKind};
//!
//! let mut cache = OptimiserCache::new();
//! let params = DrawParams::new(3, 2, 5).unwrap();
//! let result = cache.get_or_optimise(params, &StrategyKind::shuffle()).unwrap();
//!
//! assert_eq!(result.pool.len(), 6);
//! println!("{} -> variance {}", result.candidate, result.variance);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): Score candidates on the rayon thread pool
//! - `serde`: Serialisation for strategies

#![warn(missing_docs)]

pub mod cache;
pub mod search;
pub mod strategy;

mod error;

pub use cache::{CacheKey, CacheStats, OptimiserCache};
pub use error::OptimiserError;
pub use search::{optimise, optimise_with, OptimisationResult, Optimiser, SearchConfig};
pub use strategy::{PoolStrategy, SeedRange, ShuffleStrategy, StrategyKind, StreamStrategy};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cache::*;
    pub use crate::search::*;
    pub use crate::strategy::*;
    pub use crate::OptimiserError;
}
