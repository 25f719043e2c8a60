//! # fairpick_core: Foundation Layer for Fair Random Selection
//!
//! ## Layer 1 (Foundation) Role
//!
//! fairpick_core is the bottom layer of the workspace, providing:
//! - Seeded sequence generators for every supported family (`rng`)
//! - Draw-count fairness evaluation (`fairness`)
//! - Draw parameters, rosters, absentee sets, pools and used history (`types`)
//! - Error types: `ParamsError`, `PoolError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other fairpick_* crates, with minimal external dependencies:
//! - rand: Uniform range sampling and permutation shuffling
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use fairpick_core::fairness::evaluate;
//! use fairpick_core::rng::{GeneratorFamily, GeneratorSeed};
//!
//! let candidate = GeneratorSeed::new(GeneratorFamily::Lcg, 100);
//! let raw = candidate.generate(12, 4);
//! assert_eq!(raw.len(), 12);
//!
//! let evaluation = evaluate(&raw, 4);
//! assert!(evaluation.variance >= 0.0);
//! assert_eq!(evaluation.counts.iter().sum::<usize>(), 12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `GeneratorSeed`, `DrawParams` and `Pool`

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod fairness;
pub mod rng;
pub mod types;

pub use fairness::{evaluate, DrawBand, Evaluation};
pub use rng::{GeneratorFamily, GeneratorSeed};
pub use types::{AbsenteeSet, DrawParams, ParamsError, Pool, PoolError, Roster, UsedHistory};
