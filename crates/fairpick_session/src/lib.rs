//! # fairpick_session
//!
//! Draw session state machine and CSV snapshots for Fairpick.
//!
//! This crate consumes an optimised pool one pick at a time:
//!
//! - `machine`: `MachineState` (`Empty` / `Ready`) with quota-weighted picks
//!   that respect absentees
//! - `snapshot`: CSV export of the draw history with echoed settings, and
//!   restore by re-running the deterministic search
//!
//! ## Architecture Position
//!
//! Layer 3. Depends on `fairpick_core` (L1) and `fairpick_optimiser` (L2).
//!
//! ## Example
//!
//! ```rust
//! use fairpick_core::types::{AbsenteeSet, DrawParams, Roster};
//! use fairpick_optimiser::{OptimiserCache, StrategyKind};
//! use fairpick_session::{MachineState, PickOutcome};
//!
//! let mut cache = OptimiserCache::new();
//! let mut state = MachineState::new();
//! let params = DrawParams::new(2, 2, 3).unwrap();
//! let roster = Roster::from_lines("Aoi\nRen\nMio", 3);
//!
//! let result = state
//!     .prepare_with(&mut cache, &StrategyKind::shuffle(), params, roster)
//!     .unwrap();
//! println!("{} (variance {})", result.candidate, result.variance);
//!
//! let mut rng = rand::thread_rng();
//! match state.pick(&AbsenteeSet::none(), &mut rng).unwrap() {
//!     PickOutcome::Picked { name, .. } => println!("{name}"),
//!     PickOutcome::NoCandidate => unreachable!(),
//! }
//! assert_eq!(state.remaining_count(&AbsenteeSet::none()).unwrap(), 3);
//! ```

#![warn(missing_docs)]

pub mod machine;
pub mod snapshot;

mod error;

pub use error::{SessionError, SnapshotError};
pub use machine::{DrawSession, MachineState, PickOutcome};
pub use snapshot::{history_file_name, Snapshot, SnapshotEntry, SnapshotSettings};
