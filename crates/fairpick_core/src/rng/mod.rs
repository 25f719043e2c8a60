//! # Sequence Generator Library
//!
//! This module provides the pseudo-random sequence generators searched by the
//! optimiser. Every generator is a plain iterator constructed from a seed, so
//! the same seed always yields the same sequence.
//!
//! ## Families
//!
//! | Family | Output range | State |
//! |--------|--------------|-------|
//! | [`Xorshift32`] | `[1, 2^32)` | 32-bit xorshift (13, 17, 5) |
//! | [`MersenneTwister`] | `[0, 100000]` | MT19937 via `rand` range sampling |
//! | [`MiddleSquare`] | `[0, 10^d)` | von Neumann middle-square |
//! | [`Lcg`] | `[0, 2^32)` | Numerical Recipes LCG |
//! | [`UniformShuffle`] | `[0, n)` | concatenated permutations |
//!
//! The first four produce raw streams that are reduced modulo the roster size
//! afterwards. [`UniformShuffle`] emits roster indices directly and is the
//! only family that needs the roster size to generate.
//!
//! ## Usage Example
//!
//! ```rust
//! use fairpick_core::rng::{GeneratorFamily, GeneratorSeed, Xorshift32};
//!
//! let direct: Vec<u64> = Xorshift32::new(7).take(5).collect();
//! let via_family = GeneratorSeed::new(GeneratorFamily::Xorshift, 7).generate(5, 3);
//! assert_eq!(direct, via_family);
//! ```

mod family;
mod lcg;
mod mersenne;
mod middle_square;
mod shuffle;
mod xorshift;

pub use family::{GeneratorFamily, GeneratorSeed};
pub use lcg::Lcg;
pub use mersenne::{MersenneTwister, Mt19937, MERSENNE_OUTPUT_MAX};
pub use middle_square::MiddleSquare;
pub use shuffle::UniformShuffle;
pub use xorshift::Xorshift32;
