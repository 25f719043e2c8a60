//! Generator families and `(family, seed)` candidates.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Lcg, MersenneTwister, MiddleSquare, UniformShuffle, Xorshift32};

/// The supported generator families.
///
/// Dispatch is static: [`GeneratorFamily::generate`] matches on the variant
/// and drives the concrete iterator, with no boxed generators involved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum GeneratorFamily {
    /// 32-bit xorshift.
    Xorshift,
    /// MT19937 sampled into `[0, 100000]`.
    MersenneTwister,
    /// Von Neumann middle-square.
    MiddleSquare,
    /// Numerical Recipes LCG.
    Lcg,
    /// Concatenated permutations of the roster indices.
    UniformShuffle,
}

impl GeneratorFamily {
    /// Raw-stream families, in search order.
    pub const STREAM: [GeneratorFamily; 4] = [
        GeneratorFamily::Xorshift,
        GeneratorFamily::MersenneTwister,
        GeneratorFamily::MiddleSquare,
        GeneratorFamily::Lcg,
    ];

    /// Every family.
    pub const ALL: [GeneratorFamily; 5] = [
        GeneratorFamily::Xorshift,
        GeneratorFamily::MersenneTwister,
        GeneratorFamily::MiddleSquare,
        GeneratorFamily::Lcg,
        GeneratorFamily::UniformShuffle,
    ];

    /// Human-readable family name.
    pub fn name(&self) -> &'static str {
        match self {
            GeneratorFamily::Xorshift => "Xorshift",
            GeneratorFamily::MersenneTwister => "Mersenne Twister",
            GeneratorFamily::MiddleSquare => "Middle Square",
            GeneratorFamily::Lcg => "LCG",
            GeneratorFamily::UniformShuffle => "Uniform Shuffle",
        }
    }

    /// Looks a family up by its display name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|family| family.name().eq_ignore_ascii_case(name))
    }

    /// Returns `true` if values must be reduced modulo `n` before use.
    #[inline]
    pub fn is_raw_stream(&self) -> bool {
        !matches!(self, GeneratorFamily::UniformShuffle)
    }

    /// Generates `count` values from `seed`.
    ///
    /// `n` is the roster size; only [`GeneratorFamily::UniformShuffle`]
    /// consults it; the raw-stream families ignore it.
    pub fn generate(&self, seed: u64, count: usize, n: usize) -> Vec<u64> {
        match self {
            GeneratorFamily::Xorshift => Xorshift32::new(seed).take(count).collect(),
            GeneratorFamily::MersenneTwister => MersenneTwister::new(seed).take(count).collect(),
            GeneratorFamily::MiddleSquare => MiddleSquare::new(seed).take(count).collect(),
            GeneratorFamily::Lcg => Lcg::new(seed).take(count).collect(),
            GeneratorFamily::UniformShuffle => UniformShuffle::new(n).generate(seed, count),
        }
    }
}

impl fmt::Display for GeneratorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable `(family, seed)` pair identifying one reproducible sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneratorSeed {
    /// Generator family.
    pub family: GeneratorFamily,
    /// Seed fed to the family.
    pub seed: u64,
}

impl GeneratorSeed {
    /// Creates a candidate.
    #[inline]
    pub fn new(family: GeneratorFamily, seed: u64) -> Self {
        Self { family, seed }
    }

    /// Generates `count` values; see [`GeneratorFamily::generate`].
    #[inline]
    pub fn generate(&self, count: usize, n: usize) -> Vec<u64> {
        self.family.generate(self.seed, count, n)
    }
}

impl fmt::Display for GeneratorSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (seed={})", self.family, self.seed)
    }
}
