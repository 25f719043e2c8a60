//! Pool generation strategies.
//!
//! A [`PoolStrategy`] defines the search space (an ordered list of
//! `(family, seed)` candidates) and how a candidate becomes roster indices.
//! Two strategies exist:
//!
//! - [`StreamStrategy`]: raw generator streams reduced modulo the roster size
//! - [`ShuffleStrategy`]: concatenated permutations of the roster indices
//!
//! [`StrategyKind`] selects one of them by configuration and dispatches
//! statically, so the optimiser is generic over the strategy without boxing.

use std::fmt;

use fairpick_core::fairness::population_variance;
use fairpick_core::rng::{GeneratorFamily, GeneratorSeed};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Capability shared by every pool strategy.
///
/// Candidates are addressed by ordinal in `0..candidate_count()`; ordinal
/// order is the enumeration order used for tie-breaking.
pub trait PoolStrategy: Sync {
    /// Short strategy name for logs and errors.
    fn name(&self) -> &'static str;

    /// Size of the search space.
    fn candidate_count(&self) -> usize;

    /// Candidate at `ordinal`, or `None` past the end.
    fn candidate(&self, ordinal: usize) -> Option<GeneratorSeed>;

    /// Generates `count` roster indices in `[0, n)` for `candidate`.
    fn generate(&self, candidate: GeneratorSeed, count: usize, n: usize) -> Vec<usize>;

    /// Fairness score (population variance of draw counts) of `candidate`.
    fn score(&self, candidate: GeneratorSeed, count: usize, n: usize) -> f64 {
        let mut counts = vec![0usize; n];
        for index in self.generate(candidate, count, n) {
            counts[index] += 1;
        }
        population_variance(&counts, count)
    }
}

/// Arithmetic seed progression `start, start + step, ...` up to `end` inclusive.
///
/// # Examples
///
/// ```rust
/// use fairpick_optimiser::SeedRange;
///
/// let range = SeedRange::new(0, 1_000, 100);
/// assert_eq!(range.len(), 11);
/// assert_eq!(range.nth(3), Some(300));
/// assert_eq!(range.nth(11), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeedRange {
    start: u64,
    end: u64,
    step: u64,
}

impl SeedRange {
    /// Creates a range; a zero `step` is treated as 1.
    pub fn new(start: u64, end: u64, step: u64) -> Self {
        Self {
            start,
            end,
            step: step.max(1),
        }
    }

    /// Number of seeds in the range.
    pub fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            usize::try_from((self.end - self.start) / self.step + 1).unwrap_or(usize::MAX)
        }
    }

    /// Returns `true` if the range contains no seed.
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// The `index`-th seed in ascending order.
    pub fn nth(&self, index: usize) -> Option<u64> {
        if index >= self.len() {
            return None;
        }
        Some(self.start + index as u64 * self.step)
    }

    /// Iterates seeds in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.len()).filter_map(move |i| self.nth(i))
    }
}

/// Raw-stream strategy: every family in list order, every seed ascending,
/// values reduced modulo the roster size.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StreamStrategy {
    families: Vec<GeneratorFamily>,
    seeds: SeedRange,
}

impl StreamStrategy {
    /// Default seed sweep: `0, 100, ..., 1_000_000`.
    pub const DEFAULT_SEEDS: SeedRange = SeedRange {
        start: 0,
        end: 1_000_000,
        step: 100,
    };

    /// Creates a stream strategy over `families` and `seeds`.
    pub fn new(families: Vec<GeneratorFamily>, seeds: SeedRange) -> Self {
        Self { families, seeds }
    }

    /// Families in enumeration order.
    pub fn families(&self) -> &[GeneratorFamily] {
        &self.families
    }

    /// Seed sweep applied to every family.
    pub fn seeds(&self) -> SeedRange {
        self.seeds
    }
}

impl Default for StreamStrategy {
    fn default() -> Self {
        Self::new(GeneratorFamily::STREAM.to_vec(), Self::DEFAULT_SEEDS)
    }
}

impl PoolStrategy for StreamStrategy {
    fn name(&self) -> &'static str {
        "stream"
    }

    fn candidate_count(&self) -> usize {
        self.families.len().saturating_mul(self.seeds.len())
    }

    fn candidate(&self, ordinal: usize) -> Option<GeneratorSeed> {
        let per_family = self.seeds.len();
        if per_family == 0 {
            return None;
        }
        let family = *self.families.get(ordinal / per_family)?;
        let seed = self.seeds.nth(ordinal % per_family)?;
        Some(GeneratorSeed::new(family, seed))
    }

    fn generate(&self, candidate: GeneratorSeed, count: usize, n: usize) -> Vec<usize> {
        if n == 0 {
            return Vec::new();
        }
        let modulus = n as u64;
        candidate
            .generate(count, n)
            .into_iter()
            .map(|v| (v % modulus) as usize)
            .collect()
    }
}

/// Permutation-block strategy: the shuffle family over a small seed range.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShuffleStrategy {
    seeds: SeedRange,
}

impl ShuffleStrategy {
    /// Default seed sweep: `0..1000`.
    pub const DEFAULT_SEEDS: SeedRange = SeedRange {
        start: 0,
        end: 999,
        step: 1,
    };

    /// Creates a shuffle strategy over `seeds`.
    pub fn new(seeds: SeedRange) -> Self {
        Self { seeds }
    }

    /// Seed sweep.
    pub fn seeds(&self) -> SeedRange {
        self.seeds
    }
}

impl Default for ShuffleStrategy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEEDS)
    }
}

impl PoolStrategy for ShuffleStrategy {
    fn name(&self) -> &'static str {
        "shuffle"
    }

    fn candidate_count(&self) -> usize {
        self.seeds.len()
    }

    fn candidate(&self, ordinal: usize) -> Option<GeneratorSeed> {
        self.seeds
            .nth(ordinal)
            .map(|seed| GeneratorSeed::new(GeneratorFamily::UniformShuffle, seed))
    }

    fn generate(&self, candidate: GeneratorSeed, count: usize, n: usize) -> Vec<usize> {
        GeneratorFamily::UniformShuffle
            .generate(candidate.seed, count, n)
            .into_iter()
            .map(|v| v as usize)
            .collect()
    }
}

/// Strategy selected by configuration.
///
/// # Examples
///
/// ```rust
/// use fairpick_optimiser::{PoolStrategy, StrategyKind};
///
/// let kind = StrategyKind::from_name("shuffle").unwrap();
/// assert_eq!(kind.name(), "shuffle");
/// assert_eq!(kind.candidate_count(), 1000);
/// assert_eq!(StrategyKind::default().candidate_count(), 4 * 10_001);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StrategyKind {
    /// Raw streams reduced modulo the roster size.
    Stream(StreamStrategy),
    /// Concatenated permutation blocks.
    Shuffle(ShuffleStrategy),
}

impl StrategyKind {
    /// Default stream strategy.
    pub fn stream() -> Self {
        StrategyKind::Stream(StreamStrategy::default())
    }

    /// Default shuffle strategy.
    pub fn shuffle() -> Self {
        StrategyKind::Shuffle(ShuffleStrategy::default())
    }

    /// Default strategy for a configuration name (`"stream"` or `"shuffle"`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "stream" => Some(Self::stream()),
            "shuffle" => Some(Self::shuffle()),
            _ => None,
        }
    }
}

impl Default for StrategyKind {
    fn default() -> Self {
        Self::stream()
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PoolStrategy for StrategyKind {
    fn name(&self) -> &'static str {
        match self {
            StrategyKind::Stream(s) => s.name(),
            StrategyKind::Shuffle(s) => s.name(),
        }
    }

    fn candidate_count(&self) -> usize {
        match self {
            StrategyKind::Stream(s) => s.candidate_count(),
            StrategyKind::Shuffle(s) => s.candidate_count(),
        }
    }

    fn candidate(&self, ordinal: usize) -> Option<GeneratorSeed> {
        match self {
            StrategyKind::Stream(s) => s.candidate(ordinal),
            StrategyKind::Shuffle(s) => s.candidate(ordinal),
        }
    }

    fn generate(&self, candidate: GeneratorSeed, count: usize, n: usize) -> Vec<usize> {
        match self {
            StrategyKind::Stream(s) => s.generate(candidate, count, n),
            StrategyKind::Shuffle(s) => s.generate(candidate, count, n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_range_edges() {
        assert_eq!(SeedRange::new(5, 4, 1).len(), 0);
        assert!(SeedRange::new(5, 4, 1).is_empty());
        assert_eq!(SeedRange::new(0, 0, 1).len(), 1);
        assert_eq!(SeedRange::new(0, 99, 100).len(), 1);
        assert_eq!(SeedRange::new(0, 10, 0).len(), 11);
        assert_eq!(
            SeedRange::new(10, 30, 10).iter().collect::<Vec<_>>(),
            vec![10, 20, 30]
        );
    }

    #[test]
    fn test_stream_enumeration_order() {
        let strategy = StreamStrategy::new(
            vec![GeneratorFamily::Lcg, GeneratorFamily::Xorshift],
            SeedRange::new(0, 200, 100),
        );
        let candidates: Vec<_> = (0..strategy.candidate_count())
            .filter_map(|i| strategy.candidate(i))
            .collect();
        assert_eq!(
            candidates,
            vec![
                GeneratorSeed::new(GeneratorFamily::Lcg, 0),
                GeneratorSeed::new(GeneratorFamily::Lcg, 100),
                GeneratorSeed::new(GeneratorFamily::Lcg, 200),
                GeneratorSeed::new(GeneratorFamily::Xorshift, 0),
                GeneratorSeed::new(GeneratorFamily::Xorshift, 100),
                GeneratorSeed::new(GeneratorFamily::Xorshift, 200),
            ]
        );
        assert_eq!(strategy.candidate(6), None);
    }

    #[test]
    fn test_default_stream_matches_sweep() {
        let strategy = StreamStrategy::default();
        assert_eq!(strategy.candidate_count(), 4 * 10_001);
        assert_eq!(
            strategy.candidate(10_001),
            Some(GeneratorSeed::new(GeneratorFamily::MersenneTwister, 0))
        );
        assert_eq!(
            strategy.candidate(4 * 10_001 - 1),
            Some(GeneratorSeed::new(GeneratorFamily::Lcg, 1_000_000))
        );
    }

    #[test]
    fn test_stream_generate_is_reduced() {
        let strategy = StreamStrategy::default();
        let candidate = GeneratorSeed::new(GeneratorFamily::Lcg, 0);
        let indices = strategy.generate(candidate, 3, 10);
        // 1013904223, 1196435762, 3519870697 mod 10
        assert_eq!(indices, vec![3, 2, 7]);
    }

    #[test]
    fn test_shuffle_score_is_zero_on_whole_blocks() {
        let strategy = ShuffleStrategy::default();
        let candidate = strategy.candidate(17).unwrap();
        assert_eq!(candidate.family, GeneratorFamily::UniformShuffle);
        assert_eq!(strategy.score(candidate, 30, 6), 0.0);
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(StrategyKind::from_name(" Stream "), Some(StrategyKind::stream()));
        assert_eq!(StrategyKind::from_name("random"), None);
        assert_eq!(StrategyKind::shuffle().to_string(), "shuffle");
    }
}
