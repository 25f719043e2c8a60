//! Brute-force search for the fairest `(family, seed)` candidate.
//!
//! Every candidate of a [`PoolStrategy`] is scored by the population variance
//! of its draw counts. The winner is the lowest variance; ties keep the
//! earliest candidate in enumeration order, so the result is identical
//! whether the search runs sequentially or on the rayon pool.

use std::cmp::Ordering;

use fairpick_core::fairness::DrawBand;
use fairpick_core::rng::{GeneratorFamily, GeneratorSeed};
use fairpick_core::types::{DrawParams, Pool};
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::OptimiserError;
use crate::strategy::{PoolStrategy, StrategyKind};

/// Default minimum number of candidates before the search goes parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Search execution settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Minimum candidate count before using rayon.
    pub parallel_threshold: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl SearchConfig {
    /// Settings that never use the thread pool.
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
        }
    }

    /// Returns whether a search over `n_candidates` should run in parallel.
    #[inline]
    pub fn should_parallelise(&self, n_candidates: usize) -> bool {
        cfg!(feature = "parallel") && n_candidates >= self.parallel_threshold
    }
}

/// The winning candidate and its pool.
#[derive(Clone, Debug, PartialEq)]
pub struct OptimisationResult {
    /// Winning `(family, seed)`.
    pub candidate: GeneratorSeed,
    /// Population variance of the winner's draw counts.
    pub variance: f64,
    /// Winner's sequence reduced to roster indices, length `k * l`.
    pub pool: Pool,
    /// Parameters the search ran for.
    pub params: DrawParams,
    /// Name of the strategy searched.
    pub strategy: &'static str,
    /// Candidates scored before the winner was fixed.
    pub trials: usize,
}

impl OptimisationResult {
    /// Winning generator family.
    #[inline]
    pub fn family(&self) -> GeneratorFamily {
        self.candidate.family
    }

    /// Winning seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.candidate.seed
    }

    /// Expected draws per roster entry with its standard deviation.
    pub fn band(&self) -> DrawBand {
        DrawBand::new(
            self.params.total_draws(),
            self.params.class_size(),
            self.variance,
        )
    }
}

#[derive(Clone, Copy, Debug)]
struct Trial {
    ordinal: usize,
    variance: f64,
}

impl Trial {
    fn rank(&self, other: &Self) -> Ordering {
        self.variance
            .total_cmp(&other.variance)
            .then(self.ordinal.cmp(&other.ordinal))
    }
}

/// Exhaustive optimiser over one strategy.
///
/// # Examples
///
/// ```rust
/// use fairpick_core::types::DrawParams;
/// use fairpick_optimiser::{Optimiser, SeedRange, ShuffleStrategy};
///
/// let optimiser = Optimiser::new(ShuffleStrategy::new(SeedRange::new(0, 9, 1)));
/// let params = DrawParams::new(2, 3, 3).unwrap();
/// let result = optimiser.run(params).unwrap();
///
/// // 6 draws over 3 names: two full permutations, perfectly fair
/// assert_eq!(result.variance, 0.0);
/// assert_eq!(result.seed(), 0);
/// assert_eq!(result.pool.counts(), vec![2, 2, 2]);
/// ```
#[derive(Clone, Debug)]
pub struct Optimiser<S: PoolStrategy> {
    strategy: S,
    config: SearchConfig,
}

impl<S: PoolStrategy> Optimiser<S> {
    /// Creates an optimiser with default search settings.
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            config: SearchConfig::default(),
        }
    }

    /// Replaces the search settings.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Strategy being searched.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Searches every candidate and materialises the winner's pool.
    ///
    /// # Errors
    ///
    /// Returns `OptimiserError::EmptySearchSpace` if the strategy enumerates
    /// no candidate.
    pub fn run(&self, params: DrawParams) -> Result<OptimisationResult, OptimiserError> {
        let candidates = self.strategy.candidate_count();
        let count = params.total_draws();
        let n = params.class_size();

        debug!(
            strategy = self.strategy.name(),
            candidates,
            count,
            n,
            "Starting seed search"
        );

        let (best, trials) = if self.config.should_parallelise(candidates) {
            (self.search_parallel(candidates, count, n), candidates)
        } else {
            self.search_sequential(candidates, count, n)
        };

        let best = best.ok_or(OptimiserError::EmptySearchSpace {
            strategy: self.strategy.name(),
        })?;
        let candidate = self
            .strategy
            .candidate(best.ordinal)
            .ok_or(OptimiserError::EmptySearchSpace {
                strategy: self.strategy.name(),
            })?;
        let pool = Pool::new(self.strategy.generate(candidate, count, n), n)?;

        info!(
            strategy = self.strategy.name(),
            family = %candidate.family,
            seed = candidate.seed,
            variance = best.variance,
            trials,
            "Optimisation complete"
        );

        Ok(OptimisationResult {
            candidate,
            variance: best.variance,
            pool,
            params,
            strategy: self.strategy.name(),
            trials,
        })
    }

    fn trial(&self, ordinal: usize, count: usize, n: usize) -> Option<Trial> {
        let candidate = self.strategy.candidate(ordinal)?;
        Some(Trial {
            ordinal,
            variance: self.strategy.score(candidate, count, n),
        })
    }

    fn search_sequential(&self, candidates: usize, count: usize, n: usize) -> (Option<Trial>, usize) {
        let mut best: Option<Trial> = None;
        let mut trials = 0;
        for ordinal in 0..candidates {
            let Some(trial) = self.trial(ordinal, count, n) else {
                continue;
            };
            trials += 1;
            if best.map_or(true, |b| trial.variance < b.variance) {
                best = Some(trial);
            }
            if trial.variance == 0.0 {
                break;
            }
        }
        (best, trials)
    }

    #[cfg(feature = "parallel")]
    fn search_parallel(&self, candidates: usize, count: usize, n: usize) -> Option<Trial> {
        (0..candidates)
            .into_par_iter()
            .filter_map(|ordinal| self.trial(ordinal, count, n))
            .min_by(|a, b| a.rank(b))
    }

    #[cfg(not(feature = "parallel"))]
    fn search_parallel(&self, candidates: usize, count: usize, n: usize) -> Option<Trial> {
        (0..candidates)
            .filter_map(|ordinal| self.trial(ordinal, count, n))
            .min_by(|a, b| a.rank(b))
    }
}

/// Searches the default stream strategy for `k` sessions of `l` picks over `n` names.
///
/// # Errors
///
/// Returns `OptimiserError::Params` if any of `k`, `l`, `n` is zero.
pub fn optimise(k: usize, l: usize, n: usize) -> Result<OptimisationResult, OptimiserError> {
    let params = DrawParams::new(k, l, n)?;
    optimise_with(params, &StrategyKind::default())
}

/// Searches `strategy` for validated `params`.
///
/// # Errors
///
/// Returns `OptimiserError::EmptySearchSpace` if `strategy` has no candidate.
pub fn optimise_with<S: PoolStrategy + Clone>(
    params: DrawParams,
    strategy: &S,
) -> Result<OptimisationResult, OptimiserError> {
    Optimiser::new(strategy.clone()).run(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{SeedRange, ShuffleStrategy, StreamStrategy};

    fn small_stream() -> StreamStrategy {
        StreamStrategy::new(GeneratorFamily::STREAM.to_vec(), SeedRange::new(0, 2_000, 100))
    }

    #[test]
    fn test_rank_breaks_ties_by_ordinal() {
        let a = Trial {
            ordinal: 3,
            variance: 0.5,
        };
        let b = Trial {
            ordinal: 7,
            variance: 0.5,
        };
        assert_eq!(a.rank(&b), Ordering::Less);
        assert_eq!(b.rank(&a), Ordering::Greater);
    }

    #[test]
    fn test_sequential_stops_on_perfect_candidate() {
        let optimiser = Optimiser::new(ShuffleStrategy::default()).with_config(SearchConfig::sequential());
        let result = optimiser.run(DrawParams::new(4, 5, 10).unwrap()).unwrap();
        assert_eq!(result.variance, 0.0);
        assert_eq!(result.seed(), 0);
        assert_eq!(result.trials, 1);
    }

    #[test]
    fn test_winner_is_minimum_over_all_candidates() {
        let strategy = small_stream();
        let params = DrawParams::new(7, 3, 9).unwrap();
        let result = Optimiser::new(strategy.clone())
            .with_config(SearchConfig::sequential())
            .run(params)
            .unwrap();

        for ordinal in 0..strategy.candidate_count() {
            let candidate = strategy.candidate(ordinal).unwrap();
            let variance = strategy.score(candidate, 21, 9);
            assert!(variance >= result.variance);
            if candidate == result.candidate {
                break;
            }
            // earlier candidates must be strictly worse
            assert!(variance > result.variance);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let strategy = small_stream();
        let params = DrawParams::new(5, 4, 7).unwrap();
        let sequential = Optimiser::new(strategy.clone())
            .with_config(SearchConfig::sequential())
            .run(params)
            .unwrap();
        let parallel = Optimiser::new(strategy)
            .with_config(SearchConfig {
                parallel_threshold: 0,
            })
            .run(params)
            .unwrap();

        assert_eq!(sequential.candidate, parallel.candidate);
        assert_eq!(sequential.variance, parallel.variance);
        assert_eq!(sequential.pool, parallel.pool);
    }

    #[test]
    fn test_empty_search_space() {
        let strategy = StreamStrategy::new(Vec::new(), SeedRange::new(0, 100, 1));
        let err = Optimiser::new(strategy)
            .run(DrawParams::new(1, 1, 1).unwrap())
            .unwrap_err();
        assert_eq!(err, OptimiserError::EmptySearchSpace { strategy: "stream" });
    }

    #[test]
    fn test_optimise_rejects_zero_parameters() {
        assert!(matches!(optimise(0, 5, 10), Err(OptimiserError::Params(_))));
        assert!(matches!(optimise(3, 0, 10), Err(OptimiserError::Params(_))));
        assert!(matches!(optimise(3, 5, 0), Err(OptimiserError::Params(_))));
    }

    #[test]
    fn test_band_uses_params() {
        let optimiser = Optimiser::new(ShuffleStrategy::new(SeedRange::new(0, 4, 1)));
        let result = optimiser.run(DrawParams::new(3, 2, 4).unwrap()).unwrap();
        let band = result.band();
        assert_eq!(band.expected, 1.5);
        assert!(band.lower() <= band.expected && band.expected <= band.upper());
    }
}
