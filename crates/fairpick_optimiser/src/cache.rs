//! Explicit memoisation of optimisation results.
//!
//! The search is expensive and runs synchronously from a user action, so
//! results are cached per `(k, l, n, strategy)`. The cache is an ordinary
//! value owned by the caller; there is no process-wide state.

use std::collections::HashMap;
use std::sync::Arc;

use fairpick_core::types::DrawParams;
use tracing::debug;

use crate::error::OptimiserError;
use crate::search::{OptimisationResult, Optimiser, SearchConfig};
use crate::strategy::StrategyKind;

/// Cache key: validated parameters plus the strategy searched.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Draw parameters (`k`, `l`, `n`).
    pub params: DrawParams,
    /// Strategy searched.
    pub strategy: StrategyKind,
}

impl CacheKey {
    /// Creates a key.
    pub fn new(params: DrawParams, strategy: StrategyKind) -> Self {
        Self { params, strategy }
    }
}

/// Cache statistics for monitoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of entries removed by `invalidate` or `clear`
    pub invalidations: u64,
}

impl CacheStats {
    /// Calculate the cache hit rate.
    ///
    /// Returns 0.0 if no lookups have occurred.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    fn record_hit(&mut self) {
        self.hits += 1;
    }

    fn record_miss(&mut self) {
        self.misses += 1;
    }

    fn record_invalidations(&mut self, count: usize) {
        self.invalidations += count as u64;
    }
}

/// Memoising front end to the optimiser.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use fairpick_core::types::DrawParams;
/// use fairpick_optimiser::{OptimiserCache, SeedRange, ShuffleStrategy, StrategyKind};
///
/// let strategy = StrategyKind::Shuffle(ShuffleStrategy::new(SeedRange::new(0, 9, 1)));
/// let params = DrawParams::new(2, 2, 3).unwrap();
///
/// let mut cache = OptimiserCache::new();
/// let first = cache.get_or_optimise(params, &strategy).unwrap();
/// let second = cache.get_or_optimise(params, &strategy).unwrap();
///
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(cache.stats().hits, 1);
/// assert_eq!(cache.stats().misses, 1);
/// ```
#[derive(Debug, Default)]
pub struct OptimiserCache {
    entries: HashMap<CacheKey, Arc<OptimisationResult>>,
    config: SearchConfig,
    stats: CacheStats,
}

impl OptimiserCache {
    /// Creates an empty cache with default search settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache whose misses run with `config`.
    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the cached result for `(params, strategy)`, running the search on a miss.
    ///
    /// # Errors
    ///
    /// Propagates `OptimiserError` from the search; failures are not cached.
    pub fn get_or_optimise(
        &mut self,
        params: DrawParams,
        strategy: &StrategyKind,
    ) -> Result<Arc<OptimisationResult>, OptimiserError> {
        let key = CacheKey::new(params, strategy.clone());
        if let Some(result) = self.entries.get(&key) {
            self.stats.record_hit();
            debug!(
                sessions = params.sessions(),
                picks = params.picks_per_session(),
                class_size = params.class_size(),
                strategy = %strategy,
                "Optimiser cache hit"
            );
            return Ok(Arc::clone(result));
        }

        self.stats.record_miss();
        debug!(
            sessions = params.sessions(),
            picks = params.picks_per_session(),
            class_size = params.class_size(),
            strategy = %strategy,
            "Optimiser cache miss"
        );
        let result = Arc::new(
            Optimiser::new(strategy.clone())
                .with_config(self.config)
                .run(params)?,
        );
        self.entries.insert(key, Arc::clone(&result));
        Ok(result)
    }

    /// Looks up a cached result without searching or touching the statistics.
    pub fn peek(&self, params: DrawParams, strategy: &StrategyKind) -> Option<Arc<OptimisationResult>> {
        self.entries
            .get(&CacheKey::new(params, strategy.clone()))
            .cloned()
    }

    /// Drops the entry for `(params, strategy)`; returns whether one existed.
    pub fn invalidate(&mut self, params: DrawParams, strategy: &StrategyKind) -> bool {
        let removed = self
            .entries
            .remove(&CacheKey::new(params, strategy.clone()))
            .is_some();
        if removed {
            self.stats.record_invalidations(1);
        }
        removed
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.stats.record_invalidations(self.entries.len());
        self.entries.clear();
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hit/miss statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
