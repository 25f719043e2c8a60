//! Draw pools and used history.

#[cfg(feature = "serde")]
use serde::Serialize;

use super::error::PoolError;

/// The pre-computed multiset of draw outcomes, reduced to roster indices.
///
/// A pool's length is the total number of draws (`k * l`) and every entry is
/// a valid index into a roster of [`Pool::class_size`] names. Pools are
/// immutable; a new preparation produces a new pool.
///
/// # Examples
///
/// ```rust
/// use fairpick_core::types::Pool;
///
/// let pool = Pool::new(vec![0, 0, 1, 1, 2, 2], 3).unwrap();
/// assert_eq!(pool.counts(), vec![2, 2, 2]);
/// assert!(Pool::new(vec![0, 3], 3).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Pool {
    indices: Vec<usize>,
    class_size: usize,
}

impl Pool {
    /// Creates a pool, checking every entry against `class_size`.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::EmptyRoster` if `class_size` is zero, or
    /// `PoolError::IndexOutOfRange` for the first entry `>= class_size`.
    pub fn new(indices: Vec<usize>, class_size: usize) -> Result<Self, PoolError> {
        if class_size == 0 {
            return Err(PoolError::EmptyRoster);
        }
        if let Some((position, &index)) = indices
            .iter()
            .enumerate()
            .find(|&(_, &index)| index >= class_size)
        {
            return Err(PoolError::IndexOutOfRange {
                position,
                index,
                class_size,
            });
        }
        Ok(Self {
            indices,
            class_size,
        })
    }

    /// Reduces a raw generator sequence modulo `class_size`.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::EmptyRoster` if `class_size` is zero.
    pub fn from_raw(raw: &[u64], class_size: usize) -> Result<Self, PoolError> {
        if class_size == 0 {
            return Err(PoolError::EmptyRoster);
        }
        let modulus = class_size as u64;
        Ok(Self {
            indices: raw.iter().map(|&v| (v % modulus) as usize).collect(),
            class_size,
        })
    }

    /// Number of draws in the pool.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the pool holds no draws.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Roster size the pool was built for.
    #[inline]
    pub fn class_size(&self) -> usize {
        self.class_size
    }

    /// The pool entries in generation order.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// Occurrences of each index `0..class_size`.
    pub fn counts(&self) -> Vec<usize> {
        tally(&self.indices, self.class_size)
    }
}

/// Append-only record of picked roster indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsedHistory {
    indices: Vec<usize>,
}

impl UsedHistory {
    /// An empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps previously recorded indices, oldest first.
    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// Appends one pick.
    #[inline]
    pub fn record(&mut self, index: usize) {
        self.indices.push(index);
    }

    /// Number of picks so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if nothing has been picked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Picked indices, oldest first.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// Occurrences of each index `0..class_size`; out-of-range entries are ignored.
    pub fn counts(&self, class_size: usize) -> Vec<usize> {
        tally(&self.indices, class_size)
    }
}

fn tally(indices: &[usize], class_size: usize) -> Vec<usize> {
    let mut counts = vec![0usize; class_size];
    for &index in indices {
        if let Some(slot) = counts.get_mut(index) {
            *slot += 1;
        }
    }
    counts
}
