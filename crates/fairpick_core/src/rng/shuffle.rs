//! Permutation-block generator.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Concatenated random permutations of `[0, n)`.
///
/// Blocks are shuffled with a `ChaCha12Rng` seeded from `seed`, a fixed
/// algorithm, so a seed names the same pool across `rand` releases.
/// Each block is a fresh shuffle of all `n` indices, so within every completed
/// block each index appears exactly once. Output is truncated to the requested
/// count, which bounds every index's total to `floor(count / n)` or
/// `ceil(count / n)`.
///
/// # Examples
///
/// ```rust
/// use fairpick_core::rng::UniformShuffle;
///
/// let values = UniformShuffle::new(4).generate(42, 10);
/// assert_eq!(values.len(), 10);
///
/// let mut first_block = values[..4].to_vec();
/// first_block.sort_unstable();
/// assert_eq!(first_block, vec![0, 1, 2, 3]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformShuffle {
    n: usize,
}

impl UniformShuffle {
    /// Creates a generator over the indices `[0, n)`.
    #[inline]
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    /// Generates `count` indices from `seed`.
    ///
    /// Returns an empty sequence when `n` is zero, since no index exists.
    pub fn generate(&self, seed: u64, count: usize) -> Vec<u64> {
        if self.n == 0 {
            return Vec::new();
        }

        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        let mut block: Vec<u64> = (0..self.n as u64).collect();
        let mut out = Vec::with_capacity(count + self.n);

        while out.len() < count {
            block.shuffle(&mut rng);
            out.extend_from_slice(&block);
        }
        out.truncate(count);
        out
    }
}
