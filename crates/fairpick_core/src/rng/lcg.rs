//! Linear congruential generator with the Numerical Recipes constants.

const MODULUS: u64 = 1 << 32;
const MULTIPLIER: u64 = 1_664_525;
const INCREMENT: u64 = 1_013_904_223;

/// LCG `x = (1664525 * x + 1013904223) mod 2^32`, emitting every new `x`.
///
/// # Examples
///
/// ```rust
/// use fairpick_core::rng::Lcg;
///
/// let values: Vec<u64> = Lcg::new(0).take(2).collect();
/// assert_eq!(values, vec![1_013_904_223, 1_196_435_762]);
/// ```
#[derive(Clone, Debug)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    /// Creates a generator starting from `seed` (taken modulo 2^32).
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed % MODULUS,
        }
    }
}

impl Iterator for Lcg {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        self.state = (MULTIPLIER * self.state + INCREMENT) % MODULUS;
        Some(self.state)
    }
}
