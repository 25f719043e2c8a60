//! Mersenne Twister (MT19937) generator.
//!
//! [`Mt19937`] is the raw 32-bit generator and implements [`rand::RngCore`],
//! so bounded integers are drawn through `rand`'s uniform range sampling
//! rather than by hand. [`MersenneTwister`] is the stream searched by the
//! optimiser: uniform integers in `[0, MERSENNE_OUTPUT_MAX]`.

use rand::{Rng, RngCore};

/// Inclusive upper bound of values emitted by [`MersenneTwister`].
pub const MERSENNE_OUTPUT_MAX: u64 = 100_000;

const STATE_SIZE: usize = 624;
const SHIFT_SIZE: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// 32-bit Mersenne Twister seeded through the reference `init_genrand` routine.
///
/// # Examples
///
/// ```rust
/// use fairpick_core::rng::Mt19937;
///
/// // Reference output for the canonical default seed.
/// let mut mt = Mt19937::new(5489);
/// assert_eq!(mt.next_u32(), 3_499_211_612);
/// ```
#[derive(Clone)]
pub struct Mt19937 {
    state: Box<[u32; STATE_SIZE]>,
    index: usize,
}

impl Mt19937 {
    /// Creates a generator seeded with the low 32 bits of `seed`.
    pub fn new(seed: u64) -> Self {
        let mut state = Box::new([0u32; STATE_SIZE]);
        state[0] = (seed & 0xFFFF_FFFF) as u32;
        for i in 1..STATE_SIZE {
            let prev = state[i - 1];
            state[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        Self {
            state,
            index: STATE_SIZE,
        }
    }

    /// Returns the next tempered 32-bit output.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        if self.index >= STATE_SIZE {
            self.twist();
        }
        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^= y >> 18;
        y
    }

    fn twist(&mut self) {
        for i in 0..STATE_SIZE {
            let y = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % STATE_SIZE] & LOWER_MASK);
            let mut next = self.state[(i + SHIFT_SIZE) % STATE_SIZE] ^ (y >> 1);
            if y & 1 != 0 {
                next ^= MATRIX_A;
            }
            self.state[i] = next;
        }
        self.index = 0;
    }
}

impl std::fmt::Debug for Mt19937 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mt19937")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl RngCore for Mt19937 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        Mt19937::next_u32(self)
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(Mt19937::next_u32(self));
        let lo = u64::from(Mt19937::next_u32(self));
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = Mt19937::next_u32(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Stream of uniform integers in `[0, MERSENNE_OUTPUT_MAX]` drawn from [`Mt19937`].
#[derive(Clone, Debug)]
pub struct MersenneTwister {
    inner: Mt19937,
}

impl MersenneTwister {
    /// Creates a stream seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Mt19937::new(seed),
        }
    }
}

impl Iterator for MersenneTwister {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        Some(self.inner.gen_range(0..=MERSENNE_OUTPUT_MAX))
    }
}
