//! 32-bit xorshift generator.

/// Marsaglia xorshift generator with a 32-bit state and shift triple (13, 17, 5).
///
/// Zero is a fixed point of the xorshift recurrence, so a zero seed is
/// remapped to 1. Seeds wider than 32 bits are truncated to their low 32 bits.
///
/// # Examples
///
/// ```rust
/// use fairpick_core::rng::Xorshift32;
///
/// let first = Xorshift32::new(1).next();
/// assert_eq!(first, Some(270_369));
///
/// // Seed 0 behaves exactly like seed 1.
/// let a: Vec<u64> = Xorshift32::new(0).take(4).collect();
/// let b: Vec<u64> = Xorshift32::new(1).take(4).collect();
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Debug)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// Creates a generator from `seed`.
    #[inline]
    pub fn new(seed: u64) -> Self {
        let state = (seed & 0xFFFF_FFFF) as u32;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    /// Advances the state and returns it.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl Iterator for Xorshift32 {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        Some(u64::from(self.next_u32()))
    }
}
