//! Von Neumann middle-square generator.

/// Seeds are reduced below this bound so that every square fits in `u128`.
const SEED_MODULUS: u64 = 10_000_000_000_000_000_000;

/// Middle-square generator over decimal digits.
///
/// Let `d` be the number of decimal digits in the seed. Each step squares the
/// current value, zero-pads the square to at least `2d` digits, and keeps the
/// `d` digits starting at `(len - d) / 2`. The kept digits are emitted and
/// become the next value. An emitted zero would trap the sequence at zero, so
/// the value is reseeded to `seed + 1` instead.
///
/// Seeds of 20 digits are reduced modulo `10^19` first.
///
/// # Examples
///
/// ```rust
/// use fairpick_core::rng::MiddleSquare;
///
/// // 1234^2 = 01522756 -> 5227, 5227^2 = 27321529 -> 3215
/// let values: Vec<u64> = MiddleSquare::new(1234).take(2).collect();
/// assert_eq!(values, vec![5227, 3215]);
/// ```
#[derive(Clone, Debug)]
pub struct MiddleSquare {
    seed: u64,
    digits: u32,
    value: u128,
}

impl MiddleSquare {
    /// Creates a generator from `seed`.
    pub fn new(seed: u64) -> Self {
        let seed = seed % SEED_MODULUS;
        Self {
            seed,
            digits: decimal_digits(u128::from(seed)),
            value: u128::from(seed),
        }
    }

    /// Returns the digit width `d` taken from each square.
    #[inline]
    pub fn digits(&self) -> u32 {
        self.digits
    }
}

impl Iterator for MiddleSquare {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let d = self.digits;
        let squared = self.value * self.value;
        let width = decimal_digits(squared).max(2 * d);
        let start = (width - d) / 2;
        let drop = width - start - d;

        let middle = (squared / 10u128.pow(drop)) % 10u128.pow(d);

        self.value = if middle == 0 {
            u128::from(self.seed) + 1
        } else {
            middle
        };
        // middle < 10^d <= 10^19, which fits in u64
        Some(middle as u64)
    }
}

/// Number of decimal digits in `value` (zero has one digit).
#[inline]
fn decimal_digits(value: u128) -> u32 {
    if value == 0 {
        1
    } else {
        value.ilog10() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_digits() {
        assert_eq!(decimal_digits(0), 1);
        assert_eq!(decimal_digits(9), 1);
        assert_eq!(decimal_digits(10), 2);
        assert_eq!(decimal_digits(999_999), 6);
        assert_eq!(decimal_digits(1_000_000), 7);
    }

    #[test]
    fn test_zero_output_reseeds_to_seed_plus_one() {
        // 100^2 = 010000 -> 100, then stays at 100 (no zero)
        let values: Vec<u64> = MiddleSquare::new(100).take(3).collect();
        assert_eq!(values, vec![100, 100, 100]);

        // 0^2 = 00 -> 0, reseeds to 1; 1^2 = 01 -> 0, reseeds to 1 ...
        let values: Vec<u64> = MiddleSquare::new(0).take(4).collect();
        assert_eq!(values, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_reseed_after_zero_continues_from_seed_plus_one() {
        // 10^2 = 0100 -> "10"; 10 -> 10 forever: never zero
        let values: Vec<u64> = MiddleSquare::new(10).take(2).collect();
        assert_eq!(values, vec![10, 10]);

        // 5^2 = 25 -> d=1, width 2, start 0 -> "2"; 2^2 = 04 -> "0" -> reseed 6
        // 6^2 = 36 -> "3"; 3^2 = 09 -> "0" -> reseed 6
        let values: Vec<u64> = MiddleSquare::new(5).take(5).collect();
        assert_eq!(values, vec![2, 0, 3, 0, 3]);
    }

    #[test]
    fn test_large_seed_does_not_overflow() {
        let mut generator = MiddleSquare::new(u64::MAX);
        assert_eq!(generator.digits(), 19);
        for _ in 0..1000 {
            let value = generator.next().unwrap();
            assert!(value < 10_000_000_000_000_000_000);
        }
    }
}
