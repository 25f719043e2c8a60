//! Draw-count fairness evaluation.
//!
//! A sequence is fair when, after reduction modulo the roster size `n`, every
//! residue occurs equally often. The objective minimised by the optimiser is
//! the population variance of those occurrence counts:
//!
//! ```text
//! expected = len / n
//! variance = (1 / n) * Σ_{r=0}^{n-1} (count(r) - expected)^2
//! ```
//!
//! Residues that never occur contribute `expected^2`; they are counted as
//! zero rather than omitted.

/// Result of evaluating one sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// Population variance of per-residue counts (divisor `n`).
    pub variance: f64,
    /// The sequence reduced modulo `n`, in original order.
    pub reduced: Vec<usize>,
    /// Occurrences of each residue `0..n`.
    pub counts: Vec<usize>,
}

impl Evaluation {
    /// Standard deviation of the per-residue counts.
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// Evaluates the fairness of `sequence` over `n` residues.
///
/// # Panics
///
/// Panics if `n` is zero; callers pass a validated roster size.
///
/// # Examples
///
/// ```rust
/// use fairpick_core::fairness::evaluate;
///
/// let perfect = evaluate(&[3, 4, 5, 6, 7, 8], 3);
/// assert_eq!(perfect.reduced, vec![0, 1, 2, 0, 1, 2]);
/// assert_eq!(perfect.variance, 0.0);
///
/// // counts [3, 0] around expected 1.5 -> variance 2.25
/// let skewed = evaluate(&[0, 2, 4], 2);
/// assert_eq!(skewed.variance, 2.25);
/// ```
pub fn evaluate(sequence: &[u64], n: usize) -> Evaluation {
    assert!(n > 0, "fairness evaluation needs at least one residue");

    let modulus = n as u64;
    let reduced: Vec<usize> = sequence.iter().map(|&v| (v % modulus) as usize).collect();

    let mut counts = vec![0usize; n];
    for &r in &reduced {
        counts[r] += 1;
    }

    Evaluation {
        variance: population_variance(&counts, sequence.len()),
        reduced,
        counts,
    }
}

/// Variance of `sequence` over `n` residues without keeping the reduction.
///
/// Equivalent to `evaluate(sequence, n).variance`; used in the search loop
/// where only the score matters.
///
/// # Panics
///
/// Panics if `n` is zero.
pub fn variance_of(sequence: &[u64], n: usize) -> f64 {
    assert!(n > 0, "fairness evaluation needs at least one residue");

    let modulus = n as u64;
    let mut counts = vec![0usize; n];
    for &v in sequence {
        counts[(v % modulus) as usize] += 1;
    }
    population_variance(&counts, sequence.len())
}

/// Population variance of `counts` around `total / counts.len()`.
///
/// Returns `0.0` for an empty `counts` slice.
pub fn population_variance(counts: &[usize], total: usize) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    let n = counts.len() as f64;
    let expected = total as f64 / n;
    counts
        .iter()
        .map(|&c| {
            let diff = c as f64 - expected;
            diff * diff
        })
        .sum::<f64>()
        / n
}

/// Expected draws per roster entry and the one-standard-deviation band around it.
///
/// This is what is reported after preparation: "each name will be
/// picked about `lower` to `upper` times".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawBand {
    /// Mean draws per entry, `total / n`.
    pub expected: f64,
    /// Standard deviation of draws per entry.
    pub std_dev: f64,
}

impl DrawBand {
    /// Builds the band for `total` draws over `n` entries with the given variance.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fairpick_core::fairness::DrawBand;
    ///
    /// let band = DrawBand::new(150, 40, 0.25);
    /// assert_eq!(band.expected, 3.75);
    /// assert_eq!(band.lower(), 3.25);
    /// assert_eq!(band.upper(), 4.25);
    /// ```
    pub fn new(total: usize, n: usize, variance: f64) -> Self {
        let expected = if n == 0 { 0.0 } else { total as f64 / n as f64 };
        Self {
            expected,
            std_dev: variance.max(0.0).sqrt(),
        }
    }

    /// `expected - std_dev`.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.expected - self.std_dev
    }

    /// `expected + std_dev`.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.expected + self.std_dev
    }
}
