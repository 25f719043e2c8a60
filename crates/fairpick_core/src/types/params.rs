//! Draw parameters validated at the boundary.

#[cfg(feature = "serde")]
use serde::Serialize;

use super::error::ParamsError;

/// Maximum supported total draws (`k * l`).
pub const MAX_TOTAL_DRAWS: usize = 1_000_000;

/// Validated draw parameters: `k` sessions, `l` picks per session, `n` roster size.
///
/// All three are positive; the core never sees a zero count.
///
/// # Examples
///
/// ```rust
/// use fairpick_core::types::DrawParams;
///
/// let params = DrawParams::new(30, 5, 40).unwrap();
/// assert_eq!(params.total_draws(), 150);
/// assert!(DrawParams::new(0, 5, 40).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DrawParams {
    sessions: usize,
    picks_per_session: usize,
    class_size: usize,
}

impl DrawParams {
    /// Validates and creates draw parameters.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError` if:
    /// - any of `sessions`, `picks_per_session`, `class_size` is zero
    /// - `sessions * picks_per_session` exceeds [`MAX_TOTAL_DRAWS`]
    pub fn new(
        sessions: usize,
        picks_per_session: usize,
        class_size: usize,
    ) -> Result<Self, ParamsError> {
        if sessions == 0 {
            return Err(ParamsError::NonPositive { name: "sessions" });
        }
        if picks_per_session == 0 {
            return Err(ParamsError::NonPositive {
                name: "picks_per_session",
            });
        }
        if class_size == 0 {
            return Err(ParamsError::NonPositive { name: "class_size" });
        }

        match sessions.checked_mul(picks_per_session) {
            Some(total) if total <= MAX_TOTAL_DRAWS => Ok(Self {
                sessions,
                picks_per_session,
                class_size,
            }),
            _ => Err(ParamsError::TooManyDraws {
                sessions,
                picks_per_session,
                max: MAX_TOTAL_DRAWS,
            }),
        }
    }

    /// Number of class sessions (`k`).
    #[inline]
    pub fn sessions(&self) -> usize {
        self.sessions
    }

    /// Picks per session (`l`).
    #[inline]
    pub fn picks_per_session(&self) -> usize {
        self.picks_per_session
    }

    /// Roster size (`n`).
    #[inline]
    pub fn class_size(&self) -> usize {
        self.class_size
    }

    /// Total draws `k * l`, which is also the pool length.
    #[inline]
    pub fn total_draws(&self) -> usize {
        self.sessions * self.picks_per_session
    }

    /// Returns a copy with a different roster size.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::NonPositive` if `class_size` is zero.
    pub fn with_class_size(self, class_size: usize) -> Result<Self, ParamsError> {
        Self::new(self.sessions, self.picks_per_session, class_size)
    }
}
