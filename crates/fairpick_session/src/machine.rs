//! Pool consumption state machine.
//!
//! A [`MachineState`] is either `Empty` or `Ready` with a [`DrawSession`]:
//! the pool, the roster it indexes and the draws made so far. Each pick
//! chooses uniformly from the multiset of remaining draws owed to present
//! names, so a name with more remaining quota is proportionally more likely.
//! When nothing is owed to any present name the pick reports
//! [`PickOutcome::NoCandidate`] and the machine stays `Ready`.
//!
//! Quota belonging to an absent name is not redistributed: a name absent for
//! every remaining pick forfeits its draws.

use std::sync::Arc;

use fairpick_core::types::{AbsenteeSet, DrawParams, Pool, Roster, UsedHistory};
use fairpick_optimiser::{OptimisationResult, OptimiserCache, StrategyKind};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::SessionError;

/// Result of one pick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickOutcome {
    /// A roster entry was drawn and appended to the history.
    Picked {
        /// Roster index.
        index: usize,
        /// Name at that index.
        name: String,
    },
    /// No present name has remaining quota; nothing was recorded.
    NoCandidate,
}

impl PickOutcome {
    /// Picked index, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            PickOutcome::Picked { index, .. } => Some(*index),
            PickOutcome::NoCandidate => None,
        }
    }
}

/// A prepared pool bound to a roster, with the draws made so far.
#[derive(Clone, Debug)]
pub struct DrawSession {
    pool: Pool,
    pool_counts: Vec<usize>,
    roster: Roster,
    history: UsedHistory,
    optimisation: Option<Arc<OptimisationResult>>,
}

impl DrawSession {
    pub(crate) fn new(pool: Pool, roster: Roster) -> Result<Self, SessionError> {
        if roster.len() != pool.class_size() {
            return Err(SessionError::RosterMismatch {
                expected: pool.class_size(),
                actual: roster.len(),
            });
        }
        Ok(Self {
            pool_counts: pool.counts(),
            pool,
            roster,
            history: UsedHistory::new(),
            optimisation: None,
        })
    }

    pub(crate) fn with_optimisation(mut self, optimisation: Arc<OptimisationResult>) -> Self {
        self.optimisation = Some(optimisation);
        self
    }

    pub(crate) fn with_history(mut self, history: UsedHistory) -> Self {
        self.history = history;
        self
    }

    /// The pool being consumed.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// The bound roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Draws made so far, in order.
    pub fn history(&self) -> &UsedHistory {
        &self.history
    }

    /// Search result the pool came from, when prepared through the optimiser.
    pub fn optimisation(&self) -> Option<&Arc<OptimisationResult>> {
        self.optimisation.as_ref()
    }

    /// Parameters the pool was optimised for, when known.
    pub fn params(&self) -> Option<DrawParams> {
        self.optimisation.as_ref().map(|o| o.params)
    }

    /// Draws still owed to `index`: occurrences in the pool minus occurrences in the history.
    pub fn remaining_quota(&self, index: usize) -> usize {
        let used = self
            .history
            .as_slice()
            .iter()
            .filter(|&&i| i == index)
            .count();
        self.pool_counts
            .get(index)
            .map_or(0, |&total| total.saturating_sub(used))
    }

    /// Remaining quota of every roster index.
    pub fn remaining_quotas(&self) -> Vec<usize> {
        let used = self.history.counts(self.pool.class_size());
        self.pool_counts
            .iter()
            .zip(used)
            .map(|(&total, used)| total.saturating_sub(used))
            .collect()
    }

    fn weights(&self, absentees: &AbsenteeSet) -> Vec<usize> {
        self.remaining_quotas()
            .into_iter()
            .zip(self.roster.names())
            .map(|(quota, name)| if absentees.contains(name) { 0 } else { quota })
            .collect()
    }

    /// Size of the candidate multiset for the next pick.
    pub fn remaining_count(&self, absentees: &AbsenteeSet) -> usize {
        self.weights(absentees).iter().sum()
    }

    /// Draws one index uniformly from the candidate multiset.
    pub fn pick<R: Rng + ?Sized>(&mut self, absentees: &AbsenteeSet, rng: &mut R) -> PickOutcome {
        let weights = self.weights(absentees);
        let total: usize = weights.iter().sum();
        if total == 0 {
            warn!(
                drawn = self.history.len(),
                absentees = absentees.len(),
                "No eligible candidate remains"
            );
            return PickOutcome::NoCandidate;
        }

        let mut ticket = rng.gen_range(0..total);
        let mut chosen = 0;
        for (index, &weight) in weights.iter().enumerate() {
            if ticket < weight {
                chosen = index;
                break;
            }
            ticket -= weight;
        }

        self.history.record(chosen);
        let name = self.roster.name(chosen).unwrap_or_default().to_string();
        debug!(index = chosen, name = %name, candidates = total, "Picked");
        PickOutcome::Picked {
            index: chosen,
            name,
        }
    }
}

/// Caller-owned state of the draw machine.
///
/// # Examples
///
/// ```rust
/// use fairpick_core::types::{AbsenteeSet, Pool, Roster};
/// use fairpick_session::{MachineState, PickOutcome};
///
/// let mut state = MachineState::new();
/// let pool = Pool::new(vec![0, 0, 1, 1, 2, 2], 3).unwrap();
/// state.prepare(pool, Roster::new(["A", "B", "C"])).unwrap();
///
/// let absent: AbsenteeSet = ["B"].into_iter().collect();
/// let mut rng = rand::thread_rng();
/// for _ in 0..4 {
///     let outcome = state.pick(&absent, &mut rng).unwrap();
///     assert_ne!(outcome.index(), Some(1));
/// }
/// assert_eq!(state.pick(&absent, &mut rng).unwrap(), PickOutcome::NoCandidate);
/// assert_eq!(state.remaining_count(&AbsenteeSet::none()).unwrap(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub enum MachineState {
    /// No pool.
    #[default]
    Empty,
    /// A pool is bound and may be drawn from.
    Ready(DrawSession),
}

impl MachineState {
    /// Creates an empty machine.
    pub fn new() -> Self {
        Self::Empty
    }

    /// Returns `true` once a pool is prepared.
    pub fn is_ready(&self) -> bool {
        matches!(self, MachineState::Ready(_))
    }

    /// The active session, if prepared.
    pub fn session(&self) -> Option<&DrawSession> {
        match self {
            MachineState::Ready(session) => Some(session),
            MachineState::Empty => None,
        }
    }

    fn session_mut(&mut self) -> Result<&mut DrawSession, SessionError> {
        match self {
            MachineState::Ready(session) => Ok(session),
            MachineState::Empty => Err(SessionError::NotPrepared),
        }
    }

    /// Binds `pool` and `roster`, clearing any previous history.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::RosterMismatch` if the roster size differs from
    /// the pool's class size; the machine is left unchanged.
    pub fn prepare(&mut self, pool: Pool, roster: Roster) -> Result<&DrawSession, SessionError> {
        let session = DrawSession::new(pool, roster)?;
        info!(
            pool = session.pool.len(),
            class_size = session.roster.len(),
            "Pool prepared"
        );
        self.install(session);
        self.session().ok_or(SessionError::NotPrepared)
    }

    /// Builds a pool from raw indices and prepares it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::PoolOutOfRange` if an index is not below the
    /// roster size.
    pub fn prepare_indices(
        &mut self,
        indices: Vec<usize>,
        roster: Roster,
    ) -> Result<&DrawSession, SessionError> {
        let pool = Pool::new(indices, roster.len())?;
        self.prepare(pool, roster)
    }

    /// Runs (or recalls) the seed search for `params` and prepares its pool.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::RosterMismatch` if the roster size is not
    /// `params.class_size()`, or `SessionError::Optimiser` if the search fails.
    pub fn prepare_with(
        &mut self,
        cache: &mut OptimiserCache,
        strategy: &StrategyKind,
        params: DrawParams,
        roster: Roster,
    ) -> Result<Arc<OptimisationResult>, SessionError> {
        if roster.len() != params.class_size() {
            return Err(SessionError::RosterMismatch {
                expected: params.class_size(),
                actual: roster.len(),
            });
        }
        let result = cache.get_or_optimise(params, strategy)?;
        let session =
            DrawSession::new(result.pool.clone(), roster)?.with_optimisation(Arc::clone(&result));
        info!(
            family = %result.candidate.family,
            seed = result.candidate.seed,
            variance = result.variance,
            pool = session.pool.len(),
            "Pool prepared from optimiser"
        );
        self.install(session);
        Ok(result)
    }

    pub(crate) fn install(&mut self, session: DrawSession) {
        *self = MachineState::Ready(session);
    }

    /// Replaces the roster of a live pool, keeping the history.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotPrepared` on an empty machine, or
    /// `SessionError::RosterMismatch` if the size changed.
    pub fn rebind_roster(&mut self, roster: Roster) -> Result<(), SessionError> {
        let session = self.session_mut()?;
        if roster.len() != session.roster.len() {
            return Err(SessionError::RosterMismatch {
                expected: session.roster.len(),
                actual: roster.len(),
            });
        }
        session.roster = roster;
        Ok(())
    }

    /// Draws the next name.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotPrepared` on an empty machine.
    pub fn pick<R: Rng + ?Sized>(
        &mut self,
        absentees: &AbsenteeSet,
        rng: &mut R,
    ) -> Result<PickOutcome, SessionError> {
        Ok(self.session_mut()?.pick(absentees, rng))
    }

    /// Size of the candidate multiset for the next pick.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotPrepared` on an empty machine.
    pub fn remaining_count(&self, absentees: &AbsenteeSet) -> Result<usize, SessionError> {
        self.session()
            .map(|session| session.remaining_count(absentees))
            .ok_or(SessionError::NotPrepared)
    }

    /// Discards the pool, roster and history.
    pub fn reset(&mut self) {
        if self.is_ready() {
            info!("Session reset");
        }
        *self = MachineState::Empty;
    }
}
