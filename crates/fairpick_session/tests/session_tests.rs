//! Integration tests for draw sessions and snapshot round trips.

use fairpick_core::fairness::evaluate;
use fairpick_core::types::{AbsenteeSet, DrawParams, Roster};
use fairpick_optimiser::{OptimiserCache, StrategyKind};
use fairpick_session::{MachineState, PickOutcome, Snapshot, SnapshotError, SnapshotSettings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

// ============================================================================
// Restore Scenarios
// ============================================================================

/// numbers [1, 1, 2] against roster A, B, C resume as history [0, 0, 1].
#[test]
fn test_restore_reconstructs_history_and_pool() {
    let csv = "number,name,k,l,n\n1,A,2,3,3\n1,A,2,3,3\n2,B,2,3,3\n";
    let snapshot = Snapshot::read_from(csv.as_bytes()).unwrap();
    let mut cache = OptimiserCache::new();
    let mut state = MachineState::new();
    let strategy = StrategyKind::default();

    let result = snapshot
        .restore(
            &mut state,
            Some(Roster::new(["A", "B", "C"])),
            None,
            &mut cache,
            &strategy,
        )
        .unwrap();

    let session = state.session().unwrap();
    assert_eq!(session.history().as_slice(), &[0, 0, 1]);
    assert_eq!(session.roster().names(), &["A", "B", "C"]);

    // the regenerated pool reproduces the recorded variance
    let raw = result.candidate.generate(6, 3);
    assert_eq!(evaluate(&raw, 3).variance, result.variance);
    assert_eq!(session.pool(), &result.pool);

    // a fresh search for the same parameters agrees
    let fresh = fairpick_optimiser::optimise(2, 3, 3).unwrap();
    assert_eq!(fresh.candidate, result.candidate);
    assert_eq!(fresh.variance, result.variance);

    // remaining quota: pool counts [2, 2, 2] minus history
    assert_eq!(session.remaining_quotas(), vec![0, 1, 2]);
}

#[test]
fn test_restore_rejects_roster_of_wrong_size() {
    let csv = "number,name,k,l,n\n1,A,2,3,3\n";
    let snapshot = Snapshot::read_from(csv.as_bytes()).unwrap();
    let mut cache = OptimiserCache::new();
    let mut state = MachineState::new();

    let err = snapshot
        .restore(
            &mut state,
            Some(Roster::new(["A", "B"])),
            None,
            &mut cache,
            &StrategyKind::shuffle(),
        )
        .unwrap_err();
    assert!(matches!(err, SnapshotError::Session(_)));
    assert!(!state.is_ready());
}

#[test]
fn test_restore_without_settings_needs_fallback() {
    let snapshot = Snapshot::read_from("number,name\n2,Ren\n".as_bytes()).unwrap();
    let mut cache = OptimiserCache::new();
    let mut state = MachineState::new();

    let err = snapshot
        .restore(&mut state, None, None, &mut cache, &StrategyKind::shuffle())
        .unwrap_err();
    assert!(matches!(err, SnapshotError::MissingParameter { name: "k" }));

    let fallback = DrawParams::new(2, 2, 3).unwrap();
    snapshot
        .restore(&mut state, None, Some(fallback), &mut cache, &StrategyKind::shuffle())
        .unwrap();
    let session = state.session().unwrap();
    assert_eq!(session.roster().names(), &["Name1", "Ren", "Name3"]);
    assert_eq!(session.history().len(), 1);
}

// ============================================================================
// File Round Trip
// ============================================================================

/// Prepare, pick, save, then resume in a new machine and keep picking.
#[test]
fn test_resume_from_saved_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("1-A_session.csv");
    let params = DrawParams::new(3, 2, 4).unwrap();
    let roster = Roster::new(["Aoi", "Ren", "Mio", "Sora"]);
    let strategy = StrategyKind::shuffle();
    let mut rng = StdRng::seed_from_u64(11);

    let mut cache = OptimiserCache::new();
    let mut state = MachineState::new();
    state
        .prepare_with(&mut cache, &strategy, params, roster.clone())
        .unwrap();
    for _ in 0..3 {
        state.pick(&AbsenteeSet::none(), &mut rng).unwrap();
    }
    let before = state.session().unwrap().clone();
    let mut settings = SnapshotSettings::from_params(params);
    settings.class_name = Some("1-A".to_string());
    Snapshot::from_session(&before, settings).save(&path).unwrap();

    let mut resumed = MachineState::new();
    let mut other_cache = OptimiserCache::new();
    Snapshot::load(&path)
        .unwrap()
        .restore(&mut resumed, None, None, &mut other_cache, &strategy)
        .unwrap();

    let after = resumed.session().unwrap();
    assert_eq!(after.history(), before.history());
    assert_eq!(after.pool(), before.pool());
    assert_eq!(after.remaining_quotas(), before.remaining_quotas());

    // exactly the remaining three picks are left
    for _ in 0..3 {
        assert!(matches!(
            resumed.pick(&AbsenteeSet::none(), &mut rng).unwrap(),
            PickOutcome::Picked { .. }
        ));
    }
    assert_eq!(
        resumed.pick(&AbsenteeSet::none(), &mut rng).unwrap(),
        PickOutcome::NoCandidate
    );
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = Snapshot::load(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, SnapshotError::Io(_)));
}
