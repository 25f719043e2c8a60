//! Pick command implementation
//!
//! Restores the class session, draws the next name and saves the session.
//! With auto-save on, a timestamped history file is written as well.

use std::path::Path;

use chrono::Local;
use fairpick_core::types::AbsenteeSet;
use fairpick_optimiser::OptimiserCache;
use fairpick_session::PickOutcome;
use rand::Rng;
use tracing::info;

use crate::commands::absentees;
use crate::config::AppConfig;
use crate::store::SessionStore;
use crate::{CliError, Result};

/// Restores the session, picks once and persists the result.
pub(crate) fn pick_once<R: Rng + ?Sized>(
    config: &AppConfig,
    absent: &AbsenteeSet,
    rng: &mut R,
) -> Result<PickOutcome> {
    let store = SessionStore::new(config);
    let mut cache = OptimiserCache::new();
    let mut state = store.load(&mut cache)?;

    let outcome = state.pick(absent, rng)?;
    if let PickOutcome::Picked { .. } = outcome {
        let session = state
            .session()
            .ok_or_else(|| CliError::NotPrepared(config.class_name.clone()))?;
        store.save(session)?;
        if config.auto_save {
            store.export_history(session, Local::now().naive_local())?;
        }
    }
    Ok(outcome)
}

/// Run the pick command
pub fn run(config: &AppConfig, absent: &[String], absent_file: Option<&Path>) -> Result<()> {
    let absent = absentees(absent, absent_file)?;
    if !absent.is_empty() {
        info!("  Absent: {}", absent.len());
    }

    match pick_once(config, &absent, &mut rand::thread_rng())? {
        PickOutcome::Picked { index, name } => println!("{} : {}", index + 1, name),
        PickOutcome::NoCandidate => {
            println!("All draws for the present names are complete.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::prepare::prepare_session;
    use crate::commands::test_support::config_in;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_picks_persist_between_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        prepare_session(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(17);

        let mut drawn: Vec<usize> = (0..6)
            .map(|_| {
                pick_once(&config, &AbsenteeSet::none(), &mut rng)
                    .unwrap()
                    .index()
                    .unwrap()
            })
            .collect();
        drawn.sort_unstable();
        assert_eq!(drawn, vec![0, 0, 1, 1, 2, 2]);

        assert_eq!(
            pick_once(&config, &AbsenteeSet::none(), &mut rng).unwrap(),
            PickOutcome::NoCandidate
        );
    }

    #[test]
    fn test_absent_name_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        prepare_session(&config).unwrap();
        let absent: AbsenteeSet = ["Name2"].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..4 {
            let index = pick_once(&config, &absent, &mut rng).unwrap().index();
            assert_ne!(index, Some(1));
        }
        assert_eq!(
            pick_once(&config, &absent, &mut rng).unwrap(),
            PickOutcome::NoCandidate
        );
    }

    #[test]
    fn test_absent_name_from_prepared_roster_is_skipped_after_reload() {
        let dir = tempfile::tempdir().unwrap();
        let roster_path = dir.path().join("roster.txt");
        std::fs::write(&roster_path, "Aoi\nRen\nMio\n").unwrap();
        prepare_session(&AppConfig {
            roster_file: Some(roster_path),
            ..config_in(dir.path())
        })
        .unwrap();

        // later invocations carry no roster file
        let config = config_in(dir.path());
        let absent: AbsenteeSet = ["Ren"].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(11);
        let mut hits = 0;
        for _ in 0..6 {
            match pick_once(&config, &absent, &mut rng).unwrap() {
                PickOutcome::Picked { name, .. } => {
                    assert_ne!(name, "Name2");
                    if name == "Ren" {
                        hits += 1;
                    }
                }
                PickOutcome::NoCandidate => break,
            }
        }
        assert_eq!(hits, 0);
    }

    #[test]
    fn test_auto_save_writes_history_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            auto_save: true,
            ..config_in(dir.path())
        };
        prepare_session(&config).unwrap();
        pick_once(&config, &AbsenteeSet::none(), &mut StdRng::seed_from_u64(1)).unwrap();

        let exports: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with("_history.csv"))
            .collect();
        assert_eq!(exports.len(), 1);
        assert!(exports[0].starts_with("1-A_"));
    }

    #[test]
    fn test_pick_before_prepare() {
        let dir = tempfile::tempdir().unwrap();
        let err = pick_once(
            &config_in(dir.path()),
            &AbsenteeSet::none(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::NotPrepared(_)));
    }
}
