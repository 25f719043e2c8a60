//! Prepare command implementation
//!
//! Searches the fairest pool for the configured class, binds the roster and
//! saves a fresh session with an empty history.

use std::sync::Arc;

use fairpick_core::types::Roster;
use fairpick_optimiser::{OptimisationResult, OptimiserCache};
use fairpick_session::MachineState;
use tracing::info;

use crate::config::AppConfig;
use crate::store::SessionStore;
use crate::Result;

/// Prepares and saves a session; returns the machine and the search result.
pub(crate) fn prepare_session(config: &AppConfig) -> Result<(MachineState, Arc<OptimisationResult>)> {
    let params = config.params()?;
    let store = SessionStore::new(config);
    let roster = store
        .roster(params.class_size())?
        .unwrap_or_else(|| Roster::from_lines("", params.class_size()));

    let mut cache = OptimiserCache::new();
    let mut state = MachineState::new();
    let result = state.prepare_with(&mut cache, &config.strategy_kind(), params, roster)?;

    if let Some(session) = state.session() {
        let path = store.save(session)?;
        info!(class = %config.class_name, path = %path.display(), "Session prepared");
    }
    Ok((state, result))
}

/// Run the prepare command
pub fn run(config: &AppConfig) -> Result<()> {
    info!("Preparing class {}...", config.class_name);
    let (state, result) = prepare_session(config)?;
    let band = result.band();

    println!(
        "Method: {} (seed={}, std dev={:.2})",
        result.family(),
        result.seed(),
        band.std_dev
    );
    println!(
        "Each name will be picked about {:.2} to {:.2} times.",
        band.lower(),
        band.upper()
    );
    if let Some(session) = state.session() {
        println!("Members:");
        for line in session.roster().numbered() {
            println!("  {}", line);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::config_in;
    use std::fs;

    #[test]
    fn test_prepare_uses_roster_file() {
        let dir = tempfile::tempdir().unwrap();
        let roster_path = dir.path().join("roster.txt");
        fs::write(&roster_path, "Aoi\nRen\n").unwrap();
        let config = AppConfig {
            roster_file: Some(roster_path),
            ..config_in(dir.path())
        };

        let (state, result) = prepare_session(&config).unwrap();
        let session = state.session().unwrap();
        assert_eq!(session.roster().names(), &["Aoi", "Ren", "Name3"]);
        assert!(session.history().is_empty());
        assert_eq!(result.pool.len(), 6);
        assert!(SessionStore::new(&config).exists());
    }

    #[test]
    fn test_prepare_rejects_invalid_params() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            class_size: 0,
            ..config_in(dir.path())
        };
        assert!(matches!(
            prepare_session(&config),
            Err(crate::CliError::Params(_))
        ));
    }
}
