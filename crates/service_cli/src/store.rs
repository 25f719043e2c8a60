//! On-disk session state for one class.
//!
//! Each CLI invocation is a separate process, so the live session is kept as
//! a snapshot file `{history_dir}/{class}_session.csv` plus a small TOML
//! record of the parameters, strategy and roster it was prepared with, and is
//! restored on every command. Timestamped history exports sit next to it.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use fairpick_core::types::{DrawParams, Roster};
use fairpick_optimiser::{OptimiserCache, PoolStrategy, StrategyKind};
use fairpick_session::{history_file_name, DrawSession, MachineState, Snapshot, SnapshotSettings};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::{CliError, Result};

/// Parameters and roster a session was prepared with.
#[derive(Debug, Serialize)]
struct PreparedWith<'a> {
    sessions: usize,
    picks_per_session: usize,
    class_size: usize,
    strategy: &'static str,
    roster: &'a [String],
}

#[derive(Debug, Deserialize)]
struct PreparedRecord {
    sessions: usize,
    picks_per_session: usize,
    class_size: usize,
    strategy: String,
    #[serde(default)]
    roster: Vec<String>,
}

/// Session files of the configured class.
#[derive(Debug, Clone)]
pub struct SessionStore {
    config: AppConfig,
}

impl SessionStore {
    /// Store for `config.class_name` under `config.history_dir`.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Path of the live session snapshot.
    pub fn state_path(&self) -> PathBuf {
        self.config
            .history_dir
            .join(format!("{}_session.csv", self.config.class_name))
    }

    /// Returns `true` if the class has a prepared session.
    pub fn exists(&self) -> bool {
        self.state_path().exists() && self.record_path().exists()
    }

    /// Roster from the configured roster file, fitted to `class_size`.
    pub fn roster(&self, class_size: usize) -> Result<Option<Roster>> {
        match &self.config.roster_file {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::FileNotFound(path.display().to_string()));
                }
                let text = fs::read_to_string(path)?;
                Ok(Some(Roster::from_lines(&text, class_size)))
            }
            None => Ok(None),
        }
    }

    fn record_path(&self) -> PathBuf {
        self.config
            .history_dir
            .join(format!("{}_session.toml", self.config.class_name))
    }

    /// Restores the live session, regenerating its pool through `cache`.
    pub fn load(&self, cache: &mut OptimiserCache) -> Result<MachineState> {
        if !self.exists() {
            return Err(CliError::NotPrepared(self.config.class_name.clone()));
        }
        let path = self.state_path();
        let record_path = self.record_path();

        let record: PreparedRecord = toml::from_str(&fs::read_to_string(&record_path)?)
            .map_err(|e| CliError::InvalidArgument(format!("{}: {}", record_path.display(), e)))?;
        let prepared = DrawParams::new(record.sessions, record.picks_per_session, record.class_size)?;
        let strategy = StrategyKind::from_name(&record.strategy).ok_or_else(|| {
            CliError::InvalidArgument(format!("Unknown strategy '{}'", record.strategy))
        })?;

        let snapshot = Snapshot::load(&path)?;
        let params = snapshot.settings.params(Some(prepared))?;
        if self.config.params().ok() != Some(params) {
            warn!(
                prepared = ?params,
                "Configuration changed since prepare; using the prepared parameters"
            );
        }

        let bound = (record.roster.len() == params.class_size()).then(|| Roster::new(record.roster));
        let from_file = self.roster(params.class_size())?;

        let mut state = MachineState::new();
        match bound {
            Some(bound) => {
                snapshot.restore(&mut state, Some(bound), Some(prepared), cache, &strategy)?;
                if let Some(roster) = from_file {
                    if state.session().map(|s| s.roster()) != Some(&roster) {
                        info!(path = %path.display(), "Rebinding roster from roster file");
                        state.rebind_roster(roster)?;
                    }
                }
            }
            None => {
                snapshot.restore(&mut state, from_file, Some(prepared), cache, &strategy)?;
            }
        }
        debug!(path = %path.display(), "Session loaded");
        Ok(state)
    }

    fn settings(&self, session: &DrawSession) -> SnapshotSettings {
        let params = session
            .params()
            .or_else(|| self.config.params().ok());
        let mut settings = params.map(SnapshotSettings::from_params).unwrap_or_default();
        settings.sound_on = Some(self.config.sound_on);
        settings.auto_save = Some(self.config.auto_save);
        settings.class_name = Some(self.config.class_name.clone());
        settings
    }

    /// Writes the live session snapshot and the parameters it was prepared with.
    pub fn save(&self, session: &DrawSession) -> Result<PathBuf> {
        fs::create_dir_all(&self.config.history_dir)?;
        let params = match session.params() {
            Some(params) => params,
            None => self.config.params()?,
        };
        let strategy = session
            .optimisation()
            .map_or_else(|| self.config.strategy_kind().name(), |o| o.strategy);
        let record = PreparedWith {
            sessions: params.sessions(),
            picks_per_session: params.picks_per_session(),
            class_size: params.class_size(),
            strategy,
            roster: session.roster().names(),
        };
        let record = toml::to_string(&record)
            .map_err(|e| CliError::InvalidArgument(format!("Cannot encode session record: {}", e)))?;
        fs::write(self.record_path(), record)?;

        let path = self.state_path();
        Snapshot::from_session(session, self.settings(session)).save(&path)?;
        debug!(path = %path.display(), "Session saved");
        Ok(path)
    }

    /// Writes a timestamped history export and returns its path.
    pub fn export_history(&self, session: &DrawSession, at: NaiveDateTime) -> Result<PathBuf> {
        fs::create_dir_all(&self.config.history_dir)?;
        let path = self
            .config
            .history_dir
            .join(history_file_name(&self.config.class_name, at));
        self.export_to(session, &path)?;
        Ok(path)
    }

    /// Writes the history with echoed settings to `path`.
    pub fn export_to(&self, session: &DrawSession, path: &Path) -> Result<()> {
        Snapshot::from_session(session, self.settings(session)).save(path)?;
        info!(path = %path.display(), "History exported");
        Ok(())
    }

    /// Deletes the live session; returns whether one existed.
    pub fn clear(&self) -> Result<bool> {
        let mut existed = false;
        for path in [self.state_path(), self.record_path()] {
            if path.exists() {
                fs::remove_file(&path)?;
                existed = true;
            }
        }
        Ok(existed)
    }
}
