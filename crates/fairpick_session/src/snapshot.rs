//! CSV history snapshots.
//!
//! A snapshot is one row per historical draw with a 1-based `number` and the
//! drawn `name`, optionally followed by the settings the session ran with:
//!
//! ```text
//! number,name,sound-on,auto-save-on,class-name,k,l,n
//! 3,Mio,true,true,1-A,30,5,40
//! 1,Aoi,true,true,1-A,30,5,40
//! ```
//!
//! The pool itself is not stored. Restoring re-runs the deterministic seed
//! search for the recorded `(k, l, n)` and replays the history against it.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDateTime;
use fairpick_core::types::{DrawParams, Roster, UsedHistory};
use fairpick_optimiser::{OptimisationResult, OptimiserCache, StrategyKind};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::SnapshotError;
use crate::machine::{DrawSession, MachineState};

/// Column headers, in write order.
pub const COLUMNS: [&str; 8] = [
    "number",
    "name",
    "sound-on",
    "auto-save-on",
    "class-name",
    "k",
    "l",
    "n",
];

/// Settings echoed on every snapshot row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SnapshotSettings {
    /// Sound effect toggle.
    pub sound_on: Option<bool>,
    /// Auto-save toggle.
    pub auto_save: Option<bool>,
    /// Class label used in file names.
    pub class_name: Option<String>,
    /// Sessions (`k`).
    pub sessions: Option<usize>,
    /// Picks per session (`l`).
    pub picks_per_session: Option<usize>,
    /// Roster size (`n`).
    pub class_size: Option<usize>,
}

impl SnapshotSettings {
    /// Settings recording `params` and nothing else.
    pub fn from_params(params: DrawParams) -> Self {
        Self {
            sessions: Some(params.sessions()),
            picks_per_session: Some(params.picks_per_session()),
            class_size: Some(params.class_size()),
            ..Self::default()
        }
    }

    /// Resolves `(k, l, n)`, filling gaps from `fallback`.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::MissingParameter` for a value recorded nowhere,
    /// or `SnapshotError::Params` if the values are not positive.
    pub fn params(&self, fallback: Option<DrawParams>) -> Result<DrawParams, SnapshotError> {
        let pick = |recorded: Option<usize>, name: &'static str, from: fn(&DrawParams) -> usize| {
            recorded
                .or_else(|| fallback.as_ref().map(from))
                .ok_or(SnapshotError::MissingParameter { name })
        };
        let sessions = pick(self.sessions, "k", DrawParams::sessions)?;
        let picks = pick(self.picks_per_session, "l", DrawParams::picks_per_session)?;
        let class_size = pick(self.class_size, "n", DrawParams::class_size)?;
        Ok(DrawParams::new(sessions, picks, class_size)?)
    }

    fn cells(&self) -> [String; 6] {
        fn cell<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(ToString::to_string).unwrap_or_default()
        }
        [
            cell(&self.sound_on),
            cell(&self.auto_save),
            cell(&self.class_name),
            cell(&self.sessions),
            cell(&self.picks_per_session),
            cell(&self.class_size),
        ]
    }
}

/// One historical draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotEntry {
    /// Roster index (the CSV stores `index + 1`).
    pub index: usize,
    /// Name recorded for the draw.
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    number: String,
    name: String,
    #[serde(rename = "sound-on", default)]
    sound_on: Option<String>,
    #[serde(rename = "auto-save-on", default)]
    auto_save: Option<String>,
    #[serde(rename = "class-name", default)]
    class_name: Option<String>,
    #[serde(default)]
    k: Option<String>,
    #[serde(default)]
    l: Option<String>,
    #[serde(default)]
    n: Option<String>,
}

/// The draw history plus echoed settings.
///
/// # Examples
///
/// ```rust
/// use fairpick_session::Snapshot;
///
/// let csv = "number,name,k,l,n\n2,Ren,3,2,4\n2,Ren,3,2,4\n4,Sora,3,2,4\n";
/// let snapshot = Snapshot::read_from(csv.as_bytes()).unwrap();
///
/// assert_eq!(snapshot.history().as_slice(), &[1, 1, 3]);
/// assert_eq!(snapshot.settings.class_size, Some(4));
/// assert_eq!(snapshot.roster(4).names(), &["Name1", "Ren", "Name3", "Sora"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Draws, oldest first.
    pub entries: Vec<SnapshotEntry>,
    /// Settings written alongside each row.
    pub settings: SnapshotSettings,
}

impl Snapshot {
    /// Captures the history of `session` with `settings`.
    pub fn from_session(session: &DrawSession, settings: SnapshotSettings) -> Self {
        let entries = session
            .history()
            .as_slice()
            .iter()
            .map(|&index| SnapshotEntry {
                index,
                name: session
                    .roster()
                    .name(index)
                    .map_or_else(|| Roster::placeholder(index), str::to_owned),
            })
            .collect();
        Self { entries, settings }
    }

    /// Used history encoded by the entries.
    pub fn history(&self) -> UsedHistory {
        UsedHistory::from_indices(self.entries.iter().map(|e| e.index).collect())
    }

    /// Roster rebuilt from the recorded names, padded with placeholders to `class_size`.
    ///
    /// Later rows win when the same number carries different names.
    pub fn roster(&self, class_size: usize) -> Roster {
        let mut names: Vec<String> = (0..class_size).map(Roster::placeholder).collect();
        for entry in &self.entries {
            if let Some(slot) = names.get_mut(entry.index) {
                slot.clone_from(&entry.name);
            }
        }
        Roster::new(names)
    }

    /// Writes the snapshot as CSV with a header row.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Csv` or `SnapshotError::Io` if writing fails.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), SnapshotError> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(COLUMNS)?;
        let settings = self.settings.cells();
        for entry in &self.entries {
            let number = (entry.index + 1).to_string();
            csv.write_record(
                [number.as_str(), entry.name.as_str()]
                    .into_iter()
                    .chain(settings.iter().map(String::as_str)),
            )?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Reads a snapshot; only `number` and `name` are required.
    ///
    /// Settings are taken from the first row that records them.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::MissingColumn` if `number` or `name` is absent,
    /// `SnapshotError::InvalidNumber` for a number that is not a positive
    /// integer, and `SnapshotError::InvalidSetting` for unparsable settings.
    pub fn read_from<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = csv.headers()?.clone();
        for column in ["number", "name"] {
            if !headers.iter().any(|h| h == column) {
                return Err(SnapshotError::MissingColumn { column });
            }
        }

        let mut snapshot = Snapshot::default();
        for (i, row) in csv.deserialize::<RawRow>().enumerate() {
            let row = row?;
            let line = i + 1;
            let number = parse_number(&row.number)
                .ok_or_else(|| SnapshotError::InvalidNumber {
                    row: line,
                    value: row.number.clone(),
                })?;
            snapshot.entries.push(SnapshotEntry {
                index: number - 1,
                name: row.name.clone(),
            });
            snapshot.settings.merge_row(&row, line)?;
        }
        Ok(snapshot)
    }

    /// Writes the snapshot to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Io` if the file cannot be created.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        self.write_to(File::create(path)?)
    }

    /// Reads a snapshot from `path`.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Io` if the file cannot be opened, or any error
    /// of [`Snapshot::read_from`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        Self::read_from(File::open(path)?)
    }

    /// Resumes the recorded session in `state`.
    ///
    /// The pool is regenerated by searching `strategy` for the recorded
    /// `(k, l, n)` (gaps filled from `fallback`). The roster is `roster` when
    /// given, otherwise [`Snapshot::roster`]. Every recorded draw must fit the
    /// regenerated pool's quotas.
    ///
    /// # Errors
    ///
    /// Any error leaves `state` untouched:
    /// - `SnapshotError::MissingParameter` / `SnapshotError::Params` for unusable `(k, l, n)`
    /// - `SnapshotError::NumberOutOfRange` for a draw past the roster
    /// - `SnapshotError::Session` for a roster of the wrong size or a failed search
    /// - `SnapshotError::HistoryExceedsPool` if the history overdraws a name
    pub fn restore(
        &self,
        state: &mut MachineState,
        roster: Option<Roster>,
        fallback: Option<DrawParams>,
        cache: &mut OptimiserCache,
        strategy: &StrategyKind,
    ) -> Result<Arc<OptimisationResult>, SnapshotError> {
        let result = self.rebuild(roster, fallback, cache, strategy);
        match result {
            Ok((session, optimisation)) => {
                info!(
                    drawn = session.history().len(),
                    pool = session.pool().len(),
                    "Session restored from snapshot"
                );
                state.install(session);
                Ok(optimisation)
            }
            Err(err) => {
                warn!(error = %err, "Snapshot restore rejected");
                Err(err)
            }
        }
    }

    fn rebuild(
        &self,
        roster: Option<Roster>,
        fallback: Option<DrawParams>,
        cache: &mut OptimiserCache,
        strategy: &StrategyKind,
    ) -> Result<(DrawSession, Arc<OptimisationResult>), SnapshotError> {
        let params = self.settings.params(fallback)?;
        let class_size = params.class_size();

        if let Some((row, entry)) = self
            .entries
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.index >= class_size)
        {
            return Err(SnapshotError::NumberOutOfRange {
                row: row + 1,
                number: entry.index + 1,
                class_size,
            });
        }

        let roster = roster.unwrap_or_else(|| self.roster(class_size));
        if roster.len() != class_size {
            return Err(crate::SessionError::RosterMismatch {
                expected: class_size,
                actual: roster.len(),
            }
            .into());
        }

        let optimisation = cache.get_or_optimise(params, strategy)?;
        let history = self.history();
        let available = optimisation.pool.counts();
        let used = history.counts(class_size);
        if let Some(index) = (0..class_size).find(|&i| used[i] > available[i]) {
            return Err(SnapshotError::HistoryExceedsPool {
                name: roster.name(index).unwrap_or_default().to_string(),
                used: used[index],
                available: available[index],
            });
        }

        let session = DrawSession::new(optimisation.pool.clone(), roster)?
            .with_optimisation(Arc::clone(&optimisation))
            .with_history(history);
        Ok((session, optimisation))
    }
}

impl SnapshotSettings {
    fn merge_row(&mut self, row: &RawRow, line: usize) -> Result<(), SnapshotError> {
        if self.sound_on.is_none() {
            self.sound_on = parse_cell(&row.sound_on, line, "sound-on", parse_flag)?;
        }
        if self.auto_save.is_none() {
            self.auto_save = parse_cell(&row.auto_save, line, "auto-save-on", parse_flag)?;
        }
        if self.class_name.is_none() {
            self.class_name = row
                .class_name
                .as_ref()
                .filter(|s| !s.is_empty())
                .cloned();
        }
        if self.sessions.is_none() {
            self.sessions = parse_cell(&row.k, line, "k", parse_count)?;
        }
        if self.picks_per_session.is_none() {
            self.picks_per_session = parse_cell(&row.l, line, "l", parse_count)?;
        }
        if self.class_size.is_none() {
            self.class_size = parse_cell(&row.n, line, "n", parse_count)?;
        }
        Ok(())
    }
}

fn parse_cell<T>(
    cell: &Option<String>,
    row: usize,
    column: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, SnapshotError> {
    match cell.as_deref() {
        None | Some("") => Ok(None),
        Some(text) => parse(text)
            .map(Some)
            .ok_or_else(|| SnapshotError::invalid_setting(row, column, text)),
    }
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Accepts integral floats such as `30.0`, which spreadsheet exports produce.
fn parse_count(text: &str) -> Option<usize> {
    text.parse::<usize>().ok().or_else(|| {
        let value = text.parse::<f64>().ok()?;
        (value.fract() == 0.0 && value >= 0.0 && value <= usize::MAX as f64).then_some(value as usize)
    })
}

fn parse_number(text: &str) -> Option<usize> {
    parse_count(text).filter(|&n| n > 0)
}

/// File name for a class history exported at `timestamp`: `{class}_{YYYY-MM-DD_HH-MM}_history.csv`.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use fairpick_session::history_file_name;
///
/// let at = NaiveDate::from_ymd_opt(2024, 4, 8).unwrap().and_hms_opt(9, 5, 0).unwrap();
/// assert_eq!(history_file_name("1-A", at), "1-A_2024-04-08_09-05_history.csv");
/// ```
pub fn history_file_name(class_name: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_{}_history.csv",
        class_name,
        timestamp.format("%Y-%m-%d_%H-%M")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairpick_core::types::AbsenteeSet;
    use fairpick_optimiser::{SeedRange, ShuffleStrategy};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tiny() -> StrategyKind {
        StrategyKind::Shuffle(ShuffleStrategy::new(SeedRange::new(0, 9, 1)))
    }

    #[test]
    fn test_missing_required_columns() {
        let err = Snapshot::read_from("name\nAoi\n".as_bytes()).unwrap_err();
        assert!(matches!(err, SnapshotError::MissingColumn { column: "number" }));

        let err = Snapshot::read_from("number,k\n1,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, SnapshotError::MissingColumn { column: "name" }));
    }

    #[test]
    fn test_invalid_numbers() {
        for bad in ["0", "-1", "one", "1.5"] {
            let csv = format!("number,name\n{bad},Aoi\n");
            let err = Snapshot::read_from(csv.as_bytes()).unwrap_err();
            assert!(
                matches!(err, SnapshotError::InvalidNumber { row: 1, .. }),
                "{bad} accepted"
            );
        }
    }

    #[test]
    fn test_settings_parse_spreadsheet_values() {
        let csv = "number,name,sound-on,auto-save-on,class-name,k,l,n\n1,Aoi,True,False,2-B,30.0,5,40\n";
        let snapshot = Snapshot::read_from(csv.as_bytes()).unwrap();
        assert_eq!(
            snapshot.settings,
            SnapshotSettings {
                sound_on: Some(true),
                auto_save: Some(false),
                class_name: Some("2-B".to_string()),
                sessions: Some(30),
                picks_per_session: Some(5),
                class_size: Some(40),
            }
        );

        let err = Snapshot::read_from("number,name,k\n1,Aoi,many\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::InvalidSetting { column: "k", .. }
        ));
    }

    #[test]
    fn test_write_then_read_keeps_history_and_settings() {
        let mut state = MachineState::new();
        let mut cache = OptimiserCache::new();
        let params = DrawParams::new(2, 3, 3).unwrap();
        state
            .prepare_with(&mut cache, &tiny(), params, Roster::new(["Aoi", "Ren", "Mio"]))
            .unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..4 {
            state.pick(&AbsenteeSet::none(), &mut rng).unwrap();
        }

        let mut settings = SnapshotSettings::from_params(params);
        settings.sound_on = Some(true);
        settings.class_name = Some("1-A".to_string());
        let session = state.session().unwrap();
        let snapshot = Snapshot::from_session(session, settings.clone());

        let mut buffer = Vec::new();
        snapshot.write_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.starts_with("number,name,sound-on,auto-save-on,class-name,k,l,n\n"));

        let read = Snapshot::read_from(buffer.as_slice()).unwrap();
        assert_eq!(read.history(), *session.history());
        assert_eq!(read.settings, settings);
    }

    #[test]
    fn test_empty_history_writes_header_only() {
        let mut buffer = Vec::new();
        Snapshot::default().write_to(&mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "number,name,sound-on,auto-save-on,class-name,k,l,n\n"
        );
    }

    #[test]
    fn test_params_fall_back_per_field() {
        let settings = SnapshotSettings {
            class_size: Some(12),
            ..SnapshotSettings::default()
        };
        let fallback = DrawParams::new(10, 2, 40).unwrap();
        assert_eq!(
            settings.params(Some(fallback)).unwrap(),
            DrawParams::new(10, 2, 12).unwrap()
        );
        assert!(matches!(
            settings.params(None),
            Err(SnapshotError::MissingParameter { name: "k" })
        ));
    }

    #[test]
    fn test_restore_rejects_overdrawn_history() {
        // 3 draws over 3 names: every name appears once in the pool
        let csv = "number,name,k,l,n\n1,A,1,3,3\n1,A,1,3,3\n";
        let snapshot = Snapshot::read_from(csv.as_bytes()).unwrap();
        let mut state = MachineState::new();
        let mut cache = OptimiserCache::new();

        let err = snapshot
            .restore(&mut state, None, None, &mut cache, &tiny())
            .unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::HistoryExceedsPool {
                used: 2,
                available: 1,
                ..
            }
        ));
        assert!(!state.is_ready());
    }

    #[test]
    fn test_failed_restore_keeps_prior_state() {
        let mut state = MachineState::new();
        let mut cache = OptimiserCache::new();
        state
            .prepare_indices(vec![0, 1, 1], Roster::new(["X", "Y"]))
            .unwrap();

        let snapshot = Snapshot::read_from("number,name,k,l,n\n5,E,1,2,3\n".as_bytes()).unwrap();
        let err = snapshot
            .restore(&mut state, None, None, &mut cache, &tiny())
            .unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::NumberOutOfRange {
                row: 1,
                number: 5,
                class_size: 3
            }
        ));
        assert_eq!(state.session().unwrap().roster().names(), &["X", "Y"]);
    }
}
