//! History command implementation
//!
//! Prints the draw history, or exports it as a snapshot CSV that
//! `fairpick` can resume from.

use std::io::{self, Write};
use std::path::Path;

use fairpick_optimiser::OptimiserCache;
use fairpick_session::DrawSession;

use crate::config::AppConfig;
use crate::store::SessionStore;
use crate::{CliError, Result};

/// Run the history command
pub fn run(config: &AppConfig, output: Option<&Path>) -> Result<()> {
    let store = SessionStore::new(config);
    let mut cache = OptimiserCache::new();
    let state = store.load(&mut cache)?;
    let session = state
        .session()
        .ok_or_else(|| CliError::NotPrepared(config.class_name.clone()))?;

    if let Some(path) = output {
        store.export_to(session, path)?;
        println!("History written to {}", path.display());
        return Ok(());
    }

    if session.history().is_empty() {
        println!("No names picked yet.");
        return Ok(());
    }
    write_history(session, io::stdout().lock())
}

/// Writes the history as `number,name` CSV rows.
pub(crate) fn write_history<W: Write>(session: &DrawSession, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["number", "name"])?;
    for &index in session.history().as_slice() {
        let number = (index + 1).to_string();
        csv.write_record([number.as_str(), session.roster().name(index).unwrap_or_default()])?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::pick::pick_once;
    use crate::commands::prepare::prepare_session;
    use crate::commands::test_support::config_in;
    use fairpick_core::types::AbsenteeSet;
    use fairpick_session::Snapshot;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_export_matches_session() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        prepare_session(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..2 {
            pick_once(&config, &AbsenteeSet::none(), &mut rng).unwrap();
        }

        let output = dir.path().join("export.csv");
        run(&config, Some(&output)).unwrap();

        let snapshot = Snapshot::load(&output).unwrap();
        assert_eq!(snapshot.entries.len(), 2);
        assert_eq!(snapshot.settings.class_name.as_deref(), Some("1-A"));
        assert_eq!(snapshot.settings.class_size, Some(3));
    }

    #[test]
    fn test_printed_history_quotes_names() {
        let dir = tempfile::tempdir().unwrap();
        let roster_path = dir.path().join("roster.txt");
        std::fs::write(&roster_path, "Sato, Aoi\nRen \"Ace\"\nMio\n").unwrap();
        let config = AppConfig {
            roster_file: Some(roster_path),
            ..config_in(dir.path())
        };
        let (mut state, _) = prepare_session(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        while state.pick(&AbsenteeSet::none(), &mut rng).unwrap().index().is_some() {}

        let mut out = Vec::new();
        write_history(state.session().unwrap(), &mut out).unwrap();

        let mut reader = csv::Reader::from_reader(out.as_slice());
        let rows: Vec<(usize, String)> = reader
            .records()
            .map(|record| {
                let record = record.unwrap();
                (record[0].parse().unwrap(), record[1].to_string())
            })
            .collect();
        assert_eq!(rows.len(), 6);
        let names = ["Sato, Aoi", "Ren \"Ace\"", "Mio"];
        for (number, name) in rows {
            assert_eq!(name, names[number - 1]);
        }
    }
}
