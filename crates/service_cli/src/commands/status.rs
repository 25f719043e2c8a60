//! Status command implementation
//!
//! Shows how many draws remain overall and per name.

use fairpick_core::types::AbsenteeSet;
use fairpick_optimiser::OptimiserCache;
use fairpick_session::DrawSession;
use tracing::info;

use crate::commands::absentees;
use crate::config::AppConfig;
use crate::store::SessionStore;
use crate::{CliError, Result};

/// One line of the per-name breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatusRow {
    pub number: usize,
    pub name: String,
    pub drawn: usize,
    pub remaining: usize,
    pub absent: bool,
}

/// Per-name drawn and remaining counts, in roster order.
pub(crate) fn status_rows(session: &DrawSession, absent: &AbsenteeSet) -> Vec<StatusRow> {
    let drawn = session.history().counts(session.roster().len());
    session
        .roster()
        .iter()
        .zip(session.remaining_quotas())
        .map(|((index, name), remaining)| StatusRow {
            number: index + 1,
            name: name.to_string(),
            drawn: drawn[index],
            remaining,
            absent: absent.contains(name),
        })
        .collect()
}

/// Run the status command
pub fn run(config: &AppConfig, absent: &[String]) -> Result<()> {
    let absent = absentees(absent, None)?;
    let store = SessionStore::new(config);
    let mut cache = OptimiserCache::new();
    let state = store.load(&mut cache)?;
    let session = state
        .session()
        .ok_or_else(|| CliError::NotPrepared(config.class_name.clone()))?;
    info!("Loaded session for class {}", config.class_name);

    if let Some(result) = session.optimisation() {
        println!(
            "Method: {} (seed={}, variance={:.4})",
            result.family(),
            result.seed(),
            result.variance
        );
    }
    let total = session.pool().len();
    let remaining = state.remaining_count(&AbsenteeSet::none())?;
    println!("Remaining draws: {} / {}", remaining, total);
    if !absent.is_empty() {
        println!(
            "Eligible draws with {} absent: {}",
            absent.len(),
            state.remaining_count(&absent)?
        );
    }

    println!("{:>4}  {:<20} {:>6} {:>9}", "No.", "Name", "Drawn", "Remaining");
    for row in status_rows(session, &absent) {
        let marker = if row.absent { " (absent)" } else { "" };
        println!(
            "{:>4}  {:<20} {:>6} {:>9}{}",
            row.number, row.name, row.drawn, row.remaining, marker
        );
    }
    Ok(())
}
