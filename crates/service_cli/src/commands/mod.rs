//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod history;
pub mod optimise;
pub mod pick;
pub mod prepare;
pub mod reset;
pub mod status;

use std::fs;
use std::path::Path;

use fairpick_core::types::AbsenteeSet;

use crate::{CliError, Result};

/// Absentees from repeated `--absent` flags plus an optional file.
pub(crate) fn absentees(names: &[String], file: Option<&Path>) -> Result<AbsenteeSet> {
    let mut text = names.join("\n");
    if let Some(path) = file {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        text.push('\n');
        text.push_str(&fs::read_to_string(path)?);
    }
    Ok(AbsenteeSet::from_lines(&text))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use crate::config::AppConfig;

    /// Small shuffle-strategy class rooted in `dir`.
    pub(crate) fn config_in(dir: &Path) -> AppConfig {
        AppConfig {
            class_name: "1-A".to_string(),
            sessions: 2,
            picks_per_session: 3,
            class_size: 3,
            strategy: "shuffle".to_string(),
            auto_save: false,
            history_dir: dir.to_path_buf(),
            ..AppConfig::default()
        }
    }
}
