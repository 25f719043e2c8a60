//! CLI configuration management.
//!
//! Settings are read from a TOML file, then overridden by `FAIRPICK_*`
//! environment variables, then by command-line flags.
//!
//! ```toml
//! class_name = "1-A"
//! sessions = 30
//! picks_per_session = 5
//! class_size = 40
//! strategy = "stream"
//! sound_on = false
//! auto_save = true
//! history_dir = "history"
//! roster_file = "rosters/1-A.txt"
//! log_level = "info"
//! ```

use std::path::{Path, PathBuf};

use fairpick_core::types::{DrawParams, ParamsError, MAX_TOTAL_DRAWS};
use fairpick_optimiser::StrategyKind;
use serde::Deserialize;
use thiserror::Error;

/// Application configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Class label; names the session and history files
    pub class_name: String,

    /// Class sessions per year (k)
    pub sessions: usize,

    /// Average picks per session (l)
    pub picks_per_session: usize,

    /// Roster size (n)
    pub class_size: usize,

    /// Pool strategy: "stream" or "shuffle"
    pub strategy: String,

    /// Echoed into snapshots
    pub sound_on: bool,

    /// Write a timestamped history file after every pick
    pub auto_save: bool,

    /// Directory for session and history files
    pub history_dir: PathBuf,

    /// Newline-separated roster
    pub roster_file: Option<PathBuf>,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            class_name: "ClassA".to_string(),
            sessions: 30,
            picks_per_session: 5,
            class_size: 40,
            strategy: "stream".to_string(),
            sound_on: false,
            auto_save: true,
            history_dir: PathBuf::from("history"),
            roster_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(class_name) = lookup("FAIRPICK_CLASS_NAME") {
            self.class_name = class_name;
        }
        if let Some(sessions) = lookup("FAIRPICK_SESSIONS").and_then(|v| v.parse().ok()) {
            self.sessions = sessions;
        }
        if let Some(picks) = lookup("FAIRPICK_PICKS_PER_SESSION").and_then(|v| v.parse().ok()) {
            self.picks_per_session = picks;
        }
        if let Some(class_size) = lookup("FAIRPICK_CLASS_SIZE").and_then(|v| v.parse().ok()) {
            self.class_size = class_size;
        }
        if let Some(strategy) = lookup("FAIRPICK_STRATEGY") {
            self.strategy = strategy;
        }
        if let Some(sound_on) = lookup("FAIRPICK_SOUND_ON").and_then(|v| parse_flag(&v)) {
            self.sound_on = sound_on;
        }
        if let Some(auto_save) = lookup("FAIRPICK_AUTO_SAVE").and_then(|v| parse_flag(&v)) {
            self.auto_save = auto_save;
        }
        if let Some(history_dir) = lookup("FAIRPICK_HISTORY_DIR") {
            self.history_dir = PathBuf::from(history_dir);
        }
        if let Some(roster_file) = lookup("FAIRPICK_ROSTER_FILE") {
            self.roster_file = Some(PathBuf::from(roster_file));
        }
        if let Some(log_level) = lookup("FAIRPICK_LOG_LEVEL") {
            self.log_level = log_level;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if StrategyKind::from_name(&self.strategy).is_none() {
            errors.push(format!(
                "Invalid strategy '{}'. Valid values: [\"stream\", \"shuffle\"]",
                self.strategy
            ));
        }

        for (name, value) in [
            ("sessions", self.sessions),
            ("picks_per_session", self.picks_per_session),
            ("class_size", self.class_size),
        ] {
            if value == 0 {
                errors.push(format!("{} must be greater than 0", name));
            }
        }
        if self.sessions.saturating_mul(self.picks_per_session) > MAX_TOTAL_DRAWS {
            errors.push(format!(
                "sessions x picks_per_session exceeds maximum allowed ({})",
                MAX_TOTAL_DRAWS
            ));
        }

        if self.class_name.trim().is_empty() {
            errors.push("class_name cannot be empty".to_string());
        } else if self.class_name.contains(['/', '\\']) {
            errors.push(format!(
                "class_name '{}' cannot contain path separators",
                self.class_name
            ));
        }

        if self.history_dir.as_os_str().is_empty() {
            errors.push("history_dir cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Validated draw parameters
    pub fn params(&self) -> Result<DrawParams, ParamsError> {
        DrawParams::new(self.sessions, self.picks_per_session, self.class_size)
    }

    /// Configured pool strategy, defaulting to the stream sweep
    pub fn strategy_kind(&self) -> StrategyKind {
        StrategyKind::from_name(&self.strategy).unwrap_or_default()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
