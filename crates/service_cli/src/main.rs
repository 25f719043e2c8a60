//! Fairpick CLI - Fair Random Selection from the Command Line
//!
//! This is the operational entry point for the Fairpick selection engine.
//!
//! # Commands
//!
//! - `fairpick optimise` - Search for the fairest generator and seed
//! - `fairpick prepare` - Prepare a pool for the configured class
//! - `fairpick pick --absent <name>` - Pick the next name
//! - `fairpick status` - Show remaining draws per name
//! - `fairpick history` - Show or export the draw history
//! - `fairpick reset` - Discard the prepared session
//!
//! # Architecture
//!
//! As the service layer, this crate orchestrates `fairpick_core`,
//! `fairpick_optimiser` and `fairpick_session` behind one command-line
//! interface. Session state is kept on disk between invocations.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod store;

pub use error::{CliError, Result};

use config::AppConfig;

/// Fairpick Fair Random Selection CLI
#[derive(Parser)]
#[command(name = "fairpick")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "fairpick.toml")]
    config: PathBuf,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Commands,
}

/// Command-line overrides applied on top of the configuration file.
#[derive(Args, Debug, Default)]
struct Overrides {
    /// Class name
    #[arg(long, global = true)]
    class: Option<String>,

    /// Class sessions per year (k)
    #[arg(short = 'k', long, global = true)]
    sessions: Option<usize>,

    /// Average picks per session (l)
    #[arg(short = 'l', long, global = true)]
    picks: Option<usize>,

    /// Roster size (n)
    #[arg(short = 'n', long, global = true)]
    class_size: Option<usize>,

    /// Pool strategy (stream, shuffle)
    #[arg(short, long, global = true)]
    strategy: Option<String>,

    /// Directory for session and history files
    #[arg(long, global = true)]
    history_dir: Option<PathBuf>,

    /// Newline-separated roster file
    #[arg(short, long, global = true)]
    roster: Option<PathBuf>,
}

impl Overrides {
    fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(class) = self.class {
            config.class_name = class;
        }
        if let Some(sessions) = self.sessions {
            config.sessions = sessions;
        }
        if let Some(picks) = self.picks {
            config.picks_per_session = picks;
        }
        if let Some(class_size) = self.class_size {
            config.class_size = class_size;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(history_dir) = self.history_dir {
            config.history_dir = history_dir;
        }
        if let Some(roster) = self.roster {
            config.roster_file = Some(roster);
        }
        config
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search for the fairest generator and seed without preparing a session
    Optimise {
        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Print the whole pool
        #[arg(long)]
        show_pool: bool,
    },

    /// Prepare a fresh pool for the class, discarding any history
    Prepare,

    /// Pick the next name
    Pick {
        /// Absent name (repeatable)
        #[arg(short, long)]
        absent: Vec<String>,

        /// File of absent names, one per line
        #[arg(long)]
        absent_file: Option<PathBuf>,
    },

    /// Show remaining draws per name
    Status {
        /// Absent name (repeatable)
        #[arg(short, long)]
        absent: Vec<String>,
    },

    /// Show or export the draw history
    History {
        /// Export to this file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Discard the prepared session
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli
        .overrides
        .apply(AppConfig::load_or_default(&cli.config)?.with_env_override());
    config.validate()?;

    // Initialise tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_lowercase()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
        info!("Configuration: {:?}", config);
    }

    match cli.command {
        Commands::Optimise { format, show_pool } => {
            commands::optimise::run(&config, &format, show_pool)
        }
        Commands::Prepare => commands::prepare::run(&config),
        Commands::Pick {
            absent,
            absent_file,
        } => commands::pick::run(&config, &absent, absent_file.as_deref()),
        Commands::Status { absent } => commands::status::run(&config, &absent),
        Commands::History { output } => commands::history::run(&config, output.as_deref()),
        Commands::Reset => commands::reset::run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_pick_with_overrides() {
        let cli = Cli::try_parse_from([
            "fairpick", "--class", "2-B", "-n", "35", "pick", "-a", "Ren", "-a", "Mio",
        ])
        .unwrap();
        let config = cli.overrides.apply(AppConfig::default());
        assert_eq!(config.class_name, "2-B");
        assert_eq!(config.class_size, 35);
        match cli.command {
            Commands::Pick { absent, .. } => assert_eq!(absent, vec!["Ren", "Mio"]),
            _ => panic!("expected pick"),
        }
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["fairpick", "optimise"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("fairpick.toml"));
        assert!(matches!(
            cli.command,
            Commands::Optimise {
                show_pool: false,
                ..
            }
        ));
        assert_eq!(cli.overrides.apply(AppConfig::default()), AppConfig::default());
    }
}
