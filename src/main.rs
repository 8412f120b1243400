//! Binary entry point that glues the configured store backend to the TUI:
//! parse the command line, build the teacher registry, bring up the store
//! (in-memory or SQLite), and drive the Ratatui event loop until the user
//! exits.
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use timetable_manager::{run_app, App, MemoryStore, SqliteStore, TeacherRegistry, TimetableStore};

/// Weekly timetable manager for the terminal.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Keep the timetable in memory only; nothing is written to disk.
    #[arg(long)]
    ephemeral: bool,

    /// Path to the SQLite database
    /// (defaults to ~/.timetable-manager/timetable.sqlite).
    #[arg(long, value_name = "PATH", conflicts_with = "ephemeral")]
    db_path: Option<PathBuf>,

    /// JSON file mapping each teacher to their eligible subjects.
    #[arg(long, value_name = "PATH")]
    registry: Option<PathBuf>,
}

/// Returning a `Result` bubbles fatal initialization problems (an unreadable
/// registry file, an unwritable data directory) to the terminal instead of
/// crashing silently.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let registry = match &cli.registry {
        Some(path) => TeacherRegistry::from_json_file(path)?,
        None => TeacherRegistry::default(),
    };

    let store: Box<dyn TimetableStore> = if cli.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        match &cli.db_path {
            Some(path) => Box::new(SqliteStore::open(path)?),
            None => Box::new(SqliteStore::open_default()?),
        }
    };

    let mut app = App::new(store, registry);
    run_app(&mut app)
}
