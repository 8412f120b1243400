//! SQLite-backed store. The database is the source of truth: the conflict
//! check always queries it directly, and mutations write the row before the
//! in-memory cache is touched, so a storage failure never leaves the two views
//! disagreeing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::{params, Connection};

use crate::models::{Day, Entry, EntryKey};

use super::{StoreError, TimetableStore};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".timetable-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "timetable.sqlite";

/// Persistent backend. `entries` caches the table contents in row order so
/// rendering and teacher filtering never re-query; every decision that matters
/// (conflicts, deletes) goes to the database.
pub struct SqliteStore {
    conn: Connection,
    entries: Vec<Entry>,
}

impl SqliteStore {
    /// Open the database at its default home-directory location, creating the
    /// data directory and schema on first run.
    pub fn open_default() -> Result<Self> {
        Self::open(&default_db_path()?)
    }

    /// Open (or create) the database at an explicit path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }
        let conn = Connection::open(path).context("failed to open SQLite database")?;
        Self::from_connection(conn)
    }

    /// Build a store over an existing connection: run lazy schema setup, then
    /// hydrate the cache from whatever rows are already present.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        ensure_schema(&conn)?;
        let entries = fetch_entries(&conn)?;
        Ok(Self { conn, entries })
    }
}

/// Create the timetable table if this is a fresh database.
fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS timetable (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            day TEXT,
            time TEXT,
            teacher TEXT,
            subject TEXT
        )",
        [],
    )
    .context("failed to create timetable table")?;
    Ok(())
}

/// Load every row in primary-key order, which matches insertion order.
fn fetch_entries(conn: &Connection) -> Result<Vec<Entry>> {
    let mut stmt = conn
        .prepare("SELECT day, time, teacher, subject FROM timetable ORDER BY id")
        .context("failed to prepare timetable query")?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })
        .context("failed to load timetable rows")?;

    let mut entries = Vec::new();
    for row in rows {
        let (day, time, teacher, subject) = row.context("failed to read timetable row")?;
        let day = Day::parse(&day)
            .ok_or_else(|| anyhow!("unrecognized day {day:?} in timetable table"))?;
        entries.push(Entry {
            day,
            time,
            teacher,
            subject,
        });
    }

    Ok(entries)
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn default_db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

impl TimetableStore for SqliteStore {
    fn entries(&self) -> &[Entry] {
        &self.entries
    }

    fn is_slot_taken(&self, day: Day, time: &str) -> Result<bool, StoreError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM timetable WHERE day = ?1 AND time = ?2",
            params![day.as_str(), time],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn add_entry(&mut self, entry: Entry) -> Result<(), StoreError> {
        self.check_insertable(&entry)?;
        self.conn.execute(
            "INSERT INTO timetable (day, time, teacher, subject) VALUES (?1, ?2, ?3, ?4)",
            params![entry.day.as_str(), entry.time, entry.teacher, entry.subject],
        )?;
        // Cache updates only once the row is durably inserted.
        self.entries.push(entry);
        Ok(())
    }

    fn remove_entry(&mut self, selection: Option<&EntryKey>) -> Result<Entry, StoreError> {
        let key = selection.ok_or(StoreError::MissingSelection)?;
        let deleted = self.conn.execute(
            "DELETE FROM timetable WHERE day = ?1 AND time = ?2 AND teacher = ?3",
            params![key.day.as_str(), key.time, key.teacher],
        )?;
        if deleted == 0 {
            return Err(StoreError::NotFound);
        }

        let position = self
            .entries
            .iter()
            .position(|entry| entry.matches(key))
            .ok_or(StoreError::NotFound)?;
        Ok(self.entries.remove(position))
    }

    fn entries_for_teacher(&self, teacher: &str) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|entry| entry.teacher == teacher)
            .cloned()
            .collect()
    }
}
