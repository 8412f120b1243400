//! Timetable storage split across backends: a plain in-memory collection and
//! a SQLite-backed one. Both enforce the same rule (no two entries may occupy
//! the same (day, slot) pair) behind one trait so the application never cares
//! which backend it was configured with.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

use crate::models::{Day, Entry, EntryKey};

/// Refusals and failures a store operation can signal. The first three map
/// directly to user-facing messages; `Storage` wraps SQLite failures, which
/// leave the in-memory view untouched.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested (day, slot) pair is already occupied.
    #[error("{time} on {day} is already assigned to another teacher")]
    SlotTaken { day: Day, time: String },
    /// Insertion requested without a valid slot label.
    #[error("a valid time slot is required")]
    MissingSlot,
    /// Removal requested without selecting an entry.
    #[error("no entry selected")]
    MissingSelection,
    /// The supplied identity matched no stored entry.
    #[error("entry not found")]
    NotFound,
    /// The database reported a failure; no state was changed.
    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}

/// The ordered collection of timetable entries plus the conflict invariant.
pub trait TimetableStore {
    /// Every entry currently held, in insertion order.
    fn entries(&self) -> &[Entry];

    /// True iff an existing entry matches both day and slot label exactly.
    fn is_slot_taken(&self, day: Day, time: &str) -> Result<bool, StoreError>;

    /// Append a new entry. Refused when the slot label is blank or the
    /// (day, slot) pair is already occupied. Subject eligibility is a form
    /// concern and is deliberately not re-checked here.
    fn add_entry(&mut self, entry: Entry) -> Result<(), StoreError>;

    /// Remove the entry matching `selection`, returning it. `None` signals
    /// that the caller had nothing selected.
    fn remove_entry(&mut self, selection: Option<&EntryKey>) -> Result<Entry, StoreError>;

    /// All entries for `teacher`, in insertion order. Empty when the teacher
    /// has no assignments; that is a valid result, not an error.
    fn entries_for_teacher(&self, teacher: &str) -> Vec<Entry>;

    /// Shared insertion precondition: a non-blank slot label and a free
    /// (day, slot) pair.
    fn check_insertable(&self, entry: &Entry) -> Result<(), StoreError> {
        if entry.time.trim().is_empty() {
            return Err(StoreError::MissingSlot);
        }
        if self.is_slot_taken(entry.day, &entry.time)? {
            return Err(StoreError::SlotTaken {
                day: entry.day,
                time: entry.time.clone(),
            });
        }
        Ok(())
    }
}
