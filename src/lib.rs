//! Core library surface for the Timetable Manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as the integration tests can reuse the same pieces:
//! the slot template, the teacher registry, and the store trait with its two
//! backends.
pub mod models;
pub mod registry;
pub mod schedule;
pub mod store;
pub mod ui;

/// The domain types that every other layer manipulates.
pub use models::{Day, Entry, EntryKey};

/// The static teacher→subject mapping.
pub use registry::TeacherRegistry;

/// The fixed daily slot template.
pub use schedule::time_slots;

/// The store trait, its two backends, and the refusal taxonomy.
pub use store::{MemoryStore, SqliteStore, StoreError, TimetableStore};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
