//! Domain models shared by the store backends and the TUI. These types stay
//! light-weight data holders so the other layers can focus on persistence and
//! presentation logic.

use std::fmt;

/// The five weekdays a slot can be assigned to. The schedule template covers
/// Monday through Friday only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    /// Every weekday in calendar order, used to populate the day selector.
    pub const ALL: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// Canonical name, also the representation stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }

    /// Inverse of [`Day::as_str`], used when hydrating rows from SQLite.
    pub fn parse(text: &str) -> Option<Day> {
        match text {
            "Monday" => Some(Day::Monday),
            "Tuesday" => Some(Day::Tuesday),
            "Wednesday" => Some(Day::Wednesday),
            "Thursday" => Some(Day::Thursday),
            "Friday" => Some(Day::Friday),
            _ => None,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scheduled assignment: a teacher covering a subject in a specific slot.
/// The `time` field holds the full slot label (for example
/// `"8:00 AM - 8:50 AM"`); slot conflicts compare it by string equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub day: Day,
    pub time: String,
    pub teacher: String,
    pub subject: String,
}

impl Entry {
    /// The identity used for removal. Day, slot, and teacher together pin down
    /// one row; the subject is display data.
    pub fn key(&self) -> EntryKey {
        EntryKey {
            day: self.day,
            time: self.time.clone(),
            teacher: self.teacher.clone(),
        }
    }

    /// Allocation-free check against a removal identity.
    pub fn matches(&self, key: &EntryKey) -> bool {
        self.day == key.day && self.time == key.time && self.teacher == key.teacher
    }

    /// `Day - Time (Subject)` line used by the per-teacher slot report.
    pub fn report_line(&self) -> String {
        format!("{} - {} ({})", self.day, self.time, self.subject)
    }
}

/// Identity of an entry for delete operations: exact match on day, slot label,
/// and teacher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryKey {
    pub day: Day,
    pub time: String,
    pub teacher: String,
}
