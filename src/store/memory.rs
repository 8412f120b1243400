//! Entry collection held purely in memory. Used when the application runs
//! with `--ephemeral`; contents vanish when the process exits.

use crate::models::{Day, Entry, EntryKey};

use super::{StoreError, TimetableStore};

/// In-memory backend: a plain vector in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Vec<Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimetableStore for MemoryStore {
    fn entries(&self) -> &[Entry] {
        &self.entries
    }

    fn is_slot_taken(&self, day: Day, time: &str) -> Result<bool, StoreError> {
        Ok(self
            .entries
            .iter()
            .any(|entry| entry.day == day && entry.time == time))
    }

    fn add_entry(&mut self, entry: Entry) -> Result<(), StoreError> {
        self.check_insertable(&entry)?;
        self.entries.push(entry);
        Ok(())
    }

    fn remove_entry(&mut self, selection: Option<&EntryKey>) -> Result<Entry, StoreError> {
        let key = selection.ok_or(StoreError::MissingSelection)?;
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

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: Day, time: &str, teacher: &str, subject: &str) -> Entry {
        Entry {
            day,
            time: time.to_string(),
            teacher: teacher.to_string(),
            subject: subject.to_string(),
        }
    }

    #[test]
    fn test_insert_marks_slot_taken() {
        let mut store = MemoryStore::new();
        for day in Day::ALL {
            store
                .add_entry(entry(day, "8:00 AM - 8:50 AM", "John", "Physics"))
                .unwrap();
            assert!(store.is_slot_taken(day, "8:00 AM - 8:50 AM").unwrap());
        }
    }

    #[test]
    fn test_duplicate_slot_refused() {
        let mut store = MemoryStore::new();
        store
            .add_entry(entry(Day::Monday, "8:00 AM - 8:50 AM", "John", "Physics"))
            .unwrap();

        let refused = store.add_entry(entry(Day::Monday, "8:00 AM - 8:50 AM", "Mary", "English"));
        assert!(matches!(refused, Err(StoreError::SlotTaken { .. })));
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn test_same_slot_different_day_allowed() {
        let mut store = MemoryStore::new();
        store
            .add_entry(entry(Day::Monday, "8:00 AM - 8:50 AM", "John", "Physics"))
            .unwrap();
        store
            .add_entry(entry(Day::Tuesday, "8:00 AM - 8:50 AM", "John", "Physics"))
            .unwrap();
        assert_eq!(store.entries().len(), 2);
    }

    #[test]
    fn test_blank_slot_refused() {
        let mut store = MemoryStore::new();
        let refused = store.add_entry(entry(Day::Monday, "   ", "John", "Physics"));
        assert!(matches!(refused, Err(StoreError::MissingSlot)));
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_remove_without_selection() {
        let mut store = MemoryStore::new();
        let refused = store.remove_entry(None);
        assert!(matches!(refused, Err(StoreError::MissingSelection)));
    }

    #[test]
    fn test_remove_frees_slot() {
        let mut store = MemoryStore::new();
        let added = entry(Day::Monday, "8:00 AM - 8:50 AM", "John", "Physics");
        store.add_entry(added.clone()).unwrap();

        let removed = store.remove_entry(Some(&added.key())).unwrap();
        assert_eq!(removed, added);
        assert!(!store.is_slot_taken(Day::Monday, "8:00 AM - 8:50 AM").unwrap());
    }

    #[test]
    fn test_remove_unknown_identity() {
        let mut store = MemoryStore::new();
        store
            .add_entry(entry(Day::Monday, "8:00 AM - 8:50 AM", "John", "Physics"))
            .unwrap();

        let key = EntryKey {
            day: Day::Friday,
            time: "8:00 AM - 8:50 AM".to_string(),
            teacher: "John".to_string(),
        };
        assert!(matches!(
            store.remove_entry(Some(&key)),
            Err(StoreError::NotFound)
        ));
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn test_entries_for_teacher_ordering() {
        let mut store = MemoryStore::new();
        store
            .add_entry(entry(Day::Friday, "1:00 PM - 1:50 PM", "Mary", "Maths"))
            .unwrap();
        store
            .add_entry(entry(Day::Monday, "8:00 AM - 8:50 AM", "Mary", "English"))
            .unwrap();
        store
            .add_entry(entry(Day::Monday, "8:50 AM - 9:40 AM", "John", "Physics"))
            .unwrap();

        let marys = store.entries_for_teacher("Mary");
        assert_eq!(marys.len(), 2);
        assert_eq!(marys[0].day, Day::Friday);
        assert_eq!(marys[1].day, Day::Monday);
    }

    #[test]
    fn test_unassigned_teacher_yields_empty() {
        let store = MemoryStore::new();
        assert!(store.entries_for_teacher("Harshada").is_empty());
    }
}
