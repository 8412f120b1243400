//! End-to-end store scenarios exercised through the trait, so both backends
//! are held to identical behavior.

use rusqlite::Connection;

use timetable_manager::{
    time_slots, Day, Entry, MemoryStore, SqliteStore, StoreError, TeacherRegistry, TimetableStore,
};

fn backends() -> Vec<Box<dyn TimetableStore>> {
    let conn = Connection::open_in_memory().expect("in-memory database");
    vec![
        Box::new(MemoryStore::new()),
        Box::new(SqliteStore::from_connection(conn).expect("schema setup")),
    ]
}

fn entry(day: Day, time: &str, teacher: &str, subject: &str) -> Entry {
    Entry {
        day,
        time: time.to_string(),
        teacher: teacher.to_string(),
        subject: subject.to_string(),
    }
}

#[test]
fn test_add_conflict_remove_scenario() {
    for mut store in backends() {
        let slot = "8:00 AM - 8:50 AM";

        store
            .add_entry(entry(Day::Monday, slot, "John", "Physics"))
            .expect("first assignment succeeds");
        assert!(store.is_slot_taken(Day::Monday, slot).unwrap());

        let refused = store.add_entry(entry(Day::Monday, slot, "Mary", "English"));
        assert!(matches!(refused, Err(StoreError::SlotTaken { .. })));
        assert_eq!(store.entries().len(), 1);

        let key = store.entries()[0].key();
        store.remove_entry(Some(&key)).expect("removal succeeds");
        assert!(!store.is_slot_taken(Day::Monday, slot).unwrap());
        assert!(store.entries().is_empty());
    }
}

#[test]
fn test_every_template_slot_is_insertable_once() {
    for mut store in backends() {
        for (index, slot) in time_slots().iter().enumerate() {
            let subject = if index % 2 == 0 { "Physics" } else { "Chemistry" };
            store
                .add_entry(entry(Day::Tuesday, slot, "John", subject))
                .expect("fresh slot accepts an entry");
            assert!(store.is_slot_taken(Day::Tuesday, slot).unwrap());
        }
        assert_eq!(store.entries().len(), 7);
    }
}

#[test]
fn test_teacher_report_matches_assignments() {
    for mut store in backends() {
        assert!(store.entries_for_teacher("Mary").is_empty());

        store
            .add_entry(entry(Day::Monday, "8:00 AM - 8:50 AM", "Mary", "Maths"))
            .unwrap();
        store
            .add_entry(entry(Day::Wednesday, "1:00 PM - 1:50 PM", "Mary", "English"))
            .unwrap();
        store
            .add_entry(entry(Day::Monday, "8:50 AM - 9:40 AM", "John", "Physics"))
            .unwrap();

        let report = store.entries_for_teacher("Mary");
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].report_line(), "Monday - 8:00 AM - 8:50 AM (Maths)");
        assert_eq!(
            report[1].report_line(),
            "Wednesday - 1:00 PM - 1:50 PM (English)"
        );
    }
}

#[test]
fn test_remove_without_selection_changes_nothing() {
    for mut store in backends() {
        store
            .add_entry(entry(Day::Friday, "1:50 PM - 2:40 PM", "Harshada", "Biology"))
            .unwrap();

        assert!(matches!(
            store.remove_entry(None),
            Err(StoreError::MissingSelection)
        ));
        assert_eq!(store.entries().len(), 1);
    }
}

#[test]
fn test_registry_drives_subject_choices() {
    let registry = TeacherRegistry::default();
    assert_eq!(registry.subjects_for("John"), ["Physics", "Chemistry"]);
    assert!(registry.subjects_for("Unknown").is_empty());
}
