use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Day, Entry};
use crate::registry::TeacherRegistry;

/// Form state for composing a new timetable entry. Every field is a selector
/// over a fixed option list, so the form tracks indices rather than free text.
#[derive(Default, Clone)]
pub(crate) struct EntryForm {
    pub(crate) teacher_idx: usize,
    pub(crate) subject_idx: usize,
    pub(crate) day_idx: usize,
    pub(crate) slot_idx: usize,
    pub(crate) active: EntryField,
    pub(crate) error: Option<String>,
}

/// Fields available within the entry form, in focus order.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum EntryField {
    #[default]
    Teacher,
    Subject,
    Day,
    Slot,
}

impl EntryField {
    const ORDER: [EntryField; 4] = [
        EntryField::Teacher,
        EntryField::Subject,
        EntryField::Day,
        EntryField::Slot,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|field| *field == self).unwrap_or(0)
    }
}

impl EntryForm {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Move focus to the next field, wrapping around.
    pub(crate) fn next_field(&mut self) {
        let next = (self.active.position() + 1) % EntryField::ORDER.len();
        self.active = EntryField::ORDER[next];
    }

    /// Move focus to the previous field, wrapping around.
    pub(crate) fn prev_field(&mut self) {
        let len = EntryField::ORDER.len();
        let prev = (self.active.position() + len - 1) % len;
        self.active = EntryField::ORDER[prev];
    }

    /// Step the active selector forward or backward through its options.
    /// Moving the teacher selector resets the subject selector, because the
    /// eligible subjects belong to the newly focused teacher.
    pub(crate) fn cycle(&mut self, registry: &TeacherRegistry, slots: &[String], delta: isize) {
        match self.active {
            EntryField::Teacher => {
                if Self::step(&mut self.teacher_idx, registry.len(), delta) {
                    self.subject_idx = 0;
                }
            }
            EntryField::Subject => {
                let subjects = self
                    .teacher(registry)
                    .map(|teacher| registry.subjects_for(teacher).len())
                    .unwrap_or(0);
                Self::step(&mut self.subject_idx, subjects, delta);
            }
            EntryField::Day => {
                Self::step(&mut self.day_idx, Day::ALL.len(), delta);
            }
            EntryField::Slot => {
                Self::step(&mut self.slot_idx, slots.len(), delta);
            }
        }
        self.error = None;
    }

    /// Wrap `index` by `delta` within `len` options. Returns whether the index
    /// moved.
    fn step(index: &mut usize, len: usize, delta: isize) -> bool {
        if len == 0 {
            return false;
        }
        let len = len as isize;
        let current = (*index as isize).min(len - 1);
        let next = (current + delta).rem_euclid(len) as usize;
        let moved = next != *index;
        *index = next;
        moved
    }

    /// The currently selected teacher, if the registry has one at this index.
    pub(crate) fn teacher<'a>(&self, registry: &'a TeacherRegistry) -> Option<&'a str> {
        registry.teachers().nth(self.teacher_idx)
    }

    /// Display text for a field's current selection.
    pub(crate) fn field_value(
        &self,
        field: EntryField,
        registry: &TeacherRegistry,
        slots: &[String],
    ) -> String {
        match field {
            EntryField::Teacher => self
                .teacher(registry)
                .map(str::to_string)
                .unwrap_or_else(|| "<none>".to_string()),
            EntryField::Subject => self
                .teacher(registry)
                .and_then(|teacher| registry.subjects_for(teacher).get(self.subject_idx))
                .cloned()
                .unwrap_or_else(|| "<none>".to_string()),
            EntryField::Day => Day::ALL
                .get(self.day_idx)
                .map(|day| day.to_string())
                .unwrap_or_else(|| "<none>".to_string()),
            EntryField::Slot => slots
                .get(self.slot_idx)
                .cloned()
                .unwrap_or_else(|| "<none>".to_string()),
        }
    }

    /// Resolve the selected indices into a ready-to-insert entry. The subject
    /// always comes from the selected teacher's eligible list, which is the
    /// only place that restriction is enforced.
    pub(crate) fn parse_inputs(
        &self,
        registry: &TeacherRegistry,
        slots: &[String],
    ) -> Result<Entry> {
        let teacher = self
            .teacher(registry)
            .ok_or_else(|| anyhow!("No teacher selected."))?;
        let subject = registry
            .subjects_for(teacher)
            .get(self.subject_idx)
            .ok_or_else(|| anyhow!("No subject available for {teacher}."))?;
        let day = Day::ALL
            .get(self.day_idx)
            .copied()
            .ok_or_else(|| anyhow!("No day selected."))?;
        let time = slots
            .get(self.slot_idx)
            .ok_or_else(|| anyhow!("Please select a valid time slot."))?;

        Ok(Entry {
            day,
            time: time.clone(),
            teacher: teacher.to_string(),
            subject: subject.clone(),
        })
    }

    /// Render a single selector line for the form widget.
    pub(crate) fn build_line(&self, field_name: &str, field: EntryField, value: &str) -> Line<'static> {
        let is_active = self.active == field;
        let display = if is_active {
            format!("< {value} >")
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }
}

/// State for confirming the removal of a timetable entry.
#[derive(Clone)]
pub(crate) struct ConfirmEntryDelete {
    pub(crate) entry: Entry,
}

impl ConfirmEntryDelete {
    pub(crate) fn from(entry: Entry) -> Self {
        Self { entry }
    }
}
