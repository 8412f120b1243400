use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap,
};
use ratatui::Frame;

use crate::models::Entry;
use crate::registry::TeacherRegistry;
use crate::schedule;
use crate::store::TimetableStore;

use super::forms::{ConfirmEntryDelete, EntryField, EntryForm};
use super::helpers::{centered_rect, surface_error};
use super::screens::{TeacherPicker, TeacherSlotsScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// High-level navigation states. Keeping this explicit makes it easy to reason
/// about which rendering path runs and what keyboard shortcuts should do.
enum Screen {
    Timetable,
    TeacherSlots(TeacherSlotsScreen),
}

/// Fine-grained modes scoped to the current screen.
enum Mode {
    Normal,
    AddingEntry(EntryForm),
    ConfirmDelete(ConfirmEntryDelete),
    PickingTeacher(TeacherPicker),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    store: Box<dyn TimetableStore>,
    registry: TeacherRegistry,
    slots: Vec<String>,
    selected: usize,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: Box<dyn TimetableStore>, registry: TeacherRegistry) -> Self {
        Self {
            store,
            registry,
            slots: schedule::time_slots(),
            selected: 0,
            screen: Screen::Timetable,
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingEntry(form) => self.handle_add_entry(code, form)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
            Mode::PickingTeacher(picker) => self.handle_pick_teacher(code, picker)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Timetable => {
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        *exit = true;
                    }
                    KeyCode::Up => self.move_selection(-1),
                    KeyCode::Down => self.move_selection(1),
                    KeyCode::PageUp => self.move_selection(-5),
                    KeyCode::PageDown => self.move_selection(5),
                    KeyCode::Home => self.select_first(),
                    KeyCode::End => self.select_last(),
                    KeyCode::Char('+') => {
                        if self.registry.is_empty() {
                            self.set_status("No teachers configured.", StatusKind::Error);
                        } else {
                            self.clear_status();
                            return Ok(Mode::AddingEntry(EntryForm::new()));
                        }
                    }
                    KeyCode::Char('-') => {
                        if let Some(entry) = self.current_entry().cloned() {
                            self.clear_status();
                            return Ok(Mode::ConfirmDelete(ConfirmEntryDelete::from(entry)));
                        } else {
                            self.set_status("No entry selected to remove.", StatusKind::Error);
                        }
                    }
                    KeyCode::Char('t') | KeyCode::Char('T') => {
                        if self.registry.is_empty() {
                            self.set_status("No teachers configured.", StatusKind::Error);
                        } else {
                            self.clear_status();
                            return Ok(Mode::PickingTeacher(self.teacher_picker()));
                        }
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Screen::TeacherSlots(_) => {
                match code {
                    KeyCode::Char('q') => {
                        *exit = true;
                    }
                    KeyCode::Esc => {
                        self.screen = Screen::Timetable;
                        self.clear_status();
                    }
                    KeyCode::Char('t') | KeyCode::Char('T') => {
                        if !self.registry.is_empty() {
                            return Ok(Mode::PickingTeacher(self.teacher_picker()));
                        }
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
        }
    }

    fn handle_add_entry(&mut self, code: KeyCode, mut form: EntryForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => Ok(Mode::Normal),
            KeyCode::Tab | KeyCode::Down => {
                form.next_field();
                Ok(Mode::AddingEntry(form))
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.prev_field();
                Ok(Mode::AddingEntry(form))
            }
            KeyCode::Left => {
                form.cycle(&self.registry, &self.slots, -1);
                Ok(Mode::AddingEntry(form))
            }
            KeyCode::Right => {
                form.cycle(&self.registry, &self.slots, 1);
                Ok(Mode::AddingEntry(form))
            }
            KeyCode::Enter => match form.parse_inputs(&self.registry, &self.slots) {
                Ok(entry) => match self.store.add_entry(entry.clone()) {
                    Ok(()) => {
                        self.selected = self.store.entries().len().saturating_sub(1);
                        self.set_status(
                            format!(
                                "Assigned {} to {} {}.",
                                entry.teacher, entry.day, entry.time
                            ),
                            StatusKind::Info,
                        );
                        Ok(Mode::Normal)
                    }
                    Err(err) => {
                        form.error = Some(err.to_string());
                        Ok(Mode::AddingEntry(form))
                    }
                },
                Err(err) => {
                    form.error = Some(surface_error(&err));
                    Ok(Mode::AddingEntry(form))
                }
            },
            _ => Ok(Mode::AddingEntry(form)),
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmEntryDelete) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                let key = confirm.entry.key();
                match self.store.remove_entry(Some(&key)) {
                    Ok(removed) => {
                        self.clamp_selection();
                        self.set_status(
                            format!(
                                "Removed {} from {} {}.",
                                removed.teacher, removed.day, removed.time
                            ),
                            StatusKind::Info,
                        );
                    }
                    Err(err) => {
                        self.set_status(err.to_string(), StatusKind::Error);
                    }
                }
                Ok(Mode::Normal)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Ok(Mode::Normal),
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    fn handle_pick_teacher(&mut self, code: KeyCode, mut picker: TeacherPicker) -> Result<Mode> {
        match code {
            KeyCode::Esc => Ok(Mode::Normal),
            KeyCode::Up => {
                picker.move_selection(-1);
                Ok(Mode::PickingTeacher(picker))
            }
            KeyCode::Down => {
                picker.move_selection(1);
                Ok(Mode::PickingTeacher(picker))
            }
            KeyCode::Enter => {
                if let Some(teacher) = picker.current().map(str::to_string) {
                    let entries = self.store.entries_for_teacher(&teacher);
                    self.screen = Screen::TeacherSlots(TeacherSlotsScreen::new(teacher, entries));
                    self.clear_status();
                } else {
                    self.set_status("Please select a teacher.", StatusKind::Error);
                }
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::PickingTeacher(picker)),
        }
    }

    fn teacher_picker(&self) -> TeacherPicker {
        TeacherPicker::new(self.registry.teachers().map(str::to_string).collect())
    }

    fn current_entry(&self) -> Option<&Entry> {
        self.store.entries().get(self.selected)
    }

    fn move_selection(&mut self, offset: isize) {
        let len = self.store.entries().len();
        if len == 0 {
            return;
        }
        let next = (self.selected as isize + offset).clamp(0, len as isize - 1);
        self.selected = next as usize;
    }

    fn select_first(&mut self) {
        self.selected = 0;
    }

    fn select_last(&mut self) {
        self.selected = self.store.entries().len().saturating_sub(1);
    }

    /// Keep the highlighted row valid after a removal shrinks the table.
    fn clamp_selection(&mut self) {
        let len = self.store.entries().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Timetable => self.draw_timetable(frame, content_area),
            Screen::TeacherSlots(report) => self.draw_teacher_slots(frame, content_area, report),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingEntry(form) => self.draw_entry_form(frame, area, form),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::PickingTeacher(picker) => self.draw_teacher_picker(frame, area, picker),
            Mode::Normal => {}
        }
    }

    fn draw_timetable(&self, frame: &mut Frame, area: Rect) {
        let entries = self.store.entries();
        if entries.is_empty() {
            let message = Paragraph::new("No slots assigned yet. Press '+' to add one.")
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Weekly Timetable"),
                );
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(vec!["Day", "Time", "Teacher", "Subject"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = entries.iter().map(|entry| {
            Row::new(vec![
                entry.day.to_string(),
                entry.time.clone(),
                entry.teacher.clone(),
                entry.subject.clone(),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Length(34),
                Constraint::Length(16),
                Constraint::Min(12),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Weekly Timetable"),
        )
        .row_highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

        let mut state = TableState::default();
        state.select(Some(self.selected.min(entries.len() - 1)));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_teacher_slots(&self, frame: &mut Frame, area: Rect, report: &TeacherSlotsScreen) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Time Slots for {}", report.teacher));

        if report.entries.is_empty() {
            let message = Paragraph::new("No time slots assigned.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = report
            .entries
            .iter()
            .map(|entry| ListItem::new(entry.report_line()))
            .collect();
        let list = List::new(items).block(block);
        frame.render_widget(list, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (&self.screen, &self.mode) {
            (_, Mode::AddingEntry(_)) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Switch Field   "),
                Span::styled("[←/→]", key_style),
                Span::raw(" Change   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (_, Mode::ConfirmDelete(_)) => Line::from(vec![
                Span::styled("[Y]", key_style),
                Span::raw(" Confirm   "),
                Span::styled("[N/Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (_, Mode::PickingTeacher(_)) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Show Slots   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (Screen::TeacherSlots(_), _) => Line::from(vec![
                Span::styled("[Esc]", key_style),
                Span::raw(" Back   "),
                Span::styled("[t]", key_style),
                Span::raw(" Other Teacher   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            (Screen::Timetable, Mode::Normal) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[+]", key_style),
                Span::raw(" Add Slot   "),
                Span::styled("[-]", key_style),
                Span::raw(" Delete Slot   "),
                Span::styled("[t]", key_style),
                Span::raw(" Teacher Slots   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_entry_form(&self, frame: &mut Frame, area: Rect, form: &EntryForm) {
        let popup_area = centered_rect(60, 45, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Slot").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = Vec::with_capacity(6);
        for (name, field) in [
            ("Teacher", EntryField::Teacher),
            ("Subject", EntryField::Subject),
            ("Day", EntryField::Day),
            ("Time Slot", EntryField::Slot),
        ] {
            let value = form.field_value(field, &self.registry, &self.slots);
            lines.push(form.build_line(name, field, &value));
        }
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • ←/→ to change • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmEntryDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Removal")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let entry = &confirm.entry;
        let lines = vec![
            Line::from(format!(
                "Remove {} from {} {}?",
                entry.teacher, entry.day, entry.time
            )),
            Line::from(format!("The {} period will be unassigned.", entry.subject)),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_teacher_picker(&self, frame: &mut Frame, area: Rect, picker: &TeacherPicker) {
        let popup_area = centered_rect(40, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Show Slots for Teacher")
            .borders(Borders::ALL);

        let items: Vec<ListItem> = picker
            .teachers
            .iter()
            .map(|teacher| ListItem::new(teacher.clone()))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(picker.selected));
        frame.render_stateful_widget(list, popup_area, &mut state);
    }
}
