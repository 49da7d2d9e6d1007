//! The five-step wizard screen.
//!
//! The screen owns the input widgets; the draft state stays the source of
//! truth. Widgets emit [`WizardEvent`]s, the app turns them into actions,
//! and [`WizardScreen::sync_from`] mirrors the draft back into the widgets
//! after hydration or reset.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::draft::path::{FieldPath, FieldValue};
use crate::draft::state::{FormData, WizardState, WizardStep};

use super::form_field::FormField;
use super::steps;

/// What a key press meant, beyond editing a widget
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    /// The focused field's value changed
    Edited(FieldPath, FieldValue),
    /// Save and continue (Enter)
    Advance,
    /// Back one step (Esc)
    GoBack,
    /// Esc on the first step
    QuitRequested,
}

/// One labelled field bound to a draft path
pub struct FormEntry {
    pub path: FieldPath,
    pub label: &'static str,
    pub field: FormField,
}

impl FormEntry {
    pub fn new(path: FieldPath, label: &'static str, field: FormField) -> Self {
        Self { path, label, field }
    }
}

/// The fields of one step, with focus tracking
pub struct StepForm {
    pub entries: Vec<FormEntry>,
    pub focused: usize,
}

impl StepForm {
    pub fn new(entries: Vec<FormEntry>) -> Self {
        Self {
            entries,
            focused: 0,
        }
    }

    pub fn next_field(&mut self) {
        if !self.entries.is_empty() {
            self.focused = (self.focused + 1) % self.entries.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.entries.is_empty() {
            self.focused = if self.focused == 0 {
                self.entries.len() - 1
            } else {
                self.focused - 1
            };
        }
    }

    pub fn focused_entry_mut(&mut self) -> Option<&mut FormEntry> {
        self.entries.get_mut(self.focused)
    }
}

pub struct WizardScreen {
    /// One form per step, indexed by [`WizardStep::index`]
    forms: Vec<StepForm>,
}

impl WizardScreen {
    pub fn new() -> Self {
        Self {
            forms: vec![
                steps::account::form(),
                steps::company::form(),
                steps::members::form(),
                steps::documents::form(),
                steps::review::form(),
            ],
        }
    }

    /// Mirror the draft into every widget (hydration, reset)
    pub fn sync_from(&mut self, data: &FormData) {
        for form in &mut self.forms {
            for entry in &mut form.entries {
                entry.field.set_value(&entry.path.get(data));
            }
        }
    }

    fn form_mut(&mut self, step: WizardStep) -> &mut StepForm {
        &mut self.forms[step.index()]
    }

    /// Translate a key press on the given step
    pub fn handle_key(&mut self, step: WizardStep, key: KeyEvent) -> Option<WizardEvent> {
        let form = self.form_mut(step);
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                // Down stays inside a multi-line editor
                if key.code == KeyCode::Down {
                    if let Some(entry) = form.focused_entry_mut() {
                        if matches!(entry.field, FormField::TextArea { .. }) {
                            return Self::forward_to_field(form, key.code);
                        }
                    }
                }
                form.next_field();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                if key.code == KeyCode::Up {
                    if let Some(entry) = form.focused_entry_mut() {
                        if matches!(entry.field, FormField::TextArea { .. }) {
                            return Self::forward_to_field(form, key.code);
                        }
                    }
                }
                form.prev_field();
                None
            }
            KeyCode::Esc => {
                if step == WizardStep::Account {
                    Some(WizardEvent::QuitRequested)
                } else {
                    Some(WizardEvent::GoBack)
                }
            }
            KeyCode::Enter => {
                // Inside a multi-line editor Enter inserts a newline;
                // everywhere else it is save-and-continue
                if let Some(entry) = form.focused_entry_mut() {
                    if matches!(entry.field, FormField::TextArea { .. }) {
                        return Self::forward_to_field(form, key.code);
                    }
                }
                Some(WizardEvent::Advance)
            }
            code => Self::forward_to_field(form, code),
        }
    }

    fn forward_to_field(form: &mut StepForm, code: KeyCode) -> Option<WizardEvent> {
        let entry = form.focused_entry_mut()?;
        let before = entry.field.value();
        if !entry.field.handle_key(code) {
            return None;
        }
        let after = entry.field.value();
        if after != before {
            Some(WizardEvent::Edited(entry.path, after))
        } else {
            None
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &WizardState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Progress header
                Constraint::Min(10),   // Step body
                Constraint::Length(1), // Error banner
                Constraint::Length(1), // Status line
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        self.render_progress(frame, chunks[0], state.step);
        self.render_body(frame, chunks[1], state);
        self.render_error(frame, chunks[2], state);
        self.render_status(frame, chunks[3], state);
        self.render_footer(frame, chunks[4], state.step);
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect, current: WizardStep) {
        let mut spans = vec![Span::raw(" ")];
        for (i, step) in WizardStep::all().iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" > ", Style::default().fg(Color::DarkGray)));
            }
            let style = if *step == current {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if step.index() < current.index() {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(
                format!("{}. {}", step.index() + 1, step.label()),
                style,
            ));
        }

        let block = Block::default()
            .title(" Company Registration ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            inner,
        );
    }

    fn render_body(&mut self, frame: &mut Frame, area: Rect, state: &WizardState) {
        let step = state.step;

        let form_area = if step == WizardStep::Review {
            // The review step shows the collected data above its fields
            let halves = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(8), Constraint::Length(10)])
                .split(area);
            steps::review::render_summary(frame, halves[0], &state.data);
            halves[1]
        } else {
            area
        };

        let form = &mut self.forms[step.index()];
        let mut constraints = Vec::with_capacity(form.entries.len() * 2 + 1);
        for entry in &form.entries {
            constraints.push(Constraint::Length(1));
            constraints.push(Constraint::Length(entry.field.render_height() + 1));
        }
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(constraints)
            .split(form_area);

        for (i, entry) in form.entries.iter_mut().enumerate() {
            let focused = i == form.focused;
            let label_style = if focused {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(entry.label, label_style))),
                rows[i * 2],
            );
            let mut field_area = rows[i * 2 + 1];
            field_area.height = entry.field.render_height();
            entry.field.render(frame, field_area, focused);
        }
    }

    fn render_error(&self, frame: &mut Frame, area: Rect, state: &WizardState) {
        if let Some(message) = &state.error {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!(" {message}"),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ))),
                area,
            );
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, state: &WizardState) {
        let mut spans = vec![Span::raw(" ")];
        if state.saving {
            spans.push(Span::styled("Saving...", Style::default().fg(Color::Yellow)));
        } else if let Some(saved_at) = state.saved_at {
            spans.push(Span::styled(
                format!("Saved {}", saved_at.format("%Y-%m-%d %H:%M:%S UTC")),
                Style::default().fg(Color::Green),
            ));
        } else {
            spans.push(Span::styled(
                "Not saved yet",
                Style::default().fg(Color::DarkGray),
            ));
        }
        if state.dirty {
            spans.push(Span::styled(
                "  * unsaved changes",
                Style::default().fg(Color::Yellow),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, step: WizardStep) {
        let continue_label = if step.is_last() { " submit  " } else { " continue  " };
        let line = Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(continue_label),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(if step == WizardStep::Account {
                " quit  "
            } else {
                " back  "
            }),
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::raw(" next field  "),
            Span::styled("Ctrl+S", Style::default().fg(Color::Yellow)),
            Span::raw(" save  "),
            Span::styled("Ctrl+R", Style::default().fg(Color::Yellow)),
            Span::raw(" start over  "),
            Span::styled("Ctrl+C", Style::default().fg(Color::Yellow)),
            Span::raw(" quit"),
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}

impl Default for WizardScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_emits_edited_events_for_the_focused_path() {
        let mut screen = WizardScreen::new();
        let event = screen.handle_key(WizardStep::Account, key(KeyCode::Char('a')));
        assert_eq!(
            event,
            Some(WizardEvent::Edited(
                FieldPath::AccountEmail,
                FieldValue::Text("a".to_string())
            ))
        );
    }

    #[test]
    fn tab_moves_focus_and_wraps() {
        let mut screen = WizardScreen::new();
        assert!(screen
            .handle_key(WizardStep::Account, key(KeyCode::Tab))
            .is_none());
        let event = screen.handle_key(WizardStep::Account, key(KeyCode::Char('x')));
        assert_eq!(
            event,
            Some(WizardEvent::Edited(
                FieldPath::AccountPassword,
                FieldValue::Text("x".to_string())
            ))
        );

        // Wrap back to the first field
        screen.handle_key(WizardStep::Account, key(KeyCode::Tab));
        let event = screen.handle_key(WizardStep::Account, key(KeyCode::Char('y')));
        assert!(matches!(
            event,
            Some(WizardEvent::Edited(FieldPath::AccountEmail, _))
        ));
    }

    #[test]
    fn enter_advances_except_in_multiline_fields() {
        let mut screen = WizardScreen::new();
        assert_eq!(
            screen.handle_key(WizardStep::Account, key(KeyCode::Enter)),
            Some(WizardEvent::Advance)
        );

        // Focus the shareholder list (third field of the members step)
        screen.handle_key(WizardStep::Members, key(KeyCode::Tab));
        screen.handle_key(WizardStep::Members, key(KeyCode::Tab));
        screen.handle_key(WizardStep::Members, key(KeyCode::Char('a')));
        let event = screen.handle_key(WizardStep::Members, key(KeyCode::Enter));
        assert!(matches!(
            event,
            Some(WizardEvent::Edited(FieldPath::MembersShareholderNames, _))
        ));
    }

    #[test]
    fn esc_goes_back_or_requests_quit() {
        let mut screen = WizardScreen::new();
        assert_eq!(
            screen.handle_key(WizardStep::Account, key(KeyCode::Esc)),
            Some(WizardEvent::QuitRequested)
        );
        assert_eq!(
            screen.handle_key(WizardStep::Company, key(KeyCode::Esc)),
            Some(WizardEvent::GoBack)
        );
    }

    #[test]
    fn sync_from_fills_widgets_from_the_draft() {
        let mut screen = WizardScreen::new();
        let mut data = FormData::default();
        data.account.email = "taro@example.co.jp".to_string();
        data.documents.seal_ready = true;
        screen.sync_from(&data);

        let email = &screen.forms[WizardStep::Account.index()].entries[0];
        assert_eq!(
            email.field.value(),
            FieldValue::Text("taro@example.co.jp".to_string())
        );
        let seal = &screen.forms[WizardStep::Documents.index()].entries[0];
        assert_eq!(seal.field.value(), FieldValue::Flag(true));
    }
}
