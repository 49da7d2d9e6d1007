//! Modal confirmations: the unsaved-work guard and the start-over prompt

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Selection state for a two-button dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmSelection {
    Confirm,
    Cancel,
}

impl ConfirmSelection {
    fn toggled(self) -> Self {
        match self {
            Self::Confirm => Self::Cancel,
            Self::Cancel => Self::Confirm,
        }
    }
}

/// What the dialog resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed,
    Cancelled,
}

pub struct ConfirmDialog {
    title: &'static str,
    message: &'static str,
    confirm_label: &'static str,
    cancel_label: &'static str,
    pub selection: ConfirmSelection,
}

impl ConfirmDialog {
    /// Shown when quitting with unsaved changes
    pub fn quit_guard() -> Self {
        Self {
            title: " Unsaved Changes ",
            message: "Your latest edits have not been saved. Quit anyway?",
            confirm_label: "Quit",
            cancel_label: "Keep editing",
            // Default to the safe choice
            selection: ConfirmSelection::Cancel,
        }
    }

    /// Shown before discarding the stored draft
    pub fn reset_guard() -> Self {
        Self {
            title: " Start Over ",
            message: "Delete the saved draft and start from a blank form? This cannot be undone.",
            confirm_label: "Delete draft",
            cancel_label: "Cancel",
            selection: ConfirmSelection::Cancel,
        }
    }

    /// Handle a key press; `Some` means the dialog resolved
    pub fn handle_key(&mut self, code: KeyCode) -> Option<ConfirmOutcome> {
        match code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.selection = self.selection.toggled();
                None
            }
            KeyCode::Enter => Some(match self.selection {
                ConfirmSelection::Confirm => ConfirmOutcome::Confirmed,
                ConfirmSelection::Cancel => ConfirmOutcome::Cancelled,
            }),
            KeyCode::Esc => Some(ConfirmOutcome::Cancelled),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = centered_rect(50, 30, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(inner);

        let message = Paragraph::new(self.message)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White));
        frame.render_widget(message, chunks[0]);

        let confirm_style = if self.selection == ConfirmSelection::Confirm {
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red)
        };
        let cancel_style = if self.selection == ConfirmSelection::Cancel {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };

        let buttons = Paragraph::new(Line::from(vec![
            Span::styled(format!("[ {} ]", self.confirm_label), confirm_style),
            Span::raw("    "),
            Span::styled(format!("[ {} ]", self.cancel_label), cancel_style),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(buttons, chunks[1]);
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
