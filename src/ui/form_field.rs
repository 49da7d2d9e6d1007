//! Reusable form field widgets for the wizard steps

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

use crate::draft::path::FieldValue;

/// A form field widget bound to one draft field
pub enum FormField {
    /// Single-line text input
    TextInput {
        value: String,
        cursor_pos: usize,
        placeholder: String,
        /// Render as bullets (passwords)
        masked: bool,
        /// Accept ASCII digits only (amounts)
        numeric: bool,
    },
    /// Multi-line text input using tui-textarea
    TextArea {
        textarea: Box<TextArea<'static>>,
        placeholder: String,
    },
    /// Boolean toggle
    Toggle {
        value: bool,
        true_label: String,
        false_label: String,
    },
}

impl FormField {
    pub fn text(placeholder: &str) -> Self {
        FormField::TextInput {
            value: String::new(),
            cursor_pos: 0,
            placeholder: placeholder.to_string(),
            masked: false,
            numeric: false,
        }
    }

    pub fn password(placeholder: &str) -> Self {
        FormField::TextInput {
            value: String::new(),
            cursor_pos: 0,
            placeholder: placeholder.to_string(),
            masked: true,
            numeric: false,
        }
    }

    pub fn amount(placeholder: &str) -> Self {
        FormField::TextInput {
            value: String::new(),
            cursor_pos: 0,
            placeholder: placeholder.to_string(),
            masked: false,
            numeric: true,
        }
    }

    pub fn multiline(placeholder: &str) -> Self {
        FormField::TextArea {
            textarea: Box::new(TextArea::default()),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn toggle(true_label: &str, false_label: &str) -> Self {
        FormField::Toggle {
            value: false,
            true_label: true_label.to_string(),
            false_label: false_label.to_string(),
        }
    }

    /// Current value in draft form
    pub fn value(&self) -> FieldValue {
        match self {
            FormField::TextInput { value, .. } => FieldValue::Text(value.clone()),
            FormField::TextArea { textarea, .. } => FieldValue::Text(textarea.lines().join("\n")),
            FormField::Toggle { value, .. } => FieldValue::Flag(*value),
        }
    }

    /// Overwrite the widget from the draft (hydration, reset)
    pub fn set_value(&mut self, new_value: &FieldValue) {
        match (self, new_value) {
            (
                FormField::TextInput {
                    value, cursor_pos, ..
                },
                FieldValue::Text(text),
            ) => {
                *value = text.clone();
                *cursor_pos = value.chars().count();
            }
            (FormField::TextArea { textarea, .. }, FieldValue::Text(text)) => {
                textarea.select_all();
                textarea.cut();
                textarea.insert_str(text);
            }
            (FormField::Toggle { value, .. }, FieldValue::Flag(flag)) => {
                *value = *flag;
            }
            _ => {}
        }
    }

    /// Handle a key event, returns true if the key was consumed
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match self {
            FormField::TextInput {
                value,
                cursor_pos,
                numeric,
                ..
            } => match key {
                KeyCode::Char(c) => {
                    if *numeric && !c.is_ascii_digit() {
                        return true;
                    }
                    let byte_idx = char_to_byte(value, *cursor_pos);
                    value.insert(byte_idx, c);
                    *cursor_pos += 1;
                    true
                }
                KeyCode::Backspace => {
                    if *cursor_pos > 0 {
                        *cursor_pos -= 1;
                        let byte_idx = char_to_byte(value, *cursor_pos);
                        value.remove(byte_idx);
                    }
                    true
                }
                KeyCode::Delete => {
                    if *cursor_pos < value.chars().count() {
                        let byte_idx = char_to_byte(value, *cursor_pos);
                        value.remove(byte_idx);
                    }
                    true
                }
                KeyCode::Left => {
                    *cursor_pos = cursor_pos.saturating_sub(1);
                    true
                }
                KeyCode::Right => {
                    if *cursor_pos < value.chars().count() {
                        *cursor_pos += 1;
                    }
                    true
                }
                KeyCode::Home => {
                    *cursor_pos = 0;
                    true
                }
                KeyCode::End => {
                    *cursor_pos = value.chars().count();
                    true
                }
                _ => false,
            },
            FormField::TextArea { textarea, .. } => {
                // TextArea handles its own key events, including Enter
                textarea.input(crossterm::event::KeyEvent::new(
                    key,
                    crossterm::event::KeyModifiers::NONE,
                ));
                true
            }
            // Enter is reserved for save-and-continue, so toggles only
            // respond to Space and the arrow keys
            FormField::Toggle { value, .. } => match key {
                KeyCode::Char(' ') => {
                    *value = !*value;
                    true
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    *value = false;
                    true
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    *value = true;
                    true
                }
                _ => false,
            },
        }
    }

    /// Get the height needed to render this field
    pub fn render_height(&self) -> u16 {
        match self {
            FormField::TextInput { .. } => 1,
            FormField::TextArea { .. } => 5,
            FormField::Toggle { .. } => 1,
        }
    }

    /// Render the field
    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let border_color = if focused { Color::Cyan } else { Color::Gray };

        match self {
            FormField::TextInput {
                value,
                cursor_pos,
                placeholder,
                masked,
                ..
            } => {
                if value.is_empty() && !focused {
                    let para = Paragraph::new(Line::from(Span::styled(
                        placeholder.as_str(),
                        Style::default().fg(Color::DarkGray),
                    )));
                    frame.render_widget(para, area);
                    return;
                }

                let mut text: String = if *masked {
                    "\u{2022}".repeat(value.chars().count())
                } else {
                    value.clone()
                };
                if focused {
                    let byte_idx = char_to_byte(&text, *cursor_pos);
                    text.insert(byte_idx, '|');
                }

                let para = Paragraph::new(Line::from(text)).style(Style::default().fg(
                    if focused {
                        Color::White
                    } else {
                        Color::Gray
                    },
                ));
                frame.render_widget(para, area);
            }
            FormField::TextArea {
                textarea,
                placeholder,
            } => {
                textarea.set_cursor_line_style(Style::default());
                textarea.set_cursor_style(if focused {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                });
                textarea.set_block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border_color)),
                );

                if textarea.lines().iter().all(|l| l.is_empty()) && !focused {
                    textarea.set_placeholder_text(placeholder.clone());
                    textarea.set_placeholder_style(Style::default().fg(Color::DarkGray));
                }

                frame.render_widget(&**textarea, area);
            }
            FormField::Toggle {
                value,
                true_label,
                false_label,
            } => {
                let yes_style = if *value {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                let no_style = if !*value {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };

                let line = Line::from(vec![
                    Span::styled(format!("[{}]", true_label), yes_style),
                    Span::raw(" / "),
                    Span::styled(format!("[{}]", false_label), no_style),
                ]);

                frame.render_widget(Paragraph::new(line), area);
            }
        }
    }
}

fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_input_handles_chars() {
        let mut field = FormField::text("email");
        assert!(field.handle_key(KeyCode::Char('h')));
        assert!(field.handle_key(KeyCode::Char('i')));
        assert_eq!(field.value(), FieldValue::Text("hi".to_string()));
    }

    #[test]
    fn text_input_edits_multibyte_text() {
        let mut field = FormField::text("company");
        for c in "株式会社".chars() {
            field.handle_key(KeyCode::Char(c));
        }
        field.handle_key(KeyCode::Backspace);
        assert_eq!(field.value(), FieldValue::Text("株式会".to_string()));

        field.handle_key(KeyCode::Home);
        field.handle_key(KeyCode::Delete);
        assert_eq!(field.value(), FieldValue::Text("式会".to_string()));
    }

    #[test]
    fn amount_input_rejects_non_digits() {
        let mut field = FormField::amount("capital");
        field.handle_key(KeyCode::Char('1'));
        field.handle_key(KeyCode::Char('x'));
        field.handle_key(KeyCode::Char('0'));
        assert_eq!(field.value(), FieldValue::Text("10".to_string()));
    }

    #[test]
    fn toggle_ignores_enter() {
        let mut field = FormField::toggle("Yes", "No");
        assert!(!field.handle_key(KeyCode::Enter));
        assert_eq!(field.value(), FieldValue::Flag(false));

        assert!(field.handle_key(KeyCode::Char(' ')));
        assert_eq!(field.value(), FieldValue::Flag(true));
        assert!(field.handle_key(KeyCode::Left));
        assert_eq!(field.value(), FieldValue::Flag(false));
    }

    #[test]
    fn set_value_repositions_cursor() {
        let mut field = FormField::text("email");
        field.set_value(&FieldValue::Text("taro@example.jp".to_string()));
        field.handle_key(KeyCode::Char('!'));
        assert_eq!(field.value(), FieldValue::Text("taro@example.jp!".to_string()));
    }

    #[test]
    fn set_value_ignores_mismatched_kind() {
        let mut field = FormField::toggle("Yes", "No");
        field.set_value(&FieldValue::Text("oops".to_string()));
        assert_eq!(field.value(), FieldValue::Flag(false));
    }
}
