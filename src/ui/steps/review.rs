use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::draft::path::FieldPath;
use crate::draft::state::FormData;
use crate::ui::form_field::FormField;
use crate::ui::wizard::{FormEntry, StepForm};

pub fn form() -> StepForm {
    StepForm::new(vec![
        FormEntry::new(
            FieldPath::ReviewAgreed,
            "I confirm the above is correct and agree to the terms",
            FormField::toggle("Agree", "Not yet"),
        ),
        FormEntry::new(
            FieldPath::ReviewNotes,
            "Notes for the filing clerk (optional)",
            FormField::multiline(""),
        ),
    ])
}

/// Read-only recap of everything entered so far
pub fn render_summary(frame: &mut Frame, area: Rect, data: &FormData) {
    let block = Block::default()
        .title(" Review ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let or_dash = |s: &str| {
        if s.trim().is_empty() {
            "-".to_string()
        } else {
            s.to_string()
        }
    };

    let shareholders = data
        .members
        .shareholder_names
        .lines()
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    let ready = |flag: bool| if flag { "ready" } else { "not yet" };

    let lines = vec![
        row("Email", or_dash(&data.account.email)),
        row("Company (JA)", or_dash(&data.company.name_ja)),
        row("Company (EN)", or_dash(&data.company.name_en)),
        row("Head office", or_dash(&data.company.address)),
        row(
            "Capital",
            if data.company.capital_jpy.trim().is_empty() {
                "-".to_string()
            } else {
                format!("{} JPY", data.company.capital_jpy)
            },
        ),
        row("Representative", or_dash(&data.members.representative_name)),
        row(
            "Rep. address",
            or_dash(&data.members.representative_address),
        ),
        row("Shareholders", or_dash(&shareholders)),
        row("Company seal", ready(data.documents.seal_ready).to_string()),
        row(
            "Articles",
            ready(data.documents.articles_ready).to_string(),
        ),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label:>16}: "),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(value, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
    ])
}
