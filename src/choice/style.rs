//! Terminal styling for issue choices

use super::AnnotatedChoice;
use crate::issue::Priority;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Colour used for a priority label
#[must_use]
pub const fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low | Priority::Unknown => Color::Green,
        Priority::Medium => Color::Blue,
        Priority::High => Color::Magenta,
        Priority::Critical => Color::LightRed,
        Priority::Blocker => Color::Red,
    }
}

/// Render a choice as a styled line whose plain text equals its label
#[must_use]
pub fn choice_line(choice: &AnnotatedChoice) -> Line<'static> {
    let issue = &choice.issue;
    Line::from(vec![
        Span::styled(
            choice.marker(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(issue.key.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(
            issue.priority_label().to_string(),
            Style::default().fg(priority_color(issue.priority)),
        ),
        Span::raw(format!(" ({}): {}", issue.issue_type, issue.summary)),
    ])
}

/// Plain text of a styled line
#[must_use]
pub fn plain_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}
