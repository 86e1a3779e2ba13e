//! Utilities - layout helpers and the help overlay

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const SHORTCUTS: &[(&str, &str)] = &[
    ("Tab / Shift+Tab", "Next / previous field"),
    ("Enter", "New line (testimony) or next field (name)"),
    ("Ctrl+S / F5", "Order in the Court! (submit)"),
    ("Ctrl+U", "Clear field"),
    ("Enter / Esc", "Case Closed (Start New) on a decree"),
    ("PgUp/PgDn", "Scroll the decree"),
    ("F1", "Toggle help"),
    ("Ctrl+C", "Exit"),
];

/// Draw help overlay
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let mut help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (keys, action) in SHORTCUTS {
        help_text.push(Line::from(vec![
            Span::styled(format!("{:<16}", keys), Style::default().fg(Color::Cyan)),
            Span::raw(format!(" - {}", action)),
        ]));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        "Press F1 to close",
        Style::default().fg(Color::Gray),
    )));

    let help_area = centered_rect(60, 60, area);
    f.render_widget(Clear, help_area);

    let help_block = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().bg(Color::Black));

    f.render_widget(help_block, help_area);
}

/// Create a centered rect
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
