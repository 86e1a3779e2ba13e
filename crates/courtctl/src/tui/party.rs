//! Party card - one side's name and testimony
//!
//! Stateless: everything comes from `CourtState`. Both cards are the same
//! widget, told apart by role.

use court_common::PartyRole;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::court_state::{CourtState, FormField};

const CURSOR: &str = "▏";

/// Card accent color per role
pub fn role_color(role: PartyRole) -> Color {
    match role {
        PartyRole::Plaintiff => Color::Rgb(90, 150, 255),
        PartyRole::Defendant => Color::Rgb(255, 100, 100),
    }
}

/// Lines for one input: the value (with cursor when focused) or a dim placeholder
fn field_lines(value: &str, placeholder: &str, focused: bool) -> Vec<Line<'static>> {
    if value.is_empty() {
        let mut spans = Vec::new();
        if focused {
            spans.push(Span::raw(CURSOR));
        }
        spans.push(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ));
        return vec![Line::from(spans)];
    }

    let mut lines: Vec<Line<'static>> = value.split('\n').map(|l| Line::from(l.to_string())).collect();
    if focused {
        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled(CURSOR, Style::default().fg(Color::White)));
        }
    }
    lines
}

fn field_block(title: &'static str, focused: bool, accent: Color) -> Block<'static> {
    let style = if focused {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Block::default()
        .title(Span::styled(title, style))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style)
}

/// Border for a party card: thick while one of its fields has focus
pub fn card_border(state: &CourtState, role: PartyRole) -> BorderType {
    if state.is_editable() && state.focus.role() == role {
        BorderType::Thick
    } else {
        BorderType::Rounded
    }
}

/// Draw one party card
pub fn draw_party_card(f: &mut Frame, area: Rect, state: &CourtState, role: PartyRole) {
    let config = role.config();
    let accent = if state.is_loading {
        Color::DarkGray
    } else {
        role_color(role)
    };
    let editable = state.is_editable();

    let card = Block::default()
        .title(Line::from(vec![
            Span::styled(
                format!(" {} ", config.label.to_uppercase()),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{} ", config.icon)),
        ]))
        .borders(Borders::ALL)
        .border_type(card_border(state, role))
        .border_style(Style::default().fg(accent));
    let inner = card.inner(area);
    f.render_widget(card, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Min(3),    // Testimony
            Constraint::Length(1), // Oath
        ])
        .split(inner);

    let name_field = FormField::name_of(role);
    let name_focused = editable && state.focus == name_field;
    let name = Paragraph::new(field_lines(state.name(role), config.placeholder_name, name_focused))
        .block(field_block(" Name ", name_focused, accent));
    f.render_widget(name, chunks[0]);

    let statement_field = FormField::statement_of(role);
    let statement_focused = editable && state.focus == statement_field;
    let statement = Paragraph::new(field_lines(
        state.statement(role),
        config.placeholder_statement,
        statement_focused,
    ))
    .wrap(Wrap { trim: false })
    .block(field_block(" Testimony ", statement_focused, accent));
    f.render_widget(statement, chunks[1]);

    let oath = Paragraph::new(Line::from(Span::styled(
        "\"The truth, the whole truth, and nothing but the truth...\"",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Right);
    f.render_widget(oath, chunks[2]);
}
