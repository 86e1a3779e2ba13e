//! Rendering - the courtroom screen
//!
//! Header, optional error banner, [Plaintiff | Judge | Defendant], helper
//! text, and the decree modal / help overlay on top.

use court_common::PartyRole;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::court_state::CourtState;

use super::avatar::{draw_judge_column, AvatarState};
use super::party::draw_party_card;
use super::utils::draw_help_overlay;
use super::verdict_view::draw_verdict_modal;

const BANNER_HEIGHT: u16 = 4;

/// Draw the whole screen
pub fn draw_ui(f: &mut Frame, state: &CourtState, avatar: &AvatarState) {
    let size = f.size();

    let banner_height = if state.error.is_some() { BANNER_HEIGHT } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Min(10),
            Constraint::Length(2),
        ])
        .split(size);

    draw_header(f, rows[0]);

    if let Some(error) = &state.error {
        draw_error_banner(f, rows[1], error);
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(37),
            Constraint::Percentage(26),
            Constraint::Percentage(37),
        ])
        .split(rows[2]);

    draw_party_card(f, columns[0], state, PartyRole::Plaintiff);
    draw_judge_column(f, columns[1], avatar, state.is_loading, state.thinking_frame);
    draw_party_card(f, columns[2], state, PartyRole::Defendant);

    draw_helper_text(f, rows[3]);

    if let Some(verdict) = &state.verdict {
        draw_verdict_modal(
            f,
            size,
            verdict,
            &state.plaintiff_name,
            &state.defendant_name,
            state.verdict_scroll,
        );
    }

    if state.show_help {
        draw_help_overlay(f, size);
    }
}

fn draw_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "🏛️  Home Court",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "CONFLICT RESOLUTION • FAIRNESS • PANDA JUSTICE",
            Style::default().fg(Color::Rgb(170, 210, 120)),
        )),
    ])
    .alignment(Alignment::Center)
    .style(Style::default().bg(Color::Black))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::Green)),
    );
    f.render_widget(header, area);
}

fn draw_error_banner(f: &mut Frame, area: Rect, message: &str) {
    let banner = Paragraph::new(vec![
        Line::from(Span::styled(
            "Objection!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::LightRed))),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
            .border_style(Style::default().fg(Color::Red)),
    );
    f.render_widget(banner, area);
}

fn draw_helper_text(f: &mut Frame, area: Rect) {
    let helper = Paragraph::new(vec![
        Line::from(Span::styled(
            "The Honorable Panda Judge uses advanced conflict resolution algorithms (and parenting books) to help families find peace. Remember: We are all on the same team.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Tab: next field  Ctrl+S: submit  F1: help  Ctrl+C: exit",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(helper, area);
}
