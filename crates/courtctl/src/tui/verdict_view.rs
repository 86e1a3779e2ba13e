//! Verdict modal - the official decree
//!
//! Pure rendering of a verdict and the two display names. The only action is
//! "Case Closed (Start New)", handled by the event loop as a reset.

use court_common::display::{segment_label, segment_widths};
use court_common::{PartyRole, Verdict};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::party::role_color;
use super::utils::centered_rect;

const TRACK_COLOR: Color = Color::Rgb(60, 60, 60);

/// Fit text into `width` cells, padded on the left or right
fn fit(text: &str, width: usize, align_right: bool) -> String {
    let text: String = text.chars().take(width).collect();
    if align_right {
        format!("{:>width$}", text, width = width)
    } else {
        format!("{:<width$}", text, width = width)
    }
}

/// The responsibility bar for a track of `track_width` cells.
///
/// Always three spans: plaintiff, defendant, empty track. Segment widths come
/// straight from the percentages; overflow is clipped at the track end.
pub fn bar_line(verdict: &Verdict, track_width: u16) -> Line<'static> {
    let (plaintiff_width, defendant_width) = segment_widths(
        verdict.plaintiff_responsibility,
        verdict.defendant_responsibility,
        track_width,
    );
    let rest = track_width - plaintiff_width - defendant_width;

    let plaintiff_label = segment_label(verdict.plaintiff_responsibility)
        .map(|l| format!(" {}", l))
        .unwrap_or_default();
    let defendant_label = segment_label(verdict.defendant_responsibility)
        .map(|l| format!("{} ", l))
        .unwrap_or_default();

    let label_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled(
            fit(&plaintiff_label, plaintiff_width as usize, false),
            label_style.bg(role_color(PartyRole::Plaintiff)),
        ),
        Span::styled(
            fit(&defendant_label, defendant_width as usize, true),
            label_style.bg(role_color(PartyRole::Defendant)),
        ),
        Span::styled(" ".repeat(rest as usize), Style::default().bg(TRACK_COLOR)),
    ])
}

/// The quoted decree wrapped to `width`. Drawn as-is, so the scroll clamp and
/// the rendered text always agree on line breaks.
pub fn decree_lines(decree: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let quoted = format!("\"{}\"", decree);
    textwrap::wrap(&quoted, width as usize)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Draw the decree modal over the whole screen
pub fn draw_verdict_modal(
    f: &mut Frame,
    area: Rect,
    verdict: &Verdict,
    plaintiff_name: &str,
    defendant_name: &str,
    scroll: u16,
) {
    let modal = centered_rect(80, 90, area);
    f.render_widget(Clear, modal);

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(Color::White))
        .style(Style::default().bg(Color::Black));
    let inner = outer.inner(modal);
    f.render_widget(outer, modal);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Responsibility
            Constraint::Min(4),    // Decree
            Constraint::Length(5), // Reparations
            Constraint::Length(1), // Footer
        ])
        .split(inner);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "OFFICIAL DECREE",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "IN THE HIGH COURT OF HOME",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(Color::Yellow)));
    f.render_widget(header, chunks[0]);

    draw_responsibility(f, chunks[1], verdict, plaintiff_name, defendant_name);
    draw_decree(f, chunks[2], verdict, scroll);
    draw_reparations(f, chunks[3], verdict, plaintiff_name, defendant_name);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" [Enter] ", Style::default().fg(Color::Cyan)),
        Span::styled(
            "Case Closed (Start New)",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   [PgUp/PgDn] Scroll", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(footer, chunks[4]);
}

fn draw_responsibility(f: &mut Frame, area: Rect, verdict: &Verdict, plaintiff_name: &str, defendant_name: &str) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(area.inner(&ratatui::layout::Margin::new(2, 0)));

    let title = Paragraph::new(Span::styled(
        "DETERMINATION OF RESPONSIBILITY",
        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(title, rows[0]);

    f.render_widget(Paragraph::new(bar_line(verdict, rows[1].width)), rows[1]);

    let plaintiff = PartyRole::Plaintiff.display_name(plaintiff_name);
    let defendant = PartyRole::Defendant.display_name(defendant_name);
    let gap = (rows[2].width as usize).saturating_sub(plaintiff.chars().count() + defendant.chars().count());
    let names = Paragraph::new(Line::from(vec![
        Span::styled(plaintiff.to_string(), Style::default().fg(role_color(PartyRole::Plaintiff))),
        Span::raw(" ".repeat(gap)),
        Span::styled(defendant.to_string(), Style::default().fg(role_color(PartyRole::Defendant))),
    ]));
    f.render_widget(names, rows[2]);
}

fn draw_decree(f: &mut Frame, area: Rect, verdict: &Verdict, scroll: u16) {
    let block = Block::default()
        .title(Span::styled(
            " JUDICIAL OPINION ",
            Style::default().fg(Color::Rgb(200, 150, 50)).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(200, 150, 50)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let lines = decree_lines(&verdict.decree, chunks[0].width);
    let max_scroll = (lines.len() as u16).saturating_sub(chunks[0].height);

    let style = Style::default().fg(Color::White).add_modifier(Modifier::ITALIC);
    let decree = Paragraph::new(
        lines
            .into_iter()
            .map(|line| Line::from(Span::styled(line, style)))
            .collect::<Vec<_>>(),
    )
    .scroll((scroll.min(max_scroll), 0));
    f.render_widget(decree, chunks[0]);

    let signature = Paragraph::new(Span::styled(
        "Hon. Panda Judge ",
        Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Right);
    f.render_widget(signature, chunks[1]);
}

fn draw_reparations(f: &mut Frame, area: Rect, verdict: &Verdict, plaintiff_name: &str, defendant_name: &str) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (role, name, column) in [
        (PartyRole::Plaintiff, plaintiff_name, columns[0]),
        (PartyRole::Defendant, defendant_name, columns[1]),
    ] {
        let color = role_color(role);
        let order = Paragraph::new(format!("👉 {}", verdict.reparation(role)))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(Span::styled(
                        format!(" ORDER FOR {} ", role.display_name(name).to_uppercase()),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color)),
            );
        f.render_widget(order, column);
    }
}
