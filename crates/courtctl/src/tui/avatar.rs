//! Judge portrait with an ordered fallback chain, plus the deliberating indicator

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use std::path::PathBuf;
use tracing::debug;

const PORTRAIT_FILE: &str = "panda-judge.txt";

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Built-in stand-in shown when no portrait file loads
const PLACEHOLDER_ART: &[&str] = &[
    "   ▄▄▄         ▄▄▄   ",
    "  █████▄▄▄▄▄▄▄█████  ",
    "   ▀█▀         ▀█▀   ",
    "   █  ▄██   ██▄  █   ",
    "   █  ▀▀  ▄  ▀▀  █   ",
    "    ▀▄   ▀▀▀   ▄▀    ",
    "      ▀▀▀▀▀▀▀▀▀      ",
    "",
    "  Hon. Panda Judge   ",
    "  (Image Missing)    ",
];

/// One place a portrait may come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarSource {
    File(PathBuf),
    Placeholder,
}

impl AvatarSource {
    fn load(&self) -> std::io::Result<Vec<String>> {
        match self {
            AvatarSource::File(path) => {
                let contents = std::fs::read_to_string(path)?;
                let lines: Vec<String> = contents.lines().map(str::to_string).collect();
                if lines.iter().all(|l| l.trim().is_empty()) {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "portrait file is empty",
                    ));
                }
                Ok(lines)
            }
            AvatarSource::Placeholder => Ok(PLACEHOLDER_ART.iter().map(|l| l.to_string()).collect()),
        }
    }
}

/// Portrait state: candidate list plus the index of the one in use
#[derive(Debug, Clone)]
pub struct AvatarState {
    candidates: Vec<AvatarSource>,
    index: usize,
    art: Vec<String>,
}

impl AvatarState {
    /// Primary: working directory. Secondary: config dir. Last: built-in placeholder.
    pub fn default_candidates() -> Vec<AvatarSource> {
        let mut candidates = vec![AvatarSource::File(PathBuf::from(PORTRAIT_FILE))];
        if let Some(dir) = dirs::config_dir() {
            candidates.push(AvatarSource::File(dir.join("home-court").join(PORTRAIT_FILE)));
        }
        candidates.push(AvatarSource::Placeholder);
        candidates
    }

    pub fn new(mut candidates: Vec<AvatarSource>) -> Self {
        if candidates.last() != Some(&AvatarSource::Placeholder) {
            candidates.push(AvatarSource::Placeholder);
        }
        Self {
            candidates,
            index: 0,
            art: Vec::new(),
        }
    }

    /// Load the first candidate that works
    pub fn load(candidates: Vec<AvatarSource>) -> Self {
        let mut state = Self::new(candidates);
        state.resolve();
        state
    }

    /// Try candidates from the current index until one loads
    pub fn resolve(&mut self) {
        loop {
            match self.current().load() {
                Ok(art) => {
                    self.art = art;
                    return;
                }
                Err(e) => {
                    debug!("Portrait {:?} failed to load: {}", self.current(), e);
                    if !self.on_load_failure() {
                        return;
                    }
                }
            }
        }
    }

    /// Step to the next candidate. False when already on the last one.
    pub fn on_load_failure(&mut self) -> bool {
        if self.index + 1 < self.candidates.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> &AvatarSource {
        &self.candidates[self.index]
    }

    pub fn art(&self) -> &[String] {
        &self.art
    }
}

impl Default for AvatarState {
    fn default() -> Self {
        Self::load(vec![AvatarSource::Placeholder])
    }
}

/// Spinner glyph for a thinking frame
pub fn spinner(frame: usize) -> &'static str {
    SPINNER[frame % SPINNER.len()]
}

/// Draw the portrait, nameplate, deliberating indicator and submit button
pub fn draw_judge_column(f: &mut Frame, area: Rect, avatar: &AvatarState, is_thinking: bool, frame: usize) {
    let art_height = avatar.art().len() as u16 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(art_height),
            Constraint::Length(1), // Nameplate
            Constraint::Length(3), // Deliberating
            Constraint::Length(3), // Button
            Constraint::Min(0),
        ])
        .split(area);

    // Emphasized frame while deliberating
    let frame_style = if is_thinking {
        Style::default().fg(Color::LightYellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Rgb(120, 80, 20))
    };

    let art: Vec<Line> = avatar.art().iter().map(|l| Line::from(l.clone())).collect();
    let portrait = Paragraph::new(art).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(if is_thinking { BorderType::Thick } else { BorderType::Double })
            .border_style(frame_style),
    );
    f.render_widget(portrait, chunks[0]);

    let nameplate = Paragraph::new(Line::from(Span::styled(
        " Hon. Panda ",
        Style::default()
            .fg(Color::White)
            .bg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(nameplate, chunks[1]);

    if is_thinking {
        let gavel = if frame % 2 == 0 { "🔨" } else { " 🔨" };
        let indicator = Paragraph::new(vec![
            Line::from(gavel),
            Line::from(Span::styled(
                "DELIBERATING...",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(indicator, chunks[2]);
    }

    let (label, style) = if is_thinking {
        (
            format!("{} Deliberating...", spinner(frame)),
            Style::default().fg(Color::Gray).bg(Color::DarkGray),
        )
    } else {
        (
            "⚖️  Order in the Court!".to_string(),
            Style::default()
                .fg(Color::White)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    };
    let button = Paragraph::new(Line::from(Span::styled(format!(" {} ", label), style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(style.bg(Color::Reset)));
    f.render_widget(button, chunks[3]);
}
