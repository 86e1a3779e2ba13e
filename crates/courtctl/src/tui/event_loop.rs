//! Event Loop - Main TUI entry point and event handling

use anyhow::Result;
use court_common::{Adjudicator, Verdict, VerdictError};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::court_state::CourtState;

use super::avatar::AvatarState;
use super::render::draw_ui;

const VERDICT_SCROLL_STEP: u16 = 5;

/// TUI message types
#[derive(Debug)]
pub enum TuiMessage {
    /// The in-flight adjudication finished
    VerdictSettled(Result<Verdict, VerdictError>),
}

/// What the loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Submit,
    Quit,
}

/// Apply one key press to the state
pub fn handle_key(state: &mut CourtState, key: KeyEvent) -> KeyAction {
    // Ctrl+C always exits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }

    if key.code == KeyCode::F(1) {
        state.show_help = !state.show_help;
        return KeyAction::None;
    }

    if state.show_help {
        if key.code == KeyCode::Esc {
            state.show_help = false;
        }
        return KeyAction::None;
    }

    // Decree modal: close or scroll only
    if state.verdict.is_some() {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) | (KeyCode::Esc, _) => {
                state.reset();
            }
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
                state.reset();
            }
            (KeyCode::PageUp, _) | (KeyCode::Up, _) => state.scroll_verdict_up(VERDICT_SCROLL_STEP),
            (KeyCode::PageDown, _) | (KeyCode::Down, _) => state.scroll_verdict_down(VERDICT_SCROLL_STEP),
            _ => {}
        }
        return KeyAction::None;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('s'), KeyModifiers::CONTROL) | (KeyCode::F(5), _) => {
            if state.can_submit() {
                return KeyAction::Submit;
            }
        }
        (KeyCode::Tab, _) => state.focus_next(),
        (KeyCode::BackTab, _) => state.focus_prev(),
        (KeyCode::Enter, _) => {
            state.insert_newline();
        }
        (KeyCode::Backspace, _) => {
            state.backspace();
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
            state.clear_field();
        }
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            state.insert_char(c);
        }
        _ => {}
    }

    KeyAction::None
}

/// Validate and, if the case is admissible, start the one adjudication call
pub fn start_adjudication(
    state: &mut CourtState,
    adjudicator: Arc<dyn Adjudicator>,
    tx: mpsc::Sender<TuiMessage>,
) -> Option<JoinHandle<()>> {
    let case = state.begin_submit()?;
    debug!("Case admitted, calling the judge");

    Some(tokio::spawn(async move {
        let result = adjudicator.adjudicate(&case).await;
        let _ = tx.send(TuiMessage::VerdictSettled(result)).await;
    }))
}

/// Run the TUI
pub async fn run(adjudicator: Arc<dyn Adjudicator>, avatar: AvatarState) -> Result<()> {
    enable_raw_mode().map_err(|e| {
        anyhow::anyhow!(
            "Failed to enable raw mode: {}. Ensure you're running in a real terminal (TTY).",
            e
        )
    })?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        let _ = disable_raw_mode();
        anyhow::anyhow!("Failed to initialize terminal: {}", e)
    })?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = CourtState::default();
    let (tx, mut rx) = mpsc::channel(4);

    info!("Court is open");
    let result = run_event_loop(&mut terminal, &mut state, &avatar, adjudicator, tx, &mut rx).await;

    let cleanup_result = restore_terminal(&mut terminal);
    info!("Court is adjourned");

    result.and(cleanup_result)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut CourtState,
    avatar: &AvatarState,
    adjudicator: Arc<dyn Adjudicator>,
    tx: mpsc::Sender<TuiMessage>,
    rx: &mut mpsc::Receiver<TuiMessage>,
) -> Result<()> {
    let mut in_flight: Option<JoinHandle<()>> = None;

    loop {
        state.tick();

        while let Ok(msg) = rx.try_recv() {
            match msg {
                TuiMessage::VerdictSettled(result) => {
                    match &result {
                        Ok(_) => info!("Verdict delivered"),
                        Err(e) => info!(code = e.code(), "Adjudication failed"),
                    }
                    state.settle(result);
                    in_flight = None;
                }
            }
        }

        terminal.draw(|f| draw_ui(f, state, avatar))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match handle_key(state, key) {
                    KeyAction::Quit => break,
                    KeyAction::Submit => {
                        if in_flight.is_none() {
                            in_flight = start_adjudication(state, adjudicator.clone(), tx.clone());
                        }
                    }
                    KeyAction::None => {}
                }
            }
        }
    }

    // No cancellation protocol; a pending call is simply dropped on exit
    if let Some(handle) = in_flight {
        handle.abort();
    }

    Ok(())
}
