//! Rendering tests against ratatui's TestBackend
//!
//! The decree modal must show the verdict text verbatim and size the
//! responsibility bar from the raw percentages.

use court_common::Verdict;
use courtctl::court_state::{CourtState, FormField};
use courtctl::tui::{bar_line, draw_ui, AvatarState};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

fn toy_verdict() -> Verdict {
    Verdict {
        plaintiff_responsibility: 40.0,
        defendant_responsibility: 60.0,
        decree: "The court finds both cubs tired.".to_string(),
        plaintiff_reparation: "Take 3 deep breaths".to_string(),
        defendant_reparation: "Return the toy and apologize".to_string(),
    }
}

fn render(state: &CourtState, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    let avatar = AvatarState::default();
    terminal.draw(|f| draw_ui(f, state, &avatar)).unwrap();
    terminal.backend().buffer().clone()
}

fn screen_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buffer.get(x, y).symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn test_verdict_modal_shows_text_verbatim() {
    let state = CourtState {
        verdict: Some(toy_verdict()),
        ..CourtState::default()
    };

    let text = screen_text(&render(&state, 160, 50));

    assert!(text.contains("OFFICIAL DECREE"));
    assert!(text.contains("The court finds both cubs tired."));
    assert!(text.contains("Take 3 deep breaths"));
    assert!(text.contains("Return the toy and apologize"));
    assert!(text.contains("ORDER FOR PLAINTIFF"));
    assert!(text.contains("ORDER FOR DEFENDANT"));
    assert!(text.contains("40%"));
    assert!(text.contains("60%"));
    assert!(text.contains("Case Closed (Start New)"));
}

#[test]
fn test_verdict_modal_uses_typed_names() {
    let mut state = CourtState::default();
    state.set_field(FormField::PlaintiffName, "Colin");
    state.set_field(FormField::DefendantName, "Mommy");
    state.verdict = Some(toy_verdict());

    let text = screen_text(&render(&state, 160, 50));
    assert!(text.contains("ORDER FOR COLIN"));
    assert!(text.contains("ORDER FOR MOMMY"));
}

#[test]
fn test_bar_segments_equal_percentages() {
    let line = bar_line(&toy_verdict(), 100);
    let widths: Vec<usize> = line.spans.iter().map(|s| s.content.chars().count()).collect();
    assert_eq!(widths, vec![40, 60, 0]);

    let uneven = Verdict {
        plaintiff_responsibility: 30.0,
        defendant_responsibility: 50.0,
        ..toy_verdict()
    };
    let line = bar_line(&uneven, 100);
    let widths: Vec<usize> = line.spans.iter().map(|s| s.content.chars().count()).collect();
    assert_eq!(widths, vec![30, 50, 20]);
}

#[test]
fn test_error_banner_rendered() {
    let state = CourtState {
        error: Some("The court is in recess due to technical difficulties.".to_string()),
        ..CourtState::default()
    };

    let text = screen_text(&render(&state, 160, 50));
    assert!(text.contains("Objection!"));
    assert!(text.contains("The court is in recess due to technical difficulties."));
    assert!(!text.contains("OFFICIAL DECREE"));
}

#[test]
fn test_idle_form_shows_labels_and_placeholders() {
    let text = screen_text(&render(&CourtState::default(), 160, 50));
    assert!(text.contains("PLAINTIFF (THE UPSET ONE)"));
    assert!(text.contains("DEFENDANT (THE ACCUSED)"));
    assert!(text.contains("e.g., Colin"));
    assert!(text.contains("e.g., Mommy"));
    assert!(text.contains("Order in the Court!"));
    assert!(!text.contains("Deliberating"));
}

#[test]
fn test_loading_shows_deliberating() {
    let state = CourtState {
        is_loading: true,
        ..CourtState::default()
    };
    let text = screen_text(&render(&state, 160, 50));
    assert!(text.contains("DELIBERATING..."));
    assert!(text.contains("Deliberating..."));
    assert!(!text.contains("Order in the Court!"));
}
