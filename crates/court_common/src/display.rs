//! Verdict display helpers shared by the TUI and the one-shot CLI

use owo_colors::OwoColorize;

use crate::types::{PartyRole, Verdict};

/// Segments at or below this percentage don't get an inline label
pub const LABEL_MIN_PERCENT: f64 = 10.0;

/// Exact (unrounded) cell count for a percentage; negative or non-finite is empty
fn exact_cells(percent: f64, track_width: u16) -> f64 {
    if !percent.is_finite() || percent <= 0.0 {
        return 0.0;
    }
    percent * f64::from(track_width) / 100.0
}

/// Widths in cells of the plaintiff and defendant segments on a track.
///
/// Percentages are not normalized: 30/30 leaves part of the track empty and
/// 70/70 overflows it, clipped at the track end. Rounding is cumulative, so
/// the two segments cover `round((p + d) / 100 * track)` cells together. A
/// boundary that falls on half a cell goes to the larger share; a larger
/// percentage never draws narrower than a smaller one unless clipped.
pub fn segment_widths(plaintiff: f64, defendant: f64, track_width: u16) -> (u16, u16) {
    let track = f64::from(track_width);
    let p_cells = exact_cells(plaintiff, track_width);
    let d_cells = exact_cells(defendant, track_width);

    let end = (p_cells + d_cells).round().min(track);
    let mut split = p_cells.round();
    if (p_cells - p_cells.floor() - 0.5).abs() < 1e-9 && d_cells > p_cells {
        split = p_cells.floor();
    }
    let split = split.min(end);

    (split as u16, (end - split) as u16)
}

/// Inline label for a segment, if it is wide enough to carry one
pub fn segment_label(percent: f64) -> Option<String> {
    if percent > LABEL_MIN_PERCENT {
        Some(format!("{}%", percent))
    } else {
        None
    }
}

/// Responsibility bar as plain characters, clipped to the track
pub fn text_bar(verdict: &Verdict, track_width: u16) -> String {
    let (plaintiff, defendant) = segment_widths(
        verdict.plaintiff_responsibility,
        verdict.defendant_responsibility,
        track_width,
    );
    let empty = track_width - plaintiff - defendant;

    format!(
        "{}{}{}",
        "█".repeat(plaintiff as usize),
        "▓".repeat(defendant as usize),
        "░".repeat(empty as usize)
    )
}

/// Render a verdict for a plain terminal
pub fn format_verdict(verdict: &Verdict, plaintiff_name: &str, defendant_name: &str, color: bool) -> String {
    let plaintiff = PartyRole::Plaintiff.display_name(plaintiff_name);
    let defendant = PartyRole::Defendant.display_name(defendant_name);
    let bar = text_bar(verdict, 40);

    let mut out = String::new();
    if color {
        out.push_str(&format!("{}\n", "OFFICIAL DECREE".bold()));
        out.push_str(&format!("{}\n\n", "In the High Court of Home".dimmed()));
        out.push_str(&format!("{}\n", "Determination of Responsibility".bold()));
        out.push_str(&format!("  {}\n", bar));
        out.push_str(&format!(
            "  {} {}%   {} {}%\n\n",
            plaintiff.blue().bold(),
            verdict.plaintiff_responsibility,
            defendant.red().bold(),
            verdict.defendant_responsibility
        ));
        out.push_str(&format!("{}\n", "Judicial Opinion".yellow().bold()));
        out.push_str(&format!("  \"{}\"\n", verdict.decree.italic()));
        out.push_str(&format!("{:>44}\n\n", "Hon. Panda Judge".dimmed()));
        out.push_str(&format!("{}\n", format!("Order for {}", plaintiff).blue().bold()));
        out.push_str(&format!("  👉 {}\n", verdict.plaintiff_reparation));
        out.push_str(&format!("{}\n", format!("Order for {}", defendant).red().bold()));
        out.push_str(&format!("  👉 {}\n", verdict.defendant_reparation));
    } else {
        out.push_str("OFFICIAL DECREE\n");
        out.push_str("In the High Court of Home\n\n");
        out.push_str("Determination of Responsibility\n");
        out.push_str(&format!("  {}\n", bar));
        out.push_str(&format!(
            "  {} {}%   {} {}%\n\n",
            plaintiff, verdict.plaintiff_responsibility, defendant, verdict.defendant_responsibility
        ));
        out.push_str("Judicial Opinion\n");
        out.push_str(&format!("  \"{}\"\n", verdict.decree));
        out.push_str(&format!("{:>44}\n\n", "Hon. Panda Judge"));
        out.push_str(&format!("Order for {}\n", plaintiff));
        out.push_str(&format!("  👉 {}\n", verdict.plaintiff_reparation));
        out.push_str(&format!("Order for {}\n", defendant));
        out.push_str(&format!("  👉 {}\n", verdict.defendant_reparation));
    }
    out
}
