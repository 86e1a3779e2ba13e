//! Command line interface
//!
//! `courtctl` with no subcommand opens the courtroom TUI. `courtctl judge`
//! rules on one case and prints the decree.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use court_common::display::format_verdict;
use court_common::{Adjudicator, VerdictError};
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;

use crate::court_state::{CourtState, FormField};

/// Exit code when the court could not rule
pub const EXIT_NO_VERDICT: i32 = 1;

/// JSON error code for a case rejected before it reached the judge
pub const BLANK_STATEMENT_CODE: &str = "blank_statement";

#[derive(Debug, Parser)]
#[command(name = "courtctl")]
#[command(about = "Home Court - the Honorable Panda Judge settles family disputes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: ~/.config/home-court/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Model to use instead of the configured one
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Log file for the TUI (default: ~/.local/state/home-court/courtctl.log)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the courtroom (default)
    Tui,

    /// Rule on one case and print the decree
    Judge(JudgeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct JudgeArgs {
    /// Plaintiff's name (default: "Plaintiff")
    #[arg(long, default_value = "")]
    pub plaintiff_name: String,

    /// What the plaintiff says happened
    #[arg(long)]
    pub plaintiff_statement: String,

    /// Defendant's name (default: "Defendant")
    #[arg(long, default_value = "")]
    pub defendant_name: String,

    /// What the defendant says happened
    #[arg(long)]
    pub defendant_statement: String,

    /// Print the verdict as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

/// Rule on one case through the same controller the TUI uses.
///
/// The banner goes to `err` on failure; with `--json` an
/// `{"error", "message"}` object also goes to `out`. Returns the exit code.
pub async fn run_judge<O: Write, E: Write>(
    args: &JudgeArgs,
    adjudicator: &dyn Adjudicator,
    out: &mut O,
    err: &mut E,
) -> Result<i32> {
    let mut state = CourtState::default();
    state.set_field(FormField::PlaintiffName, &args.plaintiff_name);
    state.set_field(FormField::PlaintiffStatement, &args.plaintiff_statement);
    state.set_field(FormField::DefendantName, &args.defendant_name);
    state.set_field(FormField::DefendantStatement, &args.defendant_statement);

    let failure_code = match state.begin_submit() {
        Some(case) => {
            let result = adjudicator.adjudicate(&case).await;
            let code = result.as_ref().err().map(VerdictError::code);
            state.settle(result);
            code
        }
        None => Some(BLANK_STATEMENT_CODE),
    };

    if let Some(verdict) = &state.verdict {
        if args.json {
            writeln!(out, "{}", serde_json::to_string_pretty(verdict)?)?;
        } else {
            write!(
                out,
                "{}",
                format_verdict(verdict, &state.plaintiff_name, &state.defendant_name, !args.no_color)
            )?;
        }
        return Ok(0);
    }

    let message = state
        .error
        .as_deref()
        .unwrap_or(crate::court_state::GENERIC_ERROR);
    if args.json {
        let body = json!({ "error": failure_code.unwrap_or("unknown"), "message": message });
        writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
    }
    writeln!(err, "Objection! {}", message)?;
    Ok(EXIT_NO_VERDICT)
}
