//! Court State - the root controller
//!
//! Owns every piece of form state. The TUI renders from it and mutates it
//! only through these methods. Flow: idle -> submitting -> (verdict | error)
//! -> reset -> idle.

use court_common::{Adjudicator, CaseSubmission, PartyRole, Verdict, VerdictError};

pub const BLANK_STATEMENT_ERROR: &str = "Both parties must provide a statement before the court can rule!";
pub const GENERIC_ERROR: &str = "An error occurred in the court.";

/// Editable form fields, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    PlaintiffName,
    PlaintiffStatement,
    DefendantName,
    DefendantStatement,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::PlaintiffName,
        FormField::PlaintiffStatement,
        FormField::DefendantName,
        FormField::DefendantStatement,
    ];

    pub fn role(self) -> PartyRole {
        match self {
            FormField::PlaintiffName | FormField::PlaintiffStatement => PartyRole::Plaintiff,
            FormField::DefendantName | FormField::DefendantStatement => PartyRole::Defendant,
        }
    }

    pub fn is_statement(self) -> bool {
        matches!(self, FormField::PlaintiffStatement | FormField::DefendantStatement)
    }

    pub fn name_of(role: PartyRole) -> Self {
        match role {
            PartyRole::Plaintiff => FormField::PlaintiffName,
            PartyRole::Defendant => FormField::DefendantName,
        }
    }

    pub fn statement_of(role: PartyRole) -> Self {
        match role {
            PartyRole::Plaintiff => FormField::PlaintiffStatement,
            PartyRole::Defendant => FormField::DefendantStatement,
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Central court state - everything on screen comes from here
#[derive(Debug, Clone)]
pub struct CourtState {
    pub plaintiff_name: String,
    pub plaintiff_statement: String,
    pub defendant_name: String,
    pub defendant_statement: String,

    /// An adjudication is in flight; all input is read-only
    pub is_loading: bool,

    /// Last verdict, shown as a modal until reset
    pub verdict: Option<Verdict>,

    /// Banner message from the last failed submit
    pub error: Option<String>,

    /// Field receiving keystrokes
    pub focus: FormField,

    pub show_help: bool,

    /// Animation frame for the deliberating spinner
    pub thinking_frame: usize,

    /// Scroll offset inside the verdict modal
    pub verdict_scroll: u16,
}

impl Default for CourtState {
    fn default() -> Self {
        Self {
            plaintiff_name: String::new(),
            plaintiff_statement: String::new(),
            defendant_name: String::new(),
            defendant_statement: String::new(),
            is_loading: false,
            verdict: None,
            error: None,
            focus: FormField::PlaintiffName,
            show_help: false,
            thinking_frame: 0,
            verdict_scroll: 0,
        }
    }
}

impl CourtState {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::PlaintiffName => &self.plaintiff_name,
            FormField::PlaintiffStatement => &self.plaintiff_statement,
            FormField::DefendantName => &self.defendant_name,
            FormField::DefendantStatement => &self.defendant_statement,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::PlaintiffName => &mut self.plaintiff_name,
            FormField::PlaintiffStatement => &mut self.plaintiff_statement,
            FormField::DefendantName => &mut self.defendant_name,
            FormField::DefendantStatement => &mut self.defendant_statement,
        }
    }

    pub fn name(&self, role: PartyRole) -> &str {
        self.field(FormField::name_of(role))
    }

    pub fn statement(&self, role: PartyRole) -> &str {
        self.field(FormField::statement_of(role))
    }

    /// Set a field directly (CLI and tests). Rejected while loading.
    pub fn set_field(&mut self, field: FormField, value: &str) -> bool {
        if self.is_loading {
            return false;
        }
        *self.field_mut(field) = value.to_string();
        true
    }

    /// Whether form fields accept edits right now
    pub fn is_editable(&self) -> bool {
        !self.is_loading && self.verdict.is_none()
    }

    pub fn insert_char(&mut self, c: char) -> bool {
        if !self.is_editable() {
            return false;
        }
        let focus = self.focus;
        self.field_mut(focus).push(c);
        true
    }

    /// Enter: newline in a statement, next field from a name
    pub fn insert_newline(&mut self) -> bool {
        if !self.is_editable() {
            return false;
        }
        if self.focus.is_statement() {
            let focus = self.focus;
            self.field_mut(focus).push('\n');
        } else {
            self.focus = self.focus.next();
        }
        true
    }

    pub fn backspace(&mut self) -> bool {
        if !self.is_editable() {
            return false;
        }
        let focus = self.focus;
        self.field_mut(focus).pop().is_some()
    }

    pub fn clear_field(&mut self) -> bool {
        if !self.is_editable() {
            return false;
        }
        let focus = self.focus;
        self.field_mut(focus).clear();
        true
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Submit is offered only while idle
    pub fn can_submit(&self) -> bool {
        !self.is_loading && self.verdict.is_none()
    }

    /// Validate the form and move to submitting.
    ///
    /// Returns the case to send, or `None` if nothing should be sent: already
    /// loading, a verdict is still open, or a statement is blank (which sets
    /// the banner).
    pub fn begin_submit(&mut self) -> Option<CaseSubmission> {
        if !self.can_submit() {
            return None;
        }

        if self.plaintiff_statement.trim().is_empty() || self.defendant_statement.trim().is_empty() {
            self.error = Some(BLANK_STATEMENT_ERROR.to_string());
            return None;
        }

        self.error = None;
        self.is_loading = true;
        self.thinking_frame = 0;

        Some(CaseSubmission::from_form(
            &self.plaintiff_name,
            &self.plaintiff_statement,
            &self.defendant_name,
            &self.defendant_statement,
        ))
    }

    /// Record the outcome of the in-flight adjudication. Always ends loading.
    pub fn settle(&mut self, result: Result<Verdict, VerdictError>) {
        match result {
            Ok(verdict) => {
                self.verdict = Some(verdict);
                self.verdict_scroll = 0;
            }
            Err(e) => {
                let message = e.to_string();
                self.error = Some(if message.is_empty() {
                    GENERIC_ERROR.to_string()
                } else {
                    message
                });
            }
        }
        self.is_loading = false;
    }

    /// Full submit: validate, one call, settle. Returns whether a call was made.
    pub async fn submit(&mut self, adjudicator: &dyn Adjudicator) -> bool {
        let Some(case) = self.begin_submit() else {
            return false;
        };
        let result = adjudicator.adjudicate(&case).await;
        self.settle(result);
        true
    }

    /// Clear verdict, names, statements and error. Ignored while loading.
    pub fn reset(&mut self) -> bool {
        if self.is_loading {
            return false;
        }
        self.verdict = None;
        self.plaintiff_statement.clear();
        self.defendant_statement.clear();
        self.plaintiff_name.clear();
        self.defendant_name.clear();
        self.error = None;
        self.verdict_scroll = 0;
        self.focus = FormField::PlaintiffName;
        true
    }

    /// Advance the deliberating animation
    pub fn tick(&mut self) {
        if self.is_loading {
            self.thinking_frame = (self.thinking_frame + 1) % 8;
        }
    }

    pub fn scroll_verdict_up(&mut self, amount: u16) {
        self.verdict_scroll = self.verdict_scroll.saturating_sub(amount);
    }

    pub fn scroll_verdict_down(&mut self, amount: u16) {
        self.verdict_scroll = self.verdict_scroll.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycles() {
        assert_eq!(FormField::DefendantStatement.next(), FormField::PlaintiffName);
        assert_eq!(FormField::PlaintiffName.prev(), FormField::DefendantStatement);
        assert_eq!(FormField::PlaintiffStatement.role(), PartyRole::Plaintiff);
    }

    #[test]
    fn test_typing_into_focused_field() {
        let mut state = CourtState::default();
        for c in "Colin".chars() {
            state.insert_char(c);
        }
        state.insert_newline(); // name field: moves focus
        assert_eq!(state.focus, FormField::PlaintiffStatement);
        for c in "hi".chars() {
            state.insert_char(c);
        }
        state.insert_newline();
        state.insert_char('x');
        state.backspace();

        assert_eq!(state.plaintiff_name, "Colin");
        assert_eq!(state.plaintiff_statement, "hi\n");
    }

    #[test]
    fn test_edits_rejected_while_loading() {
        let mut state = CourtState::default();
        state.is_loading = true;
        assert!(!state.insert_char('a'));
        assert!(!state.backspace());
        assert!(!state.clear_field());
        assert!(!state.set_field(FormField::DefendantName, "Mommy"));
        assert_eq!(state.plaintiff_name, "");
        assert_eq!(state.defendant_name, "");
    }

    #[test]
    fn test_whitespace_statement_is_rejected() {
        let mut state = CourtState::default();
        state.plaintiff_statement = "He took my toy".to_string();
        state.defendant_statement = "  \n\t".to_string();

        assert_eq!(state.begin_submit(), None);
        assert_eq!(state.error.as_deref(), Some(BLANK_STATEMENT_ERROR));
        assert!(!state.is_loading);
    }

    #[test]
    fn test_begin_submit_sets_loading_and_clears_error() {
        let mut state = CourtState::default();
        state.error = Some("old".to_string());
        state.plaintiff_statement = "He took my toy".to_string();
        state.defendant_statement = "I was just borrowing it".to_string();

        let case = state.begin_submit().unwrap();
        assert!(state.is_loading);
        assert_eq!(state.error, None);
        assert_eq!(case.plaintiff_name, "Plaintiff");
        assert_eq!(case.defendant_name, "Defendant");
        // Display-side names stay blank
        assert_eq!(state.plaintiff_name, "");

        // Second submit while in flight does nothing
        assert_eq!(state.begin_submit(), None);
    }

    #[test]
    fn test_settle_error_ends_loading() {
        let mut state = CourtState {
            is_loading: true,
            ..CourtState::default()
        };
        state.settle(Err(VerdictError::Unavailable));
        assert!(!state.is_loading);
        assert!(state.verdict.is_none());
        assert_eq!(
            state.error.as_deref(),
            Some("The court is in recess due to technical difficulties.")
        );
    }

    #[test]
    fn test_reset_ignored_while_loading() {
        let mut state = CourtState::default();
        state.plaintiff_statement = "keep".to_string();
        state.is_loading = true;
        assert!(!state.reset());
        assert_eq!(state.plaintiff_statement, "keep");
    }

    #[test]
    fn test_tick_only_animates_while_loading() {
        let mut state = CourtState::default();
        state.tick();
        assert_eq!(state.thinking_frame, 0);
        state.is_loading = true;
        for _ in 0..9 {
            state.tick();
        }
        assert_eq!(state.thinking_frame, 1);
    }
}
