//! Core types for Home Court
//!
//! A case submission goes out, a verdict comes back. Neither is persisted.

use serde::{Deserialize, Serialize};

use crate::error::VerdictError;

/// The two sides of a dispute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyRole {
    Plaintiff,
    Defendant,
}

/// Presentation settings for one party's form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartyConfig {
    pub label: &'static str,
    pub placeholder_name: &'static str,
    pub placeholder_statement: &'static str,
    pub icon: &'static str,
}

impl PartyRole {
    pub fn config(self) -> PartyConfig {
        match self {
            PartyRole::Plaintiff => PartyConfig {
                label: "Plaintiff (The Upset One)",
                placeholder_name: "e.g., Colin",
                placeholder_statement: "I was practicing violin and...",
                icon: "🥺",
            },
            PartyRole::Defendant => PartyConfig {
                label: "Defendant (The Accused)",
                placeholder_name: "e.g., Mommy",
                placeholder_statement: "I was just trying to help with the tempo...",
                icon: "😤",
            },
        }
    }

    /// Label used in place of a name the user left blank
    pub fn fallback_name(self) -> &'static str {
        match self {
            PartyRole::Plaintiff => "Plaintiff",
            PartyRole::Defendant => "Defendant",
        }
    }

    /// Name to show for this party: the typed name, or the fallback label
    pub fn display_name(self, name: &str) -> &str {
        if name.is_empty() {
            self.fallback_name()
        } else {
            name
        }
    }
}

/// A case as sent to the judge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseSubmission {
    pub plaintiff_name: String,
    pub plaintiff_statement: String,
    pub defendant_name: String,
    pub defendant_statement: String,
}

impl CaseSubmission {
    /// Build a submission from raw form fields.
    ///
    /// Empty names become "Plaintiff" / "Defendant". Statements are kept
    /// verbatim; blank-statement rejection is the caller's job.
    pub fn from_form(
        plaintiff_name: &str,
        plaintiff_statement: &str,
        defendant_name: &str,
        defendant_statement: &str,
    ) -> Self {
        Self {
            plaintiff_name: PartyRole::Plaintiff.display_name(plaintiff_name).to_string(),
            plaintiff_statement: plaintiff_statement.to_string(),
            defendant_name: PartyRole::Defendant.display_name(defendant_name).to_string(),
            defendant_statement: defendant_statement.to_string(),
        }
    }
}

/// The judge's ruling.
///
/// Percentages are whatever the model returned: no clamping to 0-100 and no
/// check that they sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub plaintiff_responsibility: f64,
    pub defendant_responsibility: f64,
    pub decree: String,
    pub plaintiff_reparation: String,
    pub defendant_reparation: String,
}

impl Verdict {
    /// Parse the model's response text into a verdict.
    ///
    /// Blank text is `EmptyResponse`; anything else that fails to decode into
    /// all five fields is `Malformed`.
    pub fn from_response_text(text: &str) -> Result<Self, VerdictError> {
        if text.trim().is_empty() {
            return Err(VerdictError::EmptyResponse);
        }

        serde_json::from_str(text).map_err(|e| VerdictError::Malformed(e.to_string()))
    }

    pub fn responsibility(&self, role: PartyRole) -> f64 {
        match role {
            PartyRole::Plaintiff => self.plaintiff_responsibility,
            PartyRole::Defendant => self.defendant_responsibility,
        }
    }

    pub fn reparation(&self, role: PartyRole) -> &str {
        match role {
            PartyRole::Plaintiff => &self.plaintiff_reparation,
            PartyRole::Defendant => &self.defendant_reparation,
        }
    }
}
