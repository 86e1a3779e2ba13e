//! Judge persona, per-case prompt, and the response schema

use serde_json::{json, Value};

use crate::types::CaseSubmission;

/// Fixed persona for every adjudication
pub const PANDA_JUDGE_SYSTEM_PROMPT: &str = r#"You are the Honorable Panda Judge, presiding over the 'Home Court'.
Your jurisdiction is family disputes (Parent vs. Child, Sibling vs. Sibling).
You speak with a unique mix of cute animal metaphors, strict official legal terminology (e.g., 'Habeas Corpus', 'In lieu of', 'The court finds', 'Sustain', 'Overrule'), and deep, compassionate parenting wisdom.

Your psychological framework is based on evidence-based parenting books like "Raising Cain" and "The Whole-Brain Child".
Key principles to apply:
1. Connection before correction.
2. Understanding emotional flooding (the "lizard brain").
3. Recognizing the "boy code" or emotional suppression if applicable.
4. De-escalation over punishment.

Your Task:
1. Analyze the conflict provided by the Plaintiff and Defendant.
2. Assign responsibility percentages. It is rarely 100% one person's fault; relationships are systems.
3. Write a "Decree": A paragraph explaining *why* the conflict escalated, acknowledging the feelings of both sides validly, but ruling on the behavior. Use legal flair.
4. Assign "Reparations": Short, immediate, useful actions to cool down or reconnect (e.g., "Drink a glass of water", "Do 5 jumping jacks", "Say one thing you like about the other person", "3-minute silent hug").

Tone: Authoritative but adorable. Firm but fair.
"#;

/// Required verdict fields, in schema order
pub const VERDICT_FIELDS: [&str; 5] = [
    "plaintiffResponsibility",
    "defendantResponsibility",
    "decree",
    "plaintiffReparation",
    "defendantReparation",
];

/// Case number for a new submission: Unix time in milliseconds.
/// Only shown to the model; two quick submits may share one.
pub fn new_case_number() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Build the per-case user prompt
pub fn build_prompt(case: &CaseSubmission, case_number: i64) -> String {
    format!(
        "CASE NUMBER: {}\n\
         \n\
         PLAINTIFF ({}):\n\
         \"{}\"\n\
         \n\
         DEFENDANT ({}):\n\
         \"{}\"\n\
         \n\
         Please adjudicate this matter immediately.",
        case_number,
        case.plaintiff_name,
        case.plaintiff_statement,
        case.defendant_name,
        case.defendant_statement,
    )
}

/// Response schema in the generateContent `responseSchema` dialect
pub fn verdict_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "plaintiffResponsibility": {
                "type": "NUMBER",
                "description": "Percentage of responsibility assigned to the Plaintiff (0-100)."
            },
            "defendantResponsibility": {
                "type": "NUMBER",
                "description": "Percentage of responsibility assigned to the Defendant (0-100). Should sum to 100 with plaintiff."
            },
            "decree": {
                "type": "STRING",
                "description": "The judge's official explanation using legal jargon and compassionate parenting wisdom."
            },
            "plaintiffReparation": {
                "type": "STRING",
                "description": "A short, immediate, actionable task for the Plaintiff to resolve the conflict."
            },
            "defendantReparation": {
                "type": "STRING",
                "description": "A short, immediate, actionable task for the Defendant to resolve the conflict."
            }
        },
        "required": VERDICT_FIELDS,
    })
}
