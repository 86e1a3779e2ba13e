//! Adjudication errors
//!
//! Every way a verdict request can fail. The Display text is what the user
//! sees in the error banner; transport details only go to the log.

/// Verdict service errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VerdictError {
    /// No credential configured; raised before any network attempt
    #[error("API Key is missing in environment variables.")]
    MissingApiKey,

    /// Transport failure, timeout, bad status, or undecodable envelope
    #[error("The court is in recess due to technical difficulties.")]
    Unavailable,

    /// The call succeeded but the model returned no text
    #[error("The Panda Judge is sleeping (Empty response).")]
    EmptyResponse,

    /// Non-empty text that does not decode into a verdict
    #[error("The court clerk could not read the decree.")]
    Malformed(String),
}

impl VerdictError {
    /// Short stable code for `courtctl judge --json` errors
    pub fn code(&self) -> &'static str {
        match self {
            VerdictError::MissingApiKey => "missing_api_key",
            VerdictError::Unavailable => "unavailable",
            VerdictError::EmptyResponse => "empty_response",
            VerdictError::Malformed(_) => "malformed",
        }
    }
}
