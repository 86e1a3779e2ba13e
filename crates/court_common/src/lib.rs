//! Home Court common library
//!
//! Domain types, the verdict service, configuration and logging shared by
//! `courtctl`.

pub mod config;
pub mod display;
pub mod error;
pub mod llm_client;
pub mod llm_protocol;
pub mod logging;
pub mod prompts;
pub mod types;

pub use config::{CourtConfig, LlmConfig, LogConfig};
pub use error::VerdictError;
pub use llm_client::{Adjudicator, FakeAdjudicator, GeminiAdjudicator};
pub use types::{CaseSubmission, PartyConfig, PartyRole, Verdict};
