//! courtctl library - exposes modules for integration tests

pub mod cli;
pub mod court_state;
pub mod tui;
