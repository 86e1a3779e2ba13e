//! TUI Module
//!
//! - event_loop: entry point, key handling, the one in-flight adjudication
//! - render: the courtroom screen
//! - party: plaintiff / defendant cards
//! - avatar: judge portrait and deliberating indicator
//! - verdict_view: the decree modal
//! - utils: layout helpers and help overlay

mod avatar;
mod event_loop;
mod party;
mod render;
mod utils;
mod verdict_view;

pub use avatar::{AvatarSource, AvatarState};
pub use event_loop::{handle_key, run, start_adjudication, KeyAction, TuiMessage};
pub use render::draw_ui;
pub use verdict_view::bar_line;
