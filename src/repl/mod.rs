//! Interactive lookup loop.
//!
//! Reads topics and keywords line by line, dispatches lookups, and offers
//! the browser and PDF follow-ups after each result.

/// Keyword and menu parsing.
pub mod command;
/// Terminal and piped-input prompts.
pub mod prompt;
mod session;
mod ui;

pub use prompt::{InquirePrompter, LinePrompter, Prompter};
pub use session::{Session, SessionConfig, SessionState};
