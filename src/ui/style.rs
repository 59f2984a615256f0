//! Consistent styling utilities for CLI output.
//!
//! Provides color and formatting helpers using owo-colors. Every helper
//! falls back to plain text when colors are disabled.

use owo_colors::OwoColorize;
use std::fmt::Display;

use crate::output;

/// Styles for different semantic elements.
pub struct Style;

fn paint<T: Display>(text: T, styled: impl FnOnce(&T) -> String) -> String {
    if output::is_no_color() {
        text.to_string()
    } else {
        styled(&text)
    }
}

impl Style {
    /// Style for section headers (e.g., "Menu", "Summary about Paris")
    pub fn header<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.bold()))
    }

    /// Style for the application banner
    pub fn banner<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.blue().bold()))
    }

    /// Style for labels/keys (e.g., "lang", "timeout")
    pub fn label<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.dimmed()))
    }

    /// Style for primary values (e.g., topics, language names)
    pub fn value<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.cyan()))
    }

    /// Style for secondary/supplementary info (e.g., URLs, descriptions)
    pub fn secondary<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.green()))
    }

    /// Style for success messages
    pub fn success<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.green().bold()))
    }

    /// Style for error messages
    pub fn error<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.red().bold()))
    }

    /// Style for warning messages
    pub fn warning<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.yellow().bold()))
    }

    /// Style for commands (e.g., "menu", "languages")
    pub fn command<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.green()))
    }

    /// Style for locale codes
    pub fn code<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.cyan()))
    }

    /// Style for language names in the locale table
    pub fn name<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.magenta()))
    }

    /// Style for hints/help text
    pub fn hint<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.dimmed().italic()))
    }

    /// Style for version info
    pub fn version<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.dimmed()))
    }
}
