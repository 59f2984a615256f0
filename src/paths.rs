//! XDG-style path utilities for the configuration directory.
//!
//! Prefers XDG Base Directory conventions over OS-specific locations.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Returns the configuration directory for wikifetch.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/wikifetch` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/wikifetch` otherwise
pub fn config_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join("wikifetch")),
        _ => Ok(dirs::home_dir()
            .context("Failed to determine home directory")?
            .join(".config")
            .join("wikifetch")),
    }
}
