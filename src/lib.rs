//! # wikifetch - Encyclopedia lookups from the terminal
//!
//! `wikifetch` is an interactive command-line tool that fetches the summary
//! and thumbnail of a topic from Wikipedia. It can open the full article in a
//! browser and export what it gathered to a PDF.
//!
//! ## Features
//!
//! - **Summaries and thumbnails** in eight language editions
//! - **Session cache**: repeated lookups never hit the network twice
//! - **Search history** for the current session
//! - **PDF export** of the summary and thumbnail
//!
//! ## Quick Start
//!
//! ```bash
//! # Start an interactive session
//! wikifetch
//!
//! # Start in French and write exports to ~/Documents
//! wikifetch --lang fr --export-dir ~/Documents
//!
//! # List supported language codes
//! wikifetch languages
//! ```
//!
//! ## Configuration
//!
//! Settings are read from `~/.config/wikifetch/config.toml`:
//!
//! ```toml
//! [wikifetch]
//! lang = "en"
//! timeout_secs = 10
//! connect_timeout_secs = 5
//! export_dir = "."
//! show_images = true
//! ```

/// In-memory response cache for the current session.
pub mod cache;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management.
pub mod config;

/// Browser and image viewer hand-off.
pub mod desktop;

/// Error types for remote lookups.
pub mod error;

/// PDF export.
pub mod export;

/// File system utilities.
pub mod fs;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// The interactive lookup loop.
pub mod repl;

/// Terminal UI components (spinner, colors).
pub mod ui;

/// Encyclopedia client, endpoints and locales.
pub mod wiki;
