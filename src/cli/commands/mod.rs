//! Subcommand implementations.

/// Interactive lookup session handler.
pub mod lookup;
