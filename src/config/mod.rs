//! Configuration file management and resolution.

mod manager;

pub use manager::{
    ConfigFile, ConfigManager, ResolveOptions, ResolvedConfig, WikifetchConfig, resolve_config,
};
