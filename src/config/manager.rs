use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::paths;
use crate::wiki::endpoints::DEFAULT_DOMAIN;
use crate::wiki::locale::{DEFAULT_LOCALE, validate_locale};
use crate::wiki::transport::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT, USER_AGENT};

/// Settings in the `[wikifetch]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WikifetchConfig {
    /// Default locale code.
    pub lang: Option<String>,
    /// Total request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// Directory PDF exports are written to.
    pub export_dir: Option<PathBuf>,
    /// Whether fetched thumbnails are opened in the image viewer.
    pub show_images: Option<bool>,
    /// Host suffix the locale is prepended to.
    pub domain: Option<String>,
    /// Overrides the User-Agent sent with every request.
    pub user_agent: Option<String>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/wikifetch/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub wikifetch: WikifetchConfig,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub lang: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub export_dir: PathBuf,
    pub show_images: bool,
    pub domain: String,
    pub user_agent: String,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub lang: Option<String>,
    pub timeout_secs: Option<u64>,
    pub export_dir: Option<PathBuf>,
    pub no_images: bool,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// Priority: CLI arguments, then the config file, then built-in defaults.
///
/// # Errors
///
/// Returns an error if the resolved locale is not supported or a timeout is
/// zero.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let file = &config_file.wikifetch;

    let lang = options
        .lang
        .clone()
        .or_else(|| file.lang.clone())
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    validate_locale(&lang)?;

    let timeout = options
        .timeout_secs
        .or(file.timeout_secs)
        .map_or(DEFAULT_TIMEOUT, Duration::from_secs);
    let connect_timeout = file
        .connect_timeout_secs
        .map_or(DEFAULT_CONNECT_TIMEOUT, Duration::from_secs);
    if timeout.is_zero() || connect_timeout.is_zero() {
        anyhow::bail!("Timeouts must be at least one second");
    }

    let export_dir = options
        .export_dir
        .clone()
        .or_else(|| file.export_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let show_images = !options.no_images && file.show_images.unwrap_or(true);

    Ok(ResolvedConfig {
        lang,
        timeout,
        connect_timeout,
        export_dir,
        show_images,
        domain: file
            .domain
            .clone()
            .unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
        user_agent: file
            .user_agent
            .clone()
            .unwrap_or_else(|| USER_AGENT.to_string()),
    })
}

/// Locates and reads the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/wikifetch/config.toml`
    /// or `~/.config/wikifetch/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but fails to parse is reported and ignored.
    pub fn load_or_default(&self) -> ConfigFile {
        if !self.config_path.exists() {
            return ConfigFile::default();
        }
        self.load().unwrap_or_else(|e| {
            crate::warn!(
                "{} {e:#}; using defaults",
                crate::ui::Style::warning("Warning:")
            );
            ConfigFile::default()
        })
    }
}
