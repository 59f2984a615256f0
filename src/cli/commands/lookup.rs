use anyhow::Result;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use crate::config::{ConfigFile, ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::desktop::SystemLauncher;
use crate::repl::{InquirePrompter, LinePrompter, Session, SessionConfig};
use crate::wiki::{Endpoints, ReqwestTransport, TransportOptions, WikiClient, describe};

pub struct LookupOptions {
    pub lang: Option<String>,
    pub timeout: Option<u64>,
    pub export_dir: Option<PathBuf>,
    pub no_images: bool,
}

pub async fn run_lookup(options: LookupOptions) -> Result<()> {
    let config = load_resolved_config(&options)?;
    tracing::debug!(?config, "resolved configuration");

    let locale = describe(&config.lang)
        .ok_or_else(|| anyhow::anyhow!("Invalid language code: '{}'", config.lang))?;

    let transport = ReqwestTransport::new(&TransportOptions {
        user_agent: config.user_agent.clone(),
        timeout: config.timeout,
        connect_timeout: config.connect_timeout,
    })?;
    let client = WikiClient::new(transport, Endpoints::new(config.domain.clone()));

    let session_config = SessionConfig {
        locale,
        show_images: config.show_images,
        export_dir: config.export_dir,
    };

    // Piped input gets plain line prompts instead of the interactive widgets.
    if io::stdin().is_terminal() {
        Session::new(session_config, client, InquirePrompter::default(), SystemLauncher)
            .run()
            .await
    } else {
        Session::new(session_config, client, LinePrompter::stdin(), SystemLauncher)
            .run()
            .await
    }
}

fn load_resolved_config(options: &LookupOptions) -> Result<ResolvedConfig> {
    let file_config = ConfigManager::new().map_or_else(
        |_| ConfigFile::default(),
        |manager| manager.load_or_default(),
    );

    resolve_config(
        &ResolveOptions {
            lang: options.lang.clone(),
            timeout_secs: options.timeout,
            export_dir: options.export_dir.clone(),
            no_images: options.no_images,
        },
        &file_config,
    )
}
