use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wikifetch::cli::commands::lookup;
use wikifetch::cli::{Args, Command};
use wikifetch::output::{self, OutputConfig};
use wikifetch::wiki::{print_locales, validate_locale};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        ..OutputConfig::default()
    });

    // Diagnostics are off unless WIKIFETCH_LOG is set, e.g. WIKIFETCH_LOG=debug.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("WIKIFETCH_LOG").unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Some(Command::Languages) => {
            print_locales();
        }
        None => {
            if let Some(ref lang) = args.lang {
                validate_locale(lang)?;
            }

            let options = lookup::LookupOptions {
                lang: args.lang,
                timeout: args.timeout,
                export_dir: args.export_dir,
                no_images: args.no_images,
            };
            lookup::run_lookup(options).await?;
        }
    }

    Ok(())
}
