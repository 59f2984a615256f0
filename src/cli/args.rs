use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wikifetch")]
#[command(about = "Look up encyclopedia summaries and thumbnails from the terminal")]
#[command(version)]
pub struct Args {
    /// Language code for lookups (en, es, zh, hi, ar, fr, ja, ru)
    #[arg(short = 'l', long = "lang")]
    pub lang: Option<String>,

    /// Request timeout in seconds
    #[arg(short = 't', long)]
    pub timeout: Option<u64>,

    /// Directory PDF exports are written to
    #[arg(short = 'o', long)]
    pub export_dir: Option<PathBuf>,

    /// Do not open thumbnails in the image viewer
    #[arg(long)]
    pub no_images: bool,

    /// Suppress status messages
    #[arg(short = 'q', long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List supported language codes
    Languages,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let args = Args::parse_from(["wikifetch"]);
        assert!(args.lang.is_none());
        assert!(!args.no_images);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from([
            "wikifetch",
            "--lang",
            "fr",
            "-t",
            "3",
            "-o",
            "/tmp/exports",
            "--no-images",
        ]);
        assert_eq!(args.lang.as_deref(), Some("fr"));
        assert_eq!(args.timeout, Some(3));
        assert_eq!(args.export_dir, Some(PathBuf::from("/tmp/exports")));
        assert!(args.no_images);
    }

    #[test]
    fn test_parse_languages_subcommand() {
        let args = Args::parse_from(["wikifetch", "languages"]);
        assert!(matches!(args.command, Some(Command::Languages)));
    }
}
