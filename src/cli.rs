//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CliOverrides;

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INVALID_ARGS: i32 = 2;
    pub const INPUT_NOT_FOUND: i32 = 3;
    pub const STARTUP_FAILED: i32 = 4;
    /// The photo could not be matched; take another one
    pub const RETAKE_NEEDED: i32 = 5;
}

/// Find how far to roll a scroll by photographing the open column
#[derive(Parser, Debug)]
#[command(name = "scroll-locator")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags accepted by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Section list (JSON)
    #[arg(long = "sections", value_name = "FILE", global = true)]
    pub sections_file: Option<PathBuf>,

    /// Column texts (JSON)
    #[arg(long = "columns", value_name = "FILE", global = true)]
    pub columns_file: Option<PathBuf>,

    /// Recognition timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Minimum similarity accepted as a match (0.0-1.0)
    #[arg(long, value_name = "SCORE", global = true)]
    pub min_similarity: Option<f64>,

    /// OCR language (e.g. heb, heb+eng)
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl GlobalArgs {
    /// Values that override the config file
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            sections: self.sections_file.clone(),
            columns: self.columns_file.clone(),
            timeout_secs: self.timeout,
            min_similarity: self.min_similarity,
            language: self.lang.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Tell how many columns to roll to reach a section
    Locate(LocateArgs),
    /// Show which column a photo or text matches
    Match(MatchArgs),
    /// List the known sections
    Sections,
    /// Show system information
    Info,
    /// Start the HTTP API
    #[cfg(feature = "web")]
    Serve(ServeArgs),
}

/// Arguments for the locate command
#[derive(Args, Debug)]
pub struct LocateArgs {
    /// Photo of the open column
    pub image: PathBuf,

    /// Target section: list number, name, or close spelling
    #[arg(short, long)]
    pub section: Option<String>,
}

/// Arguments for the match command
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Photo of the open column
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    pub image: Option<PathBuf>,

    /// Match this text instead of a photo
    #[arg(long)]
    pub text: Option<String>,

    /// Number of columns to show
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=100))]
    pub top: u16,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the serve command
#[cfg(feature = "web")]
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = crate::web::DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = crate::web::DEFAULT_BIND)]
    pub bind: String,

    /// Upload size limit in MB
    #[arg(long, default_value_t = 20)]
    pub upload_limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_args() {
        let cli = Cli::try_parse_from([
            "scroll-locator",
            "locate",
            "photo.jpg",
            "--section",
            "Noach",
        ])
        .unwrap();
        match cli.command {
            Commands::Locate(args) => {
                assert_eq!(args.image, PathBuf::from("photo.jpg"));
                assert_eq!(args.section.as_deref(), Some("Noach"));
            }
            _ => panic!("expected locate"),
        }
    }

    #[test]
    fn test_match_text() {
        let cli =
            Cli::try_parse_from(["scroll-locator", "match", "--text", "בראשית", "--top", "3"])
                .unwrap();
        match cli.command {
            Commands::Match(args) => {
                assert!(args.image.is_none());
                assert_eq!(args.text.as_deref(), Some("בראשית"));
                assert_eq!(args.top, 3);
            }
            _ => panic!("expected match"),
        }
    }

    #[test]
    fn test_match_requires_input() {
        assert!(Cli::try_parse_from(["scroll-locator", "match"]).is_err());
        assert!(
            Cli::try_parse_from(["scroll-locator", "match", "a.jpg", "--text", "x"]).is_err()
        );
        assert!(
            Cli::try_parse_from(["scroll-locator", "match", "--text", "x", "--top", "0"]).is_err()
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "scroll-locator",
            "sections",
            "--sections",
            "s.json",
            "--columns",
            "c.json",
            "--timeout",
            "10",
            "-vv",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Sections));
        assert_eq!(cli.global.verbose, 2);

        let overrides = cli.global.overrides();
        assert_eq!(overrides.sections, Some(PathBuf::from("s.json")));
        assert_eq!(overrides.columns, Some(PathBuf::from("c.json")));
        assert_eq!(overrides.timeout_secs, Some(10));
        assert!(overrides.language.is_none());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["scroll-locator", "info", "-q", "-v"]).is_err());
        let cli = Cli::try_parse_from(["scroll-locator", "info", "-q"]).unwrap();
        assert!(cli.global.quiet);
    }

    #[test]
    fn test_exit_codes_distinct() {
        let codes = [
            exit_codes::SUCCESS,
            exit_codes::GENERAL_ERROR,
            exit_codes::INVALID_ARGS,
            exit_codes::INPUT_NOT_FOUND,
            exit_codes::STARTUP_FAILED,
            exit_codes::RETAKE_NEEDED,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
