//! scroll-locator - find how far to roll a scroll from a photo
//!
//! CLI entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use scroll_locator::{
    exit_codes,
    // CLI
    Cli, Commands, GlobalArgs, LocateArgs, MatchArgs,
    // Config
    Config,
    // Corpus and matching
    ColumnMatch, ColumnMatcher, CorpusStore, Normalizer,
    // Session
    PhotoOutcome, ProgressCallback, Session, SpinnerProgress, StartupError, TerminalPresenter,
    TesseractRecognizer,
    // Output
    OutputMode,
};

#[cfg(feature = "web")]
use scroll_locator::{ServeArgs, ServerConfig, WebServer};

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.global);

    let result = match &cli.command {
        Commands::Locate(args) => run_locate(&cli.global, args),
        Commands::Match(args) => run_match(&cli.global, args),
        Commands::Sections => run_sections(&cli.global),
        Commands::Info => run_info(&cli.global),
        #[cfg(feature = "web")]
        Commands::Serve(args) => run_serve(&cli.global, args),
    };

    std::process::exit(match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_codes::GENERAL_ERROR
        }
    });
}

// ============ Setup ============

/// `RUST_LOG` wins; otherwise the level follows -v / -q
fn init_logging(global: &GlobalArgs) {
    let level = if global.quiet {
        "error"
    } else {
        match global.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn output_mode(global: &GlobalArgs) -> OutputMode {
    if global.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::from_verbosity(global.verbose)
    }
}

/// Config file (explicit or discovered) merged with command line flags
fn load_config(global: &GlobalArgs) -> Result<Config> {
    let file_config = match &global.config {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => Config::load().unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring unreadable config file");
            Config::default()
        }),
    };
    Ok(file_config.merge_with_cli(&global.overrides()))
}

fn load_corpus(config: &Config) -> std::result::Result<CorpusStore, StartupError> {
    Ok(CorpusStore::load(
        &config.corpus_paths(),
        &Normalizer::new(config.script),
    )?)
}

fn start_session(
    runtime: &tokio::runtime::Runtime,
    config: &Config,
) -> std::result::Result<Session<TesseractRecognizer>, StartupError> {
    runtime.block_on(Session::start(
        config.corpus_paths(),
        config.tesseract_options(),
        config.session_options(),
    ))
}

fn read_image(path: &Path) -> Result<Option<Vec<u8>>> {
    if !path.exists() {
        eprintln!("Error: Image not found: {}", path.display());
        return Ok(None);
    }
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Some(bytes))
}

// ============ Locate Command ============

fn run_locate(global: &GlobalArgs, args: &LocateArgs) -> Result<i32> {
    let Some(image) = read_image(&args.image)? else {
        return Ok(exit_codes::INPUT_NOT_FOUND);
    };
    let config = load_config(global)?;
    let mode = output_mode(global);

    let runtime = tokio::runtime::Runtime::new()?;
    let mut session = match start_session(&runtime, &config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(exit_codes::STARTUP_FAILED);
        }
    };

    let mut presenter = TerminalPresenter::stdout(mode).with_photo_prompt(false);

    if let Some(query) = &args.section {
        let Some(index) = session.corpus().find_section(query) else {
            eprintln!("Error: Unknown section: {}", query);
            eprintln!("Run `scroll-locator sections` to list them.");
            return Ok(exit_codes::INVALID_ARGS);
        };
        session.select_section(Some(index), &mut presenter)?;
    }

    let spinner = Arc::new(SpinnerProgress::new(mode));
    let progress: Arc<dyn ProgressCallback> = spinner.clone();
    let outcome = runtime.block_on(session.submit_photo(image, progress, &mut presenter));
    spinner.finish();

    Ok(match outcome {
        PhotoOutcome::Applied { .. } => exit_codes::SUCCESS,
        PhotoOutcome::Retake(_) => exit_codes::RETAKE_NEEDED,
        PhotoOutcome::Stale => exit_codes::GENERAL_ERROR,
    })
}

// ============ Match Command ============

fn run_match(global: &GlobalArgs, args: &MatchArgs) -> Result<i32> {
    let config = load_config(global)?;
    let limit = usize::from(args.top);

    let ranked = match (&args.text, &args.image) {
        (Some(text), _) => {
            let corpus = match load_corpus(&config) {
                Ok(corpus) => corpus,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return Ok(exit_codes::STARTUP_FAILED);
                }
            };
            let normalized = Normalizer::new(config.script).normalize(text);
            ColumnMatcher::from_corpus(&corpus).rank(&normalized, limit)
        }
        (None, Some(path)) => {
            let Some(image) = read_image(path)? else {
                return Ok(exit_codes::INPUT_NOT_FOUND);
            };
            let runtime = tokio::runtime::Runtime::new()?;
            let session = match start_session(&runtime, &config) {
                Ok(session) => session,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return Ok(exit_codes::STARTUP_FAILED);
                }
            };

            let spinner = Arc::new(SpinnerProgress::new(output_mode(global)));
            let progress: Arc<dyn ProgressCallback> = spinner.clone();
            let text = runtime.block_on(session.read_photo(image, progress));
            spinner.finish();

            match text {
                Ok(text) => session.rank(&text, limit),
                Err(reason) => {
                    eprintln!("{}", reason);
                    return Ok(exit_codes::RETAKE_NEEDED);
                }
            }
        }
        (None, None) => return Ok(exit_codes::INVALID_ARGS),
    };

    print_matches(&ranked, args.json)?;
    Ok(exit_codes::SUCCESS)
}

fn print_matches(ranked: &[ColumnMatch], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(ranked)?);
        return Ok(());
    }
    for (rank, matched) in ranked.iter().enumerate() {
        println!(
            "{:>3}. column {:<4} score {:.3}",
            rank + 1,
            matched.column,
            matched.score
        );
    }
    Ok(())
}

// ============ Sections Command ============

fn run_sections(global: &GlobalArgs) -> Result<i32> {
    let config = load_config(global)?;
    let corpus = match load_corpus(&config) {
        Ok(corpus) => corpus,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(exit_codes::STARTUP_FAILED);
        }
    };

    for (index, section) in corpus.sections().iter().enumerate() {
        println!(
            "{:>3}. {} ({}) - column {}",
            index + 1,
            section.name_foreign,
            section.name_native,
            section.start_column
        );
    }
    Ok(exit_codes::SUCCESS)
}

// ============ Info Command ============

fn run_info(global: &GlobalArgs) -> Result<i32> {
    println!("scroll-locator v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("System Information:");
    println!("  Platform: {}", std::env::consts::OS);
    println!("  Arch: {}", std::env::consts::ARCH);
    println!("  CPUs: {}", num_cpus::get());

    let config = load_config(global)?;

    println!();
    println!("OCR Engine:");
    check_tesseract(&config.recognition.command, &config.recognition.language);

    println!();
    println!("Corpus:");
    match load_corpus(&config) {
        Ok(corpus) => println!(
            "  {} sections, {} columns",
            corpus.section_count(),
            corpus.column_count()
        ),
        Err(e) => println!("  Not available: {}", e),
    }

    println!();
    println!("Config File Locations:");
    println!("  Local: ./{}", scroll_locator::config::LOCAL_CONFIG_FILE);
    if let Some(path) = Config::user_config_path() {
        println!("  User:  {}", path.display());
    }

    Ok(exit_codes::SUCCESS)
}

fn check_tesseract(cmd: &str, language: &str) {
    let Ok(path) = which::which(cmd) else {
        println!("  Tesseract: Not found ({})", cmd);
        return;
    };
    let version = std::process::Command::new(&path)
        .arg("--version")
        .output()
        .ok()
        .map(|output| {
            // Some builds print the version on stderr
            let text = if output.stdout.is_empty() {
                output.stderr
            } else {
                output.stdout
            };
            String::from_utf8_lossy(&text)
                .lines()
                .next()
                .unwrap_or("")
                .trim()
                .to_string()
        })
        .unwrap_or_default();
    println!("  Tesseract: {} ({})", path.display(), version);

    let languages = std::process::Command::new(&path)
        .arg("--list-langs")
        .output()
        .map(|o| {
            format!(
                "{}\n{}",
                String::from_utf8_lossy(&o.stdout),
                String::from_utf8_lossy(&o.stderr)
            )
        })
        .unwrap_or_default();
    let installed = TesseractRecognizer::language_available(&languages, language);
    println!(
        "  Language {}: {}",
        language,
        if installed { "installed" } else { "missing" }
    );
}

// ============ Serve Command (Web Server) ============

#[cfg(feature = "web")]
fn run_serve(global: &GlobalArgs, args: &ServeArgs) -> Result<i32> {
    let config = load_config(global)?;
    let server_config = ServerConfig::default()
        .with_port(args.port)
        .with_bind(&args.bind)
        .with_upload_limit(args.upload_limit * 1024 * 1024);

    let runtime = tokio::runtime::Runtime::new()?;
    let session = match start_session(&runtime, &config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(exit_codes::STARTUP_FAILED);
        }
    };

    runtime.block_on(async {
        let server = WebServer::new(session, server_config);
        server.run().await.map_err(|e| anyhow::anyhow!(e))
    })?;

    Ok(exit_codes::SUCCESS)
}
