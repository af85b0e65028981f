//! scroll-locator - find the way around a hand-written scroll
//!
//! Photograph the open column, and the crate tells how many columns to
//! roll forward or backward to reach the chosen section.
//!
//! # Modules
//!
//! - [`corpus`] - Section list and reference column texts
//! - [`matching`] - Text normalization and bigram similarity matching
//! - [`navigation`] - Three-step navigation state machine
//! - [`recognition`] - OCR and photo compression adapters
//! - [`session`] - Session controller and presenters
//! - [`config`] - TOML configuration
//! - [`cli`] - Command line interface
//! - [`progress`] - Stage progress reporting
//! - `web` - HTTP API (feature `web`)
//!
//! # Example
//!
//! ```rust
//! use scroll_locator::{ColumnMatcher, CorpusStore, Normalizer, Section};
//!
//! let normalizer = Normalizer::hebrew();
//! let corpus = CorpusStore::from_parts(
//!     vec![Section::new("בראשית", "Bereshit", 1)],
//!     vec!["בראשית ברא אלהים".to_string(), "ויאמר אלהים יהי אור".to_string()],
//!     &normalizer,
//! )
//! .unwrap();
//!
//! let matcher = ColumnMatcher::from_corpus(&corpus);
//! let column = matcher.match_column(&normalizer.normalize("ויאמר אלהים"));
//! assert_eq!(column, 2);
//! ```

pub mod cli;
pub mod config;
pub mod corpus;
pub mod matching;
pub mod navigation;
pub mod progress;
pub mod recognition;
pub mod session;

#[cfg(feature = "web")]
pub mod web;

// Re-export public API
pub use cli::{exit_codes, Cli, Commands, GlobalArgs, LocateArgs, MatchArgs};
pub use config::{CliOverrides, Config, ConfigError};
pub use corpus::{CorpusError, CorpusPaths, CorpusStore, ReferenceColumn, Section};
pub use matching::{dice_coefficient, ColumnMatch, ColumnMatcher, Normalizer, ScriptRange};
pub use navigation::{
    NavigationEvent, NavigationMachine, NavigationState, NavigationStep, Outcome, RenderPayload,
    RenderStep, ScrollDirection,
};
pub use progress::{LocateStage, NoopProgress, OutputMode, ProgressCallback, SpinnerProgress};
pub use recognition::{
    CompressOptions, ImageCompressor, JpegCompressor, RecognitionError, RecognizedText,
    Recognizer, TesseractOptions, TesseractRecognizer,
};
pub use session::{
    PhotoOutcome, Presenter, RecordingPresenter, RetakeReason, Session, SessionError,
    SessionOptions, StartupError, TerminalPresenter, View,
};

#[cfg(feature = "web")]
pub use cli::ServeArgs;
#[cfg(feature = "web")]
pub use web::{ServerConfig, WebServer};
