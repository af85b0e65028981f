//! Session module
//!
//! Single-user session: owns the navigation state, handles events one at
//! a time and runs the photo pipeline (compression, recognition,
//! normalization, matching) with a timeout. Every photo submission gets a
//! generation number; only the result of the latest one is applied.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scroll_locator::progress::NoopProgress;
//! use scroll_locator::session::{Session, SessionOptions, TerminalPresenter};
//! use scroll_locator::{CorpusPaths, OutputMode, TesseractOptions};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::start(
//!     CorpusPaths::default(),
//!     TesseractOptions::default(),
//!     SessionOptions::default(),
//! )
//! .await?;
//!
//! let mut presenter = TerminalPresenter::stdout(OutputMode::Normal);
//! session.select_section(Some(0), &mut presenter)?;
//! let photo = std::fs::read("column.jpg")?;
//! session
//!     .submit_photo(photo, Arc::new(NoopProgress), &mut presenter)
//!     .await;
//! # Ok(())
//! # }
//! ```

mod controller;
mod presenter;
mod types;

pub use controller::{PhotoJob, Session};
pub use presenter::{Presenter, RecordingPresenter, TerminalPresenter, View};
pub use types::{
    PhotoOutcome, PhotoResult, Result, RetakeReason, SessionError, SessionOptions,
    SessionOptionsBuilder, StartupError, DEFAULT_MIN_SIMILARITY, DEFAULT_RECOGNITION_TIMEOUT_SECS,
};
