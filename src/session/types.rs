//! Session module core types

use serde::Serialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::corpus::CorpusError;
use crate::matching::{ColumnMatch, Normalizer};
use crate::navigation::NavigationState;
use crate::recognition::{CompressOptions, RecognitionError};

// ============================================================
// Constants
// ============================================================

/// Default limit for compression + recognition + matching (seconds)
pub const DEFAULT_RECOGNITION_TIMEOUT_SECS: u64 = 60;

/// Default minimum best-match score accepted as a column
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.1;

/// Shortest accepted timeout (seconds)
pub const MIN_RECOGNITION_TIMEOUT_SECS: u64 = 1;

/// Longest accepted timeout (seconds)
pub const MAX_RECOGNITION_TIMEOUT_SECS: u64 = 600;

// ============================================================
// Error Types
// ============================================================

/// Fatal errors raised before the session accepts input
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("Recognition engine error: {0}")]
    Engine(#[from] RecognitionError),

    #[error("Startup task failed: {0}")]
    Task(String),
}

/// Errors returned to callers of the session
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unknown section index {index} (corpus has {count} sections)")]
    UnknownSection { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, SessionError>;

// ============================================================
// Options
// ============================================================

/// Session behavior options
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    /// Limit for the whole photo pipeline
    pub recognition_timeout: Duration,
    /// Best-match scores below this ask for a retake
    pub min_similarity: f64,
    /// Compression applied before recognition
    pub compression: CompressOptions,
    /// Normalizer applied to recognized text
    pub normalizer: Normalizer,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            recognition_timeout: Duration::from_secs(DEFAULT_RECOGNITION_TIMEOUT_SECS),
            min_similarity: DEFAULT_MIN_SIMILARITY,
            compression: CompressOptions::default(),
            normalizer: Normalizer::hebrew(),
        }
    }
}

impl SessionOptions {
    /// Create a new options builder
    pub fn builder() -> SessionOptionsBuilder {
        SessionOptionsBuilder::default()
    }
}

/// Builder for SessionOptions
#[derive(Debug, Default)]
pub struct SessionOptionsBuilder {
    options: SessionOptions,
}

impl SessionOptionsBuilder {
    /// Set the pipeline timeout
    #[must_use]
    pub fn recognition_timeout(mut self, timeout: Duration) -> Self {
        self.options.recognition_timeout = timeout;
        self
    }

    /// Set the pipeline timeout in whole seconds (clamped to 1-600)
    #[must_use]
    pub fn recognition_timeout_secs(mut self, secs: u64) -> Self {
        let secs = secs.clamp(MIN_RECOGNITION_TIMEOUT_SECS, MAX_RECOGNITION_TIMEOUT_SECS);
        self.options.recognition_timeout = Duration::from_secs(secs);
        self
    }

    /// Set minimum accepted similarity (clamped to 0.0-1.0)
    #[must_use]
    pub fn min_similarity(mut self, score: f64) -> Self {
        self.options.min_similarity = score.clamp(0.0, 1.0);
        self
    }

    /// Set compression options
    #[must_use]
    pub fn compression(mut self, compression: CompressOptions) -> Self {
        self.options.compression = compression;
        self
    }

    /// Set the text normalizer
    #[must_use]
    pub fn normalizer(mut self, normalizer: Normalizer) -> Self {
        self.options.normalizer = normalizer;
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> SessionOptions {
        self.options
    }
}

// ============================================================
// Photo Results
// ============================================================

/// Why a photo could not be used
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RetakeReason {
    /// Compression or the OCR engine failed
    RecognitionFailed { message: String },
    /// The pipeline ran past the timeout
    TimedOut { timeout_ms: u64 },
    /// No letters of the script were recognized
    NoText,
    /// Best match scored below the minimum
    Inconclusive { best_column: u32, score: f64 },
}

impl fmt::Display for RetakeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetakeReason::RecognitionFailed { .. } => {
                f.write_str("We couldn't read that picture. Please take another one.")
            }
            RetakeReason::TimedOut { .. } => {
                f.write_str("Analyzing the picture took too long. Please try again.")
            }
            RetakeReason::NoText => f.write_str(
                "We couldn't find any text in that picture. Make sure the open column fills the frame and try again.",
            ),
            RetakeReason::Inconclusive { .. } => f.write_str(
                "We're not sure which column that is. Please take a clearer picture.",
            ),
        }
    }
}

/// Output of one photo pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoResult {
    /// Generation the submission was issued
    pub generation: u64,
    /// Matched column, or why a retake is needed
    pub outcome: std::result::Result<ColumnMatch, RetakeReason>,
}

/// What the session did with a photo result
#[derive(Debug, Clone, PartialEq)]
pub enum PhotoOutcome {
    /// Column recognized and applied to the state
    Applied {
        state: NavigationState,
        matched: ColumnMatch,
    },
    /// Retake prompt shown, state untouched
    Retake(RetakeReason),
    /// A newer submission superseded this one
    Stale,
}
