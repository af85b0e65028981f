//! Corpus module core types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================
// Constants
// ============================================================

/// Default section list file
pub const DEFAULT_SECTIONS_FILE: &str = "data/sections.json";

/// Default column text file
pub const DEFAULT_COLUMNS_FILE: &str = "data/columns.json";

/// Minimum Jaro-Winkler similarity for a fuzzy section name match
pub const FUZZY_SECTION_THRESHOLD: f64 = 0.85;

// ============================================================
// Error Types
// ============================================================

/// Corpus loading error types
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Corpus file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Corpus has no {0}")]
    Empty(&'static str),

    #[error("Section {index} ({name}) starts at column {start_column}, outside 1..={column_count}")]
    InvalidStartColumn {
        index: usize,
        name: String,
        start_column: u32,
        column_count: usize,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CorpusError>;

// ============================================================
// Core Data Structures
// ============================================================

/// Named subdivision of the scroll with its first column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Name in the scroll's own script
    #[serde(rename(deserialize = "he"), alias = "name_native")]
    pub name_native: String,
    /// Transliterated or translated name
    #[serde(rename(deserialize = "en"), alias = "name_foreign")]
    pub name_foreign: String,
    /// First column of the section (1-indexed)
    #[serde(rename(deserialize = "startPage"), alias = "start_column")]
    pub start_column: u32,
}

impl Section {
    /// Create a new section
    pub fn new(
        name_native: impl Into<String>,
        name_foreign: impl Into<String>,
        start_column: u32,
    ) -> Self {
        Self {
            name_native: name_native.into(),
            name_foreign: name_foreign.into(),
            start_column,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name_foreign, self.name_native)
    }
}

/// Reference text of one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceColumn {
    /// Column number (1-indexed, position in the corpus)
    pub column_number: u32,
    /// Normalized column text
    pub text: String,
}

/// Locations of the two corpus files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusPaths {
    /// Section list (JSON array of sections)
    pub sections: PathBuf,
    /// Column texts (JSON array of strings, column 1 first)
    pub columns: PathBuf,
}

impl Default for CorpusPaths {
    fn default() -> Self {
        Self {
            sections: PathBuf::from(DEFAULT_SECTIONS_FILE),
            columns: PathBuf::from(DEFAULT_COLUMNS_FILE),
        }
    }
}

impl CorpusPaths {
    /// Create paths from the two files
    pub fn new(sections: impl Into<PathBuf>, columns: impl Into<PathBuf>) -> Self {
        Self {
            sections: sections.into(),
            columns: columns.into(),
        }
    }
}
