//! Configuration file support
//!
//! Settings are read from TOML and merged with command line flags.
//!
//! Lookup order:
//! 1. `--config <path>`
//! 2. `./scroll-locator.toml`
//! 3. `<config_dir>/scroll-locator/config.toml`
//! 4. Built-in defaults
//!
//! # Example
//!
//! ```toml
//! [corpus]
//! sections = "data/sections.json"
//! columns = "data/columns.json"
//!
//! [recognition]
//! language = "heb"
//! timeout_secs = 30
//!
//! [matching]
//! min_similarity = 0.15
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::corpus::{CorpusPaths, DEFAULT_COLUMNS_FILE, DEFAULT_SECTIONS_FILE};
use crate::matching::{Normalizer, ScriptRange};
use crate::recognition::{
    CompressOptions, TesseractOptions, DEFAULT_MAX_SIZE_MB, DEFAULT_OCR_LANGUAGE,
    DEFAULT_TESSERACT_COMMAND,
};
use crate::session::{SessionOptions, DEFAULT_MIN_SIMILARITY, DEFAULT_RECOGNITION_TIMEOUT_SECS};

/// Config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "scroll-locator.toml";

/// Directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "scroll-locator";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// `[corpus]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Section list (JSON)
    pub sections: PathBuf,
    /// Column texts (JSON)
    pub columns: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            sections: PathBuf::from(DEFAULT_SECTIONS_FILE),
            columns: PathBuf::from(DEFAULT_COLUMNS_FILE),
        }
    }
}

/// `[recognition]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// OCR executable
    pub command: String,
    /// OCR language
    pub language: String,
    /// Limit for one photo, in seconds
    pub timeout_secs: u64,
    /// Keep spaces between words
    pub preserve_interword_spaces: bool,
    /// Restrict OCR output to the script letters
    pub whitelist: bool,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_TESSERACT_COMMAND.to_string(),
            language: DEFAULT_OCR_LANGUAGE.to_string(),
            timeout_secs: DEFAULT_RECOGNITION_TIMEOUT_SECS,
            preserve_interword_spaces: true,
            whitelist: true,
        }
    }
}

/// `[compression]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Target photo size in megabytes
    pub max_size_mb: f64,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            max_size_mb: DEFAULT_MAX_SIZE_MB,
        }
    }
}

/// `[matching]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Best-match scores below this ask for a retake
    pub min_similarity: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_similarity: DEFAULT_MIN_SIMILARITY,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub script: ScriptRange,
    pub recognition: RecognitionConfig,
    pub compression: CompressionConfig,
    pub matching: MatchingConfig,
}

/// Values given on the command line; `None` keeps the file value
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub sections: Option<PathBuf>,
    pub columns: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub min_similarity: Option<f64>,
    pub language: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Config {
    /// Load from the first config file found, or defaults
    pub fn load() -> Result<Self> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::load_from_path(&local);
        }

        if let Some(path) = Self::user_config_path() {
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load from a specific file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Parse TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// `<config_dir>/scroll-locator/config.toml`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join("config.toml"))
    }

    /// Apply command line values on top of this config
    #[must_use]
    pub fn merge_with_cli(mut self, cli: &CliOverrides) -> Self {
        if let Some(sections) = &cli.sections {
            self.corpus.sections = sections.clone();
        }
        if let Some(columns) = &cli.columns {
            self.corpus.columns = columns.clone();
        }
        if let Some(timeout) = cli.timeout_secs {
            self.recognition.timeout_secs = timeout;
        }
        if let Some(score) = cli.min_similarity {
            self.matching.min_similarity = score;
        }
        if let Some(language) = &cli.language {
            self.recognition.language = language.clone();
        }
        self
    }

    /// Corpus file locations
    pub fn corpus_paths(&self) -> CorpusPaths {
        CorpusPaths::new(&self.corpus.sections, &self.corpus.columns)
    }

    /// OCR engine options
    pub fn tesseract_options(&self) -> TesseractOptions {
        let builder = TesseractOptions::builder()
            .command(&self.recognition.command)
            .language(&self.recognition.language)
            .preserve_interword_spaces(self.recognition.preserve_interword_spaces);
        if self.recognition.whitelist {
            builder.whitelist(self.script).build()
        } else {
            builder.no_whitelist().build()
        }
    }

    /// Session options
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions::builder()
            .recognition_timeout_secs(self.recognition.timeout_secs)
            .min_similarity(self.matching.min_similarity)
            .compression(
                CompressOptions::builder()
                    .max_size_mb(self.compression.max_size_mb)
                    .build(),
            )
            .normalizer(Normalizer::new(self.script))
            .build()
    }

    /// Pipeline timeout
    pub fn recognition_timeout(&self) -> Duration {
        self.session_options().recognition_timeout
    }
}
