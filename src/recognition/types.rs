//! Recognition module core types
//!
//! Adapter traits for OCR and image compression, their options and errors.

use std::future::Future;
use std::path::Path;
use thiserror::Error;

use crate::matching::ScriptRange;
use crate::progress::ProgressCallback;

// ============================================================
// Constants
// ============================================================

/// Default OCR executable
pub const DEFAULT_TESSERACT_COMMAND: &str = "tesseract";

/// Default OCR language
pub const DEFAULT_OCR_LANGUAGE: &str = "heb";

/// Default maximum photo size before recognition (megabytes)
pub const DEFAULT_MAX_SIZE_MB: f64 = 0.5;

/// Default JPEG quality used when re-encoding
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Minimum max-size clamp value (megabytes)
pub const MIN_MAX_SIZE_MB: f64 = 0.05;

/// Maximum max-size clamp value (megabytes)
pub const MAX_MAX_SIZE_MB: f64 = 20.0;

/// Minimum JPEG quality clamp value
pub const MIN_JPEG_QUALITY: u8 = 30;

/// Maximum JPEG quality clamp value
pub const MAX_JPEG_QUALITY: u8 = 100;

// ============================================================
// Error Types
// ============================================================

/// Recognition error types
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("OCR engine not found: {0}")]
    EngineNotFound(String),

    #[error("OCR language not installed: {0}")]
    LanguageUnavailable(String),

    #[error("Image compression failed: {0}")]
    CompressionFailed(String),

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RecognitionError>;

// ============================================================
// Core Data Structures
// ============================================================

/// Raw OCR output, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognizedText {
    pub text: String,
}

impl RecognizedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

// ============================================================
// Options
// ============================================================

/// Tesseract invocation options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TesseractOptions {
    /// Executable name or path
    pub command: String,
    /// Language (e.g. "heb", "heb+eng")
    pub language: String,
    /// Characters the engine may emit; empty disables the whitelist
    pub whitelist: String,
    /// Keep spaces between words
    pub preserve_interword_spaces: bool,
}

impl Default for TesseractOptions {
    fn default() -> Self {
        Self {
            command: DEFAULT_TESSERACT_COMMAND.to_string(),
            language: DEFAULT_OCR_LANGUAGE.to_string(),
            whitelist: ScriptRange::hebrew().letters(),
            preserve_interword_spaces: true,
        }
    }
}

impl TesseractOptions {
    /// Create a new options builder
    pub fn builder() -> TesseractOptionsBuilder {
        TesseractOptionsBuilder::default()
    }
}

/// Builder for TesseractOptions
#[derive(Debug, Default)]
pub struct TesseractOptionsBuilder {
    options: TesseractOptions,
}

impl TesseractOptionsBuilder {
    /// Set executable name or path
    #[must_use]
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.options.command = command.into();
        self
    }

    /// Set OCR language
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.options.language = language.into();
        self
    }

    /// Restrict output to the letters of a script range
    #[must_use]
    pub fn whitelist(mut self, range: ScriptRange) -> Self {
        self.options.whitelist = range.letters();
        self
    }

    /// Allow any character
    #[must_use]
    pub fn no_whitelist(mut self) -> Self {
        self.options.whitelist.clear();
        self
    }

    /// Set whether spaces between words are kept
    #[must_use]
    pub fn preserve_interword_spaces(mut self, preserve: bool) -> Self {
        self.options.preserve_interword_spaces = preserve;
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> TesseractOptions {
        self.options
    }
}

/// Image compression options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressOptions {
    /// Target maximum size in megabytes
    pub max_size_mb: f64,
    /// JPEG quality used when re-encoding
    pub jpeg_quality: u8,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl CompressOptions {
    /// Create a new options builder
    pub fn builder() -> CompressOptionsBuilder {
        CompressOptionsBuilder::default()
    }

    /// Target maximum size in bytes
    pub fn max_bytes(&self) -> usize {
        (self.max_size_mb * 1024.0 * 1024.0) as usize
    }
}

/// Builder for CompressOptions
#[derive(Debug, Default)]
pub struct CompressOptionsBuilder {
    options: CompressOptions,
}

impl CompressOptionsBuilder {
    /// Set maximum size in megabytes (clamped to 0.05-20)
    #[must_use]
    pub fn max_size_mb(mut self, size: f64) -> Self {
        self.options.max_size_mb = size.clamp(MIN_MAX_SIZE_MB, MAX_MAX_SIZE_MB);
        self
    }

    /// Set JPEG quality (clamped to 30-100)
    #[must_use]
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.options.jpeg_quality = quality.clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY);
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> CompressOptions {
        self.options
    }
}

// ============================================================
// Adapter Traits
// ============================================================

/// OCR engine: image bytes in, raw text out
pub trait Recognizer: Send + Sync {
    /// Recognize the text of an image
    fn recognize(&self, image: Vec<u8>) -> impl Future<Output = Result<RecognizedText>> + Send;

    /// Executable backing this recognizer, when there is one
    fn engine_path(&self) -> Option<&Path> {
        None
    }
}

/// Shrinks an image before recognition
pub trait ImageCompressor: Send + Sync {
    /// Compress an image to at most `options.max_bytes()` where possible
    fn compress(
        &self,
        image: &[u8],
        options: &CompressOptions,
        progress: &dyn ProgressCallback,
    ) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tesseract_options_default() {
        let opts = TesseractOptions::default();
        assert_eq!(opts.command, "tesseract");
        assert_eq!(opts.language, "heb");
        assert_eq!(opts.whitelist.chars().count(), 27);
        assert!(opts.preserve_interword_spaces);
    }

    #[test]
    fn test_tesseract_options_builder() {
        let opts = TesseractOptions::builder()
            .command("/usr/local/bin/tesseract")
            .language("heb+eng")
            .whitelist(ScriptRange::new('a', 'c'))
            .preserve_interword_spaces(false)
            .build();

        assert_eq!(opts.command, "/usr/local/bin/tesseract");
        assert_eq!(opts.language, "heb+eng");
        assert_eq!(opts.whitelist, "abc");
        assert!(!opts.preserve_interword_spaces);

        let opts = TesseractOptions::builder().no_whitelist().build();
        assert!(opts.whitelist.is_empty());
    }

    #[test]
    fn test_compress_options_default() {
        let opts = CompressOptions::default();
        assert_eq!(opts.max_size_mb, 0.5);
        assert_eq!(opts.max_bytes(), 524_288);
        assert_eq!(opts.jpeg_quality, 85);
    }

    #[test]
    fn test_compress_options_clamping() {
        let opts = CompressOptions::builder().max_size_mb(100.0).build();
        assert_eq!(opts.max_size_mb, 20.0);

        let opts = CompressOptions::builder().max_size_mb(0.0).build();
        assert_eq!(opts.max_size_mb, 0.05);

        let opts = CompressOptions::builder().jpeg_quality(5).build();
        assert_eq!(opts.jpeg_quality, 30);

        let opts = CompressOptions::builder().jpeg_quality(255).build();
        assert_eq!(opts.jpeg_quality, 100);
    }

    #[test]
    fn test_error_types() {
        let _err1 = RecognitionError::EngineNotFound("tesseract".to_string());
        let _err2 = RecognitionError::LanguageUnavailable("heb".to_string());
        let _err3 = RecognitionError::OcrFailed("fail".to_string());
        let err: RecognitionError = std::io::Error::other("test").into();
        assert_eq!(err.to_string(), "IO error: test");
    }
}
