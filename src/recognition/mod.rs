//! Recognition module
//!
//! Adapters around the external OCR engine and the photo compression
//! step. The engine is a black box: image bytes in, raw text out.
//!
//! # Example
//!
//! ```rust,no_run
//! use scroll_locator::{Recognizer, TesseractOptions, TesseractRecognizer};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let recognizer = TesseractRecognizer::initialize(TesseractOptions::default()).await?;
//! let photo = std::fs::read("column.jpg")?;
//! let recognized = recognizer.recognize(photo).await?;
//! println!("{}", recognized.text);
//! # Ok(())
//! # }
//! ```

// Submodules
mod compress;
mod tesseract;
mod types;

// Re-export public API
pub use compress::JpegCompressor;
pub use tesseract::TesseractRecognizer;
pub use types::{
    CompressOptions, CompressOptionsBuilder, ImageCompressor, RecognitionError, RecognizedText,
    Recognizer, Result, TesseractOptions, TesseractOptionsBuilder, DEFAULT_JPEG_QUALITY,
    DEFAULT_MAX_SIZE_MB, DEFAULT_OCR_LANGUAGE, DEFAULT_TESSERACT_COMMAND,
};
