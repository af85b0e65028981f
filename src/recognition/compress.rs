//! JPEG Compressor
//!
//! Re-encodes photos as JPEG, downscaling until they fit the size limit.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use tracing::debug;

use super::types::{CompressOptions, ImageCompressor, RecognitionError, Result};
use crate::progress::ProgressCallback;

// ============================================================
// Constants
// ============================================================

/// Maximum number of downscale passes
const MAX_COMPRESSION_PASSES: u32 = 8;

/// Extra shrink applied on top of the size ratio
const SHRINK_MARGIN: f64 = 0.9;

/// Smallest edge produced by downscaling (pixels)
const MIN_DIMENSION: u32 = 64;

/// Compressor that re-encodes images as JPEG
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegCompressor;

impl JpegCompressor {
    /// Encode an image as JPEG
    fn encode(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(image.to_rgb8())
            .write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))
            .map_err(|e| RecognitionError::CompressionFailed(e.to_string()))?;
        Ok(buf)
    }

    /// Scale factor bringing `current` bytes under `target`
    fn shrink_ratio(current: usize, target: usize) -> f64 {
        ((target as f64 / current as f64).sqrt() * SHRINK_MARGIN).min(SHRINK_MARGIN)
    }
}

impl ImageCompressor for JpegCompressor {
    fn compress(
        &self,
        image: &[u8],
        options: &CompressOptions,
        progress: &dyn ProgressCallback,
    ) -> Result<Vec<u8>> {
        let max_bytes = options.max_bytes();
        if image.len() <= max_bytes {
            progress.on_stage_progress(100);
            return Ok(image.to_vec());
        }

        let mut current = image::load_from_memory(image)
            .map_err(|e| RecognitionError::CompressionFailed(e.to_string()))?;
        let mut encoded = Self::encode(&current, options.jpeg_quality)?;

        for pass in 1..=MAX_COMPRESSION_PASSES {
            progress.on_stage_progress((pass * 100 / MAX_COMPRESSION_PASSES) as u8);
            if encoded.len() <= max_bytes {
                break;
            }

            let ratio = Self::shrink_ratio(encoded.len(), max_bytes);
            let width = ((current.width() as f64 * ratio) as u32).max(MIN_DIMENSION);
            let height = ((current.height() as f64 * ratio) as u32).max(MIN_DIMENSION);
            if width >= current.width() && height >= current.height() {
                break;
            }

            current = current.resize(width, height, FilterType::Triangle);
            encoded = Self::encode(&current, options.jpeg_quality)?;
            progress.on_debug(&format!(
                "pass {}: {}x{} -> {} bytes",
                pass,
                current.width(),
                current.height(),
                encoded.len()
            ));
        }

        progress.on_stage_progress(100);
        debug!(
            original = image.len(),
            compressed = encoded.len(),
            "Photo compressed"
        );
        Ok(encoded)
    }
}
