//! The transformer: decode, fit, re-encode, re-inspect.
//!
//! This is the only stage that touches pixel data. Everything it returns
//! describes the encoded output, not the source.

use image::imageops::FilterType;
use std::time::Instant;

use crate::config::ProcessingConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::types::{ImageFormat, ProcessedImage, ProcessingOptions, Quality};

use super::decode::{self, MetadataInspector};
use super::dimensions::fit_within;
use super::encode;

/// Anything that can turn an encoded buffer into a processed variant.
///
/// The responsive generator only depends on this seam, so tests can drive it
/// with a double that fails on demand.
pub trait Transform: Send + Sync {
    fn transform(&self, buffer: &[u8], options: &ProcessingOptions) -> PipelineResult<ProcessedImage>;
}

/// Options with every default filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ResolvedOptions {
    max_width: Option<u32>,
    max_height: Option<u32>,
    quality: Quality,
    format: Option<ImageFormat>,
}

impl ResolvedOptions {
    fn resolve(options: Option<&ProcessingOptions>, default_quality: Quality) -> Self {
        let options = options.copied().unwrap_or_default();
        Self {
            max_width: options.max_width.filter(|&w| w > 0),
            max_height: options.max_height.filter(|&h| h > 0),
            quality: options.quality.map_or(default_quality, Quality::new),
            format: options.format.map(ImageFormat::from),
        }
    }
}

/// Resizes and re-encodes images.
#[derive(Debug, Clone)]
pub struct ImageTransformer {
    default_quality: Quality,
}

impl Default for ImageTransformer {
    fn default() -> Self {
        Self::new(&ProcessingConfig::default())
    }
}

impl ImageTransformer {
    pub fn new(config: &ProcessingConfig) -> Self {
        Self {
            default_quality: Quality::new(config.default_quality),
        }
    }

    /// Decode `buffer`, fit it inside the requested bounds and re-encode it.
    ///
    /// Any decode or encode failure surfaces as [`PipelineError::Processing`].
    pub fn process(
        &self,
        buffer: &[u8],
        options: Option<&ProcessingOptions>,
    ) -> PipelineResult<ProcessedImage> {
        let start = Instant::now();
        let resolved = ResolvedOptions::resolve(options, self.default_quality);

        let decoded = decode::decode(buffer).map_err(PipelineError::processing)?;
        let decode_time = start.elapsed();

        let (src_width, src_height) = (decoded.image.width(), decoded.image.height());
        let (width, height) =
            fit_within(src_width, src_height, resolved.max_width, resolved.max_height);
        let image = if (width, height) == (src_width, src_height) {
            decoded.image
        } else {
            decoded.image.resize_exact(width, height, FilterType::Lanczos3)
        };
        let resize_time = start.elapsed() - decode_time;

        let format = resolved.format.unwrap_or(decoded.format);
        let encoded = encode::encode(&image, format, resolved.quality)?;

        let info = MetadataInspector::inspect(&encoded).map_err(PipelineError::processing)?;

        tracing::debug!(
            "Transformed {}x{} {} -> {}x{} {} ({} bytes) in {:?} (decode {:?}, resize {:?})",
            src_width,
            src_height,
            decoded.format,
            info.width,
            info.height,
            info.format,
            info.size_bytes,
            start.elapsed(),
            decode_time,
            resize_time
        );

        Ok(ProcessedImage {
            buffer: encoded,
            info,
        })
    }
}

impl Transform for ImageTransformer {
    fn transform(&self, buffer: &[u8], options: &ProcessingOptions) -> PipelineResult<ProcessedImage> {
        self.process(buffer, Some(options))
    }
}
