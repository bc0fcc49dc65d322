//! Upload validation policy over the metadata inspector.
//!
//! The validator never fails: every rejection becomes an invalid
//! [`ValidationResult`] carrying a human-readable message.

use crate::config::{LimitsConfig, ProcessingConfig};
use crate::error::PipelineError;
use crate::types::{ImageFormat, ValidationResult};

use super::decode::MetadataInspector;

/// Message for anything that is not an accepted image.
pub const PARSE_FAILURE: &str = "Failed to parse image";

/// Message for buffers over the upload size limit.
pub const UPLOAD_TOO_LARGE: &str = "Image exceeds maximum upload size";

/// Validates uploaded buffers against the configured policy.
#[derive(Debug, Clone)]
pub struct Validator {
    allowed_formats: Vec<ImageFormat>,
    max_dimension: u32,
    max_bytes: u64,
}

impl Validator {
    /// Create a validator from the processing allow-list and resource limits.
    pub fn new(processing: &ProcessingConfig, limits: &LimitsConfig) -> Self {
        Self {
            allowed_formats: processing.allowed_formats.clone(),
            max_dimension: limits.max_image_dimension,
            max_bytes: limits.max_file_size_bytes(),
        }
    }

    /// Check an uploaded buffer.
    ///
    /// Checks, in order:
    /// - Buffer size is within the upload limit
    /// - Buffer starts with known image magic bytes
    /// - Headers parse and the format is on the allow-list
    /// - Neither side exceeds the dimension ceiling
    pub fn validate(&self, buffer: &[u8]) -> ValidationResult {
        if buffer.len() as u64 > self.max_bytes {
            let err = PipelineError::FileTooLarge {
                size_bytes: buffer.len() as u64,
                max_bytes: self.max_bytes,
            };
            tracing::debug!("Rejecting upload: {err}");
            return ValidationResult::invalid(UPLOAD_TOO_LARGE);
        }

        if !is_valid_image_header(buffer) {
            tracing::debug!("Rejecting buffer with unrecognized magic bytes");
            return ValidationResult::invalid(PARSE_FAILURE);
        }

        let metadata = match MetadataInspector::inspect(buffer) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::debug!("Rejecting unparseable buffer: {e}");
                return ValidationResult::invalid(PARSE_FAILURE);
            }
        };

        if !self.allowed_formats.contains(&metadata.format) {
            tracing::debug!(format = %metadata.format, "Rejecting format outside allow-list");
            return ValidationResult::invalid(PARSE_FAILURE);
        }

        if metadata.width > self.max_dimension || metadata.height > self.max_dimension {
            let err = PipelineError::ImageTooLarge {
                width: metadata.width,
                height: metadata.height,
                max_dim: self.max_dimension,
            };
            return ValidationResult::invalid(err.to_string());
        }

        ValidationResult::valid(metadata)
    }
}

/// Check if the leading bytes match a known image signature.
fn is_valid_image_header(buffer: &[u8]) -> bool {
    let header = &buffer[..buffer.len().min(12)];
    if header.len() < 4 {
        return false;
    }

    // JPEG: FF D8 FF
    if header.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return true;
    }

    // PNG: 89 50 4E 47
    if header.starts_with(&[0x89, b'P', b'N', b'G']) {
        return true;
    }

    // GIF: GIF8
    if header.starts_with(b"GIF8") {
        return true;
    }

    // WebP: RIFF....WEBP
    if header.starts_with(b"RIFF") {
        return header.len() == 12 && &header[8..12] == b"WEBP";
    }

    // BMP: BM
    if header.starts_with(b"BM") {
        return true;
    }

    // TIFF: II (little-endian) or MM (big-endian) followed by version 42
    header.starts_with(&[b'I', b'I', 0x2A, 0x00]) || header.starts_with(&[b'M', b'M', 0x00, 0x2A])
}
