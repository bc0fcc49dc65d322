//! Error types for the Refract image pipeline.
//!
//! Errors are organized by concern: configuration loading, and the pipeline
//! stages (inspect, transform, responsive fan-out). Validation and format
//! selection never surface these; they convert failures into values.

use thiserror::Error;

/// Top-level error type for Refract operations.
#[derive(Error, Debug)]
pub enum RefractError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The buffer is not a parseable image
    #[error("Failed to parse image: {reason}")]
    Decode { reason: String },

    /// The container was recognized but is not one we can inspect
    #[error("Unsupported image format: {format}")]
    UnsupportedFormat { format: String },

    /// Decode succeeded (or was attempted) but resize/re-encode failed
    #[error("Failed to process image: {reason}")]
    Processing { reason: String },

    /// Image dimensions exceed the configured ceiling
    #[error("Image too large: {width}x{height} > {max_dim}")]
    ImageTooLarge { width: u32, height: u32, max_dim: u32 },

    /// Buffer exceeds the configured upload size
    #[error("File too large: {size_bytes} bytes > {max_bytes} bytes")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },

    /// A stage did not finish in time
    #[error("Timeout in {stage} stage after {timeout_ms}ms")]
    Timeout { stage: String, timeout_ms: u64 },
}

impl PipelineError {
    pub(crate) fn decode(reason: impl std::fmt::Display) -> Self {
        Self::Decode {
            reason: reason.to_string(),
        }
    }

    pub(crate) fn processing(reason: impl std::fmt::Display) -> Self {
        Self::Processing {
            reason: reason.to_string(),
        }
    }

    /// True for errors that mean "this is not an image we can read".
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::UnsupportedFormat { .. })
    }
}

/// Convenience type alias for Refract results.
pub type Result<T> = std::result::Result<T, RefractError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processing_error_message_prefix() {
        let err = PipelineError::processing("encoder exploded");
        assert_eq!(
            err.to_string(),
            "Failed to process image: encoder exploded"
        );
        assert!(!err.is_decode_error());
    }

    #[test]
    fn decode_family_is_classified() {
        assert!(PipelineError::decode("bad header").is_decode_error());
        assert!(PipelineError::UnsupportedFormat {
            format: "ico".into()
        }
        .is_decode_error());
    }

    #[test]
    fn pipeline_error_lifts_into_top_level() {
        let err: RefractError = PipelineError::Timeout {
            stage: "transform".into(),
            timeout_ms: 10,
        }
        .into();
        assert!(err.to_string().contains("transform"));
    }
}
