//! Sub-configuration structs with their documented defaults.

use crate::types::{ImageFormat, ResponsiveSizeSpec};
use serde::{Deserialize, Serialize};

/// Processing defaults applied when the caller leaves an option unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Quality used for lossy encoders when none is requested
    pub default_quality: u32,

    /// Width bound applied by hosts that always want a ceiling
    pub default_max_width: u32,

    /// Height bound applied by hosts that always want a ceiling
    pub default_max_height: u32,

    /// Formats the validator accepts
    pub allowed_formats: Vec<ImageFormat>,

    /// Upper bound on concurrently running responsive targets
    pub parallel_workers: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            default_quality: 80,
            default_max_width: 2048,
            default_max_height: 2048,
            allowed_formats: vec![ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::Webp],
            parallel_workers: 4,
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum upload size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,

    /// Per-target transform timeout in milliseconds
    pub transform_timeout_ms: u64,
}

impl LimitsConfig {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 10,
            max_image_dimension: 10000,
            transform_timeout_ms: 30000,
        }
    }
}

/// Output filename settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Longest filename ever produced, extension included
    pub max_length: usize,

    /// Length of the random `[a-z0-9]` token
    pub random_suffix_length: usize,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            max_length: 150,
            random_suffix_length: 6,
        }
    }
}

/// Named size targets used when the caller supplies none.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsiveConfig {
    pub sizes: Vec<ResponsiveSizeSpec>,
}

impl Default for ResponsiveConfig {
    fn default() -> Self {
        Self {
            sizes: vec![
                ResponsiveSizeSpec::new("thumbnail", 150, 150),
                ResponsiveSizeSpec::new("small", 400, 400),
                ResponsiveSizeSpec::new("medium", 800, 800),
                ResponsiveSizeSpec::new("large", 1200, 1200),
            ],
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
