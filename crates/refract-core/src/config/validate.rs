//! Configuration validation with range checks.

use crate::error::ConfigError;
use crate::naming::MAX_EXTENSION_LEN;

use super::Config;

/// `_<13-digit ms timestamp>_` plus `.<extension>`: the fixed part of every
/// name besides the random token.
const FIXED_NAME_OVERHEAD: usize = 1 + 13 + 1 + 1 + MAX_EXTENSION_LEN;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.parallel_workers == 0 {
            return Err(ConfigError::ValidationError(
                "processing.parallel_workers must be > 0".into(),
            ));
        }
        if !(1..=100).contains(&self.processing.default_quality) {
            return Err(ConfigError::ValidationError(
                "processing.default_quality must be between 1 and 100".into(),
            ));
        }
        if self.processing.allowed_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "processing.allowed_formats must not be empty".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if self.limits.transform_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.transform_timeout_ms must be > 0".into(),
            ));
        }
        if self.naming.random_suffix_length == 0 {
            return Err(ConfigError::ValidationError(
                "naming.random_suffix_length must be > 0".into(),
            ));
        }
        // At least one base character must survive truncation.
        let minimum = FIXED_NAME_OVERHEAD + self.naming.random_suffix_length + 1;
        if self.naming.max_length < minimum {
            return Err(ConfigError::ValidationError(format!(
                "naming.max_length must be >= {minimum}"
            )));
        }
        for size in &self.responsive.sizes {
            if size.suffix.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "responsive.sizes entries need a non-empty suffix".into(),
                ));
            }
            if size.width == 0 || size.height == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "responsive size '{}' must have width and height > 0",
                    size.suffix
                )));
            }
        }
        Ok(())
    }
}
