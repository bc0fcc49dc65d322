//! Refract Core - Embeddable image variant library.
//!
//! Refract takes a raw uploaded image buffer and turns it into validated,
//! resized, re-encoded and safely named artifacts. It never touches storage;
//! the caller owns every buffer going in and coming out.
//!
//! # Architecture
//!
//! ```text
//! bytes → Validate → Transform (one size) ─────┐
//!               └──→ Responsive set (N sizes) ─┴→ Filename → caller persists
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use refract_core::{Config, ProcessingOptions, Refract};
//!
//! #[tokio::main]
//! async fn main() -> refract_core::Result<()> {
//!     let refract = Refract::new(Config::load()?);
//!     let upload = std::fs::read("photo.jpg").unwrap();
//!
//!     let check = refract.validate(&upload);
//!     if !check.is_valid {
//!         eprintln!("rejected: {:?}", check.error);
//!         return Ok(());
//!     }
//!
//!     let format = refract.select_format(&upload);
//!     let options = ProcessingOptions::fit(1024, 1024).with_format(format);
//!     let processed = refract.process(&upload, Some(&options))?;
//!     let name = refract.generate_filename("photo.jpg", Some(processed.info.format));
//!
//!     let variants = refract.generate_responsive(&upload, None).await;
//!     println!("{name}: {} variants", variants.len());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod naming;
pub mod pipeline;
pub mod types;

#[cfg(test)]
mod test_fixtures;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, PipelineError, PipelineResult, RefractError, Result};
pub use naming::FilenameGenerator;
pub use pipeline::{
    FormatSelector, ImageTransformer, MetadataInspector, ResponsiveGenerator, Transform, Validator,
};
pub use types::{
    ImageFormat, ImageMetadata, OutputFormat, ProcessedImage, ProcessingOptions, Quality,
    ResponsiveSizeResult, ResponsiveSizeSpec, ValidationResult,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Refract processor - the main entry point for hosts.
///
/// Built once from a [`Config`]; every operation is stateless and safe to
/// call concurrently. The synchronous operations are CPU-bound, so async
/// callers should move them onto a blocking thread.
pub struct Refract {
    config: Config,
    validator: Validator,
    transformer: ImageTransformer,
    responsive: ResponsiveGenerator,
    naming: FilenameGenerator,
}

impl Refract {
    /// Create a new Refract instance with the given configuration.
    pub fn new(config: Config) -> Self {
        tracing::debug!("Initializing Refract v{}", VERSION);
        Self {
            validator: Validator::new(&config.processing, &config.limits),
            transformer: ImageTransformer::new(&config.processing),
            responsive: ResponsiveGenerator::new(&config),
            naming: FilenameGenerator::new(&config.naming),
            config,
        }
    }

    /// Create a new Refract instance from the default config location.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(Config::load()?))
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Header-only description of `buffer`.
    pub fn inspect(&self, buffer: &[u8]) -> PipelineResult<ImageMetadata> {
        MetadataInspector::inspect(buffer)
    }

    /// Check `buffer` against the upload policy. Never fails.
    pub fn validate(&self, buffer: &[u8]) -> ValidationResult {
        self.validator.validate(buffer)
    }

    /// Resize and re-encode `buffer`.
    pub fn process(
        &self,
        buffer: &[u8],
        options: Option<&ProcessingOptions>,
    ) -> PipelineResult<ProcessedImage> {
        self.transformer.process(buffer, options)
    }

    /// Pick an output codec for `buffer`. Never fails.
    pub fn select_format(&self, buffer: &[u8]) -> OutputFormat {
        FormatSelector::select(buffer)
    }

    /// Produce the responsive set for `buffer`.
    ///
    /// `specs` defaults to the configured `responsive.sizes`. Failed targets
    /// are logged and omitted.
    pub async fn generate_responsive(
        &self,
        buffer: &[u8],
        specs: Option<&[ResponsiveSizeSpec]>,
    ) -> Vec<ResponsiveSizeResult> {
        let specs = specs.unwrap_or(self.config.responsive.sizes.as_slice());
        self.responsive.generate(buffer, specs).await
    }

    /// Produce the responsive set with fixed quality and format for every target.
    pub async fn generate_responsive_with_options(
        &self,
        buffer: &[u8],
        specs: Option<&[ResponsiveSizeSpec]>,
        base: ProcessingOptions,
    ) -> Vec<ResponsiveSizeResult> {
        let specs = specs.unwrap_or(self.config.responsive.sizes.as_slice());
        self.responsive
            .generate_with_options(buffer, specs, base)
            .await
    }

    /// Storage-safe, collision-resistant name for an artifact.
    pub fn generate_filename(&self, original_name: &str, format: Option<ImageFormat>) -> String {
        self.naming.generate(original_name, format)
    }
}
