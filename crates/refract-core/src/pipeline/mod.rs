//! Image processing pipeline components.
//!
//! This module contains all the stages of the image pipeline:
//! - **decode**: Header-only inspection and full decoding
//! - **metadata**: EXIF resolution extraction
//! - **validate**: Upload policy checks that never fail
//! - **dimensions**: Pure fit-within-bounds calculation
//! - **encode**: Per-format encoders
//! - **processor**: The transformer (decode, resize, re-encode)
//! - **format**: Output codec selection
//! - **responsive**: Concurrent fan-out into named size variants

pub mod decode;
pub mod dimensions;
pub mod encode;
pub mod format;
pub mod metadata;
pub mod processor;
pub mod responsive;
pub mod validate;

// Re-exports for convenient access
pub use decode::{DecodedImage, MetadataInspector};
pub use dimensions::fit_within;
pub use format::FormatSelector;
pub use metadata::MetadataExtractor;
pub use processor::{ImageTransformer, Transform};
pub use responsive::ResponsiveGenerator;
pub use validate::Validator;
