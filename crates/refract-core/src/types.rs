//! Core data types for the Refract pipeline.
//!
//! Every value here is created fresh per call and owned by the caller; the
//! pipeline keeps no references once an operation returns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Container formats the inspector can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Webp,
    Gif,
    Tiff,
    Bmp,
}

impl ImageFormat {
    /// Map a sniffed `image` crate format onto ours. Anything else is unsupported.
    pub fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(Self::Jpeg),
            image::ImageFormat::Png => Some(Self::Png),
            image::ImageFormat::WebP => Some(Self::Webp),
            image::ImageFormat::Gif => Some(Self::Gif),
            image::ImageFormat::Tiff => Some(Self::Tiff),
            image::ImageFormat::Bmp => Some(Self::Bmp),
            _ => None,
        }
    }

    pub(crate) fn to_image_format(self) -> image::ImageFormat {
        match self {
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Png => image::ImageFormat::Png,
            Self::Webp => image::ImageFormat::WebP,
            Self::Gif => image::ImageFormat::Gif,
            Self::Tiff => image::ImageFormat::Tiff,
            Self::Bmp => image::ImageFormat::Bmp,
        }
    }

    /// Canonical lowercase name, also used as the file extension.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Webp => "webp",
            Self::Gif => "gif",
            Self::Tiff => "tiff",
            Self::Bmp => "bmp",
        }
    }

    /// Parse a file extension or format name (case-insensitive, `jpg` → `jpeg`).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "jpe" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::Webp),
            "gif" => Some(Self::Gif),
            "tif" | "tiff" => Some(Self::Tiff),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Whether `quality` changes the encoder's output.
    pub fn is_lossy(self) -> bool {
        matches!(self, Self::Jpeg | Self::Webp)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formats the transformer may be asked to encode to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
    Webp,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        ImageFormat::from(self).as_str()
    }
}

impl From<OutputFormat> for ImageFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Webp => ImageFormat::Webp,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Immutable description of one image buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Detected container format
    pub format: ImageFormat,

    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Number of colour channels (3 for RGB, 4 for RGBA, ...)
    pub channels: u32,

    /// Pixel density in DPI, when the container records one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density: Option<u32>,

    /// Buffer size in bytes
    pub size_bytes: u64,
}

impl ImageMetadata {
    /// Whether the colour type carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.channels == 2 || self.channels == 4
    }
}

/// Caller-supplied transform options. `None` means "keep the source".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingOptions {
    /// Upper bound on output width; zero is treated as absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,

    /// Upper bound on output height; zero is treated as absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u32>,

    /// Lossy encoder quality, clamped to 1..=100 (default 80)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u32>,

    /// Target encoding; defaults to the source format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

impl ProcessingOptions {
    /// Options that only bound the output size.
    pub fn fit(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width: Some(max_width),
            max_height: Some(max_height),
            ..Self::default()
        }
    }

    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// Output of one transformer invocation. `info` describes the output buffer.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub buffer: Vec<u8>,
    pub info: ImageMetadata,
}

/// Outcome of validation. Exactly one of `metadata` / `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ImageMetadata>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn valid(metadata: ImageMetadata) -> Self {
        Self {
            is_valid: true,
            metadata: Some(metadata),
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            metadata: None,
            error: Some(error.into()),
        }
    }
}

/// One named size target of a responsive set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsiveSizeSpec {
    /// Caller-chosen label (e.g. "thumbnail")
    pub suffix: String,

    /// Maximum output width
    pub width: u32,

    /// Maximum output height
    pub height: u32,
}

impl ResponsiveSizeSpec {
    pub fn new(suffix: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            suffix: suffix.into(),
            width,
            height,
        }
    }
}

/// A successfully generated variant.
#[derive(Debug, Clone)]
pub struct ResponsiveSizeResult {
    pub suffix: String,
    pub buffer: Vec<u8>,
    pub info: ImageMetadata,
}
