//! Format sniffing, header-only inspection and full decoding.
//!
//! Format detection always goes by content, never by a caller-supplied name.

use image::{DynamicImage, ImageDecoder as _, ImageReader};
use std::io::Cursor;

use crate::error::{PipelineError, PipelineResult};
use crate::types::{ImageFormat, ImageMetadata};

use super::metadata::MetadataExtractor;

/// Reads container headers to describe a buffer without touching pixel data.
pub struct MetadataInspector;

impl MetadataInspector {
    /// Describe `buffer`: format, dimensions, channel count, density and size.
    ///
    /// Fails with a decode-family error when the buffer is not an image of a
    /// recognized container or its header cannot be parsed.
    pub fn inspect(buffer: &[u8]) -> PipelineResult<ImageMetadata> {
        let reader = sniff(buffer)?;
        let format = detected_format(&reader)?;

        let decoder = reader.into_decoder().map_err(PipelineError::decode)?;
        let (width, height) = decoder.dimensions();
        if width == 0 || height == 0 {
            return Err(PipelineError::decode("image has a zero dimension"));
        }
        let channels = u32::from(decoder.color_type().channel_count());

        Ok(ImageMetadata {
            format,
            width,
            height,
            channels,
            density: MetadataExtractor::density(buffer),
            size_bytes: buffer.len() as u64,
        })
    }
}

/// A fully decoded image plus the container it came from.
pub struct DecodedImage {
    pub image: DynamicImage,
    pub format: ImageFormat,
}

/// Decode the whole buffer into pixels.
pub fn decode(buffer: &[u8]) -> PipelineResult<DecodedImage> {
    let reader = sniff(buffer)?;
    let format = detected_format(&reader)?;
    let image = reader.decode().map_err(PipelineError::decode)?;
    Ok(DecodedImage { image, format })
}

fn sniff(buffer: &[u8]) -> PipelineResult<ImageReader<Cursor<&[u8]>>> {
    if buffer.is_empty() {
        return Err(PipelineError::decode("empty buffer"));
    }
    ImageReader::new(Cursor::new(buffer))
        .with_guessed_format()
        .map_err(|e| PipelineError::decode(format!("cannot detect image format: {e}")))
}

fn detected_format(reader: &ImageReader<Cursor<&[u8]>>) -> PipelineResult<ImageFormat> {
    let sniffed = reader
        .format()
        .ok_or_else(|| PipelineError::decode("unrecognized image container"))?;
    ImageFormat::from_image_format(sniffed).ok_or_else(|| PipelineError::UnsupportedFormat {
        format: format!("{sniffed:?}").to_lowercase(),
    })
}
