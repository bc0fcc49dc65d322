//! Per-format encoding of decoded pixels.
//!
//! | Format | Encoder | Quality |
//! |--------|---------|---------|
//! | JPEG | `image::codecs::jpeg::JpegEncoder` (alpha dropped) | yes |
//! | WebP | `webp::Encoder`, lossy | yes |
//! | PNG, GIF, TIFF, BMP | `image` built-in | ignored |

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage};
use std::borrow::Cow;
use std::io::Cursor;

use crate::error::{PipelineError, PipelineResult};
use crate::types::{ImageFormat, Quality};

/// Encode `image` into `format`. `quality` only affects lossy formats.
pub fn encode(image: &DynamicImage, format: ImageFormat, quality: Quality) -> PipelineResult<Vec<u8>> {
    match format {
        ImageFormat::Jpeg => encode_jpeg(image, quality),
        ImageFormat::Webp => encode_webp(image, quality),
        ImageFormat::Png => write_builtin(image, format),
        ImageFormat::Gif => write_builtin(&DynamicImage::ImageRgba8(image.to_rgba8()), format),
        ImageFormat::Tiff => write_builtin(&tiff_pixels(image), format),
        ImageFormat::Bmp => write_builtin(&to_8bit(image), format),
    }
}

fn encode_jpeg(image: &DynamicImage, quality: Quality) -> PipelineResult<Vec<u8>> {
    // JPEG has no alpha channel; grayscale stays single-channel.
    let flattened = match image.color() {
        ColorType::L8 => Cow::Borrowed(image),
        ColorType::L16 | ColorType::La8 | ColorType::La16 => {
            Cow::Owned(DynamicImage::ImageLuma8(image.to_luma8()))
        }
        _ => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
    };

    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.value());
    flattened
        .write_with_encoder(encoder)
        .map_err(|e| PipelineError::processing(format!("JPEG encode failed: {e}")))?;
    Ok(buffer)
}

fn encode_webp(image: &DynamicImage, quality: Quality) -> PipelineResult<Vec<u8>> {
    let pixels = if image.color().has_alpha() {
        DynamicImage::ImageRgba8(image.to_rgba8())
    } else {
        DynamicImage::ImageRgb8(image.to_rgb8())
    };
    let encoder = webp::Encoder::from_image(&pixels)
        .map_err(|e| PipelineError::processing(format!("WebP encode failed: {e}")))?;
    let encoded = encoder
        .encode_simple(false, f32::from(quality.value()))
        .map_err(|e| PipelineError::processing(format!("WebP encode failed: {e:?}")))?;
    Ok(encoded.to_vec())
}

fn write_builtin(image: &DynamicImage, format: ImageFormat) -> PipelineResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, format.to_image_format())
        .map_err(|e| PipelineError::processing(format!("{format} encode failed: {e}")))?;
    Ok(buffer.into_inner())
}

/// The TIFF encoder has no gray+alpha layout, so those widen to RGBA.
fn tiff_pixels(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image.color() {
        ColorType::La8 | ColorType::La16 => Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8())),
        _ => to_8bit(image),
    }
}

/// Narrow high bit-depth and float images for encoders that only take 8-bit.
fn to_8bit(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image.color() {
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => Cow::Borrowed(image),
        color if color.has_alpha() => Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8())),
        _ => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::MetadataInspector;
    use crate::test_fixtures;

    fn rgba_image() -> DynamicImage {
        DynamicImage::ImageRgba8(test_fixtures::textured_rgba(48, 32))
    }

    #[test]
    fn jpeg_drops_alpha() {
        let bytes = encode(&rgba_image(), ImageFormat::Jpeg, Quality::default()).unwrap();
        let meta = MetadataInspector::inspect(&bytes).unwrap();
        assert_eq!(meta.format, ImageFormat::Jpeg);
        assert_eq!(meta.channels, 3);
    }

    #[test]
    fn jpeg_keeps_grayscale() {
        let gray = DynamicImage::ImageLuma8(rgba_image().to_luma8());
        let bytes = encode(&gray, ImageFormat::Jpeg, Quality::default()).unwrap();
        assert_eq!(MetadataInspector::inspect(&bytes).unwrap().channels, 1);
    }

    #[test]
    fn webp_keeps_alpha() {
        let bytes = encode(&rgba_image(), ImageFormat::Webp, Quality::new(75)).unwrap();
        let meta = MetadataInspector::inspect(&bytes).unwrap();
        assert_eq!(meta.format, ImageFormat::Webp);
        assert_eq!((meta.width, meta.height), (48, 32));
        assert!(meta.has_alpha());
    }

    #[test]
    fn png_keeps_alpha() {
        let bytes = encode(&rgba_image(), ImageFormat::Png, Quality::new(1)).unwrap();
        let meta = MetadataInspector::inspect(&bytes).unwrap();
        assert_eq!(meta.format, ImageFormat::Png);
        assert_eq!(meta.channels, 4);
    }

    #[test]
    fn png_ignores_quality() {
        let low = encode(&rgba_image(), ImageFormat::Png, Quality::new(1)).unwrap();
        let high = encode(&rgba_image(), ImageFormat::Png, Quality::new(100)).unwrap();
        assert_eq!(low, high);
    }

    #[test]
    fn jpeg_quality_monotonic() {
        let image = DynamicImage::ImageRgb8(test_fixtures::textured_rgb(128, 128));
        let q50 = encode(&image, ImageFormat::Jpeg, Quality::new(50)).unwrap();
        let q100 = encode(&image, ImageFormat::Jpeg, Quality::new(100)).unwrap();
        assert!(q100.len() >= q50.len());
    }

    #[test]
    fn tiff_accepts_gray_alpha() {
        let gray_alpha = DynamicImage::ImageLumaA8(rgba_image().to_luma_alpha8());
        let bytes = encode(&gray_alpha, ImageFormat::Tiff, Quality::default()).unwrap();
        let meta = MetadataInspector::inspect(&bytes).unwrap();
        assert_eq!(meta.format, ImageFormat::Tiff);
        assert_eq!((meta.width, meta.height), (48, 32));
        assert!(meta.has_alpha());
    }

    #[test]
    fn secondary_containers_round_trip_dimensions() {
        for format in [ImageFormat::Gif, ImageFormat::Tiff, ImageFormat::Bmp] {
            let bytes = encode(&rgba_image(), format, Quality::default()).unwrap();
            let meta = MetadataInspector::inspect(&bytes).unwrap();
            assert_eq!(meta.format, format);
            assert_eq!((meta.width, meta.height), (48, 32));
        }
    }
}
