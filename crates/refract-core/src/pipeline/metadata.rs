//! EXIF resolution extraction.

use exif::{In, Reader, Tag, Value};
use std::io::Cursor;

/// EXIF `ResolutionUnit` values.
const UNIT_NONE: u32 = 1;
const UNIT_INCH: u32 = 2;
const UNIT_CENTIMETER: u32 = 3;

/// Extracts EXIF metadata from in-memory images.
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Pixel density in DPI from `XResolution` / `ResolutionUnit`.
    ///
    /// Returns `None` when the buffer carries no EXIF block, the resolution is
    /// missing, or the unit is not absolute.
    pub fn density(buffer: &[u8]) -> Option<u32> {
        let exif = Reader::new()
            .read_from_container(&mut Cursor::new(buffer))
            .ok()?;
        let resolution = Self::get_rational(&exif, Tag::XResolution)?;
        let unit = Self::get_u32(&exif, Tag::ResolutionUnit).unwrap_or(UNIT_INCH);
        pixels_per_inch(resolution, unit)
    }

    fn get_rational(exif: &exif::Exif, tag: Tag) -> Option<f64> {
        exif.get_field(tag, In::PRIMARY)
            .and_then(|f| match &f.value {
                Value::Rational(v) => v.first().map(|r| r.to_f64()),
                _ => None,
            })
    }

    fn get_u32(exif: &exif::Exif, tag: Tag) -> Option<u32> {
        exif.get_field(tag, In::PRIMARY)
            .and_then(|f| match &f.value {
                Value::Short(v) => v.first().map(|&x| x as u32),
                Value::Long(v) => v.first().copied(),
                _ => None,
            })
    }
}

fn pixels_per_inch(resolution: f64, unit: u32) -> Option<u32> {
    if !resolution.is_finite() || resolution <= 0.0 {
        return None;
    }
    let dpi = match unit {
        UNIT_NONE => return None,
        UNIT_CENTIMETER => resolution * 2.54,
        _ => resolution,
    };
    Some(dpi.round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures;

    #[test]
    fn test_inch_resolution_passes_through() {
        assert_eq!(pixels_per_inch(72.0, UNIT_INCH), Some(72));
        assert_eq!(pixels_per_inch(299.6, UNIT_INCH), Some(300));
    }

    #[test]
    fn test_centimeter_resolution_converted() {
        // 118.11 px/cm is the usual 300 DPI print density.
        assert_eq!(pixels_per_inch(118.11, UNIT_CENTIMETER), Some(300));
    }

    #[test]
    fn test_unitless_or_bogus_resolution_is_none() {
        assert_eq!(pixels_per_inch(72.0, UNIT_NONE), None);
        assert_eq!(pixels_per_inch(0.0, UNIT_INCH), None);
        assert_eq!(pixels_per_inch(f64::NAN, UNIT_INCH), None);
    }

    #[test]
    fn test_exif_inch_resolution() {
        let buffer = test_fixtures::jpeg_with_resolution(300, 1, 2);
        assert_eq!(MetadataExtractor::density(&buffer), Some(300));

        let meta = crate::pipeline::MetadataInspector::inspect(&buffer).unwrap();
        assert_eq!(meta.density, Some(300));
        assert_eq!((meta.width, meta.height), (16, 16));
    }

    #[test]
    fn test_exif_centimeter_resolution() {
        let buffer = test_fixtures::jpeg_with_resolution(1181, 10, 3);
        assert_eq!(MetadataExtractor::density(&buffer), Some(300));
    }

    #[test]
    fn test_exif_unitless_resolution() {
        let buffer = test_fixtures::jpeg_with_resolution(72, 1, 1);
        assert_eq!(MetadataExtractor::density(&buffer), None);
    }

    #[test]
    fn test_buffer_without_exif() {
        assert_eq!(MetadataExtractor::density(&test_fixtures::png_rgb(4, 4)), None);
        assert_eq!(MetadataExtractor::density(b"not an image"), None);
    }
}
