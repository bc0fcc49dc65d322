//! Encoded images synthesized in memory for unit tests.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

/// A textured RGB image; flat colours would make quality settings meaningless.
pub fn textured_rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x * 7 + y * 13) % 256) as u8,
        ])
    })
}

pub fn textured_rgba(width: u32, height: u32) -> RgbaImage {
    let rgb = textured_rgb(width, height);
    RgbaImage::from_fn(width, height, |x, y| {
        let Rgb([r, g, b]) = *rgb.get_pixel(x, y);
        Rgba([r, g, b, ((x + y) % 256) as u8])
    })
}

pub fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format).unwrap();
    buffer.into_inner()
}

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(
        &DynamicImage::ImageRgb8(textured_rgb(width, height)),
        ImageFormat::Jpeg,
    )
}

pub fn png_rgb(width: u32, height: u32) -> Vec<u8> {
    encode(
        &DynamicImage::ImageRgb8(textured_rgb(width, height)),
        ImageFormat::Png,
    )
}

pub fn png_rgba(width: u32, height: u32) -> Vec<u8> {
    encode(
        &DynamicImage::ImageRgba8(textured_rgba(width, height)),
        ImageFormat::Png,
    )
}

pub fn gif(width: u32, height: u32) -> Vec<u8> {
    encode(
        &DynamicImage::ImageRgba8(textured_rgba(width, height)),
        ImageFormat::Gif,
    )
}

pub fn bmp(width: u32, height: u32) -> Vec<u8> {
    encode(
        &DynamicImage::ImageRgb8(textured_rgb(width, height)),
        ImageFormat::Bmp,
    )
}

/// A JPEG carrying an EXIF APP1 segment with `XResolution` and `ResolutionUnit`.
pub fn jpeg_with_resolution(numerator: u32, denominator: u32, unit: u16) -> Vec<u8> {
    // Little-endian TIFF header, then IFD0 at offset 8 with two entries.
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());
    tiff.extend_from_slice(&2u16.to_le_bytes());

    // XResolution: RATIONAL, value stored after the IFD at offset 38.
    tiff.extend_from_slice(&0x011Au16.to_le_bytes());
    tiff.extend_from_slice(&5u16.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&38u32.to_le_bytes());

    // ResolutionUnit: SHORT, stored inline.
    tiff.extend_from_slice(&0x0128u16.to_le_bytes());
    tiff.extend_from_slice(&3u16.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&unit.to_le_bytes());
    tiff.extend_from_slice(&[0, 0]);

    // No next IFD.
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff.extend_from_slice(&numerator.to_le_bytes());
    tiff.extend_from_slice(&denominator.to_le_bytes());

    let mut app1 = vec![0xFF, 0xE1];
    app1.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    app1.extend_from_slice(b"Exif\0\0");
    app1.extend_from_slice(&tiff);

    let plain = jpeg(16, 16);
    let mut buffer = plain[..2].to_vec();
    buffer.extend_from_slice(&app1);
    buffer.extend_from_slice(&plain[2..]);
    buffer
}
