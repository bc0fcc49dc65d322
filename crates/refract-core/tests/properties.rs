//! End-to-end properties of the public API, exercised on synthesized images.

use image::{DynamicImage, ImageFormat as Codec, Rgb, RgbImage};
use refract_core::pipeline::{ImageTransformer, Transform};
use refract_core::{
    Config, FilenameGenerator, ImageFormat, OutputFormat, PipelineError, PipelineResult,
    ProcessedImage, ProcessingOptions, Refract, ResponsiveGenerator, ResponsiveSizeSpec,
};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

/// 26 bytes that are no image at all.
const CORRUPT: &[u8] = b"this is not an image file!";

fn encoded(width: u32, height: u32, codec: Codec) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width) as u8,
            (y * 255 / height) as u8,
            ((x * 31 + y * 17) % 256) as u8,
        ])
    });
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buffer, codec)
        .unwrap();
    buffer.into_inner()
}

fn refract() -> Refract {
    Refract::new(Config::default())
}

#[test]
fn large_square_fits_bounds_and_keeps_format() {
    let upload = encoded(3000, 3000, Codec::Jpeg);
    let processed = refract()
        .process(&upload, Some(&ProcessingOptions::fit(1000, 1000)))
        .unwrap();

    assert!(processed.info.width <= 1000 && processed.info.height <= 1000);
    assert_eq!(processed.info.width, processed.info.height);
    assert_eq!(processed.info.format, ImageFormat::Jpeg);
}

#[test]
fn resize_never_upscales() {
    let refract = refract();
    for (w, h) in [(120, 80), (640, 480), (33, 999)] {
        let upload = encoded(w, h, Codec::Png);
        let processed = refract
            .process(&upload, Some(&ProcessingOptions::fit(2000, 2000)))
            .unwrap();
        assert_eq!((processed.info.width, processed.info.height), (w, h));
    }
}

#[test]
fn aspect_ratio_within_one_pixel() {
    let refract = refract();
    for (w, h, bw, bh) in [(1600, 900, 500, 500), (901, 1373, 300, 200), (2000, 30, 128, 128)] {
        let upload = encoded(w, h, Codec::Png);
        let info = refract
            .process(&upload, Some(&ProcessingOptions::fit(bw, bh)))
            .unwrap()
            .info;
        let scale = (f64::from(bw) / f64::from(w)).min(f64::from(bh) / f64::from(h));
        assert!((f64::from(info.width) - f64::from(w) * scale).abs() <= 1.0);
        assert!((f64::from(info.height) - f64::from(h) * scale).abs() <= 1.0);
    }
}

#[test]
fn higher_quality_is_never_smaller() {
    let refract = refract();
    let upload = encoded(400, 300, Codec::Png);
    for format in [OutputFormat::Jpeg, OutputFormat::Webp] {
        let size_at = |quality: u32| {
            let options = ProcessingOptions::default()
                .with_format(format)
                .with_quality(quality);
            refract.process(&upload, Some(&options)).unwrap().buffer.len()
        };
        assert!(size_at(100) >= size_at(50), "{format}");
    }
}

#[test]
fn validator_never_panics_on_hostile_input() {
    let refract = refract();
    let png = encoded(32, 32, Codec::Png);
    let jpeg = encoded(32, 32, Codec::Jpeg);
    let inputs: Vec<Vec<u8>> = vec![
        Vec::new(),
        vec![0],
        CORRUPT.to_vec(),
        png[..png.len() / 2].to_vec(),
        jpeg[..40].to_vec(),
        (0..4096u32).map(|i| (i.wrapping_mul(2654435761) >> 13) as u8).collect(),
        b"<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>".to_vec(),
    ];

    for input in &inputs {
        let result = refract.validate(input);
        assert_eq!(result.is_valid, result.metadata.is_some());
        assert_eq!(result.is_valid, result.error.is_none());
    }

    // Only the truncated images can still have parseable headers.
    for index in [0, 1, 2, 5, 6] {
        assert!(!refract.validate(&inputs[index]).is_valid, "input {index}");
    }
}

#[test]
fn corrupt_buffer_rejected_everywhere() {
    assert_eq!(CORRUPT.len(), 26);
    let refract = refract();

    let result = refract.validate(CORRUPT);
    assert!(!result.is_valid);
    assert_eq!(result.error.as_deref(), Some("Failed to parse image"));

    let err = refract.process(CORRUPT, None).unwrap_err();
    assert!(matches!(err, PipelineError::Processing { .. }));

    assert!(refract.inspect(CORRUPT).unwrap_err().is_decode_error());
    assert_eq!(refract.select_format(CORRUPT), OutputFormat::Jpeg);
}

struct FailMiddle {
    inner: ImageTransformer,
}

impl Transform for FailMiddle {
    fn transform(&self, buffer: &[u8], options: &ProcessingOptions) -> PipelineResult<ProcessedImage> {
        if options.max_width == Some(500) {
            return Err(PipelineError::Processing {
                reason: "forced".into(),
            });
        }
        self.inner.transform(buffer, options)
    }
}

#[tokio::test]
async fn partial_failure_keeps_survivors_in_order() {
    let generator = ResponsiveGenerator::with_transformer(
        Arc::new(FailMiddle {
            inner: ImageTransformer::default(),
        }),
        4,
        Duration::from_secs(30),
    );
    let specs = vec![
        ResponsiveSizeSpec::new("first", 200, 200),
        ResponsiveSizeSpec::new("second", 500, 500),
        ResponsiveSizeSpec::new("third", 800, 800),
    ];
    let results = generator
        .generate(&encoded(1000, 1000, Codec::Jpeg), &specs)
        .await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].suffix, "first");
    assert_eq!(results[0].info.width, 200);
    assert_eq!(results[1].suffix, "third");
    assert_eq!(results[1].info.width, 800);
}

#[test]
fn filenames_are_unique_and_well_formed() {
    let generator = FilenameGenerator::default();
    let a = generator.generate("test.jpg", None);
    let b = generator.generate("test.jpg", None);
    assert_ne!(a, b);

    for name in [a, b] {
        let middle = name
            .strip_prefix("test_")
            .and_then(|rest| rest.strip_suffix(".jpeg"))
            .unwrap();
        let (digits, token) = middle.split_once('_').unwrap();
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
        assert!(token.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}

#[test]
fn filename_special_characters_not_collapsed() {
    let name = refract().generate_filename("test@#$file.jpg", None);
    assert!(name.starts_with("test___file_"), "{name}");
}
