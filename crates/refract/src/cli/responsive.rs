//! The `refract responsive` command: write one file per size target.

use anyhow::Context;
use clap::Args;
use refract_core::{
    Config, ImageFormat, OutputFormat, ProcessingOptions, Refract, ResponsiveSizeResult,
    ResponsiveSizeSpec,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::types::{parse_size_spec, FormatArg};
use super::{expand_path, print_json, read_input};

/// Arguments for the `responsive` command.
#[derive(Args, Debug, Default)]
pub struct ResponsiveArgs {
    /// Image file to fan out
    #[arg(required = true)]
    pub input: PathBuf,

    /// Size target as SUFFIX=WIDTHxHEIGHT; repeatable (defaults to responsive.sizes)
    #[arg(short, long = "size", value_parser = parse_size_spec)]
    pub sizes: Vec<ResponsiveSizeSpec>,

    /// Encoder quality for jpeg/webp, 1-100 (defaults to processing.default_quality)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub quality: Option<u32>,

    /// Output format for every variant (defaults to the source format)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Directory to write variants into
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// One line of the printed manifest.
#[derive(Debug, Serialize)]
struct ManifestEntry {
    suffix: String,
    path: PathBuf,
    format: ImageFormat,
    width: u32,
    height: u32,
    size_bytes: u64,
}

/// Execute the responsive command.
pub async fn execute(args: ResponsiveArgs, config: Config) -> anyhow::Result<()> {
    let bytes = read_input(&args.input).await?;
    let out_dir = expand_path(&args.output);
    tokio::fs::create_dir_all(&out_dir)
        .await
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let base = ProcessingOptions {
        quality: Some(args.quality.unwrap_or(config.processing.default_quality)),
        format: args.format.map(OutputFormat::from),
        ..ProcessingOptions::default()
    };
    let refract = Refract::new(config);
    let specs = (!args.sizes.is_empty()).then_some(args.sizes.as_slice());

    let variants = refract
        .generate_responsive_with_options(&bytes, specs, base)
        .await;
    let requested = specs.map_or(refract.config().responsive.sizes.len(), <[_]>::len);
    if variants.is_empty() {
        anyhow::bail!(
            "No variants could be generated from {:?} ({} requested)",
            args.input,
            requested
        );
    }

    let stem = args
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut manifest = Vec::with_capacity(variants.len());
    for variant in variants {
        let entry = write_variant(&refract, &out_dir, &stem, variant).await?;
        manifest.push(entry);
    }

    tracing::info!(
        "Wrote {}/{} variants to {}",
        manifest.len(),
        requested,
        out_dir.display()
    );
    print_json(&manifest)
}

async fn write_variant(
    refract: &Refract,
    out_dir: &Path,
    stem: &str,
    variant: ResponsiveSizeResult,
) -> anyhow::Result<ManifestEntry> {
    let name = refract.generate_filename(
        &format!("{stem}-{}", variant.suffix),
        Some(variant.info.format),
    );
    let path = out_dir.join(name);
    tokio::fs::write(&path, &variant.buffer)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(ManifestEntry {
        suffix: variant.suffix,
        path,
        format: variant.info.format,
        width: variant.info.width,
        height: variant.info.height,
        size_bytes: variant.info.size_bytes,
    })
}
