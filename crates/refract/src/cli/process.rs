//! The `refract process` command: resize and re-encode one image.

use anyhow::Context;
use clap::Args;
use refract_core::{Config, ImageMetadata, OutputFormat, ProcessingOptions, Refract};
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::types::FormatArg;
use super::{expand_path, original_name, print_json, read_input};

/// Arguments for the `process` command.
#[derive(Args, Debug, Default)]
pub struct ProcessArgs {
    /// Image file to process
    #[arg(required = true)]
    pub input: PathBuf,

    /// Maximum output width (defaults to processing.default_max_width)
    #[arg(long)]
    pub max_width: Option<u32>,

    /// Maximum output height (defaults to processing.default_max_height)
    #[arg(long)]
    pub max_height: Option<u32>,

    /// Encoder quality for jpeg/webp, 1-100 (defaults to processing.default_quality)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub quality: Option<u32>,

    /// Output format (defaults to the source format)
    #[arg(short, long, value_enum, conflicts_with = "auto_format")]
    pub format: Option<FormatArg>,

    /// Pick webp for images with alpha, jpeg otherwise
    #[arg(long)]
    pub auto_format: bool,

    /// Output file or directory (defaults to a generated name in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// What gets printed after a successful run.
#[derive(Debug, Serialize)]
struct ProcessSummary {
    output: PathBuf,
    metadata: ImageMetadata,
}

/// Execute the process command.
pub async fn execute(args: ProcessArgs, config: Config) -> anyhow::Result<()> {
    let bytes = read_input(&args.input).await?;
    let refract = Refract::new(config);

    let selected = args.auto_format.then(|| refract.select_format(&bytes));
    if let Some(format) = selected {
        tracing::debug!("Auto-selected output format: {format}");
    }
    let options = build_options(&args, refract.config(), selected);

    let (refract, processed) = tokio::task::spawn_blocking(move || {
        let processed = refract.process(&bytes, Some(&options));
        (refract, processed)
    })
    .await?;
    let processed = processed.with_context(|| format!("Processing {:?} failed", args.input))?;

    let requested = args.output.as_deref().map(expand_path);
    let output = output_path(requested.as_deref(), || {
        refract.generate_filename(&original_name(&args.input), Some(processed.info.format))
    });
    tokio::fs::write(&output, &processed.buffer)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(
        "Wrote {} ({}x{}, {} bytes)",
        output.display(),
        processed.info.width,
        processed.info.height,
        processed.info.size_bytes
    );

    print_json(&ProcessSummary {
        output,
        metadata: processed.info,
    })
}

/// Merge CLI flags with configured defaults. Flags always win.
fn build_options(
    args: &ProcessArgs,
    config: &Config,
    auto_format: Option<OutputFormat>,
) -> ProcessingOptions {
    ProcessingOptions {
        max_width: Some(args.max_width.unwrap_or(config.processing.default_max_width)),
        max_height: Some(args.max_height.unwrap_or(config.processing.default_max_height)),
        quality: Some(args.quality.unwrap_or(config.processing.default_quality)),
        format: args.format.map(OutputFormat::from).or(auto_format),
    }
}

/// Where to write: an explicit file, a generated name inside an explicit
/// directory, or a generated name in the current directory.
fn output_path(requested: Option<&Path>, generated: impl FnOnce() -> String) -> PathBuf {
    match requested {
        Some(dir) if dir.is_dir() => dir.join(generated()),
        Some(file) => file.to_path_buf(),
        None => PathBuf::from(generated()),
    }
}
