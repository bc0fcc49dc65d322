//! The `refract inspect` command.

use clap::Args;
use refract_core::MetadataInspector;
use std::path::PathBuf;

use super::{print_json, read_input};

/// Arguments for the `inspect` command.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Image file to inspect
    pub input: PathBuf,
}

/// Print the header metadata of an image as JSON.
pub async fn execute(args: InspectArgs) -> anyhow::Result<()> {
    let bytes = read_input(&args.input).await?;
    let metadata = MetadataInspector::inspect(&bytes)?;
    tracing::debug!(
        "{:?}: {} {}x{}",
        args.input,
        metadata.format,
        metadata.width,
        metadata.height
    );
    print_json(&metadata)
}
