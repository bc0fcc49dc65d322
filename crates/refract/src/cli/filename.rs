//! The `refract filename` command.

use clap::Args;
use refract_core::{Config, FilenameGenerator, ImageFormat, OutputFormat};

use super::types::FormatArg;

/// Arguments for the `filename` command.
#[derive(Args, Debug)]
pub struct FilenameArgs {
    /// Original upload name, e.g. "Holiday Photo.JPG"
    pub name: String,

    /// Extension to use instead of the original one
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

/// Print a storage-safe name for the given upload name.
pub async fn execute(args: FilenameArgs, config: Config) -> anyhow::Result<()> {
    let generator = FilenameGenerator::new(&config.naming);
    let format = args
        .format
        .map(|f| ImageFormat::from(OutputFormat::from(f)));
    println!("{}", generator.generate(&args.name, format));
    Ok(())
}
