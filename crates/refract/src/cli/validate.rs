//! The `refract validate` command.

use clap::Args;
use refract_core::{Config, Refract};
use std::path::PathBuf;

use super::{print_json, read_input};

/// Arguments for the `validate` command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Image file to check against the upload policy
    pub input: PathBuf,
}

/// Print the validation result; exits with status 1 when the image is rejected.
pub async fn execute(args: ValidateArgs, config: Config) -> anyhow::Result<()> {
    let bytes = read_input(&args.input).await?;
    let refract = Refract::new(config);
    let result = tokio::task::spawn_blocking(move || refract.validate(&bytes)).await?;

    print_json(&result)?;

    if !result.is_valid {
        tracing::warn!(
            "{:?} rejected: {}",
            args.input,
            result.error.as_deref().unwrap_or_default()
        );
        std::process::exit(1);
    }
    Ok(())
}
