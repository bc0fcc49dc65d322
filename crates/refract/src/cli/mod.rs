//! Command implementations and the file plumbing they share.

pub mod config;
pub mod filename;
pub mod inspect;
pub mod process;
pub mod responsive;
pub mod types;
pub mod validate;

use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Read an input image, with a hint when the path is wrong.
pub(crate) async fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    if !path.exists() {
        anyhow::bail!(
            "Input path does not exist: {:?}\n\n  Hint: Check the file path and try again.",
            path
        );
    }
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// File name component of `path`, used as the base for generated names.
pub(crate) fn original_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Expand `~` in a user-supplied path.
pub(crate) fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&path_str).into_owned())
}
