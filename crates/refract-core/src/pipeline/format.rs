//! Output codec choice from a source buffer.

use crate::types::OutputFormat;

use super::decode::MetadataInspector;

/// Chooses an output format for a buffer. Never fails.
pub struct FormatSelector;

impl FormatSelector {
    /// `webp` when the source has an alpha channel, `jpeg` otherwise or when
    /// the buffer cannot be inspected.
    ///
    /// Alpha presence is the signal, not alpha usage: an RGBA image whose
    /// alpha is fully opaque still selects `webp`.
    pub fn select(buffer: &[u8]) -> OutputFormat {
        match MetadataInspector::inspect(buffer) {
            Ok(meta) if meta.has_alpha() => OutputFormat::Webp,
            Ok(_) => OutputFormat::Jpeg,
            Err(e) => {
                tracing::debug!("Format selection fell back to jpeg: {e}");
                OutputFormat::Jpeg
            }
        }
    }
}
