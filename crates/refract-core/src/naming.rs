//! Collision-resistant output filenames.
//!
//! Every generated name follows the same pattern:
//!
//! ```text
//! <sanitized base>_<unix millis>_<random [a-z0-9] token>.<extension>
//! ```
//!
//! - `test.jpg` → `test_1718000000000_k3x9qa.jpeg`
//! - `test@#$file.jpg` → `test___file_1718000000000_0f8mzt.jpeg` (one `_` per character, no collapsing)
//! - `My Photo.PNG` with format `webp` → `My_Photo_1718000000000_a1b2c3.webp`
//!
//! Only the base is ever shortened to respect the length bound. Timestamps
//! never go backwards within a process, even if the wall clock does.

use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::NamingConfig;
use crate::types::ImageFormat;

const TOKEN_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Base used when nothing of the original name is left.
const FALLBACK_BASE: &str = "image";

/// Extension used when neither a format nor a usable original extension is known.
const FALLBACK_EXTENSION: &str = "jpeg";

/// Longest extension kept from an original name. Every [`ImageFormat`]
/// extension fits.
pub(crate) const MAX_EXTENSION_LEN: usize = 4;

/// Last timestamp handed out by [`FilenameGenerator::generate`].
static LAST_TIMESTAMP: AtomicU64 = AtomicU64::new(0);

/// Generates storage-safe filenames for processed artifacts.
#[derive(Debug, Clone)]
pub struct FilenameGenerator {
    max_length: usize,
    token_length: usize,
}

impl Default for FilenameGenerator {
    fn default() -> Self {
        Self::new(&NamingConfig::default())
    }
}

impl FilenameGenerator {
    pub fn new(config: &NamingConfig) -> Self {
        Self {
            max_length: config.max_length,
            token_length: config.random_suffix_length,
        }
    }

    /// Build a fresh name for `original_name`.
    ///
    /// The extension comes from `format` when given, otherwise from the
    /// original name (canonicalized, so `JPG` becomes `jpeg`).
    pub fn generate(&self, original_name: &str, format: Option<ImageFormat>) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        let timestamp = non_decreasing(&LAST_TIMESTAMP, now);
        let token = random_token(self.token_length);
        build_filename(original_name, format, timestamp, &token, self.max_length)
    }
}

/// Clamp `now` so it is never below a value previously returned for `last`.
fn non_decreasing(last: &AtomicU64, now: u64) -> u64 {
    last.fetch_max(now, Ordering::Relaxed).max(now)
}

fn random_token(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| TOKEN_CHARSET[rng.gen_range(0..TOKEN_CHARSET.len())] as char)
        .collect()
}

fn build_filename(
    original_name: &str,
    format: Option<ImageFormat>,
    timestamp: u64,
    token: &str,
    max_length: usize,
) -> String {
    let (base, original_ext) = split_extension(original_name);

    let extension = match (format, original_ext) {
        (Some(format), _) => format.as_str().to_string(),
        (None, Some(ext)) => canonical_extension(ext),
        (None, None) => FALLBACK_EXTENSION.to_string(),
    };

    let mut base = sanitize(base);
    if base.is_empty() {
        base = FALLBACK_BASE.to_string();
    }

    let tail = format!("_{timestamp}_{token}.{extension}");
    let room = max_length.saturating_sub(tail.len());
    if base.len() > room {
        // Sanitized bases are ASCII, so byte truncation is char-safe.
        base.truncate(room);
    }

    format!("{base}{tail}")
}

/// Split at the last dot. A name whose only dot is leading has no extension.
fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() && !ext.is_empty() => (base, Some(ext)),
        Some((base, "")) if !base.is_empty() => (base, None),
        _ => (name, None),
    }
}

fn sanitize(base: &str) -> String {
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn canonical_extension(ext: &str) -> String {
    if let Some(format) = ImageFormat::from_extension(ext) {
        return format.as_str().to_string();
    }
    let cleaned: String = ext
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if cleaned.is_empty() || cleaned.len() > MAX_EXTENSION_LEN {
        FALLBACK_EXTENSION.to_string()
    } else {
        cleaned
    }
}
