//! CLI enum types and argument parsers shared by several commands.

use clap::ValueEnum;
use refract_core::{OutputFormat, ResponsiveSizeSpec};

/// Encodings selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Baseline JPEG (alpha is flattened)
    Jpeg,
    /// Lossless PNG
    Png,
    /// Lossy WebP
    Webp,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Jpeg => OutputFormat::Jpeg,
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Webp => OutputFormat::Webp,
        }
    }
}

/// Parse a `suffix=WIDTHxHEIGHT` size target.
pub fn parse_size_spec(value: &str) -> Result<ResponsiveSizeSpec, String> {
    let (suffix, dims) = value
        .split_once('=')
        .ok_or_else(|| format!("expected SUFFIX=WIDTHxHEIGHT, got '{value}'"))?;
    let suffix = suffix.trim();
    if suffix.is_empty() {
        return Err("size suffix must not be empty".to_string());
    }

    let (width, height) = dims
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT after '=', got '{dims}'"))?;
    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width '{width}'"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height '{height}'"))?;
    if width == 0 || height == 0 {
        return Err("width and height must be > 0".to_string());
    }

    Ok(ResponsiveSizeSpec::new(suffix, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_size_spec_valid() {
        let spec = parse_size_spec("hero=1600x900").unwrap();
        assert_eq!(spec, ResponsiveSizeSpec::new("hero", 1600, 900));

        let spec = parse_size_spec("thumb = 64X64").unwrap();
        assert_eq!(spec, ResponsiveSizeSpec::new("thumb", 64, 64));
    }

    #[test]
    fn parse_size_spec_rejects_malformed() {
        assert!(parse_size_spec("1600x900").is_err());
        assert!(parse_size_spec("=1600x900").is_err());
        assert!(parse_size_spec("hero=1600").is_err());
        assert!(parse_size_spec("hero=widexhigh").is_err());
        assert!(parse_size_spec("hero=0x900").is_err());
    }

    #[test]
    fn format_arg_maps_to_core() {
        assert_eq!(OutputFormat::from(FormatArg::Webp), OutputFormat::Webp);
        assert_eq!(OutputFormat::from(FormatArg::Jpeg), OutputFormat::Jpeg);
    }
}
