// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use anyhow::Context;
use romcrc::RomImage;
use std::fs;
use std::path::Path;

/// Parses a byte count given in decimal or `0x` hex.
pub fn parse_size(arg: &str) -> Result<usize, String> {
    let arg = arg.trim();
    let parsed = match arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => arg.parse::<usize>(),
    };
    parsed.map_err(|e| format!("invalid size '{}': {}", arg, e))
}

/// Reads the whole file and applies the declared size.
pub fn load_image(path: &Path, declared_size: usize) -> anyhow::Result<RomImage> {
    let buffer = fs::read(path)
        .with_context(|| format!("Can't read contents of {}", path.display()))?;
    tracing::debug!("loaded {} bytes from {}", buffer.len(), path.display());

    let image = RomImage::new(buffer, declared_size).context("Incorrect flash size")?;
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("262144"), Ok(0x40000));
        assert_eq!(parse_size("0x40000"), Ok(0x40000));
        assert_eq!(parse_size("0X3ffe6"), Ok(0x3FFE6));
        assert!(parse_size("").is_err());
        assert!(parse_size("0xZZ").is_err());
        assert!(parse_size("-1").is_err());
    }
}
