//! RTF format detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// RTF format information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtfFormat {
    /// Major version from the header (`{\rtf1` => 1)
    pub version: u32,
}

impl std::fmt::Display for RtfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RTF {}", self.version)
    }
}

/// RTF magic bytes: {\rtf
const RTF_MAGIC: &[u8] = b"{\\rtf";
const HEADER_PROBE_LEN: u64 = 16;

/// Detect RTF format from a file path.
///
/// Only the first few bytes of the file are read.
///
/// # Example
/// ```no_run
/// use rtfprint::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("transcript.rtf").unwrap();
/// println!("RTF version: {}", format.version);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<RtfFormat> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(HEADER_PROBE_LEN as usize);
    file.take(HEADER_PROBE_LEN).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect RTF format from bytes.
///
/// # Returns
/// * `Ok(RtfFormat)` if the data starts with an RTF header
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<RtfFormat> {
    if !data.starts_with(RTF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let rest = &data[RTF_MAGIC.len()..];

    // `{\rtfx` would be a different control word altogether
    if rest.first().is_some_and(|b| b.is_ascii_alphabetic()) {
        return Err(Error::UnknownFormat);
    }

    let digits: Vec<u8> = rest
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .copied()
        .collect();

    let version = if digits.is_empty() {
        1
    } else {
        std::str::from_utf8(&digits)
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(|| Error::Format("RTF version number out of range".to_string()))?
    };

    Ok(RtfFormat { version })
}

/// Detect RTF format from a string.
pub fn detect_format_from_str(text: &str) -> Result<RtfFormat> {
    detect_format_from_bytes(text.as_bytes())
}

/// Check if a file is an RTF document.
pub fn is_rtf<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes start with an RTF header.
pub fn is_rtf_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_valid_rtf() {
        let format = detect_format_from_bytes(b"{\\rtf1\\ansi\\deff0").unwrap();
        assert_eq!(format.version, 1);
        assert_eq!(format.to_string(), "RTF 1");
    }

    #[test]
    fn test_detect_without_version() {
        let format = detect_format_from_str("{\\rtf Hello}").unwrap();
        assert_eq!(format.version, 1);
    }

    #[test]
    fn test_detect_invalid_format() {
        let result = detect_format_from_bytes(b"<!DOCTYPE html>");
        assert!(matches!(result, Err(Error::UnknownFormat)));

        let result = detect_format_from_bytes(b"{\\rtfx1}");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_too_short() {
        assert!(matches!(
            detect_format_from_bytes(b"{\\rt"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(
            detect_format_from_bytes(b""),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_leading_whitespace_is_not_a_header() {
        assert!(!is_rtf_bytes(b"  {\\rtf1}"));
    }

    #[test]
    fn test_is_rtf_bytes() {
        assert!(is_rtf_bytes(b"{\\rtf1}"));
        assert!(!is_rtf_bytes(b"Not an RTF"));
    }
}
