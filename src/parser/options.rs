//! Parsing options and configuration.

use encoding_rs::Encoding;

use crate::model::Attributes;

use super::substitution::{SubstitutionOptions, TextEncoding};

/// Default ANSI code page for `\'hh` escapes.
pub const DEFAULT_CODE_PAGE: u16 = 1252;

/// Options for decoding RTF documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Attributes applied at the start of the document and on every group open
    pub default_attributes: Attributes,

    /// Code page for hex escapes until the document selects one with `\ansicpg`
    pub code_page: u16,

    /// Platform character substitution for `\u` escapes
    pub substitution: SubstitutionOptions,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default font face.
    pub fn with_default_font(mut self, face: impl Into<String>) -> Self {
        self.default_attributes.font_face = face.into();
        self
    }

    /// Set the default font size in half points.
    pub fn with_default_size(mut self, half_points: u32) -> Self {
        self.default_attributes.font_size_half_points = half_points;
        self
    }

    /// Set the initial code page.
    pub fn with_code_page(mut self, code_page: u16) -> Self {
        self.code_page = code_page;
        self
    }

    /// Declare the runtime text encoding used for character substitution.
    pub fn with_text_encoding(mut self, encoding: TextEncoding) -> Self {
        self.substitution.encoding = encoding;
        self
    }

    /// Set the timecode marker and the character it becomes on multi-byte
    /// platforms.
    pub fn with_timecode_marker(mut self, marker: char, alternate: char) -> Self {
        self.substitution.timecode_marker = marker;
        self.substitution.timecode_alternate = alternate;
        self
    }

    /// Encoding for the configured code page, falling back to Windows-1252.
    pub fn encoding(&self) -> &'static Encoding {
        encoding_for_code_page(self.code_page).unwrap_or(encoding_rs::WINDOWS_1252)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_attributes: Attributes::default(),
            code_page: DEFAULT_CODE_PAGE,
            substitution: SubstitutionOptions::default(),
        }
    }
}

/// Map a Windows code page number to an encoding.
///
/// Returns `None` for code pages `encoding_rs` does not implement.
pub fn encoding_for_code_page(code_page: u16) -> Option<&'static Encoding> {
    match code_page {
        874 => Some(encoding_rs::WINDOWS_874),
        932 => Some(encoding_rs::SHIFT_JIS),
        936 => Some(encoding_rs::GBK),
        949 => Some(encoding_rs::EUC_KR),
        950 => Some(encoding_rs::BIG5),
        10000 => Some(encoding_rs::MACINTOSH),
        65001 => Some(encoding_rs::UTF_8),
        1250..=1258 => Encoding::for_label(format!("windows-{}", code_page).as_bytes()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .with_default_font("Arial")
            .with_default_size(20)
            .with_code_page(1251)
            .with_text_encoding(TextEncoding::MultiByte);

        assert_eq!(options.default_attributes.font_face, "Arial");
        assert_eq!(options.default_attributes.font_size_half_points, 20);
        assert_eq!(options.encoding(), encoding_rs::WINDOWS_1251);
        assert_eq!(options.substitution.encoding, TextEncoding::MultiByte);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.code_page, DEFAULT_CODE_PAGE);
        assert_eq!(options.encoding(), encoding_rs::WINDOWS_1252);
        assert_eq!(options.substitution.encoding, TextEncoding::SingleByte);
    }

    #[test]
    fn test_code_page_table() {
        assert_eq!(encoding_for_code_page(932), Some(encoding_rs::SHIFT_JIS));
        assert_eq!(encoding_for_code_page(1253), Some(encoding_rs::WINDOWS_1253));
        assert_eq!(encoding_for_code_page(437), None);
    }
}
