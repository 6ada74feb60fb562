//! Platform character substitution for `\u` escapes.
//!
//! Transcripts written by older tools encode the intonation arrows and the
//! closed-dot mark through the Symbol font's private-use slots. These are
//! always mapped to their real Unicode glyphs. The timecode marker is only
//! remapped when the runtime uses a multi-byte text encoding, where the
//! single-byte marker collides with ordinary text.

/// Legacy code point for the rising intonation mark.
pub const LEGACY_RISING_INTONATION: char = '\u{F0AD}';
/// Legacy code point for the falling intonation mark.
pub const LEGACY_FALLING_INTONATION: char = '\u{F0AF}';
/// Legacy code point for the closed-dot mark.
pub const LEGACY_CLOSED_DOT: char = '\u{F0B7}';

/// Rising intonation mark.
pub const RISING_INTONATION: char = '\u{2191}';
/// Falling intonation mark.
pub const FALLING_INTONATION: char = '\u{2193}';
/// Closed-dot mark.
pub const CLOSED_DOT: char = '\u{25CF}';

/// Marker that precedes a timecode in transcript text.
pub const DEFAULT_TIMECODE_MARKER: char = '\u{00A4}';
/// Private-use slot the multi-byte transcript fonts draw the marker from.
pub const DEFAULT_TIMECODE_ALTERNATE: char = '\u{E000}';

/// Text encoding of the runtime the document will be displayed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// 8-bit code page
    #[default]
    SingleByte,
    /// Multi-byte (Unicode) build
    MultiByte,
}

/// Configuration for [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstitutionOptions {
    /// Active runtime encoding
    pub encoding: TextEncoding,

    /// Code point of the timecode marker
    pub timecode_marker: char,

    /// Replacement for the marker under [`TextEncoding::MultiByte`]
    pub timecode_alternate: char,
}

impl Default for SubstitutionOptions {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::SingleByte,
            timecode_marker: DEFAULT_TIMECODE_MARKER,
            timecode_alternate: DEFAULT_TIMECODE_ALTERNATE,
        }
    }
}

/// Normalize one decoded character.
pub fn normalize(c: char, options: &SubstitutionOptions) -> char {
    match c {
        LEGACY_RISING_INTONATION => RISING_INTONATION,
        LEGACY_FALLING_INTONATION => FALLING_INTONATION,
        LEGACY_CLOSED_DOT => CLOSED_DOT,
        c if c == options.timecode_marker && options.encoding == TextEncoding::MultiByte => {
            options.timecode_alternate
        }
        c => c,
    }
}
