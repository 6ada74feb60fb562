//! # rtfprint
//!
//! RTF decoding and print pagination for Rust.
//!
//! This library turns RTF markup into a flat stream of attribute changes and
//! text runs, and flows that stream (or plain text) into pages of lines of
//! positioned runs for a fixed paper size.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rtfprint::{layout::ApproximateMetrics, render, Printout};
//!
//! fn main() -> rtfprint::Result<()> {
//!     let markup = std::fs::read_to_string("transcript.rtf")?;
//!
//!     // Lay the document out on A4 with a title band
//!     let layout = Printout::new()
//!         .with_medium("A4")
//!         .with_title("Interview 12")
//!         .paginate_rtf(&markup, &ApproximateMetrics::new())?;
//!
//!     let text = render::to_text(&layout, &render::TextOptions::default())?;
//!     println!("{}", text);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Tolerant parser**: unbalanced groups and truncated escapes never fail
//! - **Code pages**: `\ansicpg` and `\'hh` escapes decoded with `encoding_rs`
//! - **Transcript glyphs**: legacy intonation and timecode marks normalized
//! - **Pluggable metrics**: pagination measures text through a trait
//! - **Parallel batches**: independent documents paginated with Rayon

pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_rtf, RtfFormat};
pub use error::{Error, Result};
pub use layout::{
    ApproximateMetrics, ErrorMode, Extent, Margins, MetricsProvider, Orientation, PageGeometry,
    PageSetup, Paginator, Source,
};
pub use model::{
    Attributes, ColorEntry, ColorTable, DocumentEvent, DocumentStream, FontTable, Layout, Line,
    Page, Rgb, Run,
};
pub use parser::{ParseOptions, RtfParser, SubstitutionOptions, TextEncoding};
pub use render::{JsonFormat, PageSelection, TextOptions};

use std::path::Path;

/// Parse RTF markup into a document stream.
///
/// # Example
///
/// ```
/// let stream = rtfprint::parse_str(r"{\rtf1 {\b Q:} Where were you?}").unwrap();
/// assert_eq!(stream.plain_text(), "Q: Where were you?");
/// ```
pub fn parse_str(markup: &str) -> Result<DocumentStream> {
    RtfParser::new().parse(markup)
}

/// Parse RTF markup with custom options.
///
/// # Example
///
/// ```
/// use rtfprint::{parse_str_with_options, ParseOptions, TextEncoding};
///
/// let options = ParseOptions::new()
///     .with_default_font("Arial")
///     .with_text_encoding(TextEncoding::MultiByte);
/// let stream = parse_str_with_options(r"{\rtf1 hello}", &options).unwrap();
/// assert_eq!(stream.plain_text(), "hello");
/// ```
pub fn parse_str_with_options(markup: &str, options: &ParseOptions) -> Result<DocumentStream> {
    RtfParser::with_options(options.clone()).parse(markup)
}

/// Parse RTF from raw bytes.
///
/// RTF is 7-bit in practice; bytes that are not valid UTF-8 are read as
/// Windows-1252.
pub fn parse_bytes(data: &[u8]) -> Result<DocumentStream> {
    parse_bytes_with_options(data, &ParseOptions::default())
}

/// Parse RTF from raw bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: &ParseOptions) -> Result<DocumentStream> {
    let markup = decode_input(data);
    parse_str_with_options(&markup, options)
}

/// Parse an RTF file.
///
/// # Example
///
/// ```no_run
/// let stream = rtfprint::parse_file("notes.rtf").unwrap();
/// println!("{} runs", stream.run_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<DocumentStream> {
    parse_file_with_options(path, &ParseOptions::default())
}

/// Parse an RTF file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ParseOptions,
) -> Result<DocumentStream> {
    let data = std::fs::read(path)?;
    parse_bytes_with_options(&data, options)
}

/// Parse RTF markup and paginate it.
pub fn paginate_rtf<M>(markup: &str, setup: &PageSetup, metrics: &M) -> Result<Layout>
where
    M: MetricsProvider + ?Sized,
{
    let stream = parse_str(markup)?;
    Paginator::new(setup.clone()).paginate_stream(&stream, metrics)
}

/// Paginate unformatted text in the default style.
pub fn paginate_plain_text<M>(text: &str, setup: &PageSetup, metrics: &M) -> Result<Layout>
where
    M: MetricsProvider + ?Sized,
{
    Paginator::new(setup.clone()).paginate_text(text, metrics)
}

fn decode_input(data: &[u8]) -> String {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    match std::str::from_utf8(data) {
        Ok(text) => text.to_string(),
        Err(_) => {
            log::debug!("input is not UTF-8, decoding as Windows-1252");
            let (text, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(data);
            text.into_owned()
        }
    }
}

/// Builder for printing a document: parse options, page setup and the
/// title band in one place.
///
/// # Example
///
/// ```
/// use rtfprint::{ApproximateMetrics, Printout};
///
/// let layout = Printout::new()
///     .with_medium("Letter")
///     .landscape()
///     .with_title("Focus group 2")
///     .with_subtitle("Session A")
///     .paginate_rtf(r"{\rtf1 First line\par Second line}", &ApproximateMetrics::new())?;
/// assert_eq!(layout.page_count(), 1);
/// assert_eq!(layout.line_count(), 2);
/// # Ok::<(), rtfprint::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Printout {
    parse_options: ParseOptions,
    setup: PageSetup,
    title: Option<String>,
    subtitle: Option<String>,
}

impl Printout {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set the default font used for plain text and unstyled RTF.
    pub fn with_default_font(mut self, face: impl Into<String>, half_points: u32) -> Self {
        self.parse_options = self
            .parse_options
            .with_default_font(face)
            .with_default_size(half_points);
        self
    }

    /// Declare the runtime text encoding.
    pub fn with_text_encoding(mut self, encoding: TextEncoding) -> Self {
        self.parse_options = self.parse_options.with_text_encoding(encoding);
        self
    }

    /// Replace the page setup.
    pub fn with_page_setup(mut self, setup: PageSetup) -> Self {
        self.setup = setup;
        self
    }

    /// Set the paper size by name.
    pub fn with_medium(mut self, medium: impl Into<String>) -> Self {
        self.setup = self.setup.with_medium(medium);
        self
    }

    /// Print in landscape orientation.
    pub fn landscape(mut self) -> Self {
        self.setup = self.setup.landscape();
        self
    }

    /// Set margins in inches.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.setup = self.setup.with_margins(margins);
        self
    }

    /// Fail on an unknown medium.
    pub fn strict(mut self) -> Self {
        self.setup = self.setup.strict();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Build the paginator this printout uses.
    pub fn paginator(&self) -> Paginator {
        let mut paginator = Paginator::new(self.setup.clone())
            .with_text_attributes(self.parse_options.default_attributes.clone());
        if let Some(title) = &self.title {
            paginator = paginator.with_title(title.clone());
        }
        if let Some(subtitle) = &self.subtitle {
            paginator = paginator.with_subtitle(subtitle.clone());
        }
        paginator
    }

    /// Parse RTF markup with this printout's options.
    pub fn parse(&self, markup: &str) -> Result<DocumentStream> {
        parse_str_with_options(markup, &self.parse_options)
    }

    /// Parse and paginate RTF markup.
    pub fn paginate_rtf<M>(&self, markup: &str, metrics: &M) -> Result<Layout>
    where
        M: MetricsProvider + ?Sized,
    {
        let stream = self.parse(markup)?;
        self.paginator().paginate_stream(&stream, metrics)
    }

    /// Paginate plain text.
    pub fn paginate_plain_text<M>(&self, text: &str, metrics: &M) -> Result<Layout>
    where
        M: MetricsProvider + ?Sized,
    {
        self.paginator().paginate_text(text, metrics)
    }

    /// Read, parse and paginate an RTF file.
    pub fn paginate_file<M, P>(&self, path: P, metrics: &M) -> Result<Layout>
    where
        M: MetricsProvider + ?Sized,
        P: AsRef<Path>,
    {
        let stream = parse_file_with_options(path, &self.parse_options)?;
        self.paginator().paginate_stream(&stream, metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printout_builder() {
        let printout = Printout::new()
            .with_medium("A4")
            .landscape()
            .strict()
            .with_title("T");

        assert_eq!(printout.setup.medium, "A4");
        assert_eq!(printout.setup.orientation, Orientation::Landscape);
        assert_eq!(printout.setup.error_mode, ErrorMode::Strict);
        assert_eq!(printout.title.as_deref(), Some("T"));
    }

    #[test]
    fn test_printout_default_font_reaches_paginator() {
        let layout = Printout::new()
            .with_default_font("Arial", 20)
            .paginate_plain_text("hello", &ApproximateMetrics::new())
            .unwrap();
        let run = &layout.pages[0].lines[0].runs[0];
        assert_eq!(run.attributes.font_face, "Arial");
        assert_eq!(run.attributes.font_size_half_points, 20);
    }

    #[test]
    fn test_printout_strict_unknown_medium() {
        let result = Printout::new()
            .with_medium("Napkin")
            .strict()
            .paginate_plain_text("x", &ApproximateMetrics::new());
        assert!(matches!(result, Err(Error::UnknownMedium(_))));
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_parse_bytes_empty_data() {
        let result = parse_bytes(&[]);
        assert!(matches!(result, Err(Error::Format(_))));
    }

    #[test]
    fn test_parse_bytes_strips_bom() {
        let stream = parse_bytes(b"\xEF\xBB\xBF{\\rtf1 hi}").unwrap();
        assert_eq!(stream.plain_text(), "hi");
    }

    #[test]
    fn test_parse_bytes_non_utf8_falls_back() {
        let stream = parse_bytes(b"{\\rtf1 caf\xE9}").unwrap();
        assert_eq!(stream.plain_text(), "café");
    }

    #[test]
    fn test_parse_str_rejects_plain_text() {
        let result = parse_str("just some text");
        assert!(result.is_err());
        assert!(result.unwrap_err().is_format_error());
    }

    #[test]
    fn test_paginate_rtf_convenience() {
        let layout = paginate_rtf(
            r"{\rtf1 one\par two}",
            &PageSetup::default(),
            &ApproximateMetrics::new(),
        )
        .unwrap();
        assert_eq!(layout.pages[0].plain_text(), "one\ntwo");
    }

    #[test]
    fn test_paginate_plain_text_convenience() {
        let layout =
            paginate_plain_text("a\nb", &PageSetup::default(), &ApproximateMetrics::new())
                .unwrap();
        assert_eq!(layout.line_count(), 2);
        assert_eq!(layout.geometry.left_margin_px, 72);
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format_from_bytes(b"{\\rtf1\\ansi").unwrap().version, 1);
        assert!(matches!(
            detect_format_from_bytes(b"%PDF-1.7"),
            Err(Error::UnknownFormat)
        ));
    }
}
