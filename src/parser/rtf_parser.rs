//! RTF document parser.
//!
//! A single pass over the token stream drives a group-scoped state machine.
//! All state lives in [`ParseState`], which is created fresh for every call
//! to [`RtfParser::parse`] and consumed when the stream is returned.

use encoding_rs::Encoding;

use crate::detect::detect_format_from_str;
use crate::error::{Error, Result};
use crate::model::{Attributes, ColorComponent, DocumentEvent, DocumentStream, Rgb};

use super::control::ControlWord;
use super::options::{encoding_for_code_page, ParseOptions};
use super::scanner::{Scanner, Token};
use super::substitution;

/// RTF document parser.
///
/// # Example
///
/// ```
/// use rtfprint::RtfParser;
///
/// let stream = RtfParser::new()
///     .parse(r"{\rtf1 Hello {\b world}}")
///     .unwrap();
/// assert_eq!(stream.plain_text(), "Hello world");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RtfParser {
    options: ParseOptions,
}

impl RtfParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Decode a complete RTF document.
    ///
    /// Fails only when the input does not begin with an RTF header.
    /// Unbalanced braces and truncated escapes are tolerated.
    pub fn parse(&self, markup: &str) -> Result<DocumentStream> {
        detect_format_from_str(markup).map_err(|e| match e {
            Error::UnknownFormat => {
                Error::Format("input does not begin with an RTF header".to_string())
            }
            other => other,
        })?;

        let mut scanner = Scanner::new(markup);
        let stream = ParseState::new(&self.options).run(&mut scanner);

        log::debug!(
            "parsed {} events ({} text runs, {} fonts, {} colors)",
            stream.len(),
            stream.run_count(),
            stream.fonts.len(),
            stream.colors.len()
        );

        Ok(stream)
    }
}

/// Where text currently goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Body,
    FontTable,
    ColorTable,
}

/// Saved state of an enclosing group.
#[derive(Debug, Clone)]
struct Frame {
    attributes: Attributes,
    destination: Destination,
    unicode_skip: usize,
    /// Whether closing this group emits the restored attributes
    announced: bool,
}

struct ParseState<'o> {
    options: &'o ParseOptions,
    defaults: Attributes,
    current: Attributes,
    destination: Destination,
    stack: Vec<Frame>,
    stream: DocumentStream,

    text: String,
    pending_newlines: usize,
    pending_bytes: Vec<u8>,
    encoding: &'static Encoding,
    group_start: bool,

    unicode_skip: usize,
    skip_remaining: usize,
    high_surrogate: Option<u16>,

    font_entry: Option<u32>,
    font_name: String,
    font_table_frame: Option<usize>,
    pending_font: Option<u32>,
    default_font: Option<u32>,

    color_open: bool,
    color_separators: usize,
    building_color: Rgb,
}

impl<'o> ParseState<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            defaults: options.default_attributes.clone(),
            current: options.default_attributes.clone(),
            destination: Destination::Body,
            stack: Vec::new(),
            stream: DocumentStream::new(),
            text: String::new(),
            pending_newlines: 0,
            pending_bytes: Vec::new(),
            encoding: options.encoding(),
            group_start: false,
            unicode_skip: 1,
            skip_remaining: 0,
            high_surrogate: None,
            font_entry: None,
            font_name: String::new(),
            font_table_frame: None,
            pending_font: None,
            default_font: None,
            color_open: false,
            color_separators: 0,
            building_color: Rgb::BLACK,
        }
    }

    fn run(mut self, scanner: &mut Scanner<'_>) -> DocumentStream {
        while let Some(token) = scanner.next() {
            if !matches!(token, Token::HexByte(_)) {
                self.decode_pending_bytes();
            }
            let at_group_start = std::mem::replace(&mut self.group_start, false);

            match token {
                Token::GroupOpen => self.open_group(),
                Token::GroupClose => self.close_group(),
                Token::ControlWord { name, param } => {
                    self.control(ControlWord::classify(name, param), at_group_start, scanner)
                }
                Token::ControlSymbol(symbol) => {
                    self.control(ControlWord::classify_symbol(symbol), at_group_start, scanner)
                }
                Token::HexByte(byte) => self.hex_byte(byte),
                Token::Text(text) => self.literal(text),
                Token::Truncated => {
                    log::debug!(
                        "dropped truncated control word before byte {}",
                        scanner.offset()
                    );
                }
            }
        }

        self.finish()
    }

    fn finish(mut self) -> DocumentStream {
        self.decode_pending_bytes();
        self.flush_text();

        if self.pending_newlines > 0 {
            self.stream.push_text("\n".repeat(self.pending_newlines));
        }

        self.stream.unclosed_groups = self.stack.len();
        if !self.stack.is_empty() {
            log::debug!("input ended with {} unclosed groups", self.stack.len());
        }

        self.stream
    }

    // ---- groups ----

    fn open_group(&mut self) {
        self.flush_text();
        self.skip_remaining = 0;

        self.stack.push(Frame {
            attributes: self.current.clone(),
            destination: self.destination,
            unicode_skip: self.unicode_skip,
            announced: false,
        });
        self.current = self.defaults.clone();

        if self.destination == Destination::Body {
            self.stream.push_attributes(self.current.clone());
            if let Some(frame) = self.stack.last_mut() {
                frame.announced = true;
            }
        }

        self.group_start = true;
    }

    fn close_group(&mut self) {
        self.flush_text();
        self.skip_remaining = 0;

        if self.destination == Destination::FontTable {
            self.commit_font();
        }

        let Some(frame) = self.stack.pop() else {
            log::debug!("ignored unmatched group close");
            return;
        };

        if self.destination == Destination::FontTable && frame.destination != Destination::FontTable
        {
            self.font_table_frame = None;
            self.font_entry = None;
            self.font_name.clear();
        }
        if self.destination == Destination::ColorTable {
            self.color_open = false;
        }

        self.current = frame.attributes;
        self.destination = frame.destination;
        self.unicode_skip = frame.unicode_skip;

        if frame.announced {
            self.stream.push_attributes(self.current.clone());
        }
    }

    /// Remove the open event of a group that turned out to be a
    /// destination, so table groups leave no trace in the stream.
    fn retract_group_open(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            if frame.announced {
                frame.announced = false;
                if matches!(
                    self.stream.events.last(),
                    Some(DocumentEvent::AttributeChange(_))
                ) {
                    self.stream.events.pop();
                }
            }
        }
    }

    fn skip_destination(&mut self, scanner: &mut Scanner<'_>) {
        if scanner.skip_group() {
            self.close_group();
        } else {
            log::debug!("input ended inside a skipped destination");
        }
    }

    // ---- control words ----

    fn control(&mut self, word: ControlWord, at_group_start: bool, scanner: &mut Scanner<'_>) {
        if self.skip_remaining > 0 {
            if let ControlWord::Literal(_) = word {
                self.skip_remaining -= 1;
                return;
            }
            self.skip_remaining = 0;
        }

        if !word.produces_text() {
            self.flush_text();
        }
        if at_group_start && word.is_destination() {
            self.retract_group_open();
        }

        match word {
            ControlWord::Header | ControlWord::Unknown => {}
            ControlWord::CodePage(code_page) => match encoding_for_code_page(code_page) {
                Some(encoding) => self.encoding = encoding,
                None => log::debug!(
                    "unsupported code page {}, keeping {}",
                    code_page,
                    self.encoding.name()
                ),
            },
            ControlWord::MacCharset => self.encoding = encoding_rs::MACINTOSH,
            ControlWord::DefaultFont(index) => {
                self.default_font = Some(index);
                if let Some(face) = self.stream.fonts.get(index) {
                    self.defaults.font_face = face.to_string();
                }
            }
            ControlWord::FontTable => {
                self.destination = Destination::FontTable;
                self.font_table_frame = self.stack.len().checked_sub(1);
                self.font_entry = None;
                self.font_name.clear();
            }
            ControlWord::Font(index) => self.select_font(index),
            ControlWord::FontSize(half_points) => {
                self.current.font_size_half_points = half_points;
                self.emit_attributes();
            }
            ControlWord::ColorTable => {
                self.destination = Destination::ColorTable;
                self.color_open = false;
                self.color_separators = 0;
            }
            ControlWord::ColorComponent(component, value) => {
                self.set_color_component(component, value)
            }
            ControlWord::Foreground(index) => match self.stream.colors.get(index) {
                Some(entry) => {
                    self.current.foreground = entry.resolve(Rgb::BLACK);
                    self.emit_attributes();
                }
                None => log::debug!("foreground color {} is not in the color table", index),
            },
            ControlWord::Background(index) => match self.stream.colors.get(index) {
                Some(entry) => {
                    self.current.background = entry.resolve(Rgb::WHITE);
                    self.emit_attributes();
                }
                None => log::debug!("background color {} is not in the color table", index),
            },
            ControlWord::Underline(on) => {
                self.current.underline = on;
                self.emit_attributes();
            }
            ControlWord::Bold(on) => {
                self.current.bold = on;
                self.emit_attributes();
            }
            ControlWord::Italic(on) => {
                self.current.italic = on;
                self.emit_attributes();
            }
            ControlWord::Plain => {
                self.current = self.current.plain();
                self.emit_attributes();
            }
            ControlWord::Break => {
                if self.destination == Destination::Body {
                    self.pending_newlines += 1;
                }
            }
            ControlWord::Unicode(value) => self.unicode(value),
            ControlWord::UnicodeSkip(count) => self.unicode_skip = count,
            ControlWord::Literal(c) => self.push_char(c),
            ControlWord::SkipDestination => self.skip_destination(scanner),
            ControlWord::IgnorableDestination => {
                // A stray `\*` outside a group start marks nothing
                if at_group_start {
                    self.skip_destination(scanner);
                }
            }
        }
    }

    fn emit_attributes(&mut self) {
        if self.destination == Destination::Body {
            self.stream.push_attributes(self.current.clone());
        }
    }

    fn select_font(&mut self, index: u32) {
        if self.destination == Destination::FontTable {
            self.commit_font();
            self.font_entry = Some(index);
            return;
        }

        match self.stream.fonts.get(index) {
            Some(face) => {
                self.current.font_face = face.to_string();
                self.emit_attributes();
            }
            None => {
                log::debug!("font {} selected before it was defined", index);
                self.pending_font = Some(index);
            }
        }
    }

    /// Store the collected face name under the current font index.
    fn commit_font(&mut self) {
        let name = self.font_name.trim().to_string();
        self.font_name.clear();

        let Some(index) = self.font_entry else {
            return;
        };
        if name.is_empty() {
            return;
        }
        self.font_entry = None;
        self.stream.fonts.insert(index, name.clone());

        if self.default_font == Some(index) {
            let previous = std::mem::replace(&mut self.defaults.font_face, name.clone());
            if let Some(frame) = self.font_table_restore_frame() {
                if frame.attributes.font_face == previous {
                    frame.attributes.font_face = name.clone();
                    frame.announced = frame.destination == Destination::Body;
                }
            }
        }

        if self.pending_font == Some(index) {
            self.pending_font = None;
            if let Some(frame) = self.font_table_restore_frame() {
                frame.attributes.font_face = name;
                frame.announced = frame.destination == Destination::Body;
            }
        }
    }

    /// The frame that becomes current again when the font table closes.
    fn font_table_restore_frame(&mut self) -> Option<&mut Frame> {
        let index = self.font_table_frame?;
        self.stack.get_mut(index)
    }

    fn set_color_component(&mut self, component: ColorComponent, value: u8) {
        if self.destination != Destination::ColorTable {
            return;
        }
        if !self.color_open {
            self.stream.colors.push(Rgb::BLACK);
            self.building_color = Rgb::BLACK;
            self.color_open = true;
        }
        self.building_color = self.building_color.with_component(component, value);
        self.stream.colors.update_last(self.building_color);
    }

    /// A `;` in the color table ends the current entry. An entry with no
    /// components is automatic; the leading one is the entry at index 0.
    fn end_color_entry(&mut self) {
        if !self.color_open && self.color_separators > 0 {
            self.stream.colors.push_auto();
        }
        self.color_open = false;
        self.color_separators += 1;
    }

    fn unicode(&mut self, value: i32) {
        self.skip_remaining = self.unicode_skip;

        // Values above 32767 are written as negative 16-bit numbers
        let value = if value < 0 { value + 0x10000 } else { value };
        let Ok(unit) = u32::try_from(value) else {
            return;
        };

        let decoded = match unit {
            0xD800..=0xDBFF => {
                self.high_surrogate = Some(unit as u16);
                return;
            }
            0xDC00..=0xDFFF => self
                .high_surrogate
                .take()
                .and_then(|high| char::decode_utf16([high, unit as u16]).next())
                .and_then(|r| r.ok())
                .unwrap_or(char::REPLACEMENT_CHARACTER),
            _ => char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER),
        };
        self.high_surrogate = None;

        let c = substitution::normalize(decoded, &self.options.substitution);
        self.push_char(c);
    }

    // ---- text ----

    fn hex_byte(&mut self, byte: u8) {
        if self.skip_remaining > 0 {
            self.skip_remaining -= 1;
            return;
        }
        self.pending_bytes.push(byte);
    }

    fn decode_pending_bytes(&mut self) {
        if self.pending_bytes.is_empty() {
            return;
        }
        let bytes = std::mem::take(&mut self.pending_bytes);
        let (decoded, had_errors) = self.encoding.decode_without_bom_handling(&bytes);
        if had_errors {
            log::debug!(
                "undecodable bytes {:02X?} in {}",
                bytes,
                self.encoding.name()
            );
        }
        self.push_str(&decoded);
    }

    fn literal(&mut self, text: &str) {
        let mut chars = text.chars();
        while self.skip_remaining > 0 {
            match chars.next() {
                Some(_) => self.skip_remaining -= 1,
                None => return,
            }
        }
        self.push_str(chars.as_str());
    }

    fn push_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.push_str(c.encode_utf8(&mut buf));
    }

    fn push_str(&mut self, text: &str) {
        match self.destination {
            Destination::Body => self.text.push_str(text),
            Destination::FontTable => {
                for c in text.chars() {
                    if c == ';' {
                        self.commit_font();
                    } else {
                        self.font_name.push(c);
                    }
                }
            }
            Destination::ColorTable => {
                for _ in text.matches(';') {
                    self.end_color_entry();
                }
            }
        }
    }

    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let mut run = "\n".repeat(self.pending_newlines);
        run.push_str(&self.text);
        self.text.clear();
        self.pending_newlines = 0;
        self.stream.push_text(run);
    }
}
