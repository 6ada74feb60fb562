//! Run formatting attributes and the font/color tables they index into.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Face used when a document never selects a font.
pub const DEFAULT_FONT_FACE: &str = "Courier New";

/// Size used when a document never sets one (12pt).
pub const DEFAULT_FONT_SIZE_HALF_POINTS: u32 = 24;

/// A 24-bit RGB color stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Black.
    pub const BLACK: Rgb = Rgb(0x000000);
    /// White.
    pub const WHITE: Rgb = Rgb(0xFFFFFF);

    /// Build a color from its components.
    pub fn from_components(red: u8, green: u8, blue: u8) -> Self {
        Rgb(((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Replace one component, keeping the other two.
    pub fn with_component(self, component: ColorComponent, value: u8) -> Self {
        match component {
            ColorComponent::Red => Self::from_components(value, self.green(), self.blue()),
            ColorComponent::Green => Self::from_components(self.red(), value, self.blue()),
            ColorComponent::Blue => Self::from_components(self.red(), self.green(), value),
        }
    }

    /// Hex notation, e.g. `#FF0000`.
    pub fn to_hex(self) -> String {
        format!("#{:06X}", self.0 & 0xFFFFFF)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// One channel of an [`Rgb`] color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorComponent {
    Red,
    Green,
    Blue,
}

/// Formatting in effect for a run of text.
///
/// This is a plain value: the parser copies it onto its group stack and
/// every stream event owns its own snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attributes {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Font face name
    pub font_face: String,

    /// Font size in half points (24 = 12pt)
    pub font_size_half_points: u32,

    /// Text color
    pub foreground: Rgb,

    /// Background/highlight color
    pub background: Rgb,
}

impl Attributes {
    /// Default attributes with a specific face and size.
    pub fn with_font(face: impl Into<String>, size_half_points: u32) -> Self {
        Self {
            font_face: face.into(),
            font_size_half_points: size_half_points,
            ..Self::default()
        }
    }

    /// Font size in points.
    pub fn point_size(&self) -> f32 {
        self.font_size_half_points as f32 / 2.0
    }

    /// Turn bold, italic and underline off, leaving face, size and colors.
    pub fn plain(&self) -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            ..self.clone()
        }
    }

    /// Check if any emphasis is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.underline
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            font_face: DEFAULT_FONT_FACE.to_string(),
            font_size_half_points: DEFAULT_FONT_SIZE_HALF_POINTS,
            foreground: Rgb::BLACK,
            background: Rgb::WHITE,
        }
    }
}

/// Font indices mapped to face names, as declared by a `\fonttbl` group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontTable {
    entries: BTreeMap<u32, String>,
}

impl FontTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine) a font index.
    pub fn insert(&mut self, index: u32, face: impl Into<String>) {
        self.entries.insert(index, face.into());
    }

    /// Look up a face by index.
    pub fn get(&self, index: u32) -> Option<&str> {
        self.entries.get(&index).map(String::as_str)
    }

    pub fn contains(&self, index: u32) -> bool {
        self.entries.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries.iter().map(|(i, f)| (*i, f.as_str()))
    }
}

/// An entry of a [`ColorTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ColorEntry {
    /// The implicit "automatic" color at index 0
    Auto,
    /// An explicit color
    Rgb(Rgb),
}

impl ColorEntry {
    /// Resolve to a concrete color, using `auto` for the automatic entry.
    pub fn resolve(self, auto: Rgb) -> Rgb {
        match self {
            ColorEntry::Auto => auto,
            ColorEntry::Rgb(rgb) => rgb,
        }
    }
}

/// Colors declared by a `\colortbl` group.
///
/// Index 0 is always the automatic entry; explicit colors are appended
/// after it in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTable {
    entries: Vec<ColorEntry>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self {
            entries: vec![ColorEntry::Auto],
        }
    }

    /// Append a new entry and return its index.
    pub fn push(&mut self, color: Rgb) -> usize {
        self.entries.push(ColorEntry::Rgb(color));
        self.entries.len() - 1
    }

    /// Append an automatic entry and return its index.
    pub fn push_auto(&mut self) -> usize {
        self.entries.push(ColorEntry::Auto);
        self.entries.len() - 1
    }

    /// Replace the most recently appended entry.
    ///
    /// Has no effect while only the automatic entry exists.
    pub fn update_last(&mut self, color: Rgb) {
        if self.entries.len() > 1 {
            if let Some(last) = self.entries.last_mut() {
                *last = ColorEntry::Rgb(color);
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<ColorEntry> {
        self.entries.get(index).copied()
    }

    /// Number of entries, including the automatic one.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no explicit colors were declared.
    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::new()
    }
}
