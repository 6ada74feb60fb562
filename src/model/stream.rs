//! The parser's output: an ordered stream of attribute changes and text.

use super::{Attributes, ColorTable, FontTable};
use serde::{Deserialize, Serialize};

/// A single event of a [`DocumentStream`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DocumentEvent {
    /// New attributes take effect for all following text
    AttributeChange(Attributes),

    /// Literal text, formatted by the nearest preceding attribute change
    TextRun(String),
}

impl DocumentEvent {
    pub fn is_text(&self) -> bool {
        matches!(self, DocumentEvent::TextRun(_))
    }

    /// Get the text if this is a text run.
    pub fn text(&self) -> Option<&str> {
        match self {
            DocumentEvent::TextRun(text) => Some(text),
            DocumentEvent::AttributeChange(_) => None,
        }
    }
}

/// A decoded document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStream {
    /// Events in document order
    pub events: Vec<DocumentEvent>,

    /// Fonts declared by the document
    pub fonts: FontTable,

    /// Colors declared by the document
    pub colors: ColorTable,

    /// Groups still open when the input ended (0 for well-formed input)
    pub unclosed_groups: usize,
}

impl DocumentStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stream from a single block of text in one style.
    pub fn from_text(attributes: Attributes, text: impl Into<String>) -> Self {
        let mut stream = Self::new();
        stream.push_attributes(attributes);
        stream.push_text(text);
        stream
    }

    pub fn push_attributes(&mut self, attributes: Attributes) {
        self.events.push(DocumentEvent::AttributeChange(attributes));
    }

    /// Append a text run. Empty text is dropped.
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.events.push(DocumentEvent::TextRun(text));
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Pair every text run with the attributes in effect for it.
    ///
    /// Runs before the first attribute change use `base`.
    pub fn text_runs<'a>(
        &'a self,
        base: &'a Attributes,
    ) -> impl Iterator<Item = (&'a Attributes, &'a str)> + 'a {
        let mut current = base;
        self.events.iter().filter_map(move |event| match event {
            DocumentEvent::AttributeChange(attrs) => {
                current = attrs;
                None
            }
            DocumentEvent::TextRun(text) => Some((current, text.as_str())),
        })
    }

    /// Number of text runs.
    pub fn run_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_text()).count()
    }

    /// Concatenated text of all runs.
    pub fn plain_text(&self) -> String {
        self.events.iter().filter_map(DocumentEvent::text).collect()
    }
}
