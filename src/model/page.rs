//! Page-level types produced by pagination.

use super::Attributes;
use crate::layout::PageGeometry;
use serde::{Deserialize, Serialize};

/// A positioned fragment of text in one style.
///
/// A single text run of the source may be split into several of these at
/// wrap points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Formatting of the fragment
    pub attributes: Attributes,

    /// The text content
    pub text: String,

    /// X position of the left edge, in device pixels
    pub x: u32,

    /// Measured width in device pixels
    pub width: u32,
}

/// A line of runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Runs from left to right
    pub runs: Vec<Run>,

    /// Y position of the top edge, in device pixels
    pub y: u32,

    /// Height of the tallest run (or of the font for a blank line)
    pub height: u32,
}

impl Line {
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Get the text of the line.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Right edge of the last run.
    pub fn right(&self) -> u32 {
        self.runs.last().map(|r| r.x + r.width).unwrap_or(0)
    }
}

/// A single output page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Lines from top to bottom
    pub lines: Vec<Line>,
}

impl Page {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            lines: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get plain text content of the page, one line per row.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(Line::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Result of one pagination pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Pages in order
    pub pages: Vec<Page>,

    /// Geometry the pages were laid out against
    pub geometry: PageGeometry,

    /// Title printed on every page by the renderer
    pub title: Option<String>,

    /// Subtitle printed under the title
    pub subtitle: Option<String>,

    /// Non-fatal problems (e.g. a substituted paper size)
    pub warnings: Vec<String>,
}

impl Layout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total lines over all pages.
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(Page::line_count).sum()
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, number: u32) -> Option<&Page> {
        if number == 0 {
            return None;
        }
        self.pages.get((number - 1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, x: u32, width: u32) -> Run {
        Run {
            attributes: Attributes::default(),
            text: text.to_string(),
            x,
            width,
        }
    }

    #[test]
    fn test_line_text_and_extent() {
        let line = Line {
            runs: vec![run("Hello ", 72, 60), run("world", 132, 50)],
            y: 72,
            height: 14,
        };
        assert_eq!(line.plain_text(), "Hello world");
        assert_eq!(line.right(), 182);
        assert!(Line::default().is_empty());
    }

    #[test]
    fn test_page_plain_text() {
        let mut page = Page::new(1);
        assert!(page.is_empty());
        page.lines.push(Line {
            runs: vec![run("one", 0, 30)],
            ..Line::default()
        });
        page.lines.push(Line::default());
        page.lines.push(Line {
            runs: vec![run("three", 0, 50)],
            ..Line::default()
        });
        assert_eq!(page.plain_text(), "one\n\nthree");
        assert_eq!(page.line_count(), 3);
    }
}
