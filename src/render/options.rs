//! Rendering options.

use std::ops::RangeInclusive;

/// Form feed, the traditional page separator of printable text.
pub const FORM_FEED: &str = "\u{000C}";

/// Options for rendering a layout as text.
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Written between pages
    pub page_separator: String,

    /// Print the title, subtitle and page number at the top of each page
    pub page_headers: bool,

    /// Pages to render
    pub page_selection: PageSelection,

    /// Drop trailing whitespace from every line
    pub trim_lines: bool,
}

impl TextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.page_separator = separator.into();
        self
    }

    /// Enable or disable page headers.
    pub fn with_headers(mut self, enabled: bool) -> Self {
        self.page_headers = enabled;
        self
    }

    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }

    pub fn with_trim_lines(mut self, enabled: bool) -> Self {
        self.trim_lines = enabled;
        self
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            page_separator: FORM_FEED.to_string(),
            page_headers: false,
            page_selection: PageSelection::All,
            trim_lines: true,
        }
    }
}

/// Page selection for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Render all pages
    #[default]
    All,
    /// Render a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Render specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a selection such as `"all"`, `"2-5"` or `"1,3,7-9"`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        let number = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| format!("Invalid page number: {}", part.trim()))
        };

        if !s.contains(',') {
            if let Some((start, end)) = s.split_once('-') {
                return Ok(PageSelection::Range(number(start)?..=number(end)?));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            match part.split_once('-') {
                Some((start, end)) => pages.extend(number(start)?..=number(end)?),
                None => pages.push(number(part)?),
            }
        }
        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}
