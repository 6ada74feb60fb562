//! Greedy line breaking and pagination.

use rayon::prelude::*;

use super::geometry::{PageGeometry, PageSetup};
use super::metrics::MetricsProvider;
use super::words::split_words;
use crate::error::Result;
use crate::model::{Attributes, DocumentStream, Layout, Line, Page, Run};

/// Title size in half points (16pt).
const TITLE_SIZE_HALF_POINTS: u32 = 32;

/// Subtitle size in half points (12pt).
const SUBTITLE_SIZE_HALF_POINTS: u32 = 24;

/// Input to a pagination pass.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    /// Parsed document
    Stream(&'a DocumentStream),
    /// Unformatted text in the paginator's text style
    Text(&'a str),
}

impl<'a> From<&'a DocumentStream> for Source<'a> {
    fn from(stream: &'a DocumentStream) -> Self {
        Source::Stream(stream)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Source::Text(text)
    }
}

/// Divides documents into pages of lines of positioned runs.
///
/// A paginator only holds configuration; every call lays out from scratch,
/// so one instance can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    setup: PageSetup,
    geometry: Option<PageGeometry>,
    title: Option<String>,
    subtitle: Option<String>,
    text_attributes: Attributes,
}

impl Paginator {
    /// Create a paginator for a page setup.
    pub fn new(setup: PageSetup) -> Self {
        Self {
            setup,
            ..Self::default()
        }
    }

    /// Lay out against fixed pixel geometry instead of resolving a medium.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = Some(geometry);
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

    /// Style of plain text, and of stream text before the first attribute
    /// change.
    pub fn with_text_attributes(mut self, attributes: Attributes) -> Self {
        self.text_attributes = attributes;
        self
    }

    pub fn setup(&self) -> &PageSetup {
        &self.setup
    }

    /// Paginate a parsed document.
    pub fn paginate_stream<M>(&self, stream: &DocumentStream, metrics: &M) -> Result<Layout>
    where
        M: MetricsProvider + ?Sized,
    {
        self.paginate(Source::Stream(stream), metrics)
    }

    /// Paginate plain text.
    pub fn paginate_text<M>(&self, text: &str, metrics: &M) -> Result<Layout>
    where
        M: MetricsProvider + ?Sized,
    {
        self.paginate(Source::Text(text), metrics)
    }

    /// Paginate either kind of source.
    pub fn paginate<M>(&self, source: Source<'_>, metrics: &M) -> Result<Layout>
    where
        M: MetricsProvider + ?Sized,
    {
        let (geometry, warning) = self.resolve_geometry(metrics)?;
        let mut breaker = LineBreaker::new(geometry, metrics);

        match source {
            Source::Stream(stream) => {
                for (attributes, text) in stream.text_runs(&self.text_attributes) {
                    breaker.push_run(attributes, text);
                }
            }
            Source::Text(text) => {
                for (index, line) in text.split('\n').enumerate() {
                    let line = line.strip_suffix('\r').unwrap_or(line);
                    if index > 0 {
                        breaker.forced_break(&self.text_attributes);
                    }
                    breaker.place_text(&self.text_attributes, line);
                }
            }
        }

        let pages = breaker.finish();
        log::debug!(
            "paginated {} lines into {} pages",
            pages.iter().map(Page::line_count).sum::<usize>(),
            pages.len()
        );

        Ok(Layout {
            pages,
            geometry,
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            warnings: warning.into_iter().collect(),
        })
    }

    /// Paginate independent documents in parallel.
    ///
    /// Results come back in input order.
    pub fn paginate_many<M>(&self, sources: &[Source<'_>], metrics: &M) -> Vec<Result<Layout>>
    where
        M: MetricsProvider + Sync + ?Sized,
    {
        sources
            .par_iter()
            .map(|source| self.paginate(*source, metrics))
            .collect()
    }

    /// Height of the title band: title and subtitle measured once in their
    /// fixed styles.
    pub fn title_height<M>(&self, metrics: &M) -> u32
    where
        M: MetricsProvider + ?Sized,
    {
        let base = &self.text_attributes;
        let title = self.title.as_deref().map(|text| {
            let style = Attributes {
                bold: true,
                italic: false,
                underline: false,
                font_size_half_points: TITLE_SIZE_HALF_POINTS,
                ..base.clone()
            };
            metrics.measure(&style, text).height
        });
        let subtitle = self.subtitle.as_deref().map(|text| {
            let style = Attributes {
                bold: false,
                italic: true,
                underline: false,
                font_size_half_points: SUBTITLE_SIZE_HALF_POINTS,
                ..base.clone()
            };
            metrics.measure(&style, text).height
        });
        title.unwrap_or(0) + subtitle.unwrap_or(0)
    }

    fn resolve_geometry<M>(&self, metrics: &M) -> Result<(PageGeometry, Option<String>)>
    where
        M: MetricsProvider + ?Sized,
    {
        let (mut geometry, warning) = match self.geometry {
            Some(geometry) => (geometry, None),
            None => self.setup.geometry(metrics)?,
        };
        geometry.reserved_title_height_px += self.title_height(metrics);
        geometry.validate()?;
        Ok((geometry, warning))
    }
}

/// Cursor state of one pagination pass.
struct LineBreaker<'m, M: ?Sized> {
    metrics: &'m M,
    geometry: PageGeometry,
    pages: Vec<Page>,
    page: Page,
    runs: Vec<Run>,
    x: u32,
    y: u32,
    line_height: u32,
    blank_suppressed: bool,
}

impl<'m, M: MetricsProvider + ?Sized> LineBreaker<'m, M> {
    fn new(geometry: PageGeometry, metrics: &'m M) -> Self {
        Self {
            metrics,
            geometry,
            pages: Vec::new(),
            page: Page::new(1),
            runs: Vec::new(),
            x: geometry.left_margin_px,
            y: geometry.content_top(),
            line_height: 0,
            blank_suppressed: false,
        }
    }

    /// Place one text run; every `\n` in it is a forced break.
    fn push_run(&mut self, attributes: &Attributes, text: &str) {
        let mut segments = text.split('\n');
        if let Some(first) = segments.next() {
            self.place_text(attributes, first);
        }
        for segment in segments {
            self.forced_break(attributes);
            self.place_text(attributes, segment);
        }
    }

    fn forced_break(&mut self, attributes: &Attributes) {
        let at_page_top = self.page.is_empty() && self.runs.is_empty();
        if at_page_top && !self.blank_suppressed {
            self.blank_suppressed = true;
            return;
        }
        self.close_line(attributes);
    }

    fn place_text(&mut self, attributes: &Attributes, text: &str) {
        let limit = self.geometry.content_right();
        let mut buffer = String::new();

        for word in split_words(text) {
            let line_is_empty = buffer.is_empty() && self.runs.is_empty();
            let candidate = format!("{}{}", buffer, word);
            let width = self.metrics.measure(attributes, &candidate).width;

            if line_is_empty || self.x.saturating_add(width) <= limit {
                buffer = candidate;
            } else {
                self.push_fragment(attributes, &buffer);
                self.close_line(attributes);
                buffer = word.to_string();
            }
        }

        self.push_fragment(attributes, &buffer);
    }

    fn push_fragment(&mut self, attributes: &Attributes, text: &str) {
        if text.is_empty() {
            return;
        }
        let extent = self.metrics.measure(attributes, text);
        self.runs.push(Run {
            attributes: attributes.clone(),
            text: text.to_string(),
            x: self.x,
            width: extent.width,
        });
        self.x = self.x.saturating_add(extent.width);
        self.line_height = self.line_height.max(extent.height);
    }

    fn close_line(&mut self, attributes: &Attributes) {
        let font_height = self.metrics.measure(attributes, "").height;
        let height = self.line_height.max(font_height);

        self.page.lines.push(Line {
            runs: std::mem::take(&mut self.runs),
            y: self.y,
            height,
        });

        self.x = self.geometry.left_margin_px;
        self.y = self.y.saturating_add(height);
        self.line_height = 0;

        if self.y >= self.geometry.content_bottom() {
            self.break_page();
        }
    }

    fn break_page(&mut self) {
        let next = Page::new(self.page.number + 1);
        self.pages.push(std::mem::replace(&mut self.page, next));
        self.y = self.geometry.content_top();
        self.blank_suppressed = false;
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.runs.is_empty() {
            self.page.lines.push(Line {
                runs: std::mem::take(&mut self.runs),
                y: self.y,
                height: self.line_height,
            });
        }
        if !self.page.is_empty() || self.pages.is_empty() {
            self.pages.push(self.page);
        }
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ApproximateMetrics, Extent};
    use crate::model::DocumentEvent;

    /// 10px per character, 10px lines.
    struct CharMetrics;

    impl MetricsProvider for CharMetrics {
        fn measure(&self, _attributes: &Attributes, text: &str) -> Extent {
            Extent::new(text.chars().count() as u32 * 10, 10)
        }
    }

    fn paginator(width: u32, height: u32) -> Paginator {
        Paginator::default().with_geometry(PageGeometry::new(width, height))
    }

    fn texts(layout: &Layout) -> Vec<Vec<String>> {
        layout
            .pages
            .iter()
            .map(|p| p.lines.iter().map(Line::plain_text).collect())
            .collect()
    }

    #[test]
    fn test_wraps_at_word_boundary() {
        let layout = paginator(100, 1000)
            .paginate_text("aaaa bbbb cccc", &CharMetrics)
            .unwrap();
        assert_eq!(texts(&layout), vec![vec!["aaaa bbbb ", "cccc"]]);
    }

    #[test]
    fn test_runs_are_positioned() {
        let mut stream = DocumentStream::new();
        stream.push_text("ab");
        stream.push_attributes(Attributes {
            bold: true,
            ..Attributes::default()
        });
        stream.push_text("cd");

        let layout = paginator(100, 1000)
            .with_geometry(PageGeometry::new(100, 1000).with_margins(5, 7, 0, 0))
            .paginate_stream(&stream, &CharMetrics)
            .unwrap();
        let line = &layout.pages[0].lines[0];
        assert_eq!(line.y, 7);
        assert_eq!(line.runs.len(), 2);
        assert_eq!((line.runs[0].x, line.runs[0].width), (5, 20));
        assert_eq!(line.runs[1].x, 25);
        assert!(line.runs[1].attributes.bold);
    }

    #[test]
    fn test_oversized_word_stands_alone() {
        let layout = paginator(50, 1000)
            .paginate_text("ab abcdefghij cd", &CharMetrics)
            .unwrap();
        assert_eq!(texts(&layout), vec![vec!["ab ", "abcdefghij ", "cd"]]);
    }

    #[test]
    fn test_leading_blank_line_suppressed_once() {
        let mut stream = DocumentStream::new();
        stream.push_text("\n\nafter");
        let layout = paginator(1000, 1000)
            .paginate_stream(&stream, &CharMetrics)
            .unwrap();
        assert_eq!(texts(&layout), vec![vec!["", "after"]]);
    }

    #[test]
    fn test_leading_blank_line_matches_stream_mode() {
        let mut stream = DocumentStream::new();
        stream.push_text("\nfoo\n\nbar");
        let paginator = paginator(1000, 1000);

        let from_text = paginator.paginate_text("\nfoo\n\nbar", &CharMetrics).unwrap();
        let from_stream = paginator.paginate_stream(&stream, &CharMetrics).unwrap();
        assert_eq!(texts(&from_text), vec![vec!["foo", "", "bar"]]);
        assert_eq!(texts(&from_text), texts(&from_stream));
    }

    #[test]
    fn test_page_break_resets_cursor() {
        let layout = paginator(1000, 30)
            .paginate_text("1\n2\n3\n4", &CharMetrics)
            .unwrap();
        assert_eq!(texts(&layout), vec![vec!["1", "2", "3"], vec!["4"]]);
        assert_eq!(layout.pages[1].lines[0].y, 0);
        assert_eq!(layout.pages[1].number, 2);
    }

    #[test]
    fn test_trailing_empty_page_dropped() {
        let layout = paginator(1000, 20)
            .paginate_text("1\n2\n", &CharMetrics)
            .unwrap();
        assert_eq!(layout.page_count(), 1);
        assert_eq!(layout.line_count(), 2);
    }

    #[test]
    fn test_empty_input_gives_one_empty_page() {
        let layout = paginator(1000, 1000)
            .paginate_text("", &CharMetrics)
            .unwrap();
        assert_eq!(layout.page_count(), 1);
        assert!(layout.pages[0].is_empty());
    }

    #[test]
    fn test_crlf_plain_text() {
        let layout = paginator(1000, 1000)
            .paginate_text("a\r\nb\r\n", &CharMetrics)
            .unwrap();
        assert_eq!(texts(&layout), vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_title_band_is_reserved() {
        let layout = paginator(1000, 100)
            .with_title("Title")
            .with_subtitle("Sub")
            .paginate_text("x", &CharMetrics)
            .unwrap();
        assert_eq!(layout.geometry.reserved_title_height_px, 20);
        assert_eq!(layout.pages[0].lines[0].y, 20);
        assert_eq!(layout.title.as_deref(), Some("Title"));
    }

    #[test]
    fn test_title_that_fills_the_page_is_rejected() {
        let result = paginator(1000, 30)
            .with_title("Title")
            .with_subtitle("Sub")
            .paginate_text("x", &CharMetrics);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_medium_warning_is_kept() {
        let paginator = Paginator::new(PageSetup::new().with_medium("Napkin"));
        let layout = paginator
            .paginate_text("hello", &ApproximateMetrics::new())
            .unwrap();
        assert_eq!(layout.warnings.len(), 1);
        assert_eq!(layout.geometry.width_px, 612);
    }

    #[test]
    fn test_paginate_many_preserves_order() {
        let mut stream = DocumentStream::new();
        stream.events.push(DocumentEvent::TextRun("stream".into()));
        let sources = [Source::Text("first"), Source::Stream(&stream), Source::Text("")];

        let results = paginator(1000, 1000).paginate_many(&sources, &CharMetrics);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().pages[0].plain_text(), "first");
        assert_eq!(results[1].as_ref().unwrap().pages[0].plain_text(), "stream");
        assert_eq!(results[2].as_ref().unwrap().line_count(), 0);
    }
}
