//! Plain text rendering of a layout.

use crate::error::Result;
use crate::model::{Layout, Page};

use super::TextOptions;

/// Render a layout as text, one row per line.
pub fn to_text(layout: &Layout, options: &TextOptions) -> Result<String> {
    let pages: Vec<String> = layout
        .pages
        .iter()
        .filter(|page| options.page_selection.includes(page.number))
        .map(|page| render_page(layout, page, options))
        .collect();

    Ok(pages.join(&options.page_separator))
}

fn render_page(layout: &Layout, page: &Page, options: &TextOptions) -> String {
    let mut rows = Vec::with_capacity(page.lines.len() + 3);

    if options.page_headers {
        let title = layout.title.as_deref().unwrap_or_default();
        rows.push(format!("{}\tPage {} of {}", title, page.number, layout.page_count()));
        if let Some(subtitle) = layout.subtitle.as_deref() {
            rows.push(subtitle.to_string());
        }
        rows.push(String::new());
    }

    for line in &page.lines {
        let text = line.plain_text();
        rows.push(if options.trim_lines {
            text.trim_end().to_string()
        } else {
            text
        });
    }

    rows.join("\n")
}
