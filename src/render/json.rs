//! JSON rendering for layouts and document streams.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{DocumentStream, Layout};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a layout to JSON.
pub fn to_json(layout: &Layout, format: JsonFormat) -> Result<String> {
    serialize(layout, format)
}

/// Convert a parsed document stream to JSON.
pub fn stream_to_json(stream: &DocumentStream, format: JsonFormat) -> Result<String> {
    serialize(stream, format)
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageGeometry;
    use crate::model::{Attributes, Line, Page, Rgb, Run};

    fn sample_layout() -> Layout {
        let mut page = Page::new(1);
        page.lines.push(Line {
            runs: vec![Run {
                attributes: Attributes {
                    foreground: Rgb(0xFF0000),
                    ..Attributes::default()
                },
                text: "Hello".to_string(),
                x: 72,
                width: 36,
            }],
            y: 72,
            height: 14,
        });
        Layout {
            pages: vec![page],
            geometry: PageGeometry::new(612, 792),
            title: Some("Test".to_string()),
            subtitle: None,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample_layout(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Hello"));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample_layout(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
        assert!(json.contains("\"foreground\":16711680"));
    }

    #[test]
    fn test_layout_json_round_trips() {
        let layout = sample_layout();
        let json = to_json(&layout, JsonFormat::Compact).unwrap();
        let back: Layout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout);
    }

    #[test]
    fn test_stream_to_json() {
        let stream = DocumentStream::from_text(Attributes::default(), "hi");
        let json = stream_to_json(&stream, JsonFormat::Compact).unwrap();
        assert!(json.contains("\"type\":\"attribute_change\""));
        assert!(json.contains("{\"type\":\"text_run\",\"value\":\"hi\"}"));
    }
}
