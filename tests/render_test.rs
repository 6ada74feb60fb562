//! Integration tests for text and JSON output.

use rtfprint::layout::{Extent, MetricsProvider, PageGeometry, Paginator};
use rtfprint::render::{self, JsonFormat, PageSelection, TextOptions, FORM_FEED};
use rtfprint::{parse_file, parse_str, ApproximateMetrics, Attributes, Layout, Printout};
use std::io::Write;

/// 10px per character, 10px lines.
struct CharMetrics;

impl MetricsProvider for CharMetrics {
    fn measure(&self, _attributes: &Attributes, text: &str) -> Extent {
        Extent::new(text.chars().count() as u32 * 10, 10)
    }
}

/// Two lines per page below a 20px title band.
fn three_pages() -> Layout {
    Paginator::default()
        .with_title("Interview 7")
        .with_subtitle("Transcript")
        .with_geometry(PageGeometry::new(200, 60))
        .paginate_text("a\nb\nc\nd\ne", &CharMetrics)
        .unwrap()
}

#[test]
fn test_text_output_separates_pages() {
    let layout = three_pages();
    assert_eq!(layout.page_count(), 3);

    let text = render::to_text(&layout, &TextOptions::default()).unwrap();
    let pages: Vec<&str> = text.split(FORM_FEED).collect();
    assert_eq!(pages, vec!["a\nb", "c\nd", "e"]);
}

#[test]
fn test_text_output_with_headers() {
    let layout = three_pages();
    let options = TextOptions::new()
        .with_headers(true)
        .with_pages(PageSelection::Range(3..=3));
    let text = render::to_text(&layout, &options).unwrap();
    assert_eq!(text, "Interview 7\tPage 3 of 3\nTranscript\n\ne");
}

#[test]
fn test_layout_json() {
    let layout = three_pages();
    let json = render::to_json(&layout, JsonFormat::Compact).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["pages"].as_array().unwrap().len(), 3);
    assert_eq!(value["title"], "Interview 7");
    assert_eq!(value["geometry"]["reserved_title_height_px"], 20);
    assert_eq!(value["pages"][0]["lines"][0]["runs"][0]["text"], "a");
    assert_eq!(value["pages"][0]["lines"][0]["runs"][0]["attributes"]["font_face"], "Courier New");
}

#[test]
fn test_stream_json() {
    let stream = parse_str(r"{\rtf1{\colortbl;\red0\green128\blue0;}\cf1 go}").unwrap();
    let json = render::stream_to_json(&stream, JsonFormat::Pretty).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let events = value["events"].as_array().unwrap();
    let text = events
        .iter()
        .find(|e| e["type"] == "text_run")
        .unwrap();
    assert_eq!(text["value"], "go");
    assert!(events
        .iter()
        .any(|e| e["type"] == "attribute_change" && e["value"]["foreground"] == 0x008000));
}

#[test]
fn test_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r"{{\rtf1\ansi {{\b Interviewer:}} Tell me about the harbour.\par {{\b Respondent:}} It was busy.}}"
    )
    .unwrap();

    let stream = parse_file(file.path()).unwrap();
    assert!(stream.plain_text().starts_with("Interviewer: Tell me"));

    let layout = Printout::new()
        .with_title("Harbour")
        .paginate_file(file.path(), &ApproximateMetrics::new())
        .unwrap();
    let text = render::to_text(&layout, &TextOptions::default()).unwrap();
    assert_eq!(
        text,
        "Interviewer: Tell me about the harbour.\nRespondent: It was busy."
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let result = parse_file("/nonexistent/transcript.rtf");
    assert!(matches!(result, Err(rtfprint::Error::Io(_))));
}
