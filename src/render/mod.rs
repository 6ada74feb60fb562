//! Rendering module for writing layouts and document streams out.

mod json;
mod options;
mod text;

pub use json::{stream_to_json, to_json, JsonFormat};
pub use options::{PageSelection, TextOptions, FORM_FEED};
pub use text::to_text;
