//! Document model types.
//!
//! The attribute model is shared by both halves of the crate: the parser
//! emits [`DocumentStream`]s of attribute changes and text, and the
//! paginator turns them into [`Layout`]s of pages, lines and runs.

mod attributes;
mod page;
mod stream;

pub use attributes::{
    Attributes, ColorComponent, ColorEntry, ColorTable, FontTable, Rgb, DEFAULT_FONT_FACE,
    DEFAULT_FONT_SIZE_HALF_POINTS,
};
pub use page::{Layout, Line, Page, Run};
pub use stream::{DocumentEvent, DocumentStream};
