//! Pagination of document streams and plain text.
//!
//! The engine never draws anything. Text is measured through a
//! [`MetricsProvider`] and the result is a [`Layout`](crate::model::Layout)
//! of positioned runs for an external renderer.

mod engine;
mod geometry;
mod metrics;
mod words;

pub use engine::{Paginator, Source};
pub use geometry::{
    ErrorMode, Margins, Orientation, PageGeometry, PageSetup, PaperSize, DEFAULT_DPI,
    DEFAULT_MEDIUM,
};
pub use metrics::{ApproximateMetrics, Extent, MetricsProvider};
pub use words::split_words;
