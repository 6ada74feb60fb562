//! Text measurement.

use serde::{Deserialize, Serialize};

use super::geometry::{Orientation, PaperSize, DEFAULT_DPI};
use crate::error::{Error, Result};
use crate::model::Attributes;

/// A width and height in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Measures text for the pagination engine.
///
/// Implementations must be read-only: the same provider may be shared by
/// concurrent pagination passes.
pub trait MetricsProvider {
    /// Size of `text` drawn in `attributes`.
    ///
    /// Measuring the empty string gives the line height of the font.
    fn measure(&self, attributes: &Attributes, text: &str) -> Extent;

    /// Page size of a named medium at [`DEFAULT_DPI`].
    fn resolve_medium_size(&self, medium: &str, orientation: Orientation) -> Result<Extent> {
        PaperSize::from_id(medium)
            .map(|size| size.dimensions_px(orientation, DEFAULT_DPI))
            .ok_or_else(|| Error::UnknownMedium(medium.to_string()))
    }
}

impl<T: MetricsProvider + ?Sized> MetricsProvider for &T {
    fn measure(&self, attributes: &Attributes, text: &str) -> Extent {
        (**self).measure(attributes, text)
    }

    fn resolve_medium_size(&self, medium: &str, orientation: Orientation) -> Result<Extent> {
        (**self).resolve_medium_size(medium, orientation)
    }
}

/// Estimates text size from character counts.
///
/// Good enough for monospaced transcript fonts and for previews; a real
/// renderer supplies its own provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproximateMetrics {
    dpi: u32,
}

/// Average advance as a fraction of the em.
const ADVANCE_EM: f32 = 0.6;
const BOLD_ADVANCE_EM: f32 = 0.65;
const LINE_HEIGHT_EM: f32 = 1.2;
const TAB_WIDTH: usize = 4;

impl ApproximateMetrics {
    pub fn new() -> Self {
        Self { dpi: DEFAULT_DPI }
    }

    /// Measure for a different output resolution.
    pub fn with_dpi(dpi: u32) -> Self {
        Self { dpi: dpi.max(1) }
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    fn em_px(&self, attributes: &Attributes) -> f32 {
        attributes.point_size() * self.dpi as f32 / DEFAULT_DPI as f32
    }
}

impl Default for ApproximateMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsProvider for ApproximateMetrics {
    fn measure(&self, attributes: &Attributes, text: &str) -> Extent {
        let em = self.em_px(attributes);
        let advance = if attributes.bold {
            BOLD_ADVANCE_EM
        } else {
            ADVANCE_EM
        };
        let cells: usize = text
            .chars()
            .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
            .sum();

        Extent {
            width: (cells as f32 * advance * em).round() as u32,
            height: (LINE_HEIGHT_EM * em).round() as u32,
        }
    }
}
