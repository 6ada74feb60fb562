//! Page geometry: paper sizes, margins and the resolved pixel geometry a
//! pagination pass runs against.

use serde::{Deserialize, Serialize};

use super::metrics::{Extent, MetricsProvider};
use crate::error::{Error, Result};

/// Device resolution assumed for paper sizes and margins (1px = 1pt).
pub const DEFAULT_DPI: u32 = 72;

/// Medium substituted when the requested one is unknown.
pub const DEFAULT_MEDIUM: &str = "Letter";

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Physical paper sizes known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSize {
    Letter,
    Legal,
    Executive,
    Statement,
    Tabloid,
    Ledger,
    A3,
    A4,
    A5,
    B5,
}

impl PaperSize {
    /// All known sizes, in table order.
    pub const ALL: [PaperSize; 10] = [
        PaperSize::Letter,
        PaperSize::Legal,
        PaperSize::Executive,
        PaperSize::Statement,
        PaperSize::Tabloid,
        PaperSize::Ledger,
        PaperSize::A3,
        PaperSize::A4,
        PaperSize::A5,
        PaperSize::B5,
    ];

    /// Look a size up by name, ignoring case.
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|size| size.name().eq_ignore_ascii_case(id))
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::Letter => "Letter",
            PaperSize::Legal => "Legal",
            PaperSize::Executive => "Executive",
            PaperSize::Statement => "Statement",
            PaperSize::Tabloid => "Tabloid",
            PaperSize::Ledger => "Ledger",
            PaperSize::A3 => "A3",
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
            PaperSize::B5 => "B5",
        }
    }

    /// Portrait size in points.
    pub fn points(self) -> (u32, u32) {
        match self {
            PaperSize::Letter => (612, 792), // 8.5 x 11 in
            PaperSize::Legal => (612, 1008),
            PaperSize::Executive => (522, 756),
            PaperSize::Statement => (396, 612),
            PaperSize::Tabloid => (792, 1224),
            PaperSize::Ledger => (1224, 792),
            PaperSize::A3 => (842, 1191),
            PaperSize::A4 => (595, 842), // 210 x 297 mm
            PaperSize::A5 => (420, 595),
            PaperSize::B5 => (499, 709),
        }
    }

    /// Size in device pixels for an orientation and resolution.
    ///
    /// Landscape swaps the sides of the portrait size, so Ledger (which is
    /// defined wide) becomes tall.
    pub fn dimensions_px(self, orientation: Orientation, dpi: u32) -> Extent {
        let (width, height) = self.points();
        let (width, height) = match orientation {
            Orientation::Portrait => (width, height),
            Orientation::Landscape => (height, width),
        };
        Extent {
            width: scale(width, dpi),
            height: scale(height, dpi),
        }
    }
}

fn scale(points: u32, dpi: u32) -> u32 {
    ((points as u64 * dpi as u64 + (DEFAULT_DPI as u64 / 2)) / DEFAULT_DPI as u64) as u32
}

/// Resolved geometry of one page, in device pixels.
///
/// The title band is reserved at the top of the content area and an equal
/// band is kept free at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_px: u32,
    pub height_px: u32,
    pub left_margin_px: u32,
    pub top_margin_px: u32,
    pub bottom_margin_px: u32,
    pub right_margin_px: u32,
    pub reserved_title_height_px: u32,
}

impl PageGeometry {
    /// Geometry with no margins and no title band.
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px,
            height_px,
            ..Self::default()
        }
    }

    /// Set all four margins.
    pub fn with_margins(mut self, left: u32, top: u32, right: u32, bottom: u32) -> Self {
        self.left_margin_px = left;
        self.top_margin_px = top;
        self.right_margin_px = right;
        self.bottom_margin_px = bottom;
        self
    }

    pub fn with_reserved_title_height(mut self, height: u32) -> Self {
        self.reserved_title_height_px = height;
        self
    }

    /// Rightmost x a run may reach.
    pub fn content_right(&self) -> u32 {
        self.width_px.saturating_sub(self.right_margin_px)
    }

    /// First y below the title band.
    pub fn content_top(&self) -> u32 {
        self.top_margin_px + self.reserved_title_height_px
    }

    /// A page is full once the cursor reaches this y.
    pub fn content_bottom(&self) -> u32 {
        self.height_px
            .saturating_sub(self.bottom_margin_px)
            .saturating_sub(self.reserved_title_height_px)
    }

    pub fn content_width(&self) -> u32 {
        self.content_right().saturating_sub(self.left_margin_px)
    }

    pub fn content_height(&self) -> u32 {
        self.content_bottom().saturating_sub(self.content_top())
    }

    /// Check that the geometry leaves room for content.
    pub fn validate(&self) -> Result<()> {
        if self.width_px == 0 || self.height_px == 0 {
            return Err(Error::InvalidGeometry(format!(
                "page size {}x{} px",
                self.width_px, self.height_px
            )));
        }
        if self.content_width() == 0 {
            return Err(Error::InvalidGeometry(format!(
                "margins {}+{} px leave no width on a {} px page",
                self.left_margin_px, self.right_margin_px, self.width_px
            )));
        }
        if self.content_height() == 0 {
            return Err(Error::InvalidGeometry(format!(
                "margins {}+{} px and title band {} px leave no height on a {} px page",
                self.top_margin_px,
                self.bottom_margin_px,
                self.reserved_title_height_px,
                self.height_px
            )));
        }
        Ok(())
    }
}

/// Page margins in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margins {
    /// The same margin on every side.
    pub fn uniform(inches: f32) -> Self {
        Self {
            left: inches,
            top: inches,
            right: inches,
            bottom: inches,
        }
    }

    pub fn none() -> Self {
        Self::uniform(0.0)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// Error handling mode when resolving the page setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on an unknown medium
    Strict,
    /// Substitute the default medium and record a warning
    #[default]
    Lenient,
}

/// Caller-facing page configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSetup {
    /// Paper size name, e.g. "Letter" or "A4"
    pub medium: String,

    /// Page orientation
    pub orientation: Orientation,

    /// Margins in inches
    pub margins: Margins,

    /// Output resolution
    pub dpi: u32,

    /// What to do about an unknown medium
    pub error_mode: ErrorMode,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            medium: DEFAULT_MEDIUM.to_string(),
            orientation: Orientation::Portrait,
            margins: Margins::default(),
            dpi: DEFAULT_DPI,
            error_mode: ErrorMode::Lenient,
        }
    }
}

impl PageSetup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_medium(mut self, medium: impl Into<String>) -> Self {
        self.medium = medium.into();
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn landscape(self) -> Self {
        self.with_orientation(Orientation::Landscape)
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the output resolution. Zero is ignored.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        if dpi > 0 {
            self.dpi = dpi;
        }
        self
    }

    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail on an unknown medium instead of substituting Letter.
    pub fn strict(self) -> Self {
        self.with_error_mode(ErrorMode::Strict)
    }

    pub fn lenient(self) -> Self {
        self.with_error_mode(ErrorMode::Lenient)
    }

    /// Resolve the setup to pixel geometry.
    ///
    /// Returns the geometry and, when a fallback medium was substituted,
    /// the warning describing it.
    pub fn geometry<M>(&self, metrics: &M) -> Result<(PageGeometry, Option<String>)>
    where
        M: MetricsProvider + ?Sized,
    {
        let (size, warning) = match metrics.resolve_medium_size(&self.medium, self.orientation) {
            Ok(size) => (size, None),
            Err(Error::UnknownMedium(medium)) if self.error_mode == ErrorMode::Lenient => {
                let warning = format!(
                    "unknown output medium \"{}\", using {}",
                    medium, DEFAULT_MEDIUM
                );
                log::warn!("{}", warning);
                let size = PaperSize::Letter.dimensions_px(self.orientation, DEFAULT_DPI);
                (size, Some(warning))
            }
            Err(e) => return Err(e),
        };

        // Medium sizes come back at the default resolution
        let inches = |value: f32| (value.max(0.0) * self.dpi as f32).round() as u32;
        let geometry = PageGeometry {
            width_px: rescale(size.width, self.dpi),
            height_px: rescale(size.height, self.dpi),
            left_margin_px: inches(self.margins.left),
            top_margin_px: inches(self.margins.top),
            right_margin_px: inches(self.margins.right),
            bottom_margin_px: inches(self.margins.bottom),
            reserved_title_height_px: 0,
        };
        geometry.validate()?;

        Ok((geometry, warning))
    }
}

fn rescale(px_at_default: u32, dpi: u32) -> u32 {
    if dpi == DEFAULT_DPI {
        px_at_default
    } else {
        scale(px_at_default, dpi)
    }
}
