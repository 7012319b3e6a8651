//! Stamp scaling and placement geometry.
//!
//! All coordinates are PDF points with the origin at the bottom-left corner
//! of the page and Y increasing upward.

/// Default stamp height in points.
pub const DEFAULT_SIZE: u32 = 160;

/// Right margin of the default bottom-right placement.
const DEFAULT_MARGIN_RIGHT: f64 = 50.0;
/// Bottom offset of the default bottom-right placement.
const DEFAULT_BOTTOM: f64 = 80.0;
/// Right margin of the signature-box preset.
const RIGHT_BOX_MARGIN_RIGHT: f64 = 35.0;
/// Bottom offset of the signature-box preset.
const RIGHT_BOX_BOTTOM: f64 = 500.0;

/// Where the stamp's bottom-left corner goes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Placement {
    /// Signature-box preset: `(page_width - stamp_width - 35, 500)`.
    RightBox,
    /// Caller-supplied bottom-left corner.
    Explicit {
        /// Points from the left edge.
        x: f64,
        /// Points from the bottom edge.
        y: f64,
    },
    /// Bottom-right corner: `(page_width - stamp_width - 50, 80)`.
    #[default]
    Default,
}

impl Placement {
    /// Resolve command-line style flags into a single placement.
    ///
    /// The signature-box preset wins over coordinates; coordinates are only
    /// used when both are present.
    #[must_use]
    pub fn from_flags(right_box: bool, x: Option<i32>, y: Option<i32>) -> Self {
        match (right_box, x, y) {
            (true, _, _) => Self::RightBox,
            (false, Some(x), Some(y)) => Self::Explicit {
                x: f64::from(x),
                y: f64::from(y),
            },
            _ => Self::Default,
        }
    }

    /// Bottom-left anchor of a stamp `stamp_width` points wide on a page
    /// `page_width` points wide.
    #[must_use]
    pub fn anchor(self, page_width: f64, stamp_width: f64) -> (f64, f64) {
        match self {
            Self::RightBox => (
                page_width - stamp_width - RIGHT_BOX_MARGIN_RIGHT,
                RIGHT_BOX_BOTTOM,
            ),
            Self::Explicit { x, y } => (x, y),
            Self::Default => (page_width - stamp_width - DEFAULT_MARGIN_RIGHT, DEFAULT_BOTTOM),
        }
    }
}

/// Destination rectangle on a page, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Right edge.
    pub right: f64,
    /// Top edge.
    pub top: f64,
}

impl Rect {
    /// Rectangle width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Rectangle height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }
}

/// Scale a `width` x `height` stamp to `size` points tall, keeping its
/// aspect ratio.
///
/// The width is truncated to whole points and never drops below 1.
/// `height` comes from a decoded image and is never zero.
#[must_use]
pub fn scaled_dimensions(size: u32, width: u32, height: u32) -> (u32, u32) {
    let scaled_width = u64::from(size) * u64::from(width) / u64::from(height.max(1));
    let scaled_width = u32::try_from(scaled_width).unwrap_or(u32::MAX);
    (scaled_width.max(1), size)
}

/// Compute the destination rectangle of a `stamp_width` x `stamp_height`
/// stamp on a page `page_width` points wide.
///
/// No clamping is done: a large stamp or off-page coordinates simply produce
/// a rectangle that extends past the page.
#[must_use]
pub fn placement_rect(
    page_width: f64,
    stamp_width: u32,
    stamp_height: u32,
    placement: Placement,
) -> Rect {
    let w = f64::from(stamp_width);
    let h = f64::from(stamp_height);
    let (x, y) = placement.anchor(page_width, w);
    Rect {
        left: x,
        bottom: y,
        right: x + w,
        top: y + h,
    }
}
