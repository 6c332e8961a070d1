//! Axis bounds and cursor-anchored zoom
//!
//! Scrolling zooms each axis about the cursor so that the data point under
//! the cursor stays under the cursor: its relative position inside the view
//! is the same before and after.

use std::fmt;
use std::str::FromStr;

use snafu::Snafu;

pub use crate::constants::ZOOM_BASE_SCALE as DEFAULT_BASE_SCALE;

/// Fraction of the data span added on each side when autoscaling
const AUTOSCALE_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Snafu)]
pub enum ZoomError {
    /// An axis range is empty, inverted or unbounded, so the cursor has no relative position
    #[snafu(display("{axis} axis range must be finite with min < max"))]
    DegenerateViewport { axis: Axis },

    #[snafu(display("zoom base scale must be finite and positive, got {value}"))]
    InvalidScale { value: f64 },

    #[snafu(display("zoom cursor must be finite, got ({x}, {y})"))]
    InvalidCursor { x: f64, y: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ParseZoomDirectionError {
    #[snafu(display("unknown zoom direction \"{value}\" (expected in or out)"))]
    UnknownDirection { value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Visible range along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Finite ends with `min < max`
    pub fn is_proper(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Position of `value` inside the range, 0 at `min` and 1 at `max`
    pub fn relative(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }

    /// Scale the range by `factor` about `anchor`, keeping the anchor's relative position
    fn scaled_about(&self, anchor: f64, factor: f64) -> Self {
        let rel = self.relative(anchor);
        let range = self.span() * factor;
        Self {
            min: anchor - range * rel,
            max: anchor + range * (1.0 - rel),
        }
    }

    /// Smallest range holding `values`, widened by the autoscale margin
    fn fit(values: &[f64]) -> Option<Self> {
        let (lo, hi) = values
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if lo > hi {
            return None;
        }

        let span = hi - lo;
        if span == 0.0 {
            let pad = if lo == 0.0 { 1.0 } else { lo.abs() * AUTOSCALE_MARGIN };
            return Some(Self::new(lo - pad, hi + pad));
        }
        Some(Self::new(lo - span * AUTOSCALE_MARGIN, hi + span * AUTOSCALE_MARGIN))
    }
}

/// Visible x and y ranges of one plot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBounds {
    pub x: AxisRange,
    pub y: AxisRange,
}

impl ViewportBounds {
    pub const fn new(x: (f64, f64), y: (f64, f64)) -> Self {
        Self {
            x: AxisRange::new(x.0, x.1),
            y: AxisRange::new(y.0, y.1),
        }
    }

    /// Fit the y data with margins; x is given by the caller
    ///
    /// Returns `None` when `ys` holds no finite value.
    pub fn autoscale(x: AxisRange, ys: &[f64]) -> Option<Self> {
        Some(Self { x, y: AxisRange::fit(ys)? })
    }

    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        self.x.contains(x) && self.y.contains(y)
    }

    pub fn relative_position(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (self.x.relative(x), self.y.relative(y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Factor applied to each axis range for one scroll tick
    pub fn scale_factor(self, base_scale: f64) -> f64 {
        match self {
            ZoomDirection::In => 1.0 / base_scale,
            ZoomDirection::Out => base_scale,
        }
    }
}

impl FromStr for ZoomDirection {
    type Err = ParseZoomDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" | "up" => Ok(ZoomDirection::In),
            "out" | "down" => Ok(ZoomDirection::Out),
            other => Err(ParseZoomDirectionError::UnknownDirection { value: other.to_string() }),
        }
    }
}

/// One scroll tick at a cursor position in data coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomEvent {
    pub cursor: (f64, f64),
    pub direction: ZoomDirection,
}

/// Zoom `bounds` about `cursor` by one tick of `base_scale`
///
/// Each axis range is multiplied by `1/base_scale` (in) or `base_scale`
/// (out). Depth is not limited here. The cursor may lie outside `bounds`
/// but must be finite.
pub fn zoom(
    bounds: &ViewportBounds,
    cursor: (f64, f64),
    direction: ZoomDirection,
    base_scale: f64,
) -> Result<ViewportBounds, ZoomError> {
    if !base_scale.is_finite() || base_scale <= 0.0 {
        return Err(ZoomError::InvalidScale { value: base_scale });
    }
    if !bounds.x.is_proper() {
        return Err(ZoomError::DegenerateViewport { axis: Axis::X });
    }
    if !bounds.y.is_proper() {
        return Err(ZoomError::DegenerateViewport { axis: Axis::Y });
    }
    let (x, y) = cursor;
    if !x.is_finite() || !y.is_finite() {
        return Err(ZoomError::InvalidCursor { x, y });
    }

    let factor = direction.scale_factor(base_scale);

    Ok(ViewportBounds {
        x: bounds.x.scaled_about(cursor.0, factor),
        y: bounds.y.scaled_about(cursor.1, factor),
    })
}
