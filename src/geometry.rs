//! Geometry primitives for scene layout.
//!
//! Everything here is a pure function of its inputs. Layers compute their
//! outlines through these helpers and hand the resulting points to the
//! [`Canvas`](crate::Canvas).

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// A point in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the Euclidean distance to another point.
    pub fn distance(&self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns this point shifted by `(dx, dy)`.
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A rectangle defined in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// X offset from the left edge of the canvas
    pub x: f32,
    /// Y offset from the top edge of the canvas
    pub y: f32,
    /// Width of the rectangle
    pub width: f32,
    /// Height of the rectangle
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle with the given position and dimensions.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle starting at origin (0, 0) with the given dimensions.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    /// Creates a rectangle from its left, top, right and bottom edges.
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns true if both dimensions are positive and finite.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A straight line segment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// A corner of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

// ============================================================================
// Hexagons
// ============================================================================

/// Normalizes an angle in degrees to the `[0, 360)` range.
pub fn normalize_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Computes the six vertices of a regular hexagon.
///
/// Vertex `i` lies at `rotation + i * 60` degrees from `center`, measured
/// clockwise in screen space (y grows downward), at distance `radius`.
///
/// Returns [`RenderError::InvalidGeometry`] if `radius` is not a positive
/// finite number.
pub fn hex_vertices(center: Point, radius: f32, rotation: f32) -> RenderResult<[Point; 6]> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(RenderError::InvalidGeometry(format!(
            "hexagon radius must be positive, got {radius}"
        )));
    }

    let rotation = normalize_degrees(rotation);
    Ok(std::array::from_fn(|i| {
        let angle = (rotation + i as f32 * 60.0).to_radians();
        Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    }))
}

/// A hexagon with its drawing style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexSpec {
    pub center: Point,
    pub radius: f32,
    /// Rotation in degrees, always within `[0, 360)`.
    pub rotation: f32,
    pub fill: Option<crate::Color>,
    pub outline: Option<crate::Color>,
    pub outline_width: f32,
}

impl HexSpec {
    /// Creates an unstyled hexagon. The rotation is normalized to 0-360.
    pub fn new(center: Point, radius: f32, rotation: f32) -> Self {
        Self {
            center,
            radius,
            rotation: normalize_degrees(rotation),
            fill: None,
            outline: None,
            outline_width: 1.0,
        }
    }

    pub fn with_fill(mut self, color: crate::Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_outline(mut self, color: crate::Color, width: f32) -> Self {
        self.outline = Some(color);
        self.outline_width = width;
        self
    }

    pub fn vertices(&self) -> RenderResult<[Point; 6]> {
        hex_vertices(self.center, self.radius, self.rotation)
    }
}

// ============================================================================
// Cut-corner panels
// ============================================================================

/// Clamps a requested cut-corner length to `[0, min(w, h) / 2]`.
pub fn clamp_corner(rect: &Rect, corner: f32) -> f32 {
    let max = (rect.width.min(rect.height) / 2.0).max(0.0);
    if corner.is_nan() {
        return 0.0;
    }
    corner.clamp(0.0, max)
}

/// Computes the octagon formed by clipping each corner of `rect` by `corner`
/// pixels along both edges.
///
/// Points run clockwise starting at the left end of the top edge. Oversized
/// corner lengths are clamped so the outline never self-intersects.
pub fn cut_corner_polygon(rect: &Rect, corner: f32) -> [Point; 8] {
    let c = clamp_corner(rect, corner);
    let (x, y, r, b) = (rect.x, rect.y, rect.right(), rect.bottom());
    [
        Point::new(x + c, y),
        Point::new(r - c, y),
        Point::new(r, y + c),
        Point::new(r, b - c),
        Point::new(r - c, b),
        Point::new(x + c, b),
        Point::new(x, b - c),
        Point::new(x, y + c),
    ]
}

// ============================================================================
// Grids
// ============================================================================

/// Smallest grid step, scanline spacing or hex cell radius, in pixels.
///
/// Finer pitches would produce more primitives than a canvas has pixels.
pub const MIN_PITCH: f32 = 1.0;

/// Lazily yields hexagon centers tiling `bounds` in a staggered column layout.
///
/// Columns are `1.5 * r` apart and rows `sqrt(3) * r` apart. Odd columns are
/// shifted down by half a row, which is what makes neighbouring hexagons
/// interlock. One extra row and column of margin is produced on every side so
/// tiles at the edges are not clipped. A radius below [`MIN_PITCH`] yields
/// nothing.
pub fn hex_grid_offsets(bounds: Rect, cell_radius: f32) -> impl Iterator<Item = Point> {
    let valid = cell_radius.is_finite() && cell_radius >= MIN_PITCH && bounds.is_valid();
    let col_step = cell_radius * 1.5;
    let row_step = cell_radius * 3f32.sqrt();

    let (cols, rows) = if valid {
        (
            (bounds.width / col_step).ceil() as i32 + 1,
            (bounds.height / row_step).ceil() as i32 + 1,
        )
    } else {
        (-2, -2)
    };

    (-1..=rows).flat_map(move |row| {
        (-1..=cols).map(move |col| {
            let mut y = bounds.y + row as f32 * row_step;
            if col.rem_euclid(2) == 1 {
                y += row_step / 2.0;
            }
            Point::new(bounds.x + col as f32 * col_step, y)
        })
    })
}

/// Computes the lines of a rectangular grid spaced `step` apart.
///
/// Returns `(vertical, horizontal)` segments. Lines start on the bounds'
/// top-left edge and stop at or before the right/bottom edge; each spans the
/// full extent of the opposite axis. A step below [`MIN_PITCH`] yields no
/// lines.
pub fn rect_grid_lines(bounds: Rect, step: f32) -> (Vec<Segment>, Vec<Segment>) {
    if !step.is_finite() || step < MIN_PITCH || !bounds.is_valid() {
        return (Vec::new(), Vec::new());
    }

    let stops = |start: f32, end: f32| {
        (0..)
            .map(move |k| start + k as f32 * step)
            .take_while(move |v| *v < end)
    };

    let vertical = stops(bounds.x, bounds.right())
        .map(|x| Segment::new(Point::new(x, bounds.y), Point::new(x, bounds.bottom())))
        .collect();
    let horizontal = stops(bounds.y, bounds.bottom())
        .map(|y| Segment::new(Point::new(bounds.x, y), Point::new(bounds.right(), y)))
        .collect();

    (vertical, horizontal)
}

/// Computes the two arms of an L-shaped bracket in one corner of `bounds`.
///
/// The bracket's elbow sits `margin` pixels in from both edges of the corner
/// and each arm extends `length` pixels toward the inside of `bounds`.
pub fn corner_bracket(corner: Corner, bounds: Rect, margin: f32, length: f32) -> [Segment; 2] {
    let (ex, dx) = match corner {
        Corner::TopLeft | Corner::BottomLeft => (bounds.x + margin, length),
        Corner::TopRight | Corner::BottomRight => (bounds.right() - margin, -length),
    };
    let (ey, dy) = match corner {
        Corner::TopLeft | Corner::TopRight => (bounds.y + margin, length),
        Corner::BottomLeft | Corner::BottomRight => (bounds.bottom() - margin, -length),
    };
    let elbow = Point::new(ex, ey);
    [
        Segment::new(elbow, elbow.offset(dx, 0.0)),
        Segment::new(elbow, elbow.offset(0.0, dy)),
    ]
}
