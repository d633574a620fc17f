use serde::{Deserialize, Serialize};
use std::fmt;

/// A pixel coordinate on a scanned page. Origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (i32, i32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned rectangle in pixel space.
///
/// Edges are kept in `i64` so boxes built from any pair of `i32` engine
/// coordinates and sizes (and unions of them) never overflow. Width and height
/// are not checked: a negative size describes an inverted box and every
/// derived value follows from plain arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

impl BoundingBox {
    pub fn new(left: i64, top: i64, width: i64, height: i64) -> Self {
        Self { left, top, width, height }
    }

    /// Box anchored at an `i32` start point with `i32` size, as engines report it.
    pub fn from_start(start: Point, width: i32, height: i32) -> Self {
        Self::new(
            i64::from(start.x),
            i64::from(start.y),
            i64::from(width),
            i64::from(height),
        )
    }

    /// Build a box spanning `start` (top-left) to `end` (bottom-right).
    pub fn from_corners(start: (i64, i64), end: (i64, i64)) -> Self {
        Self {
            left: start.0,
            top: start.1,
            width: end.0 - start.0,
            height: end.1 - start.1,
        }
    }

    pub fn right(&self) -> i64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i64 {
        self.top + self.height
    }

    pub fn start(&self) -> (i64, i64) {
        (self.left, self.top)
    }

    pub fn end(&self) -> (i64, i64) {
        (self.right(), self.bottom())
    }

    /// Signed area; inverted boxes yield a negative or zero value.
    pub fn area(&self) -> i64 {
        self.width * self.height
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let start = (self.left.min(other.left), self.top.min(other.top));
        let end = (
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        );
        Self::from_corners(start, end)
    }
}
