//! Points in the plane and the geometric predicates everything is built on.
//!
//! The orientation and in-circle predicates use adaptive precision
//! arithmetic (via the `robust` crate), so their signs are always exact. The
//! triangulation relies on this: with rounded predicates, nearly degenerate
//! input leads to inconsistent decisions and broken topology.

use std::cmp::Ordering;

use cgmath::{MetricSpace, Point2};


/// The point type used throughout this library.
pub type Point = Point2<f64>;


/// Types that can be interpreted to represent some kind of 2D position.
///
/// This type is implemented for `cgmath::Point2<f64>` as well as for the
/// "weaker" types `(f64, f64)` and `[f64; 2]`.
pub trait Pos2Like: Copy {
    /// Returns the `x` component of this position.
    fn x(&self) -> f64;

    /// Returns the `y` component of this position.
    fn y(&self) -> f64;

    fn to_point(self) -> Point {
        Point::new(self.x(), self.y())
    }
}

impl Pos2Like for Point {
    fn x(&self) -> f64 { self.x }
    fn y(&self) -> f64 { self.y }
}

impl Pos2Like for (f64, f64) {
    fn x(&self) -> f64 { self.0 }
    fn y(&self) -> f64 { self.1 }
}

impl Pos2Like for [f64; 2] {
    fn x(&self) -> f64 { self[0] }
    fn y(&self) -> f64 { self[1] }
}


/// The orientation of three points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The points make a left turn.
    CounterClockwise,
    /// The points make a right turn.
    Clockwise,
    Collinear,
}

#[inline]
fn coord(p: Point) -> robust::Coord<f64> {
    robust::Coord { x: p.x, y: p.y }
}

/// Twice the signed area of the triangle `abc` (up to rounding of the
/// magnitude). Positive if `abc` is counter-clockwise. The sign is exact.
#[inline]
pub fn orient2d(a: Point, b: Point, c: Point) -> f64 {
    robust::orient2d(coord(a), coord(b), coord(c))
}

pub fn orientation(a: Point, b: Point, c: Point) -> Orientation {
    let det = orient2d(a, b, c);
    if det > 0.0 {
        Orientation::CounterClockwise
    } else if det < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Returns a positive value if `d` lies strictly inside the circle through
/// the counter-clockwise triangle `abc`, a negative one if it's strictly
/// outside and zero if the four points are cocircular. The sign is exact.
#[inline]
pub fn incircle(a: Point, b: Point, c: Point, d: Point) -> f64 {
    robust::incircle(coord(a), coord(b), coord(c), coord(d))
}

/// The center of the circle through `a`, `b` and `c`. The points must not be
/// collinear.
pub fn circumcenter(a: Point, b: Point, c: Point) -> Point {
    let bx = b.x - a.x;
    let by = b.y - a.y;
    let cx = c.x - a.x;
    let cy = c.y - a.y;

    let d = 2.0 * (bx * cy - by * cx);
    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;

    Point::new(
        a.x + (cy * b2 - by * c2) / d,
        a.y + (bx * c2 - cx * b2) / d,
    )
}

/// Returns `true` if `p` lies on the open segment between `a` and `b`. The
/// three points are assumed to be collinear. Only compares coordinates, so
/// the result is exact.
pub fn strictly_between(a: Point, b: Point, p: Point) -> bool {
    let (lo, hi) = match lex_cmp(a, b) {
        Ordering::Greater => (b, a),
        _ => (a, b),
    };
    lex_cmp(lo, p) == Ordering::Less && lex_cmp(p, hi) == Ordering::Less
}

#[inline]
pub fn distance2(a: Point, b: Point) -> f64 {
    a.distance2(b)
}

/// Lexicographic order of points: by `x` first, then by `y`. Only defined for
/// finite coordinates.
pub fn lex_cmp(a: Point, b: Point) -> Ordering {
    let by_x = a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal);
    by_x.then_with(|| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
}
