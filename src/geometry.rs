//! ## Geometry Primitives
//!
//! This module provides the 2D point type and axis-aligned rectangle algebra
//! the R+-tree is built on. Rectangles are defined by their lower-left and
//! upper-right corners, matching the bulk-loading algorithm's own vocabulary
//! (`min_side` / `max_side` / `Intersects(axis, offset)`) rather than the
//! `x, y, width, height` form used elsewhere in this crate family.

/// One of the two axes a `Rectangle` is defined over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X = 0,
    Y = 1,
}

/// A 2D point carrying an optional caller-supplied payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Point2D<T> {
    pub x: f64,
    pub y: f64,
    pub data: Option<T>,
}

impl<T> Point2D<T> {
    pub fn new(x: f64, y: f64, data: Option<T>) -> Self {
        Point2D { x, y, data }
    }

    /// Returns the coordinate along the given axis.
    pub fn coord(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// An axis-aligned rectangle given by its lower-left and upper-right corners.
///
/// Invariant: `bottom_left.0 <= top_right.0` and `bottom_left.1 <= top_right.1`.
/// A rectangle wrapping a single point is degenerate: `bottom_left == top_right`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub bottom_left: (f64, f64),
    pub top_right: (f64, f64),
}

impl Rectangle {
    /// Builds a rectangle from its corners.
    ///
    /// Only checked in debug builds: a caller passing an inverted rectangle
    /// (`min > max` on some axis) is a precondition violation, not a
    /// recoverable runtime error (see the error handling design).
    pub fn new(bottom_left: (f64, f64), top_right: (f64, f64)) -> Self {
        debug_assert!(
            bottom_left.0 <= top_right.0 && bottom_left.1 <= top_right.1,
            "inverted rectangle: bottom_left {bottom_left:?} must not exceed top_right {top_right:?}"
        );
        Rectangle {
            bottom_left,
            top_right,
        }
    }

    /// Wraps a single point in a degenerate (zero-area) rectangle.
    pub fn from_point(x: f64, y: f64) -> Self {
        Rectangle {
            bottom_left: (x, y),
            top_right: (x, y),
        }
    }

    pub fn min_side(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.bottom_left.0,
            Axis::Y => self.bottom_left.1,
        }
    }

    pub fn max_side(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.top_right.0,
            Axis::Y => self.top_right.1,
        }
    }

    /// True if the two closed rectangles share any point.
    pub fn overlaps(&self, other: &Rectangle) -> bool {
        self.bottom_left.0 <= other.top_right.0
            && self.top_right.0 >= other.bottom_left.0
            && self.top_right.1 >= other.bottom_left.1
            && self.bottom_left.1 <= other.top_right.1
    }

    /// True if the point `(x, y)` lies within the closed rectangle.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.bottom_left.0
            && x <= self.top_right.0
            && y >= self.bottom_left.1
            && y <= self.top_right.1
    }

    /// True if `other` is wholly contained within `self`.
    pub fn contains_rect(&self, other: &Rectangle) -> bool {
        self.bottom_left.0 <= other.bottom_left.0
            && other.top_right.0 <= self.top_right.0
            && self.bottom_left.1 <= other.bottom_left.1
            && other.top_right.1 <= self.top_right.1
    }

    /// True if the rectangle strictly straddles the axis-aligned line `axis = offset`.
    ///
    /// Endpoint-touching does not count: a rectangle whose side lies exactly
    /// on the cut line is not a straddler.
    pub fn intersects(&self, axis: Axis, offset: f64) -> bool {
        self.min_side(axis) < offset && self.max_side(axis) > offset
    }

    /// The area of the rectangle (zero for a degenerate, point-wrapping rectangle).
    pub fn area(&self) -> f64 {
        (self.top_right.0 - self.bottom_left.0) * (self.top_right.1 - self.bottom_left.1)
    }

    /// Returns the smallest rectangle that contains both `self` and `other`.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Rectangle {
            bottom_left: (
                self.bottom_left.0.min(other.bottom_left.0),
                self.bottom_left.1.min(other.bottom_left.1),
            ),
            top_right: (
                self.top_right.0.max(other.top_right.0),
                self.top_right.1.max(other.top_right.1),
            ),
        }
    }

    /// Returns the bounding box over a non-empty sequence of rectangles.
    ///
    /// # Panics
    ///
    /// Panics if `rects` is empty: `BoundingBox` over an empty input is a
    /// precondition violation the caller must never trigger.
    pub fn bounding_box<'a, I>(rects: I) -> Rectangle
    where
        I: IntoIterator<Item = &'a Rectangle>,
    {
        let mut iter = rects.into_iter();
        let first = *iter
            .next()
            .expect("BoundingBox requires a non-empty set of rectangles");
        iter.fold(first, |acc, r| acc.union(r))
    }
}
