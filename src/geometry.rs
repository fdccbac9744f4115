//! Core geometry types: Point, Size, Rect.
//!
//! Pixel-space (f32) coordinates used for measured box sizes and for the
//! indicator geometry composite widgets derive from child bounding boxes.

use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D position in CSS pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A width/height pair in CSS pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero or negative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned bounding box: origin plus size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rect.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Build a rect from an origin and a size.
    #[inline]
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Top-left corner.
    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether `point` lies within this rect (right/bottom exclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Express this rect relative to `container`'s origin.
    ///
    /// This is the offset a positioned child of `container` would need to
    /// sit on top of `self`.
    pub fn relative_to(&self, container: &Rect) -> Rect {
        Rect::new(self.x - container.x, self.y - container.y, self.width, self.height)
    }

    /// Move the rect by `offset`.
    pub fn translate(&self, offset: Point) -> Rect {
        Rect::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(1.0, 1.0);
        assert_eq!(a + b, Point::new(4.0, 5.0));
        assert_eq!(a - b, Point::new(2.0, 3.0));
    }

    #[test]
    fn size_is_empty() {
        assert!(Size::new(0.0, 10.0).is_empty());
        assert!(Size::new(10.0, -1.0).is_empty());
        assert!(!Size::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.origin(), Point::new(10.0, 20.0));
        assert_eq!(r.size(), Size::new(30.0, 40.0));
    }

    #[test]
    fn rect_contains_is_right_exclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.5, 9.5)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
        assert!(!r.contains(Point::new(-0.1, 5.0)));
    }

    #[test]
    fn rect_relative_to_container() {
        let container = Rect::new(100.0, 50.0, 400.0, 48.0);
        let tab = Rect::new(196.0, 50.0, 80.0, 48.0);
        assert_eq!(tab.relative_to(&container), Rect::new(96.0, 0.0, 80.0, 48.0));
    }

    #[test]
    fn rect_from_origin_size_and_translate() {
        let r = Rect::from_origin_size(Point::new(1.0, 2.0), Size::new(3.0, 4.0));
        assert_eq!(r, Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(r.translate(Point::new(10.0, 10.0)), Rect::new(11.0, 12.0, 3.0, 4.0));
    }
}
