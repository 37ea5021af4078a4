//! Point, rectangle, and circle types in frame pixel space.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A 2D point or displacement in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Multiply both components by `factor`.
    pub fn scaled(&self, factor: f64) -> Point2D {
        Point2D {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width (never negative).
    pub w: f64,
    /// Height (never negative).
    pub h: f64,
}

impl Rect {
    /// Create a rectangle; negative sizes collapse to zero.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    /// Rectangle spanning the two given edges on each axis.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Shrink by `d` on every side.
    pub fn inset(&self, d: f64) -> Rect {
        Rect::new(self.x + d, self.y + d, self.w - 2.0 * d, self.h - 2.0 * d)
    }

    /// Check if a point lies within this rectangle (edges inclusive).
    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Check if `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        const EPS: f64 = 1e-6;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }

    /// Scale position and size by `factor`.
    pub fn scaled(&self, factor: f64) -> Rect {
        Rect::new(
            self.x * factor,
            self.y * factor,
            self.w * factor,
            self.h * factor,
        )
    }

    /// Split horizontally into `count` equal columns separated by `gap`.
    pub fn split_columns(&self, count: u32, gap: f64) -> Vec<Rect> {
        let count = count.max(1);
        let total_gap = gap * (count - 1) as f64;
        let col_w = ((self.w - total_gap) / count as f64).max(0.0);
        (0..count)
            .map(|i| Rect::new(self.x + i as f64 * (col_w + gap), self.y, col_w, self.h))
            .collect()
    }
}

/// A circle, used for the logo, reporter photo, and crop clip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2D,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point2D, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Largest circle centred in `rect`, shrunk by `inset`.
    pub fn inscribed(rect: &Rect, inset: f64) -> Self {
        Self::new(rect.center(), rect.w.min(rect.h) / 2.0 - inset)
    }

    pub fn contains(&self, p: Point2D) -> bool {
        self.center.distance_to(&p) <= self.radius
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }

    pub fn scaled(&self, factor: f64) -> Circle {
        Circle::new(self.center.scaled(factor), self.radius * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point2D::new(10.0, -5.0);
        let b = Point2D::new(3.0, 4.0);
        assert_eq!(a + b, Point2D::new(13.0, -1.0));
        assert_eq!(a - b, Point2D::new(7.0, -9.0));
        assert_eq!(b.scaled(0.75), Point2D::new(2.25, 3.0));
        assert!((Point2D::ORIGIN.distance_to(&b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_rect_negative_size_collapses() {
        let r = Rect::new(5.0, 5.0, -3.0, 2.0);
        assert_eq!(r.w, 0.0);
        assert_eq!(Rect::from_edges(10.0, 10.0, 4.0, 20.0).w, 0.0);
    }

    #[test]
    fn test_split_columns_fills_width() {
        let r = Rect::new(0.0, 0.0, 520.0, 100.0);
        let cols = r.split_columns(3, 20.0);
        assert_eq!(cols.len(), 3);
        assert!((cols[0].w - 160.0).abs() < 1e-9);
        assert!((cols[2].right() - 520.0).abs() < 1e-9);
        assert!(cols.iter().all(|c| r.contains_rect(c)));
    }

    #[test]
    fn test_split_zero_columns_is_one() {
        let r = Rect::new(0.0, 0.0, 100.0, 10.0);
        assert_eq!(r.split_columns(0, 20.0), vec![r]);
    }

    #[test]
    fn test_inscribed_circle() {
        let c = Circle::inscribed(&Rect::new(0.0, 0.0, 300.0, 300.0), 10.0);
        assert_eq!(c.center, Point2D::new(150.0, 150.0));
        assert_eq!(c.radius, 140.0);
        assert!(c.contains(Point2D::new(150.0, 15.0)));
        assert!(!c.contains(Point2D::new(5.0, 5.0)));
    }
}
