//! Axis-aligned rectangles in world pixels
//!
//! Every collidable shape in the game is one of these: platforms, ladders,
//! the goal, and each entity's bounding box. `y` grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of the given size centered on a point
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w * 0.5, center.y - h * 0.5, w, h)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Open-interval intersection: boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y)
    }

    /// Closed-interval point test (edges count as inside)
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
        assert!(a.overlaps(&Rect::new(9.5, 9.5, 10.0, 10.0)));
    }

    #[test]
    fn test_contains_point_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(Vec2::new(10.0, 10.0)));
        assert!(!r.contains_point(Vec2::new(10.01, 5.0)));
    }

    #[test]
    fn test_centered() {
        let r = Rect::centered(Vec2::new(50.0, 50.0), 20.0, 10.0);
        assert_eq!(r, Rect::new(40.0, 45.0, 20.0, 10.0));
    }
}
