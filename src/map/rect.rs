//! Axis-aligned room rectangle. The border row/column is wall; `inner` is the
//! carvable floor.

use std::ops::Range;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Integer midpoint
    pub fn center(&self) -> (i32, i32) {
        ((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Column and row ranges of the floor area, one tile in from each edge.
    pub fn inner(&self) -> (Range<i32>, Range<i32>) {
        (self.x1 + 1..self.x2, self.y1 + 1..self.y2)
    }

    pub fn inner_contains(&self, x: i32, y: i32) -> bool {
        let (xs, ys) = self.inner();
        xs.contains(&x) && ys.contains(&y)
    }

    /// Closed-interval overlap: rectangles sharing only a border intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_corners() {
        let r = Rect::new(2, 3, 6, 8);
        assert_eq!((r.x1, r.y1, r.x2, r.y2), (2, 3, 8, 11));
        assert_eq!(r.width(), 6);
        assert_eq!(r.height(), 8);
    }

    #[test]
    fn test_center_rounds_down() {
        assert_eq!(Rect::new(0, 0, 7, 7).center(), (3, 3));
        assert_eq!(Rect::new(10, 4, 6, 9).center(), (13, 8));
    }

    #[test]
    fn test_inner_excludes_border() {
        let r = Rect::new(0, 0, 6, 6);
        let (xs, ys) = r.inner();
        assert_eq!(xs, 1..6);
        assert_eq!(ys, 1..6);
        assert!(r.inner_contains(1, 1));
        assert!(r.inner_contains(5, 5));
        assert!(!r.inner_contains(0, 3));
        assert!(!r.inner_contains(6, 3));
    }

    #[test]
    fn test_intersects_is_border_inclusive() {
        let a = Rect::new(0, 0, 5, 5);
        let touching = Rect::new(5, 0, 5, 5);
        let apart = Rect::new(6, 0, 5, 5);
        let inside = Rect::new(1, 1, 2, 2);
        assert!(a.intersects(&touching));
        assert!(touching.intersects(&a));
        assert!(!a.intersects(&apart));
        assert!(a.intersects(&inside));
    }
}
