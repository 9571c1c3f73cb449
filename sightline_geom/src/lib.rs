// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sightline Geom: integer rectangle math on the terminal cell grid.
//!
//! Terminal UIs address a grid of character cells, so geometry here is exact
//! integer arithmetic: positions are signed (a widget may hang off the left or
//! top edge of its owner), sizes are unsigned. [`CellRect`] is the only type;
//! the interesting operations are in-place intersection and union, which the
//! widget tree uses for clip narrowing and damage regions.
//!
//! This crate is `no_std` and allocation-free.

#![no_std]

/// An axis-aligned rectangle of character cells.
///
/// `(x, y)` is the top-left cell; `w` and `h` count cells. The right and
/// bottom edges are exclusive: a rect covers columns `x..x + w` and rows
/// `y..y + h`. A rect with zero width or height covers nothing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellRect {
    /// Column of the left edge.
    pub x: i32,
    /// Row of the top edge.
    pub y: i32,
    /// Width in cells.
    pub w: u32,
    /// Height in cells.
    pub h: u32,
}

impl CellRect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a rectangle from its top-left corner and size.
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Column one past the right edge.
    pub const fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    /// Row one past the bottom edge.
    pub const fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }

    /// Whether the rectangle covers no cells.
    pub const fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Whether the cell at `(x, y)` lies inside the rectangle.
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether row `y` crosses the rectangle.
    pub const fn contains_row(&self, y: i32) -> bool {
        y >= self.y && y < self.bottom()
    }

    /// Translate by `(dx, dy)` cells.
    pub const fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Grow (or shrink) by `(dw, dh)` cells, keeping the top-left corner.
    ///
    /// Sizes saturate at zero rather than wrapping.
    pub fn resize(&mut self, dw: i32, dh: i32) {
        self.w = add_clamped(self.w, dw);
        self.h = add_clamped(self.h, dh);
    }

    /// Shrink to the intersection with `other`.
    ///
    /// Disjoint rectangles intersect to an empty rect; its position is the
    /// clamped top-left corner and is not meaningful beyond [`Self::is_empty`].
    pub fn intersect(&mut self, other: &Self) {
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        self.x = self.x.max(other.x);
        self.y = self.y.max(other.y);
        self.w = span(self.x, x2);
        self.h = span(self.y, y2);
    }

    /// Grow to the smallest rectangle covering both `self` and `other`.
    pub fn union(&mut self, other: &Self) {
        let x2 = self.right().max(other.right());
        let y2 = self.bottom().max(other.bottom());
        self.x = self.x.min(other.x);
        self.y = self.y.min(other.y);
        self.w = span(self.x, x2);
        self.h = span(self.y, y2);
    }
}

/// Length of the half-open interval `[from, to)`, clamped at zero.
const fn span(from: i32, to: i32) -> u32 {
    if to > from { (to - from) as u32 } else { 0 }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "the value is clamped into u32 range first"
)]
fn add_clamped(base: u32, delta: i32) -> u32 {
    let v = i64::from(base) + i64::from(delta);
    v.clamp(0, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_exclusive() {
        let r = CellRect::new(2, 3, 4, 5);
        assert_eq!(r.right(), 6, "right edge is one past the last column");
        assert_eq!(r.bottom(), 8, "bottom edge is one past the last row");
        assert!(r.contains(2, 3), "top-left cell is inside");
        assert!(r.contains(5, 7), "bottom-right cell is inside");
        assert!(!r.contains(6, 3), "right edge is outside");
        assert!(!r.contains(2, 8), "bottom edge is outside");
        assert!(r.contains_row(7), "last row is inside");
        assert!(!r.contains_row(8), "row past bottom is outside");
    }

    #[test]
    fn move_and_resize() {
        let mut r = CellRect::new(1, 2, 3, 4);
        r.move_by(10, -5);
        assert_eq!(r, CellRect::new(11, -3, 3, 4));
        r.resize(2, -1);
        assert_eq!(r, CellRect::new(11, -3, 5, 3));
        r.resize(-100, -100);
        assert_eq!((r.w, r.h), (0, 0), "sizes saturate at zero");
        assert!(r.is_empty());
    }

    #[test]
    fn intersect_overlapping() {
        let mut r = CellRect::new(0, 0, 10, 10);
        r.intersect(&CellRect::new(5, 5, 10, 10));
        assert_eq!(r, CellRect::new(5, 5, 5, 5));
    }

    #[test]
    fn intersect_disjoint_is_empty() {
        let mut r = CellRect::new(0, 0, 3, 3);
        r.intersect(&CellRect::new(10, 10, 3, 3));
        assert!(r.is_empty(), "disjoint rects intersect to nothing");

        // Touching edges do not overlap.
        let mut r = CellRect::new(0, 0, 5, 5);
        r.intersect(&CellRect::new(5, 0, 5, 5));
        assert!(r.is_empty(), "shared edge covers no cells");
    }

    #[test]
    fn union_covers_both() {
        let mut r = CellRect::new(-2, -2, 4, 4);
        r.union(&CellRect::new(5, 5, 2, 2));
        assert_eq!(r, CellRect::new(-2, -2, 9, 9));
        assert!(r.contains(-2, -2), "union keeps the first rect");
        assert!(r.contains(6, 6), "union keeps the second rect");
    }

    #[test]
    fn zero_size_is_empty() {
        assert!(CellRect::new(3, 4, 0, 7).is_empty());
        assert!(CellRect::new(3, 4, 7, 0).is_empty());
        assert!(!CellRect::new(3, 4, 1, 1).is_empty());
        assert!(!CellRect::new(3, 4, 0, 7).contains(3, 4));
    }
}
