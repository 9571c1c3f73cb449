// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds changes: size limits, grow-mode propagation, locate/move/grow.

use alloc::vec::Vec;
use sightline_geom::CellRect;

use crate::surface::DrawSurface;
use crate::tree::{SHADOW_H, SHADOW_W, WidgetTree};
use crate::types::{GrowMode, WidgetId, WidgetState};

/// Recompute one coordinate of a tied edge after the owner grew by `delta`
/// along this axis. `owner_size` is the owner's size after the resize.
fn grow_coord(relative: bool, coord: i32, owner_size: i32, delta: i32) -> i32 {
    let old_size = owner_size - delta;
    if relative && old_size != 0 {
        // Proportional rescale, rounding to nearest.
        (coord * owner_size + old_size / 2) / old_size
    } else {
        coord + delta
    }
}

fn width(x1: i32, x2: i32) -> u32 {
    if x2 > x1 { (x2 - x1) as u32 } else { 0 }
}

impl<S: DrawSurface> WidgetTree<S> {
    /// The largest size the widget may take: its owner's size, or unbounded
    /// for unowned widgets. The smallest is always zero.
    pub fn size_limits(&self, id: WidgetId) -> Option<(u32, u32)> {
        if !self.is_alive(id) {
            return None;
        }
        match self.node(id).owner {
            Some(owner) => {
                let r = self.node(owner).rect;
                Some((r.w, r.h))
            }
            None => Some((u32::MAX, u32::MAX)),
        }
    }

    /// Write the widget's bounds without any redraw or propagation.
    ///
    /// Most callers want [`locate`](Self::locate) (repaints) or
    /// [`change_bounds`](Self::change_bounds) (propagates group resizes).
    pub fn set_bounds(&mut self, id: WidgetId, bounds: CellRect) {
        if self.is_alive(id) {
            self.node_mut(id).rect = bounds;
        }
    }

    /// The bounds the widget should take after its owner grew by
    /// `(dx, dy)`, per the widget's [`GrowMode`]. The owner's rect must
    /// already hold the new size. `None` for stale or unowned widgets.
    pub fn calc_bounds(&self, id: WidgetId, dx: i32, dy: i32) -> Option<CellRect> {
        if !self.is_alive(id) {
            return None;
        }
        let n = self.node(id);
        let owner = n.owner?;
        let r = n.rect;
        let mode = n.grow_mode;
        let relative = mode.contains(GrowMode::REL);
        let (ow, oh) = {
            let o = self.node(owner).rect;
            (o.w as i32, o.h as i32)
        };

        let mut x1 = r.x;
        let mut x2 = r.right();
        let mut y1 = r.y;
        let mut y2 = r.bottom();
        if mode.contains(GrowMode::LO_X) {
            x1 = grow_coord(relative, x1, ow, dx);
        }
        if mode.contains(GrowMode::HI_X) {
            x2 = grow_coord(relative, x2, ow, dx);
        }
        if mode.contains(GrowMode::LO_Y) {
            y1 = grow_coord(relative, y1, oh, dy);
        }
        if mode.contains(GrowMode::HI_Y) {
            y2 = grow_coord(relative, y2, oh, dy);
        }

        let (max_w, max_h) = self.size_limits(id)?;
        Some(CellRect::new(
            x1,
            y1,
            width(x1, x2).min(max_w),
            width(y1, y2).min(max_h),
        ))
    }

    /// Set the widget's bounds and repaint it.
    ///
    /// When a group changes size, its clip is reset to the new area and every
    /// child is resized through its own [`GrowMode`], recursively. A pure
    /// move (same size) just repaints.
    pub fn change_bounds(&mut self, id: WidgetId, bounds: CellRect) {
        if !self.is_alive(id) {
            return;
        }
        if self.node(id).group.is_none() {
            self.node_mut(id).rect = bounds;
            self.draw_view(id);
            return;
        }

        let old = self.node(id).rect;
        self.node_mut(id).rect = bounds;
        if old.w == bounds.w && old.h == bounds.h {
            self.draw_view(id);
            return;
        }

        log::trace!("resize {id:?}: {old:?} -> {bounds:?}");
        self.group_mut(id).clip = CellRect::new(0, 0, bounds.w, bounds.h);
        let dx = bounds.w as i32 - old.w as i32;
        let dy = bounds.h as i32 - old.h as i32;
        let children: Vec<WidgetId> = self.group(id).children.iter().copied().collect();
        for child in children {
            if let Some(r) = self.calc_bounds(child, dx, dy) {
                self.change_bounds(child, r);
            }
        }
    }

    /// Move and/or resize the widget, repainting the union of the old and
    /// new areas.
    ///
    /// The requested size is clamped to [`size_limits`](Self::size_limits).
    /// Equal bounds are a no-op. For an owned, visible widget the vacated and
    /// covered regions (shadow included) are repainted through the owner.
    pub fn locate(&mut self, id: WidgetId, bounds: CellRect) {
        if !self.is_alive(id) {
            return;
        }
        let (max_w, max_h) = self.size_limits(id).unwrap_or((u32::MAX, u32::MAX));
        let mut bounds = bounds;
        bounds.w = bounds.w.min(max_w);
        bounds.h = bounds.h.min(max_h);

        let old = self.node(id).rect;
        if bounds == old {
            return;
        }
        self.change_bounds(id, bounds);

        let (owner, state) = {
            let n = self.node(id);
            (n.owner, n.state)
        };
        if owner.is_some() && state.contains(WidgetState::VISIBLE) {
            let mut damage = old;
            damage.union(&bounds);
            if state.contains(WidgetState::SHADOW) {
                damage.w += SHADOW_W;
                damage.h += SHADOW_H;
            }
            self.draw_under_rect(id, damage, None);
        }
    }

    /// Move the widget to `(x, y)`, keeping its size.
    pub fn move_to(&mut self, id: WidgetId, x: i32, y: i32) {
        if let Some(r) = self.rect(id) {
            self.locate(id, CellRect::new(x, y, r.w, r.h));
        }
    }

    /// Resize the widget to `(w, h)`, keeping its position.
    pub fn grow_to(&mut self, id: WidgetId, w: u32, h: u32) {
        if let Some(r) = self.rect(id) {
            self.locate(id, CellRect::new(r.x, r.y, w, h));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_bounds_roundtrip() {
        let mut t = WidgetTree::new();
        let w = t.create_widget(CellRect::new(1, 2, 3, 4));
        assert_eq!(t.rect(w), Some(CellRect::new(1, 2, 3, 4)));
        t.change_bounds(w, CellRect::new(10, 20, 30, 40));
        assert_eq!(t.rect(w), Some(CellRect::new(10, 20, 30, 40)));
    }

    #[test]
    fn group_bounds_roundtrip() {
        let mut t = WidgetTree::new();
        let g = t.create_group(CellRect::new(1, 2, 3, 4));
        assert_eq!(t.rect(g), Some(CellRect::new(1, 2, 3, 4)));
        t.change_bounds(g, CellRect::new(10, 20, 30, 40));
        assert_eq!(t.rect(g), Some(CellRect::new(10, 20, 30, 40)));
    }

    #[test]
    fn locate_clamps_to_owner_size() {
        let mut t = WidgetTree::new();
        let g = t.create_group(CellRect::new(0, 0, 80, 25));
        let w = t.create_widget(CellRect::new(0, 0, 10, 10));
        t.insert(g, w).unwrap();
        t.locate(w, CellRect::new(2, 2, 500, 500));
        assert_eq!(t.rect(w), Some(CellRect::new(2, 2, 80, 25)));

        // Unowned widgets are unconstrained.
        let lone = t.create_widget(CellRect::new(0, 0, 1, 1));
        t.locate(lone, CellRect::new(0, 0, 500, 500));
        assert_eq!(t.size(lone), Some((500, 500)));
    }

    #[test]
    fn grow_keeps_margins() {
        let mut t = WidgetTree::new();
        let g = t.create_group(CellRect::new(0, 0, 80, 25));
        let w = t.create_widget(CellRect::new(10, 5, 20, 10));
        t.insert(g, w).unwrap();
        t.set_grow_mode(w, GrowMode::HI_X | GrowMode::HI_Y);

        t.change_bounds(g, CellRect::new(0, 0, 100, 30));
        // Right margin was 80 - 30 = 50, bottom margin 25 - 15 = 10.
        let r = t.rect(w).unwrap();
        assert_eq!(r, CellRect::new(10, 5, 40, 15));
        assert_eq!(100 - r.right(), 50, "right margin preserved");
        assert_eq!(30 - r.bottom(), 10, "bottom margin preserved");
    }

    #[test]
    fn grow_all_translates() {
        let mut t = WidgetTree::new();
        let g = t.create_group(CellRect::new(0, 0, 80, 25));
        let w = t.create_widget(CellRect::new(10, 5, 20, 10));
        t.insert(g, w).unwrap();
        t.set_grow_mode(w, GrowMode::LO_X | GrowMode::HI_X);

        t.change_bounds(g, CellRect::new(0, 0, 100, 25));
        // Both x edges tied: the widget slides right without resizing.
        assert_eq!(t.rect(w), Some(CellRect::new(30, 5, 20, 10)));
    }

    #[test]
    fn grow_relative_rescales() {
        let mut t = WidgetTree::new();
        let g = t.create_group(CellRect::new(0, 0, 80, 25));
        let w = t.create_widget(CellRect::new(10, 5, 20, 10));
        t.insert(g, w).unwrap();
        t.set_grow_mode(w, GrowMode::ALL | GrowMode::REL);

        t.change_bounds(g, CellRect::new(0, 0, 160, 50));
        assert_eq!(t.rect(w), Some(CellRect::new(20, 10, 40, 20)));
    }

    #[test]
    fn group_resize_recurses() {
        let mut t = WidgetTree::new();
        let outer = t.create_group(CellRect::new(0, 0, 80, 25));
        let inner = t.create_group(CellRect::new(0, 0, 80, 25));
        let leaf = t.create_widget(CellRect::new(0, 20, 80, 5));
        t.insert(outer, inner).unwrap();
        t.insert(inner, leaf).unwrap();
        t.set_grow_mode(inner, GrowMode::HI_X | GrowMode::HI_Y);
        t.set_grow_mode(leaf, GrowMode::LO_Y | GrowMode::HI_Y | GrowMode::HI_X);

        t.change_bounds(outer, CellRect::new(0, 0, 100, 30));
        assert_eq!(t.rect(inner), Some(CellRect::new(0, 0, 100, 30)));
        assert_eq!(
            t.rect(leaf),
            Some(CellRect::new(0, 25, 100, 5)),
            "a bottom bar keeps hugging the bottom edge"
        );
        assert_eq!(t.clip(inner), Some(CellRect::new(0, 0, 100, 30)));
    }

    #[test]
    fn pure_move_does_not_touch_children() {
        let mut t = WidgetTree::new();
        let g = t.create_group(CellRect::new(0, 0, 80, 25));
        let w = t.create_widget(CellRect::new(10, 5, 20, 10));
        t.insert(g, w).unwrap();
        t.set_grow_mode(w, GrowMode::ALL);

        t.change_bounds(g, CellRect::new(3, 7, 80, 25));
        assert_eq!(t.rect(g), Some(CellRect::new(3, 7, 80, 25)));
        assert_eq!(
            t.rect(w),
            Some(CellRect::new(10, 5, 20, 10)),
            "children are owner-relative; moving the owner moves nothing"
        );
    }

    #[test]
    fn move_to_and_grow_to() {
        let mut t = WidgetTree::new();
        let g = t.create_group(CellRect::new(0, 0, 80, 25));
        let w = t.create_widget(CellRect::new(1, 1, 5, 5));
        t.insert(g, w).unwrap();
        t.move_to(w, 7, 9);
        assert_eq!(t.rect(w), Some(CellRect::new(7, 9, 5, 5)));
        t.grow_to(w, 12, 3);
        assert_eq!(t.rect(w), Some(CellRect::new(7, 9, 12, 3)));
    }

    #[test]
    fn grow_all_pins_to_bottom_right() {
        // All four edges tied: the widget keeps its size and its distance
        // from the owner's bottom-right corner.
        let mut t = WidgetTree::new();
        let g = t.create_group(CellRect::new(0, 0, 80, 25));
        let w = t.create_widget(CellRect::new(70, 20, 8, 4));
        t.insert(g, w).unwrap();
        t.set_grow_mode(w, GrowMode::ALL);

        t.change_bounds(g, CellRect::new(0, 0, 90, 40));
        assert_eq!(t.rect(w), Some(CellRect::new(80, 35, 8, 4)));
    }
}
