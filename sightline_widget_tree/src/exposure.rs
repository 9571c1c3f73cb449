// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The exposure engine: per-cell occlusion against ancestor clips and the
//! stacking order of every level above a widget.
//!
//! A widget is *exposed* when at least one of its cells can reach the
//! screen. The test works row by row: the widget's full row interval is
//! pushed up through the owner chain, clipped at each level, and shrunk by
//! every sibling stacked in front of it. An interval that survives the climb
//! to an unowned root proves exposure. Occluded spans are written off as
//! opaque except when the occluder sits over the interval's tail, where a
//! per-cell probe checks whether the occluder is a group that light passes
//! through (its visible children leave the cell uncovered, recursively).

use crate::surface::DrawSurface;
use crate::tree::WidgetTree;
use crate::types::{WidgetId, WidgetState};

impl<S: DrawSurface> WidgetTree<S> {
    /// Whether any cell of the widget can reach the screen.
    ///
    /// Gated on the [`EXPOSED`](WidgetState::EXPOSED) bookkeeping bit and a
    /// nonzero size; beyond that, the answer is computed from the tree's
    /// actual geometry, clips, and stacking.
    pub fn exposed(&self, id: WidgetId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let n = self.node(id);
        if !n.state.contains(WidgetState::EXPOSED) || n.rect.is_empty() {
            return false;
        }
        let (w, h) = (n.rect.w as i32, n.rect.h as i32);
        (0..h).any(|row| self.row_exposed(id, row, 0, w))
    }

    /// Whether any cell of the span `[bx, cx)` on `row` survives the climb
    /// from `subject` to the root. Coordinates are local to `subject`.
    fn row_exposed(&self, subject: WidgetId, row: i32, bx: i32, cx: i32) -> bool {
        let n = self.node(subject);
        let Some(owner) = n.owner else {
            // An unowned widget is the screen; the span made it.
            return true;
        };

        // Into the owner's coordinates, then clip.
        let row = row + n.rect.y;
        let mut bx = bx + n.rect.x;
        let mut cx = cx + n.rect.x;
        let clip = self.group(owner).clip;
        if !clip.contains_row(row) {
            return false;
        }
        bx = bx.max(clip.x);
        cx = cx.min(clip.right());
        if bx >= cx {
            return false;
        }

        let Some(pos) = self.position_of(owner, subject) else {
            return false;
        };
        self.scan_row(owner, pos, 0, row, bx, cx)
    }

    /// Walk the siblings stacked in front of `owner`'s child at
    /// `subject_pos`, top-most first, starting at index `start`, shrinking
    /// the span `[bx, cx)` as occluders cover it. A surviving span climbs on
    /// through `owner`.
    fn scan_row(
        &self,
        owner: WidgetId,
        subject_pos: usize,
        start: usize,
        row: i32,
        mut bx: i32,
        mut cx: i32,
    ) -> bool {
        let children = &self.group(owner).children;
        for i in start..subject_pos {
            let sib = children[i];
            let s = self.node(sib);
            if !s.state.contains(WidgetState::VISIBLE) {
                continue;
            }
            let r = s.rect;
            if !r.contains_row(row) {
                continue;
            }
            let (sx, sx2) = (r.x, r.right());
            if sx2 <= bx || sx >= cx {
                // Disjoint.
                continue;
            }
            if sx <= bx {
                if sx2 >= cx {
                    // Full cover.
                    return false;
                }
                // Covers the head of the span.
                bx = sx2;
            } else if sx2 >= cx {
                // Covers the tail: maybe light passes through the occluder.
                if self.shines_through(sib, row, sx, cx) {
                    return true;
                }
                cx = sx;
            } else {
                // Strictly inside: split. The uncovered tail continues
                // through the rest of the walk on its own; the head stays
                // in this one.
                if self.scan_row(owner, subject_pos, i + 1, row, sx2, cx) {
                    return true;
                }
                cx = sx;
            }
            if bx >= cx {
                return false;
            }
        }
        self.row_exposed(owner, row, bx, cx)
    }

    /// Whether any cell of `[bx, cx)` on `row` shows through the occluder
    /// `id`. Coordinates are in `id`'s owner's space.
    fn shines_through(&self, id: WidgetId, row: i32, bx: i32, cx: i32) -> bool {
        let r = self.node(id).rect;
        (bx..cx).any(|x| self.cell_transparent(id, x - r.x, row - r.y))
    }

    /// Whether the cell `(x, y)`, local to `id`, is transparent: a plain
    /// widget is opaque everywhere; a group is transparent wherever no
    /// visible child paints the cell (children cannot paint outside the
    /// clip).
    fn cell_transparent(&self, id: WidgetId, x: i32, y: i32) -> bool {
        let Some(g) = self.node(id).group.as_ref() else {
            return false;
        };
        if !g.clip.contains(x, y) {
            return true;
        }
        for &child in &g.children {
            let c = self.node(child);
            if !c.state.contains(WidgetState::VISIBLE) || !c.rect.contains(x, y) {
                continue;
            }
            if !self.cell_transparent(child, x - c.rect.x, y - c.rect.y) {
                return false;
            }
        }
        true
    }
}
