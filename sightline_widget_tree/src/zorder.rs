// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order mutation with incremental redraw.

use crate::surface::DrawSurface;
use crate::tree::WidgetTree;
use crate::types::{WidgetId, WidgetOptions, WidgetState};

impl<S: DrawSurface> WidgetTree<S> {
    /// Raise the widget to the front of its owner's stacking order.
    pub fn make_first(&mut self, id: WidgetId) {
        if let Some(owner) = self.owner(id) {
            let first = self.first(owner);
            self.put_in_front_of(id, first);
        }
    }

    /// Restack the widget directly in front of `target` (`None` raises it to
    /// the front), repainting only what the move uncovered or covered.
    ///
    /// No-op when the widget is unowned, when `target` is the widget itself
    /// or its immediate front neighbor (the order would not change), or when
    /// `target` belongs to a different group. A hidden widget moves purely
    /// structurally, without any redraw.
    pub fn put_in_front_of(&mut self, id: WidgetId, target: Option<WidgetId>) {
        let Some(owner) = self.owner(id) else {
            return;
        };
        if target == Some(id) || target == self.next_view(id) {
            return;
        }
        if let Some(t) = target
            && self.owner(t) != Some(owner)
        {
            return;
        }

        log::trace!("restack {id:?} in front of {target:?}");
        if !self.has_state(id, WidgetState::VISIBLE) {
            self.unlink_view(owner, id);
            self.link_view(owner, id, target);
            return;
        }

        // The redraw boundary: when the widget moves toward the front, the
        // repaint after the move runs down to its old front neighbor; when
        // it moves toward the back (`id` is not reachable walking backwards
        // from `target`), the repaint happens before the move and runs down
        // to the target.
        let mut last = self.next_view(id);
        let mut p = target;
        while let Some(v) = p {
            if v == id {
                break;
            }
            p = self.next_view(v);
        }
        if p.is_none() {
            last = target;
        }

        self.node_mut(id).state.remove(WidgetState::VISIBLE);
        if last == target {
            self.draw_hide(id, last);
        }
        self.unlink_view(owner, id);
        self.link_view(owner, id, target);
        self.node_mut(id).state.insert(WidgetState::VISIBLE);
        if last != target {
            self.draw_show(id, last);
        }
        if self.node(id).options.contains(WidgetOptions::SELECTABLE) {
            self.reset_current(owner);
        }
    }
}
