// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State changes and their redraw/focus side effects, plus the partial
//! redraw machinery (clip narrowing, subview walks).

use sightline_geom::CellRect;

use crate::surface::DrawSurface;
use crate::tree::{SHADOW_H, SHADOW_W, WidgetTree};
use crate::types::{SelectMode, WidgetId, WidgetOptions, WidgetState};

impl<S: DrawSurface> WidgetTree<S> {
    /// Set or clear `flag` on the widget and run the coupled side effects.
    ///
    /// For owned widgets:
    /// - `VISIBLE` also tracks `EXPOSED` (hiding always clears it; showing
    ///   sets it when the owner is exposed), paints or erases the widget,
    ///   and re-resolves the owner's selection if the widget is selectable.
    /// - `CURSOR_VIS`/`CURSOR_INS` reposition the cursor.
    /// - `SHADOW` repaints the area under the (new or former) shadow.
    /// - `FOCUSED` re-resolves the cursor position.
    ///
    /// Unowned widgets only get the bit flipped.
    pub fn set_state(&mut self, id: WidgetId, flag: WidgetState, enable: bool) {
        if !self.is_alive(id) {
            return;
        }
        self.node_mut(id).state.set(flag, enable);
        let Some(owner) = self.node(id).owner else {
            return;
        };

        if flag == WidgetState::VISIBLE {
            // Hiding always revokes exposure; showing restores it only when
            // the owner is itself exposed.
            if !enable {
                self.set_state(id, WidgetState::EXPOSED, false);
            } else if self.has_state(owner, WidgetState::EXPOSED) {
                self.set_state(id, WidgetState::EXPOSED, true);
            }
            if enable {
                self.draw_show(id, None);
            } else {
                self.draw_hide(id, None);
            }
            if self.node(id).options.contains(WidgetOptions::SELECTABLE) {
                self.reset_current(owner);
            }
        } else if flag == WidgetState::CURSOR_VIS || flag == WidgetState::CURSOR_INS {
            self.draw_cursor(id);
        } else if flag == WidgetState::SHADOW {
            self.draw_under_view(id, true, None);
        } else if flag == WidgetState::FOCUSED {
            self.reset_cursor(id);
        }
    }

    /// Make the widget visible (no-op if it already is).
    pub fn show(&mut self, id: WidgetId) {
        if self.is_alive(id) && !self.node(id).state.contains(WidgetState::VISIBLE) {
            self.set_state(id, WidgetState::VISIBLE, true);
        }
    }

    /// Hide the widget (no-op if it already is hidden).
    pub fn hide(&mut self, id: WidgetId) {
        if self.is_alive(id) && self.node(id).state.contains(WidgetState::VISIBLE) {
            self.set_state(id, WidgetState::VISIBLE, false);
        }
    }

    /// Paint the widget if any of it can reach the screen.
    pub fn draw_view(&mut self, id: WidgetId) {
        if self.exposed(id) {
            let rect = self.node(id).rect;
            self.surface.draw(id, rect);
            self.draw_cursor(id);
        }
    }

    /// Reposition the cursor if the widget holds the focus.
    ///
    /// An unowned widget has no screen position to put a cursor at.
    pub fn draw_cursor(&mut self, id: WidgetId) {
        if self.has_state(id, WidgetState::FOCUSED) && self.owner(id).is_some() {
            self.reset_cursor(id);
        }
    }

    /// Resolve where the cursor belongs and hand it to the surface.
    ///
    /// A group forwards to its current child, so the cursor ends up in the
    /// innermost focused leaf; a leaf reports its bounds to
    /// [`DrawSurface::draw_cursor`] when it is visible, focused, and has a
    /// cursor to show.
    pub fn reset_cursor(&mut self, id: WidgetId) {
        if !self.is_alive(id) {
            return;
        }
        if self.is_group(id) {
            if let Some(cur) = self.group(id).current {
                self.reset_cursor(cur);
            }
            return;
        }
        let (state, rect) = {
            let n = self.node(id);
            (n.state, n.rect)
        };
        let wanted = WidgetState::VISIBLE | WidgetState::FOCUSED | WidgetState::CURSOR_VIS;
        if state.contains(wanted) {
            self.surface.draw_cursor(id, rect);
        }
    }

    /// Paint a run of siblings, from `from` toward the back, stopping before
    /// `last` (`None` = down to the back-most).
    pub fn draw_subviews(&mut self, from: Option<WidgetId>, last: Option<WidgetId>) {
        let mut cur = from;
        while cur != last {
            let Some(w) = cur else { break };
            self.draw_view(w);
            cur = self.next_view(w);
        }
    }

    /// Repaint the part of the owner covered by `r` that lies behind `id`.
    ///
    /// The owner's clip is narrowed to `r` for the walk and restored to the
    /// full owner area afterwards.
    pub(crate) fn draw_under_rect(&mut self, id: WidgetId, r: CellRect, last: Option<WidgetId>) {
        let Some(owner) = self.owner(id) else {
            return;
        };
        let mut clip = self.group(owner).clip;
        clip.intersect(&r);
        self.group_mut(owner).clip = clip;

        let from = self.next_view(id);
        self.draw_subviews(from, last);

        let (w, h) = {
            let r = self.node(owner).rect;
            (r.w, r.h)
        };
        self.group_mut(owner).clip = CellRect::new(0, 0, w, h);
    }

    /// Repaint what lies behind `id`, optionally including its shadow area.
    pub(crate) fn draw_under_view(&mut self, id: WidgetId, shadow: bool, last: Option<WidgetId>) {
        let Some(mut r) = self.rect(id) else {
            return;
        };
        if shadow {
            r.w += SHADOW_W;
            r.h += SHADOW_H;
        }
        self.draw_under_rect(id, r, last);
    }

    /// A widget just became visible: paint it, and its shadow's background.
    pub(crate) fn draw_show(&mut self, id: WidgetId, last: Option<WidgetId>) {
        self.draw_view(id);
        if self.has_state(id, WidgetState::SHADOW) {
            self.draw_under_view(id, true, last);
        }
    }

    /// A widget just became invisible: repaint what it was covering.
    pub(crate) fn draw_hide(&mut self, id: WidgetId, last: Option<WidgetId>) {
        self.draw_cursor(id);
        let shadow = self.has_state(id, WidgetState::SHADOW);
        self.draw_under_view(id, shadow, last);
    }

    fn focus_view(&mut self, group: WidgetId, w: Option<WidgetId>, enable: bool) {
        if let Some(w) = w
            && self.has_state(group, WidgetState::FOCUSED)
        {
            self.set_state(w, WidgetState::FOCUSED, enable);
        }
    }

    /// Hand the group's selection to `w` (or to nobody for `None`).
    ///
    /// `mode` splits a transition across two calls: [`SelectMode::Leave`]
    /// deselects the old child without selecting a new one,
    /// [`SelectMode::Enter`] selects the new child while the old keeps its
    /// `SELECTED` bit for later restoration. Focus follows selection only
    /// while the group itself is focused.
    pub fn set_current(&mut self, group: WidgetId, w: Option<WidgetId>, mode: SelectMode) {
        if !self.is_group(group) {
            return;
        }
        let old = self.group(group).current;
        if old == w {
            return;
        }
        self.focus_view(group, old, false);
        let old_keeps_focus = old.is_some_and(|o| self.has_state(o, WidgetState::FOCUSED));
        if mode != SelectMode::Normal || old.is_none() || !old_keeps_focus {
            if mode != SelectMode::Enter
                && let Some(o) = old
            {
                self.set_state(o, WidgetState::SELECTED, false);
            }
            if mode != SelectMode::Leave
                && let Some(new) = w
            {
                self.set_state(new, WidgetState::SELECTED, true);
                self.focus_view(group, Some(new), true);
            }
            self.group_mut(group).current = w;
        }
    }

    /// Re-resolve the group's selection: the front-most visible, selectable
    /// child becomes current (or nobody, if none qualifies).
    pub fn reset_current(&mut self, group: WidgetId) {
        if !self.is_group(group) {
            return;
        }
        let found = self
            .group(group)
            .children
            .iter()
            .copied()
            .find(|&c| {
                self.node(c).state.contains(WidgetState::VISIBLE)
                    && self.node(c).options.contains(WidgetOptions::SELECTABLE)
            });
        self.set_current(group, found, SelectMode::Normal);
    }

    /// Select the widget within its owner.
    ///
    /// With [`TOP_SELECT`](WidgetOptions::TOP_SELECT) this raises the widget
    /// to the front (window behavior); otherwise it only becomes current.
    /// Non-selectable widgets are left alone.
    pub fn select(&mut self, id: WidgetId) {
        if !self.is_alive(id) || !self.node(id).options.contains(WidgetOptions::SELECTABLE) {
            return;
        }
        if self.node(id).options.contains(WidgetOptions::TOP_SELECT) {
            self.make_first(id);
        } else if let Some(owner) = self.node(id).owner {
            self.set_current(owner, Some(id), SelectMode::Normal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutils::{DrawEvent, Recording};

    /// An exposed 80x25 desktop with a recording surface.
    fn desktop() -> (WidgetTree<Recording>, WidgetId) {
        let mut t = WidgetTree::with_surface(Recording::default());
        let g = t.create_group(CellRect::new(0, 0, 80, 25));
        t.set_state(g, WidgetState::EXPOSED, true);
        (t, g)
    }

    #[test]
    fn show_tracks_exposed_from_owner() {
        let (mut t, g) = desktop();
        let w = t.create_widget(CellRect::new(5, 5, 10, 10));
        t.insert(g, w).unwrap();
        assert!(t.has_state(w, WidgetState::EXPOSED));

        t.hide(w);
        assert!(!t.has_state(w, WidgetState::EXPOSED));
        assert!(!t.exposed(w));

        t.show(w);
        assert!(t.has_state(w, WidgetState::EXPOSED), "re-show restores exposure");
        assert!(t.exposed(w));
    }

    #[test]
    fn hide_inside_hidden_group_stays_unexposed() {
        let (mut t, root) = desktop();
        let g = t.create_group(CellRect::new(0, 0, 40, 10));
        t.insert(root, g).unwrap();
        let w = t.create_widget(CellRect::new(2, 2, 10, 3));
        t.insert(g, w).unwrap();
        assert!(t.exposed(w));

        // Hide the widget while its whole group is already hidden.
        t.hide(g);
        t.hide(w);
        t.show(g);
        assert!(!t.has_state(w, WidgetState::VISIBLE));
        assert!(
            !t.exposed(w),
            "a hidden widget must not resurface with its re-shown group"
        );

        t.show(w);
        assert!(t.exposed(w), "showing it again restores exposure");
    }

    #[test]
    fn cursor_needs_an_owner() {
        let mut t = WidgetTree::with_surface(Recording::default());
        let w = t.create_widget(CellRect::new(0, 0, 10, 1));
        t.set_state(w, WidgetState::FOCUSED, true);
        t.set_state(w, WidgetState::CURSOR_VIS, true);
        t.draw_cursor(w);
        assert!(
            t.surface().events.is_empty(),
            "an unowned widget has nowhere to put a cursor"
        );
    }

    #[test]
    fn show_and_hide_are_idempotent() {
        let (mut t, g) = desktop();
        let w = t.create_widget(CellRect::new(5, 5, 10, 10));
        t.insert(g, w).unwrap();
        t.surface_mut().clear();

        t.show(w);
        assert!(t.surface().events.is_empty(), "showing the shown draws nothing");
        t.hide(w);
        t.surface_mut().clear();
        t.hide(w);
        assert!(t.surface().events.is_empty(), "hiding the hidden draws nothing");
    }

    #[test]
    fn hide_repaints_what_was_covered() {
        let (mut t, g) = desktop();
        let back = t.create_widget(CellRect::new(0, 0, 10, 10));
        t.insert(g, back).unwrap();
        let front = t.create_widget(CellRect::new(0, 0, 10, 10));
        t.insert(g, front).unwrap();
        assert!(!t.exposed(back), "fully covered");
        t.surface_mut().clear();

        t.hide(front);
        assert_eq!(
            t.surface().drawn(),
            [back],
            "only the uncovered widget repaints"
        );

        t.surface_mut().clear();
        t.show(front);
        assert_eq!(t.surface().drawn(), [front]);
    }

    #[test]
    fn normal_select_moves_selected_and_focused() {
        let (mut t, g) = desktop();
        t.set_state(g, WidgetState::FOCUSED, true);
        let a = t.create_widget(CellRect::new(0, 0, 5, 5));
        let b = t.create_widget(CellRect::new(10, 0, 5, 5));
        t.set_options(a, WidgetOptions::SELECTABLE);
        t.set_options(b, WidgetOptions::SELECTABLE);
        t.insert(g, a).unwrap();
        t.insert(g, b).unwrap();
        // b was inserted last, so reset_current picked it.
        assert_eq!(t.current(g), Some(b));
        assert!(t.has_state(b, WidgetState::SELECTED | WidgetState::FOCUSED));

        t.set_current(g, Some(a), SelectMode::Normal);
        assert_eq!(t.current(g), Some(a));
        assert!(t.has_state(a, WidgetState::SELECTED | WidgetState::FOCUSED));
        assert!(!t.has_state(b, WidgetState::SELECTED));
        assert!(!t.has_state(b, WidgetState::FOCUSED));
    }

    #[test]
    fn enter_keeps_old_selection_for_restore() {
        let (mut t, g) = desktop();
        t.set_state(g, WidgetState::FOCUSED, true);
        let a = t.create_widget(CellRect::new(0, 0, 5, 5));
        let m = t.create_widget(CellRect::new(10, 0, 5, 5));
        t.set_options(a, WidgetOptions::SELECTABLE);
        t.set_options(m, WidgetOptions::SELECTABLE);
        t.insert(g, a).unwrap();
        t.set_current(g, Some(a), SelectMode::Normal);

        t.insert_view(g, m, None).unwrap();
        t.set_current(g, Some(m), SelectMode::Enter);
        assert_eq!(t.current(g), Some(m));
        assert!(
            t.has_state(a, WidgetState::SELECTED),
            "old child keeps SELECTED across a modal enter"
        );
        assert!(!t.has_state(a, WidgetState::FOCUSED));
    }

    #[test]
    fn leave_clears_selection() {
        let (mut t, g) = desktop();
        t.set_state(g, WidgetState::FOCUSED, true);
        let a = t.create_widget(CellRect::new(0, 0, 5, 5));
        t.set_options(a, WidgetOptions::SELECTABLE);
        t.insert(g, a).unwrap();
        assert_eq!(t.current(g), Some(a));

        t.set_current(g, None, SelectMode::Leave);
        assert_eq!(t.current(g), None);
        assert!(!t.has_state(a, WidgetState::SELECTED));
        assert!(!t.has_state(a, WidgetState::FOCUSED));
    }

    #[test]
    fn reset_current_skips_hidden_and_unselectable() {
        let (mut t, g) = desktop();
        let hidden = t.create_widget(CellRect::new(0, 0, 5, 5));
        let mute = t.create_widget(CellRect::new(0, 0, 5, 5));
        let pick = t.create_widget(CellRect::new(0, 0, 5, 5));
        t.set_options(hidden, WidgetOptions::SELECTABLE);
        t.set_options(pick, WidgetOptions::SELECTABLE);
        // Stacking after inserts: hidden, mute, pick.
        t.insert(g, pick).unwrap();
        t.insert(g, mute).unwrap();
        t.insert(g, hidden).unwrap();
        t.hide(hidden);

        t.reset_current(g);
        assert_eq!(
            t.current(g),
            Some(pick),
            "front-most visible selectable child wins"
        );
    }

    #[test]
    fn select_makes_current_or_raises() {
        let (mut t, g) = desktop();
        let a = t.create_widget(CellRect::new(0, 0, 5, 5));
        let b = t.create_widget(CellRect::new(0, 0, 5, 5));
        t.set_options(a, WidgetOptions::SELECTABLE);
        t.set_options(b, WidgetOptions::SELECTABLE | WidgetOptions::TOP_SELECT);
        t.insert(g, a).unwrap();
        t.insert(g, b).unwrap();
        // Stacking: b, a.
        t.select(a);
        assert_eq!(t.current(g), Some(a));
        assert_eq!(t.first(g), Some(b), "plain select does not restack");

        t.select(b);
        assert_eq!(t.first(g), Some(b));

        t.put_in_front_of(a, Some(b));
        // Stacking: a, b.
        t.select(b);
        assert_eq!(t.first(g), Some(b), "TOP_SELECT raises the widget");
    }

    #[test]
    fn cursor_resolves_through_current_chain() {
        let (mut t, outer) = desktop();
        t.set_state(outer, WidgetState::FOCUSED, true);
        let inner = t.create_group(CellRect::new(0, 0, 40, 20));
        t.insert(outer, inner).unwrap();
        let leaf = t.create_widget(CellRect::new(2, 2, 10, 1));
        t.set_options(leaf, WidgetOptions::SELECTABLE);
        t.insert(inner, leaf).unwrap();

        t.set_state(inner, WidgetState::FOCUSED, true);
        t.set_state(leaf, WidgetState::FOCUSED, true);
        t.surface_mut().clear();
        t.set_state(leaf, WidgetState::CURSOR_VIS, true);
        assert!(
            t.surface()
                .events
                .contains(&DrawEvent::Cursor(leaf)),
            "cursor lands in the focused leaf"
        );

        t.surface_mut().clear();
        t.reset_cursor(outer);
        assert_eq!(
            t.surface().events,
            [DrawEvent::Cursor(leaf)],
            "groups forward the cursor to their current child"
        );
    }

    #[test]
    fn clip_restored_after_partial_redraw() {
        let (mut t, g) = desktop();
        let w = t.create_widget(CellRect::new(5, 5, 10, 10));
        t.insert(g, w).unwrap();
        t.move_to(w, 30, 7);
        assert_eq!(
            t.clip(g),
            Some(CellRect::new(0, 0, 80, 25)),
            "clip must be restored after the damage walk"
        );
    }
}
