// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: arena storage, ownership, traversal.

use alloc::vec::Vec;
use sightline_geom::CellRect;
use smallvec::SmallVec;

use crate::error::TreeError;
use crate::surface::{DrawSurface, NoDraw};
use crate::types::{DragMode, GrowMode, WidgetId, WidgetOptions, WidgetState};

/// Cells a drop shadow extends past the right edge.
pub(crate) const SHADOW_W: u32 = 2;
/// Cells a drop shadow extends past the bottom edge.
pub(crate) const SHADOW_H: u32 = 1;

/// Container data carried by group widgets.
#[derive(Clone, Debug)]
pub(crate) struct GroupData {
    /// Current clip, in the group's own coordinates. Narrowed temporarily
    /// during partial redraws, otherwise the full group area.
    pub(crate) clip: CellRect,
    /// Children in stacking order: index 0 is front-most, last is back-most.
    pub(crate) children: SmallVec<[WidgetId; 8]>,
    /// The selected child, if any qualifies.
    pub(crate) current: Option<WidgetId>,
}

#[derive(Clone, Debug)]
pub(crate) struct Widget {
    generation: u32,
    pub(crate) rect: CellRect,
    pub(crate) state: WidgetState,
    pub(crate) grow_mode: GrowMode,
    pub(crate) drag_mode: DragMode,
    pub(crate) options: WidgetOptions,
    pub(crate) owner: Option<WidgetId>,
    /// `Some` for groups, `None` for plain widgets.
    pub(crate) group: Option<GroupData>,
}

impl Widget {
    fn new(generation: u32, rect: CellRect, group: Option<GroupData>) -> Self {
        let options = if group.is_some() {
            WidgetOptions::SELECTABLE
        } else {
            WidgetOptions::default()
        };
        Self {
            generation,
            rect,
            state: WidgetState::default(),
            grow_mode: GrowMode::default(),
            drag_mode: DragMode::default(),
            options,
            owner: None,
            group,
        }
    }
}

/// The widget/group tree.
///
/// Widgets live in a slot arena and are addressed by generational
/// [`WidgetId`]s; ownership between widgets is expressed as ids, never
/// references, so the owner/child relationship cannot form reference cycles.
/// A *group* is a widget that owns children and clips them to its area; any
/// widget, group or plain, can be inserted into a group.
///
/// The type parameter `S` is the [`DrawSurface`] the tree repaints through.
/// It defaults to [`NoDraw`], so layout-only hosts and tests can use
/// [`WidgetTree`] without naming a surface.
///
/// ## Example
///
/// ```rust
/// use sightline_widget_tree::{CellRect, WidgetState, WidgetTree};
///
/// let mut tree = WidgetTree::new();
/// let desktop = tree.create_group(CellRect::new(0, 0, 80, 25));
/// tree.set_state(desktop, WidgetState::EXPOSED, true);
///
/// let panel = tree.create_widget(CellRect::new(5, 5, 30, 10));
/// tree.insert(desktop, panel).unwrap();
/// assert!(tree.exposed(panel));
/// ```
pub struct WidgetTree<S: DrawSurface = NoDraw> {
    /// slots
    nodes: Vec<Option<Widget>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    pub(crate) surface: S,
}

impl<S: DrawSurface> core::fmt::Debug for WidgetTree<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("WidgetTree")
            .field("widgets_total", &total)
            .field("widgets_alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl WidgetTree {
    /// Create an empty tree with the [`NoDraw`] surface.
    pub fn new() -> Self {
        Self::with_surface(NoDraw)
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DrawSurface> WidgetTree<S> {
    /// Create an empty tree that repaints through `surface`.
    pub fn with_surface(surface: S) -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            surface,
        }
    }

    /// Access the draw surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Access the draw surface mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn alloc(&mut self, rect: CellRect, group: Option<GroupData>) -> WidgetId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Widget::new(generation, rect, group));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "WidgetId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Widget::new(generation, rect, group)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "WidgetId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        WidgetId::new(idx, generation)
    }

    /// Create an unowned plain widget with the given bounds.
    ///
    /// New widgets start [`VISIBLE`](WidgetState::VISIBLE) with drag mode
    /// [`LIMIT_LO_Y`](DragMode::LIMIT_LO_Y) and no options;
    /// [`EXPOSED`](WidgetState::EXPOSED) is off until the widget is shown
    /// inside an exposed owner.
    pub fn create_widget(&mut self, rect: CellRect) -> WidgetId {
        self.alloc(rect, None)
    }

    /// Create an unowned group with the given bounds.
    ///
    /// Groups get the plain-widget defaults plus
    /// [`SELECTABLE`](WidgetOptions::SELECTABLE), and a clip covering their
    /// full area.
    pub fn create_group(&mut self, rect: CellRect) -> WidgetId {
        let clip = CellRect::new(0, 0, rect.w, rect.h);
        self.alloc(
            rect,
            Some(GroupData {
                clip,
                children: SmallVec::new(),
                current: None,
            }),
        )
    }

    /// Destroy a widget and, recursively, everything it owns.
    ///
    /// The widget is unlinked from its owner structurally (no redraw is
    /// issued); all ids into the destroyed subtree become stale.
    pub fn destroy(&mut self, id: WidgetId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(owner) = self.node(id).owner {
            self.unlink_view(owner, id);
        }
        log::trace!("destroy {id:?}");
        self.free_subtree(id);
    }

    fn free_subtree(&mut self, id: WidgetId) {
        let children: Vec<WidgetId> = match self.node(id).group.as_ref() {
            Some(g) => g.children.iter().copied().collect(),
            None => Vec::new(),
        };
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Whether `id` names a live widget.
    pub fn is_alive(&self, id: WidgetId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|slot| slot.as_ref())
            .is_some_and(|w| w.generation == id.1)
    }

    /// Access a widget; panics if `id` is stale.
    pub(crate) fn node(&self, id: WidgetId) -> &Widget {
        self.nodes[id.idx()].as_ref().expect("dangling WidgetId")
    }

    /// Access a widget mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: WidgetId) -> &mut Widget {
        self.nodes[id.idx()].as_mut().expect("dangling WidgetId")
    }

    fn node_opt_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        if !self.is_alive(id) {
            return None;
        }
        self.nodes[id.idx()].as_mut()
    }

    /// Container data of a group; panics if `id` is stale or not a group.
    pub(crate) fn group(&self, id: WidgetId) -> &GroupData {
        self.node(id).group.as_ref().expect("widget is not a group")
    }

    pub(crate) fn group_mut(&mut self, id: WidgetId) -> &mut GroupData {
        self.node_mut(id)
            .group
            .as_mut()
            .expect("widget is not a group")
    }

    fn ensure_alive(&self, id: WidgetId) -> Result<(), TreeError> {
        if self.is_alive(id) {
            Ok(())
        } else {
            Err(TreeError::Stale)
        }
    }

    fn ensure_group(&self, id: WidgetId) -> Result<(), TreeError> {
        self.ensure_alive(id)?;
        if self.node(id).group.is_some() {
            Ok(())
        } else {
            Err(TreeError::NotAGroup)
        }
    }

    // ---------------------------------------------------------------------
    // Accessors

    /// The widget's bounds in its owner's coordinates.
    pub fn rect(&self, id: WidgetId) -> Option<CellRect> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.node(id).rect)
    }

    /// The widget's top-left corner in its owner's coordinates.
    pub fn position(&self, id: WidgetId) -> Option<(i32, i32)> {
        self.rect(id).map(|r| (r.x, r.y))
    }

    /// The widget's size in cells.
    pub fn size(&self, id: WidgetId) -> Option<(u32, u32)> {
        self.rect(id).map(|r| (r.w, r.h))
    }

    /// The widget's full state bit set.
    pub fn states(&self, id: WidgetId) -> Option<WidgetState> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.node(id).state)
    }

    /// Whether all bits of `flag` are set. `false` for stale ids.
    pub fn has_state(&self, id: WidgetId, flag: WidgetState) -> bool {
        self.states(id).is_some_and(|s| s.contains(flag))
    }

    /// The widget's grow mode.
    pub fn grow_mode(&self, id: WidgetId) -> Option<GrowMode> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.node(id).grow_mode)
    }

    /// Update the grow mode. Takes effect on the owner's next resize.
    pub fn set_grow_mode(&mut self, id: WidgetId, mode: GrowMode) {
        if let Some(n) = self.node_opt_mut(id) {
            n.grow_mode = mode;
        }
    }

    /// The widget's drag mode.
    pub fn drag_mode(&self, id: WidgetId) -> Option<DragMode> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.node(id).drag_mode)
    }

    /// Update the drag mode.
    pub fn set_drag_mode(&mut self, id: WidgetId, mode: DragMode) {
        if let Some(n) = self.node_opt_mut(id) {
            n.drag_mode = mode;
        }
    }

    /// The widget's option bits.
    pub fn options(&self, id: WidgetId) -> Option<WidgetOptions> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.node(id).options)
    }

    /// Update the option bits.
    pub fn set_options(&mut self, id: WidgetId, options: WidgetOptions) {
        if let Some(n) = self.node_opt_mut(id) {
            n.options = options;
        }
    }

    /// The group owning this widget, or `None` for unowned widgets.
    pub fn owner(&self, id: WidgetId) -> Option<WidgetId> {
        if !self.is_alive(id) {
            return None;
        }
        self.node(id).owner
    }

    /// Whether the widget is a group.
    pub fn is_group(&self, id: WidgetId) -> bool {
        self.is_alive(id) && self.node(id).group.is_some()
    }

    /// A group's clip rectangle, in its own coordinates.
    pub fn clip(&self, id: WidgetId) -> Option<CellRect> {
        if !self.is_group(id) {
            return None;
        }
        Some(self.group(id).clip)
    }

    /// Replace a group's clip rectangle.
    pub fn set_clip(&mut self, id: WidgetId, clip: CellRect) -> Result<(), TreeError> {
        self.ensure_group(id)?;
        self.group_mut(id).clip = clip;
        Ok(())
    }

    /// A group's selected child.
    pub fn current(&self, id: WidgetId) -> Option<WidgetId> {
        if !self.is_group(id) {
            return None;
        }
        self.group(id).current
    }

    /// Number of children in a group.
    pub fn member_count(&self, id: WidgetId) -> Option<usize> {
        if !self.is_group(id) {
            return None;
        }
        Some(self.group(id).children.len())
    }

    /// The `n`-th child of a group, counting from the front-most.
    pub fn member(&self, id: WidgetId, n: usize) -> Option<WidgetId> {
        if !self.is_group(id) {
            return None;
        }
        self.group(id).children.get(n).copied()
    }

    /// A child's position in its owner's stacking order (0 = front-most).
    pub fn position_of(&self, group: WidgetId, w: WidgetId) -> Option<usize> {
        if !self.is_group(group) {
            return None;
        }
        self.group(group).children.iter().position(|&c| c == w)
    }

    // ---------------------------------------------------------------------
    // Traversal

    /// The front-most (top) child of a group.
    pub fn first(&self, group: WidgetId) -> Option<WidgetId> {
        if !self.is_group(group) {
            return None;
        }
        self.group(group).children.first().copied()
    }

    /// The back-most (bottom) child of a group.
    pub fn last(&self, group: WidgetId) -> Option<WidgetId> {
        if !self.is_group(group) {
            return None;
        }
        self.group(group).children.last().copied()
    }

    /// The next sibling toward the back, wrapping from the back-most child to
    /// the front-most. `None` for unowned widgets.
    pub fn next(&self, id: WidgetId) -> Option<WidgetId> {
        let (group, pos) = self.sibling_position(id)?;
        let children = &self.group(group).children;
        Some(children[(pos + 1) % children.len()])
    }

    /// The next sibling toward the front, wrapping from the front-most child
    /// to the back-most. `None` for unowned widgets.
    pub fn previous(&self, id: WidgetId) -> Option<WidgetId> {
        let (group, pos) = self.sibling_position(id)?;
        let children = &self.group(group).children;
        Some(children[(pos + children.len() - 1) % children.len()])
    }

    /// The next sibling toward the back, without wrapping: `None` for the
    /// back-most child (and for unowned widgets).
    pub fn next_view(&self, id: WidgetId) -> Option<WidgetId> {
        let (group, pos) = self.sibling_position(id)?;
        self.group(group).children.get(pos + 1).copied()
    }

    /// The next sibling toward the front, without wrapping: `None` for the
    /// front-most child (and for unowned widgets).
    pub fn previous_view(&self, id: WidgetId) -> Option<WidgetId> {
        let (group, pos) = self.sibling_position(id)?;
        if pos == 0 {
            return None;
        }
        Some(self.group(group).children[pos - 1])
    }

    fn sibling_position(&self, id: WidgetId) -> Option<(WidgetId, usize)> {
        let owner = self.owner(id)?;
        let pos = self.position_of(owner, id)?;
        Some((owner, pos))
    }

    // ---------------------------------------------------------------------
    // Structural mutation

    fn check_insert(
        &self,
        group: WidgetId,
        w: WidgetId,
        before: Option<WidgetId>,
    ) -> Result<(), TreeError> {
        self.ensure_group(group)?;
        self.ensure_alive(w)?;
        if self.node(w).owner.is_some() {
            return Err(TreeError::AlreadyOwned);
        }
        if let Some(b) = before
            && (!self.is_alive(b) || self.node(b).owner != Some(group))
        {
            return Err(TreeError::NotAMember);
        }
        Ok(())
    }

    /// Link `w` into `group` without any redraw or state coupling.
    ///
    /// With `before = None` the widget becomes the new front-most child;
    /// otherwise it is placed immediately in front of `before`. Prefer
    /// [`insert`](Self::insert)/[`insert_before`](Self::insert_before), which
    /// also handle centering and visibility.
    pub fn insert_view(
        &mut self,
        group: WidgetId,
        w: WidgetId,
        before: Option<WidgetId>,
    ) -> Result<(), TreeError> {
        self.check_insert(group, w, before)?;
        self.link_view(group, w, before);
        Ok(())
    }

    /// Unlink `w` from `group` without any redraw or state coupling.
    ///
    /// Clears the group's current child if it pointed at `w`. Prefer
    /// [`remove`](Self::remove), which repaints what `w` was covering.
    pub fn remove_view(&mut self, group: WidgetId, w: WidgetId) -> Result<(), TreeError> {
        self.ensure_group(group)?;
        self.ensure_alive(w)?;
        if self.node(w).owner != Some(group) {
            return Err(TreeError::NotAMember);
        }
        self.unlink_view(group, w);
        Ok(())
    }

    pub(crate) fn link_view(&mut self, group: WidgetId, w: WidgetId, before: Option<WidgetId>) {
        self.node_mut(w).owner = Some(group);
        let at = before
            .and_then(|b| self.position_of(group, b))
            .unwrap_or(0);
        self.group_mut(group).children.insert(at, w);
        log::trace!("link {w:?} into {group:?} at {at}");
    }

    pub(crate) fn unlink_view(&mut self, group: WidgetId, w: WidgetId) {
        let g = self.group_mut(group);
        if let Some(pos) = g.children.iter().position(|&c| c == w) {
            g.children.remove(pos);
        }
        if g.current == Some(w) {
            g.current = None;
        }
        self.node_mut(w).owner = None;
        log::trace!("unlink {w:?} from {group:?}");
    }

    /// Insert `w` as the new front-most child of `group`.
    ///
    /// See [`insert_before`](Self::insert_before) for the full protocol.
    pub fn insert(&mut self, group: WidgetId, w: WidgetId) -> Result<(), TreeError> {
        self.insert_before(group, w, None)
    }

    /// Insert `w` into `group`, immediately in front of `before` (or
    /// front-most for `None`).
    ///
    /// If `w` carries [`CENTER_X`](WidgetOptions::CENTER_X)/
    /// [`CENTER_Y`](WidgetOptions::CENTER_Y) it is first centered in the
    /// group. The widget is inserted hidden and then re-shown if it was
    /// visible, so the insertion paints exactly once, with the widget already
    /// in place.
    pub fn insert_before(
        &mut self,
        group: WidgetId,
        w: WidgetId,
        before: Option<WidgetId>,
    ) -> Result<(), TreeError> {
        self.check_insert(group, w, before)?;
        let was_visible = self.node(w).state.contains(WidgetState::VISIBLE);
        let options = self.node(w).options;
        if options.intersects(WidgetOptions::CENTERED) {
            let (gw, gh) = (self.node(group).rect.w, self.node(group).rect.h);
            let mut r = self.node(w).rect;
            if options.contains(WidgetOptions::CENTER_X) {
                r.x = (gw as i32 - r.w as i32) / 2;
            }
            if options.contains(WidgetOptions::CENTER_Y) {
                r.y = (gh as i32 - r.h as i32) / 2;
            }
            self.node_mut(w).rect = r;
        }
        self.hide(w);
        self.link_view(group, w, before);
        if was_visible {
            self.show(w);
        }
        Ok(())
    }

    /// Remove `w` from `group`, repainting what it was covering.
    ///
    /// The widget keeps its `VISIBLE` bit (so re-inserting it shows it again)
    /// but is hidden first, which redraws the area underneath and moves the
    /// group's selection to the next qualifying child.
    pub fn remove(&mut self, group: WidgetId, w: WidgetId) -> Result<(), TreeError> {
        self.ensure_group(group)?;
        self.ensure_alive(w)?;
        if self.node(w).owner != Some(group) {
            return Err(TreeError::NotAMember);
        }
        let was_visible = self.node(w).state.contains(WidgetState::VISIBLE);
        self.hide(w);
        self.unlink_view(group, w);
        if was_visible {
            self.show(w);
        }
        Ok(())
    }
}
