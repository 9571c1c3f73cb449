// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the widget tree: identifiers, flag sets, selection mode.

/// Identifier for a widget in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct WidgetId(pub(crate) u32, pub(crate) u32);

impl WidgetId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Runtime state bits of a widget.
    ///
    /// Toggled through [`WidgetTree::set_state`](crate::WidgetTree::set_state),
    /// which couples some bits to redraw and focus side effects.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct WidgetState: u16 {
        /// Widget is shown inside its owner.
        const VISIBLE    = 0b0000_0000_0001;
        /// Hardware cursor is visible while the widget is focused.
        const CURSOR_VIS = 0b0000_0000_0010;
        /// Cursor uses the insert (block) shape.
        const CURSOR_INS = 0b0000_0000_0100;
        /// Widget casts a drop shadow to its lower right.
        const SHADOW     = 0b0000_0000_1000;
        /// Widget belongs to the active window chain.
        const ACTIVE     = 0b0000_0001_0000;
        /// Widget is the selected child of its owner.
        const SELECTED   = 0b0000_0010_0000;
        /// Widget holds the input focus.
        const FOCUSED    = 0b0000_0100_0000;
        /// Widget is being dragged or resized interactively.
        const DRAGGING   = 0b0000_1000_0000;
        /// Widget rejects selection and input.
        const DISABLED   = 0b0001_0000_0000;
        /// Widget runs a modal event loop.
        const MODAL      = 0b0010_0000_0000;
        /// Widget is its owner's default action target.
        const DEFAULT    = 0b0100_0000_0000;
        /// Some part of the widget may reach the screen. Maintained by the
        /// tree; the per-cell truth is computed by
        /// [`WidgetTree::exposed`](crate::WidgetTree::exposed).
        const EXPOSED    = 0b1000_0000_0000;
    }
}

impl Default for WidgetState {
    fn default() -> Self {
        Self::VISIBLE
    }
}

bitflags::bitflags! {
    /// How a widget's edges track its owner's resizes.
    ///
    /// Each flag ties one edge to the owner's corresponding edge; an untied
    /// edge keeps its distance from the owner's origin. With [`GrowMode::REL`]
    /// the tied edges rescale proportionally instead of keeping margins.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct GrowMode: u8 {
        /// Left edge follows the owner's right edge.
        const LO_X = 0b0000_0001;
        /// Top edge follows the owner's bottom edge.
        const LO_Y = 0b0000_0010;
        /// Right edge follows the owner's right edge.
        const HI_X = 0b0000_0100;
        /// Bottom edge follows the owner's bottom edge.
        const HI_Y = 0b0000_1000;
        /// All four edges follow the owner.
        const ALL  = Self::LO_X.bits() | Self::LO_Y.bits()
                   | Self::HI_X.bits() | Self::HI_Y.bits();
        /// Tied edges move proportionally (round to nearest) rather than
        /// keeping a fixed margin.
        const REL  = 0b0001_0000;
    }
}

impl Default for GrowMode {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags::bitflags! {
    /// Interactive drag capabilities and limits.
    ///
    /// Stored and reported only; an event layer above the tree consumes these
    /// when translating pointer drags into [`locate`](crate::WidgetTree::locate)
    /// calls.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DragMode: u8 {
        /// Widget may be moved.
        const MOVE       = 0b0000_0001;
        /// Widget may be resized.
        const GROW       = 0b0000_0010;
        /// Left edge must stay inside the owner.
        const LIMIT_LO_X = 0b0001_0000;
        /// Top edge must stay inside the owner.
        const LIMIT_LO_Y = 0b0010_0000;
        /// Right edge must stay inside the owner.
        const LIMIT_HI_X = 0b0100_0000;
        /// Bottom edge must stay inside the owner.
        const LIMIT_HI_Y = 0b1000_0000;
        /// All four edges must stay inside the owner.
        const LIMIT_ALL  = Self::LIMIT_LO_X.bits() | Self::LIMIT_LO_Y.bits()
                         | Self::LIMIT_HI_X.bits() | Self::LIMIT_HI_Y.bits();
    }
}

impl Default for DragMode {
    fn default() -> Self {
        Self::LIMIT_LO_Y
    }
}

bitflags::bitflags! {
    /// Static behavior options of a widget.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct WidgetOptions: u16 {
        /// Widget can become its owner's current (selected) child.
        const SELECTABLE   = 0b00_0000_0001;
        /// Selecting the widget also raises it to the front.
        const TOP_SELECT   = 0b00_0000_0010;
        /// The click that selects the widget is also delivered to it.
        const FIRST_CLICK  = 0b00_0000_0100;
        /// Widget draws a frame around itself.
        const FRAMED       = 0b00_0000_1000;
        /// Widget sees events before the current child does.
        const PRE_PROCESS  = 0b00_0001_0000;
        /// Widget sees events the current child declined.
        const POST_PROCESS = 0b00_0010_0000;
        /// Widget's output may be buffered by the owner.
        const BUFFERED     = 0b00_0100_0000;
        /// Widget participates in tiling layouts.
        const TILEABLE     = 0b00_1000_0000;
        /// Center horizontally in the owner on insertion.
        const CENTER_X     = 0b01_0000_0000;
        /// Center vertically in the owner on insertion.
        const CENTER_Y     = 0b10_0000_0000;
        /// Center both ways on insertion.
        const CENTERED     = Self::CENTER_X.bits() | Self::CENTER_Y.bits();
    }
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self::empty()
    }
}

/// How a focus transition is split across
/// [`set_current`](crate::WidgetTree::set_current) calls.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectMode {
    /// Complete handoff: the old child is deselected, the new one selected.
    #[default]
    Normal,
    /// A modal child is entered; the old child keeps its selected state so it
    /// can be restored on leave.
    Enter,
    /// Focus is leaving; the old child is deselected but nothing new is
    /// selected yet.
    Leave,
}
