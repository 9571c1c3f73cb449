// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering backend consumed by the tree.

use sightline_geom::CellRect;

use crate::types::WidgetId;

/// Rendering backend the tree drives when widgets need repainting.
///
/// The tree decides *what* to repaint (exposure gating, clip narrowing,
/// incremental redraw on reorder); the surface decides *how*. Both methods
/// default to no-ops so the tree can run headless, which is how the tests
/// exercise it.
///
/// `rect` is the widget's bounds in its owner's coordinate space. Clipping
/// against ancestor bounds is the surface's concern; the tree guarantees only
/// that `draw` is not called for widgets with no exposed cell.
pub trait DrawSurface {
    /// Paint the widget's content.
    fn draw(&mut self, id: WidgetId, rect: CellRect) {
        let _ = (id, rect);
    }

    /// Position the hardware cursor for the focused widget.
    fn draw_cursor(&mut self, id: WidgetId, rect: CellRect) {
        let _ = (id, rect);
    }
}

/// A surface that draws nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoDraw;

impl DrawSurface for NoDraw {}
