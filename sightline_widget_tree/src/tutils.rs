// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test support: a surface that records draw traffic.

use alloc::vec::Vec;
use sightline_geom::CellRect;

use crate::surface::DrawSurface;
use crate::types::WidgetId;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum DrawEvent {
    Draw(WidgetId),
    Cursor(WidgetId),
}

/// A [`DrawSurface`] that records every call, in order.
#[derive(Debug, Default)]
pub(crate) struct Recording {
    pub(crate) events: Vec<DrawEvent>,
}

impl Recording {
    /// The widgets drawn so far, in order, ignoring cursor traffic.
    pub(crate) fn drawn(&self) -> Vec<WidgetId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                DrawEvent::Draw(id) => Some(*id),
                DrawEvent::Cursor(_) => None,
            })
            .collect()
    }

    pub(crate) fn clear(&mut self) {
        self.events.clear();
    }
}

impl DrawSurface for Recording {
    fn draw(&mut self, id: WidgetId, _rect: CellRect) {
        self.events.push(DrawEvent::Draw(id));
    }

    fn draw_cursor(&mut self, id: WidgetId, _rect: CellRect) {
        self.events.push(DrawEvent::Cursor(id));
    }
}
