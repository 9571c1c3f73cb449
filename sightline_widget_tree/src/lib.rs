// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sightline Widget Tree: a widget/group hierarchy for terminal UIs, with
//! z-order, clipping, focus, and per-cell exposure.
//!
//! The tree is the interaction core of a text-mode UI stack: it knows where
//! every widget is, which widgets are stacked in front of which, what is
//! selected and focused, and which cells of a widget can actually reach the
//! screen. It does not paint anything itself; it drives a [`DrawSurface`]
//! you provide, calling it only for widgets that are at least partly
//! visible.
//!
//! - Widgets live in a generational arena and are addressed by [`WidgetId`];
//!   a *group* is a widget that owns a stack of children and clips them to
//!   its area.
//! - Geometry is integer character cells ([`CellRect`]), owner-relative.
//!   [`GrowMode`] ties a widget's edges to its owner's resizes.
//! - Visibility is two things: the [`WidgetState::VISIBLE`] intent bit, and
//!   [`WidgetTree::exposed`] — an exact per-cell occlusion test against
//!   ancestor clips and everything stacked in front.
//! - Selection and focus flow through [`WidgetTree::set_current`] and
//!   friends, with the modal enter/leave split of classic text UIs.
//!
//! ## API overview
//!
//! - [`WidgetTree`]: the arena and every operation; parameterized over the
//!   [`DrawSurface`] it repaints through (default [`NoDraw`]).
//! - [`WidgetId`]: generational handle of a widget.
//! - [`WidgetState`], [`WidgetOptions`], [`GrowMode`], [`DragMode`]: the
//!   per-widget bit sets.
//! - [`SelectMode`]: how a selection handoff is split across calls.
//! - [`TreeError`]: invalid-usage errors from structural mutation.
//!
//! Key operations:
//! - [`WidgetTree::create_widget`] / [`WidgetTree::create_group`] /
//!   [`WidgetTree::destroy`]
//! - [`WidgetTree::insert`] / [`WidgetTree::insert_before`] /
//!   [`WidgetTree::remove`]
//! - [`WidgetTree::locate`] / [`WidgetTree::move_to`] /
//!   [`WidgetTree::grow_to`] / [`WidgetTree::change_bounds`]
//! - [`WidgetTree::set_state`] / [`WidgetTree::show`] / [`WidgetTree::hide`]
//! - [`WidgetTree::set_current`] / [`WidgetTree::reset_current`] /
//!   [`WidgetTree::select`]
//! - [`WidgetTree::make_first`] / [`WidgetTree::put_in_front_of`]
//! - [`WidgetTree::exposed`]
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bounds;
mod error;
mod exposure;
mod state;
mod surface;
mod tree;
mod types;
mod zorder;

#[cfg(test)]
mod tutils;

pub use error::TreeError;
pub use sightline_geom::CellRect;
pub use surface::{DrawSurface, NoDraw};
pub use tree::WidgetTree;
pub use types::{DragMode, GrowMode, SelectMode, WidgetId, WidgetOptions, WidgetState};
