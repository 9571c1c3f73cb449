// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for structural mutations.

use thiserror::Error;

/// Invalid-usage errors reported by structural tree mutations.
///
/// Queries never produce these; an absent relationship (no owner, no current
/// child, traversal past a boundary) is `None`, not an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The identifier does not name a live widget.
    #[error("stale or unknown widget id")]
    Stale,
    /// A container operation was applied to a plain widget.
    #[error("widget is not a group")]
    NotAGroup,
    /// The widget to insert already has an owner.
    #[error("widget is already owned by a group")]
    AlreadyOwned,
    /// The referenced widget is not a member of the group.
    #[error("widget is not a member of this group")]
    NotAMember,
}
