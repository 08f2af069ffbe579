// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the node tree: identifiers and flags.

/// Identifier for a node in the tree (generational).
///
/// Ids stay cheap to copy and compare; a removed node's slot may be reused,
/// in which case the generation bumps and old ids become stale. Stale ids are
/// rejected by accessors rather than aliasing the new occupant.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility, interaction, and page capability.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible (participates in sizing, placement, and hit testing).
        const VISIBLE     = 0b0000_0001;
        /// Node is interactive (may be returned as a hit target).
        const INTERACTIVE = 0b0000_0010;
        /// Node can act as a page inside a page view.
        const PAGE        = 0b0000_0100;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::INTERACTIVE
    }
}
