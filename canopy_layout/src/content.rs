// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The leaf measurement contract.

use kurbo::Size;

/// Natural-size measurement for a leaf node's content.
///
/// This is the seam to the renderable world: buttons, text, images, models.
/// Implementations must be pure and idempotent between invalidations — the
/// tree caches the result and the stabilization driver relies on repeated
/// calls agreeing with each other once the node's transform has settled.
///
/// The reported size is *pre-scale*; the tree applies the node's local scale
/// when deriving measured bounds.
pub trait Content: core::fmt::Debug {
    /// Returns the natural, unscaled content size.
    fn natural_size(&self) -> Size;
}

/// A plain fixed-size leaf.
///
/// Hosts use this for placeholder or externally-measured renderables; the
/// test suites use it as the canonical leaf.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Block {
    size: Size,
}

impl Block {
    /// Creates a block with the given natural size.
    #[must_use]
    pub const fn new(size: Size) -> Self {
        Self { size }
    }
}

impl Content for Block {
    fn natural_size(&self) -> Size {
        self.size
    }
}
