// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-item padding insets.

/// Insets around an item's content, in layout units.
///
/// All sides are expected to be non-negative; negative inputs are clamped to
/// zero at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Padding {
    /// Inset above the content.
    pub top: f64,
    /// Inset to the right of the content.
    pub right: f64,
    /// Inset below the content.
    pub bottom: f64,
    /// Inset to the left of the content.
    pub left: f64,
}

impl Padding {
    /// No padding on any side.
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// Creates padding from the four sides, clockwise from the top.
    #[must_use]
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top: top.max(0.0),
            right: right.max(0.0),
            bottom: bottom.max(0.0),
            left: left.max(0.0),
        }
    }

    /// The same padding on all four sides.
    #[must_use]
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Combined left and right inset.
    #[must_use]
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Combined top and bottom inset.
    #[must_use]
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}
