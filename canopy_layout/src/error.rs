// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error taxonomy for layout configuration and convergence failures.

use core::fmt;

/// The axis a degenerate fixed-size configuration was detected on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The width / columns axis.
    Horizontal,
    /// The height / rows axis.
    Vertical,
}

/// Errors reported by tree mutation and layout passes.
///
/// Configuration errors are raised synchronously at the call that violates
/// the invariant, so scripting hosts can surface them to the author
/// immediately. Partial or unparseable *property values* are not errors;
/// those fall back to defaults at the property boundary instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutError {
    /// A second child was attached to a rect layout, which holds at most one.
    RectChildLimit,
    /// A node without the page capability was attached to a page view.
    NotAPage,
    /// A stale [`NodeId`](crate::NodeId) was passed where a live node is required.
    StaleNode,
    /// The stabilization loop exhausted its iteration budget without the
    /// children's bounds settling. This indicates oscillating layout rules,
    /// not transient state; stale positions are never returned.
    DidNotConverge {
        /// Number of measure/layout passes that were attempted.
        passes: usize,
    },
    /// A fixed layout dimension is too small to hold even the item padding,
    /// so content would have to collapse to or below zero size.
    PaddingExceedsFixedSize {
        /// The axis whose padding overflows the fixed dimension.
        axis: Axis,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RectChildLimit => write!(f, "rect layout accepts at most one child"),
            Self::NotAPage => write!(f, "page view children must be page-capable nodes"),
            Self::StaleNode => write!(f, "operation on a stale node id"),
            Self::DidNotConverge { passes } => {
                write!(f, "layout did not stabilize within {passes} passes")
            }
            Self::PaddingExceedsFixedSize { axis } => write!(
                f,
                "item padding exceeds the fixed {} dimension",
                match axis {
                    Axis::Horizontal => "width",
                    Axis::Vertical => "height",
                }
            ),
        }
    }
}

impl core::error::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use super::{Axis, LayoutError};
    use alloc::string::ToString as _;

    #[test]
    fn display_names_the_failing_axis() {
        let err = LayoutError::PaddingExceedsFixedSize {
            axis: Axis::Vertical,
        };
        assert!(err.to_string().contains("height"));
    }
}
