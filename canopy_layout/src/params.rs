// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout parameters: the per-manager configuration of a container.

use canopy_geometry::{Alignment, Padding};
use hashbrown::HashMap;

/// Sentinel dimension meaning "size to content".
pub const WRAP_CONTENT: f64 = 0.0;

/// Main-axis direction of a linear layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Children run from the top downward.
    #[default]
    Vertical,
    /// Children run from the left rightward.
    Horizontal,
}

/// Parameters shared by every layout variant.
///
/// `width`/`height` of [`WRAP_CONTENT`] (zero) size the container to its
/// content. `item_alignment` and `item_padding` are layout-wide defaults;
/// the override maps refine them per child index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommonParams {
    /// Fixed width, or [`WRAP_CONTENT`].
    pub width: f64,
    /// Fixed height, or [`WRAP_CONTENT`].
    pub height: f64,
    /// Default alignment of an item within its cell.
    pub item_alignment: Alignment,
    /// Default padding around an item's content.
    pub item_padding: Padding,
    /// Per-index alignment overrides.
    pub alignment_overrides: HashMap<usize, Alignment>,
    /// Per-index padding overrides.
    pub padding_overrides: HashMap<usize, Padding>,
    /// When set, invisible children are excluded from sizing and placement
    /// entirely (and from the cell geometry used for hit testing).
    pub skip_invisible: bool,
}

impl CommonParams {
    /// Whether the width is fixed rather than wrap-content.
    #[must_use]
    pub fn has_fixed_width(&self) -> bool {
        self.width > WRAP_CONTENT
    }

    /// Whether the height is fixed rather than wrap-content.
    #[must_use]
    pub fn has_fixed_height(&self) -> bool {
        self.height > WRAP_CONTENT
    }

    /// The effective alignment for the child at `index`.
    #[must_use]
    pub fn alignment_for(&self, index: usize) -> Alignment {
        self.alignment_overrides
            .get(&index)
            .copied()
            .unwrap_or(self.item_alignment)
    }

    /// The effective padding for the child at `index`.
    #[must_use]
    pub fn padding_for(&self, index: usize) -> Padding {
        self.padding_overrides
            .get(&index)
            .copied()
            .unwrap_or(self.item_padding)
    }
}

/// Parameters of a linear (vertical or horizontal) layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinearParams {
    /// Shared parameters.
    pub common: CommonParams,
    /// Main-axis direction.
    pub orientation: Orientation,
}

/// Parameters of a grid layout.
///
/// At most one of `columns`/`rows` drives the flow: a non-zero `columns`
/// takes precedence and children fill each row across its columns; otherwise
/// a non-zero `rows` makes children fill each column down its rows. Both
/// zero behaves as a single column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridParams {
    /// Shared parameters.
    pub common: CommonParams,
    /// Requested column count (0 = derived).
    pub columns: usize,
    /// Requested row count (0 = derived; ignored when `columns` is set).
    pub rows: usize,
}

/// Parameters of a rect layout (a sized single-child slot).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RectParams {
    /// Shared parameters; the item alignment/padding apply to the one child.
    pub common: CommonParams,
}

/// Parameters of a page view (one visible child at a time).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageViewParams {
    /// Shared parameters; the override maps act per page index.
    pub common: CommonParams,
    /// Index of the page that is shown; all siblings are hidden.
    pub visible_page: usize,
}

/// The layout strategy of a container, as a tagged union.
///
/// Keeping this a plain enum (rather than trait objects) keeps the
/// stabilization driver and the hit-test routine manager-agnostic while
/// every variant stays a pure function over measured child bounds.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutKind {
    /// Children in a single vertical or horizontal run.
    Linear(LinearParams),
    /// Children in flexible columns and rows.
    Grid(GridParams),
    /// A single child in a sized slot.
    Rect(RectParams),
    /// One visible page among several.
    PageView(PageViewParams),
}

impl LayoutKind {
    /// Shared parameters of whichever variant this is.
    #[must_use]
    pub fn common(&self) -> &CommonParams {
        match self {
            Self::Linear(p) => &p.common,
            Self::Grid(p) => &p.common,
            Self::Rect(p) => &p.common,
            Self::PageView(p) => &p.common,
        }
    }

    /// Mutable shared parameters of whichever variant this is.
    pub fn common_mut(&mut self) -> &mut CommonParams {
        match self {
            Self::Linear(p) => &mut p.common,
            Self::Grid(p) => &mut p.common,
            Self::Rect(p) => &mut p.common,
            Self::PageView(p) => &mut p.common,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CommonParams, WRAP_CONTENT};
    use canopy_geometry::{Alignment, HAlign, Padding, VAlign};

    #[test]
    fn wrap_content_is_not_fixed() {
        let mut common = CommonParams::default();
        assert_eq!(common.width, WRAP_CONTENT);
        assert!(!common.has_fixed_width());
        common.width = 0.5;
        assert!(common.has_fixed_width());
    }

    #[test]
    fn overrides_shadow_defaults() {
        let mut common = CommonParams {
            item_padding: Padding::uniform(0.1),
            ..CommonParams::default()
        };
        common
            .padding_overrides
            .insert(2, Padding::new(0.0, 0.0, 0.0, 0.4));
        common
            .alignment_overrides
            .insert(1, Alignment::new(VAlign::Top, HAlign::Left));

        assert_eq!(common.padding_for(0), Padding::uniform(0.1));
        assert_eq!(common.padding_for(2), Padding::new(0.0, 0.0, 0.0, 0.4));
        assert_eq!(common.alignment_for(0), Alignment::CENTER);
        assert_eq!(
            common.alignment_for(1),
            Alignment::new(VAlign::Top, HAlign::Left)
        );
    }
}
