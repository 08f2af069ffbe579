// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rect placement: a single child in a sized slot.

use alloc::vec;
use alloc::vec::Vec;
use kurbo::Size;

use crate::cell::{ChildSlot, Placement, fit_scale, place_in_cell};
use crate::error::{Axis, LayoutError};
use crate::params::RectParams;

/// The overall slot size: each fixed dimension wins; a wrap-content
/// dimension takes the child's measured extent plus its padding.
pub(crate) fn area(params: &RectParams, slots: &[ChildSlot]) -> Size {
    let (child, padding) = match slots.first() {
        Some(slot) => (slot.bounds.size(), slot.padding),
        None => (Size::ZERO, canopy_geometry::Padding::ZERO),
    };
    let width = if params.common.has_fixed_width() {
        params.common.width
    } else {
        child.width + padding.horizontal()
    };
    let height = if params.common.has_fixed_height() {
        params.common.height
    } else {
        child.height + padding.vertical()
    };
    Size::new(width, height)
}

/// Places the one child inside the slot, shrinking it uniformly when a fixed
/// dimension leaves less content room than the child needs.
pub(crate) fn layout(
    params: &RectParams,
    slots: &[ChildSlot],
) -> Result<Vec<Placement>, LayoutError> {
    let Some(slot) = slots.first() else {
        return Ok(Vec::new());
    };
    debug_assert!(slots.len() == 1, "rect containers hold at most one child");

    let size = area(params, slots);
    let max_w = if params.common.has_fixed_width() {
        let room = size.width - slot.padding.horizontal();
        if room <= 0.0 {
            return Err(LayoutError::PaddingExceedsFixedSize {
                axis: Axis::Horizontal,
            });
        }
        room
    } else {
        f64::INFINITY
    };
    let max_h = if params.common.has_fixed_height() {
        let room = size.height - slot.padding.vertical();
        if room <= 0.0 {
            return Err(LayoutError::PaddingExceedsFixedSize {
                axis: Axis::Vertical,
            });
        }
        room
    } else {
        f64::INFINITY
    };

    Ok(vec![Placement {
        id: slot.id,
        position: place_in_cell(0.0, 0.0, size.width, size.height, slot),
        scale: fit_scale(slot, max_w, max_h),
        visible: None,
    }])
}
