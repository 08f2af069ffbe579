// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid placement: children in flexible columns and rows.

use alloc::vec::Vec;

use crate::cell::{ChildSlot, Placement, fit_scale, place_in_cell};
use crate::descriptor::GridDescriptor;
use crate::params::GridParams;

/// Positions every child within its descriptor cell, optionally rescaling
/// children that no longer fit once a fixed dimension shrank their cell.
pub(crate) fn layout(
    params: &GridParams,
    desc: &GridDescriptor,
    slots: &[ChildSlot],
) -> Vec<Placement> {
    let mut placements = Vec::with_capacity(slots.len());
    for (i, slot) in slots.iter().enumerate() {
        let col = desc.column_tracks[desc.flow.column_of(i, desc.columns, desc.rows)];
        let row = desc.row_tracks[desc.flow.row_of(i, desc.columns, desc.rows)];

        let max_w = if params.common.has_fixed_width() {
            col.extent - slot.padding.horizontal()
        } else {
            f64::INFINITY
        };
        let max_h = if params.common.has_fixed_height() {
            row.extent - slot.padding.vertical()
        } else {
            f64::INFINITY
        };
        let scale = fit_scale(slot, max_w.max(0.0), max_h.max(0.0));

        placements.push(Placement {
            id: slot.id,
            position: place_in_cell(col.offset, row.offset, col.extent, row.extent, slot),
            scale,
            visible: None,
        });
    }
    placements
}
