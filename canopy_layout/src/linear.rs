// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear placement: children stacked along one axis.

use alloc::vec::Vec;

use crate::cell::{ChildSlot, Placement, fit_scale, place_in_cell};
use crate::descriptor::GridDescriptor;
use crate::params::{LinearParams, Orientation};

/// Positions each child in its main-axis track, aligned across the shared
/// cross-axis span. Children wider than a fixed cross-axis span are rescaled
/// to fit it.
pub(crate) fn layout(
    params: &LinearParams,
    desc: &GridDescriptor,
    slots: &[ChildSlot],
) -> Vec<Placement> {
    let vertical = params.orientation == Orientation::Vertical;
    let fixed_cross = if vertical {
        params.common.has_fixed_width()
    } else {
        params.common.has_fixed_height()
    };

    let mut placements = Vec::with_capacity(slots.len());
    for (i, slot) in slots.iter().enumerate() {
        let (cell_x, cell_top, cell_w, cell_h) = if vertical {
            let span = desc.column_tracks[0];
            let track = desc.row_tracks[i];
            (span.offset, track.offset, span.extent, track.extent)
        } else {
            let span = desc.row_tracks[0];
            let track = desc.column_tracks[i];
            (track.offset, span.offset, track.extent, span.extent)
        };

        let scale = if fixed_cross {
            let span_extent = if vertical { cell_w } else { cell_h };
            let pad = if vertical {
                slot.padding.horizontal()
            } else {
                slot.padding.vertical()
            };
            let room = (span_extent - pad).max(0.0);
            if vertical {
                fit_scale(slot, room, f64::INFINITY)
            } else {
                fit_scale(slot, f64::INFINITY, room)
            }
        } else {
            None
        };

        placements.push(Placement {
            id: slot.id,
            position: place_in_cell(cell_x, cell_top, cell_w, cell_h, slot),
            scale,
            visible: None,
        });
    }
    placements
}
