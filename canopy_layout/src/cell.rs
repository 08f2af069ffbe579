// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement of one child inside its allotted cell.

use canopy_geometry::{Alignment, Bounds, Padding};
use kurbo::{Point, Vec2};

use crate::types::NodeId;

/// One child as the managers see it: measured bounds (pivot-relative,
/// post-scale), effective padding/alignment, and the current scales.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ChildSlot {
    pub(crate) id: NodeId,
    pub(crate) bounds: Bounds,
    pub(crate) padding: Padding,
    pub(crate) alignment: Alignment,
    /// Current local xy scale (manager-applied included).
    pub(crate) scale: Vec2,
    /// The scale last set by the host; fit-rescaling never exceeds it.
    pub(crate) authored_scale: Vec2,
}

/// A transform mutation a manager wants applied to one child.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Placement {
    pub(crate) id: NodeId,
    /// New local xy position (z is preserved).
    pub(crate) position: Point,
    /// New uniform xy scale, when the manager rescales the child.
    pub(crate) scale: Option<f64>,
    /// New visibility, when the manager toggles it (page views).
    pub(crate) visible: Option<bool>,
}

/// Computes the local position placing `slot` inside the cell whose left
/// edge is at `cell_x`, whose top edge is `cell_top` *below* the layout
/// origin, and whose full extent is `cell_w x cell_h`.
///
/// The child's content is aligned within the cell's content area (the cell
/// minus the item's own padding). Slack is clamped at zero, so an oversized
/// child never receives a negative leading offset.
pub(crate) fn place_in_cell(
    cell_x: f64,
    cell_top: f64,
    cell_w: f64,
    cell_h: f64,
    slot: &ChildSlot,
) -> Point {
    let child = slot.bounds.size();
    let content_w = cell_w - slot.padding.horizontal();
    let content_h = cell_h - slot.padding.vertical();

    let slack_x = (content_w - child.width).max(0.0);
    let slack_y = (content_h - child.height).max(0.0);

    let left = cell_x + slot.padding.left + slack_x * slot.alignment.horizontal.fraction();
    let top = -(cell_top + slot.padding.top + slack_y * slot.alignment.vertical.fraction());

    let target_center = Point::new(left + child.width / 2.0, top - child.height / 2.0);
    let bounds_center = slot.bounds.center();
    Point::new(
        target_center.x - bounds_center.x,
        target_center.y - bounds_center.y,
    )
}

/// Computes the uniform fit scale for a child whose content area is capped
/// at `max_w x max_h` (either may be infinite).
///
/// Mirrors the measured-vs-natural split: `bounds` are post-scale, so the
/// current scale is divided back out before fitting. The result never
/// exceeds the host-authored scale (aspect is preserved by taking the
/// smaller axis). Returns `None` when the child is degenerate or no change
/// is needed.
pub(crate) fn fit_scale(slot: &ChildSlot, max_w: f64, max_h: f64) -> Option<f64> {
    if slot.scale.x <= 0.0 || slot.scale.y <= 0.0 {
        return None;
    }
    let child = slot.bounds.size();
    let natural_w = child.width / slot.scale.x;
    let natural_h = child.height / slot.scale.y;
    if natural_w <= 0.0 || natural_h <= 0.0 {
        return None;
    }
    let scale_x = (max_w / natural_w).min(slot.authored_scale.x);
    let scale_y = (max_h / natural_h).min(slot.authored_scale.y);
    let uniform = scale_x.min(scale_y);
    let applied = (uniform - slot.scale.x).abs() > 1e-12 || (uniform - slot.scale.y).abs() > 1e-12;
    applied.then_some(uniform)
}

#[cfg(test)]
mod tests {
    use super::{ChildSlot, fit_scale, place_in_cell};
    use crate::types::NodeId;
    use canopy_geometry::{Alignment, Bounds, HAlign, Padding, VAlign};
    use kurbo::{Point, Vec2};

    fn slot(bounds: Bounds, padding: Padding, alignment: Alignment) -> ChildSlot {
        ChildSlot {
            id: NodeId::new(0, 1),
            bounds,
            padding,
            alignment,
            scale: Vec2::new(1.0, 1.0),
            authored_scale: Vec2::new(1.0, 1.0),
        }
    }

    #[test]
    fn centered_child_sits_mid_cell() {
        // A 1x1 child centered on its pivot, in a 2x2 cell at the origin.
        let s = slot(
            Bounds::new(-0.5, -0.5, 0.5, 0.5),
            Padding::ZERO,
            Alignment::CENTER,
        );
        let p = place_in_cell(0.0, 0.0, 2.0, 2.0, &s);
        assert_eq!(p, Point::new(1.0, -1.0));
    }

    #[test]
    fn left_top_alignment_hugs_the_padded_corner() {
        let s = slot(
            Bounds::new(-0.5, -0.5, 0.5, 0.5),
            Padding::new(0.1, 0.0, 0.0, 0.2),
            Alignment::new(VAlign::Top, HAlign::Left),
        );
        let p = place_in_cell(0.0, 0.0, 2.0, 2.0, &s);
        // Content left edge at 0.2, top edge at -0.1; pivot is bounds center.
        assert_eq!(p, Point::new(0.7, -0.6));
    }

    #[test]
    fn oversized_child_never_gets_negative_leading_offset() {
        // Child wider than the cell, right-aligned: slack clamps to zero, so
        // the child still starts at the content's left edge.
        let s = slot(
            Bounds::new(0.0, -1.0, 3.0, 0.0),
            Padding::ZERO,
            Alignment::new(VAlign::Top, HAlign::Right),
        );
        let p = place_in_cell(0.0, 0.0, 2.0, 1.0, &s);
        assert_eq!(p, Point::new(0.0, 0.0));
    }

    #[test]
    fn fit_scale_preserves_aspect_and_caps_at_authored() {
        let s = slot(
            Bounds::new(0.0, -1.0, 2.0, 0.0),
            Padding::ZERO,
            Alignment::CENTER,
        );
        assert_eq!(fit_scale(&s, 1.0, 1.0), Some(0.5));
        // Roomy cell: stays at the authored scale, so no change.
        assert_eq!(fit_scale(&s, 10.0, 10.0), None);
    }

    #[test]
    fn fit_scale_ignores_degenerate_children() {
        let s = slot(Bounds::ZERO, Padding::ZERO, Alignment::CENTER);
        assert_eq!(fit_scale(&s, 1.0, 1.0), None);
    }
}
