// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ray hit-testing against a stabilized subtree.
//!
//! The ray is carried down the tree in each node's parent space, transformed
//! into local space, and intersected with the node's layout plane (z = 0).
//! Containers resolve the local point straight to a cell through the same
//! descriptor their children were placed with, so the ray lands in exactly
//! the cell geometry that layout produced.

use canopy_geometry::Ray;
use kurbo::Point;

use crate::descriptor::GridDescriptor;
use crate::params::LayoutKind;
use crate::tree::{NodeKind, Tree};
use crate::types::{NodeFlags, NodeId};

/// Hit test the subtree rooted at `node` with `ray` given in the node's
/// parent space.
///
/// Returns the deepest interactive node the ray strikes, with the strike
/// point in that node's local plane coordinates. Invisible subtrees are
/// never hit; a container whose children all miss is itself returned when it
/// is interactive and the point lies within its content bounds. Requires a
/// stabilized subtree; stale ids and unmeasured nodes simply miss.
#[must_use]
pub fn hit_test(tree: &Tree, node: NodeId, ray: &Ray) -> Option<(NodeId, Point)> {
    let n = tree.node_opt(node)?;
    if !n.flags.contains(NodeFlags::VISIBLE) {
        return None;
    }
    let local_ray = ray.into_local(n.position, n.rotation, n.scale)?;
    let point = local_ray.intersect_layout_plane()?;
    let bounds = tree.local_content_bounds(node)?;
    if !bounds.contains(point) {
        return None;
    }

    let child_hit = match &n.kind {
        NodeKind::Leaf(_) => None,
        NodeKind::Container { layout, descriptor } => match layout {
            LayoutKind::Linear(_) | LayoutKind::Grid(_) => descriptor
                .as_ref()
                .and_then(|desc| cell_child(tree, node, layout, desc, point))
                .and_then(|child| hit_test(tree, child, &local_ray)),
            LayoutKind::Rect(_) => tree
                .children_of(node)
                .first()
                .and_then(|&child| hit_test(tree, child, &local_ray)),
            LayoutKind::PageView(p) => tree
                .children_of(node)
                .get(p.visible_page)
                .and_then(|&child| hit_test(tree, child, &local_ray)),
        },
    };
    if child_hit.is_some() {
        return child_hit;
    }
    n.flags
        .contains(NodeFlags::INTERACTIVE)
        .then_some((node, point))
}

/// Resolves a local point to the child occupying the descriptor cell under
/// it, honoring the same skip-invisible filtering layout used.
fn cell_child(
    tree: &Tree,
    node: NodeId,
    layout: &LayoutKind,
    desc: &GridDescriptor,
    point: Point,
) -> Option<NodeId> {
    let column = desc.column_at(point.x)?;
    let row = desc.row_at(-point.y)?;
    let index = desc.cell_index(row, column)?;
    let slots = tree.participating_slots(node, layout);
    slots.get(index).map(|slot| slot.id)
}
