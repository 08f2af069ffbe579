// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stabilization driver: a bounded measure/place fixed point.
//!
//! Sizing and placement feed back into each other: placing a child may
//! rescale it, a rescaled child re-measures, and a re-measured child can
//! change its container's cell geometry. The driver runs measure and place
//! passes over the subtree until a full pass applies no change beyond
//! [`APPROX_EPSILON`](canopy_geometry::APPROX_EPSILON), or fails with
//! [`LayoutError::DidNotConverge`] once the pass budget is spent. Positions
//! from a failed run are never partially observable as "settled": callers
//! must treat the error as fatal for the pass.

use crate::error::LayoutError;
use crate::tree::Tree;
use crate::types::NodeId;

/// Upper bound on measure/place passes before giving up.
///
/// Well-formed layouts settle in two or three passes (one to measure, one to
/// apply rescales, one to confirm). The headroom covers deep nesting where a
/// rescale cascades level by level.
pub const MAX_STABILIZATION_PASSES: usize = 16;

/// Drive the subtree under `root` to a layout fixed point.
///
/// Returns the number of passes it took. Errors with
/// [`LayoutError::DidNotConverge`] when the subtree oscillates, and
/// propagates configuration errors (degenerate fixed sizes) from measuring.
pub fn stabilize(tree: &mut Tree, root: NodeId) -> Result<usize, LayoutError> {
    if !tree.is_alive(root) {
        return Err(LayoutError::StaleNode);
    }
    for pass in 1..=MAX_STABILIZATION_PASSES {
        let measured = measure_pass(tree, root)?;
        let placed = place_pass(tree, root)?;
        if !measured && !placed {
            return Ok(pass);
        }
    }
    Err(LayoutError::DidNotConverge {
        passes: MAX_STABILIZATION_PASSES,
    })
}

/// Post-order re-measure. Returns whether any bounds moved.
fn measure_pass(tree: &mut Tree, id: NodeId) -> Result<bool, LayoutError> {
    let mut changed = false;
    let children = tree.children_of(id).to_vec();
    for child in children {
        changed |= measure_pass(tree, child)?;
    }
    let before = tree.measured_bounds(id);
    let after = tree.refresh_measure(id)?;
    changed |= !matches!(before, Some(b) if b.approx_eq(&after));
    Ok(changed)
}

/// Pre-order placement. Returns whether any child transform changed.
fn place_pass(tree: &mut Tree, id: NodeId) -> Result<bool, LayoutError> {
    let mut changed = tree.place_children(id)?;
    let children = tree.children_of(id).to_vec();
    for child in children {
        changed |= place_pass(tree, child)?;
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::{MAX_STABILIZATION_PASSES, stabilize};
    use crate::content::{Block, Content};
    use crate::error::LayoutError;
    use crate::params::{CommonParams, GridParams, LayoutKind, LinearParams, RectParams};
    use crate::tree::Tree;
    use alloc::boxed::Box;
    use glam::DVec3;
    use kurbo::Size;

    fn leaf(tree: &mut Tree, w: f64, h: f64) -> crate::NodeId {
        tree.insert_leaf(Box::new(Block::new(Size::new(w, h))))
    }

    #[test]
    fn settles_and_is_idempotent() {
        let mut tree = Tree::new();
        let grid = tree.insert_container(LayoutKind::Grid(GridParams {
            columns: 2,
            ..GridParams::default()
        }));
        for _ in 0..4 {
            let item = leaf(&mut tree, 1.0, 1.0);
            tree.add_child(grid, item).unwrap();
        }
        let passes = stabilize(&mut tree, grid).unwrap();
        assert!(passes <= 3);

        let positions: alloc::vec::Vec<DVec3> = tree
            .children_of(grid)
            .to_vec()
            .into_iter()
            .map(|c| tree.local_position(c).unwrap())
            .collect();

        // A second run over a settled tree converges immediately and moves
        // nothing.
        assert_eq!(stabilize(&mut tree, grid).unwrap(), 1);
        for (child, before) in tree.children_of(grid).to_vec().into_iter().zip(positions) {
            assert_eq!(tree.local_position(child).unwrap(), before);
        }
    }

    #[test]
    fn rect_fit_converges_at_half_scale() {
        let mut tree = Tree::new();
        let rect = tree.insert_container(LayoutKind::Rect(RectParams {
            common: CommonParams {
                width: 1.0,
                height: 1.0,
                ..CommonParams::default()
            },
        }));
        let wide = leaf(&mut tree, 2.0, 1.0);
        tree.add_child(rect, wide).unwrap();
        stabilize(&mut tree, rect).unwrap();

        let scale = tree.local_scale(wide).unwrap();
        assert_eq!((scale.x, scale.y), (0.5, 0.5));
        // Post-scale the child spans 1.0 x 0.5, centered in the unit slot.
        let bounds = tree.measured_bounds(wide).unwrap();
        assert_eq!(bounds.size(), Size::new(1.0, 0.5));
        let position = tree.local_position(wide).unwrap();
        assert_eq!((position.x, position.y), (0.5, -0.5));
    }

    #[test]
    fn fixed_grid_rescale_reaches_a_fixed_point() {
        let mut tree = Tree::new();
        let grid = tree.insert_container(LayoutKind::Grid(GridParams {
            columns: 2,
            common: CommonParams {
                width: 2.0,
                ..CommonParams::default()
            },
            ..GridParams::default()
        }));
        let a = leaf(&mut tree, 2.0, 1.0);
        let b = leaf(&mut tree, 2.0, 1.0);
        tree.add_child(grid, a).unwrap();
        tree.add_child(grid, b).unwrap();
        stabilize(&mut tree, grid).unwrap();

        assert_eq!(tree.local_scale(a).unwrap().x, 0.5);
        assert_eq!(tree.local_scale(b).unwrap().x, 0.5);
        // Once rescaled, the natural columns fit the fixed width exactly.
        assert_eq!(tree.measured_bounds(grid).unwrap().width(), 2.0);
    }

    #[test]
    fn oscillating_content_is_a_convergence_error() {
        /// Grows by a whole unit every time it is measured.
        #[derive(Debug)]
        struct Restless(core::cell::Cell<f64>);
        impl Content for Restless {
            fn natural_size(&self) -> Size {
                let side = self.0.get() + 1.0;
                self.0.set(side);
                Size::new(side, side)
            }
        }

        let mut tree = Tree::new();
        let column = tree.insert_container(LayoutKind::Linear(LinearParams::default()));
        let restless = tree.insert_leaf(Box::new(Restless(core::cell::Cell::new(0.0))));
        tree.add_child(column, restless).unwrap();

        assert_eq!(
            stabilize(&mut tree, column),
            Err(LayoutError::DidNotConverge {
                passes: MAX_STABILIZATION_PASSES
            })
        );
    }

    #[test]
    fn stale_root_is_rejected() {
        let mut tree = Tree::new();
        let node = leaf(&mut tree, 1.0, 1.0);
        tree.remove(node);
        assert_eq!(stabilize(&mut tree, node), Err(LayoutError::StaleNode));
    }
}
