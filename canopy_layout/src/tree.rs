// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, transforms, measurement.

use alloc::boxed::Box;
use alloc::vec::Vec;
use canopy_geometry::{APPROX_EPSILON, Alignment, Bounds};
use glam::{DQuat, DVec3};
use kurbo::{Size, Vec2};

use crate::cell::{ChildSlot, Placement};
use crate::content::Content;
use crate::descriptor::{CellMetrics, GridDescriptor};
use crate::error::LayoutError;
use crate::params::LayoutKind;
use crate::types::{NodeFlags, NodeId};
use crate::{grid, linear, page, rect};

/// What a node is: a measurable leaf or a container with a layout strategy.
#[derive(Debug)]
pub(crate) enum NodeKind {
    /// A renderable leaf measured through its [`Content`].
    Leaf(Box<dyn Content>),
    /// A container that sizes and places its children.
    Container {
        layout: LayoutKind,
        /// Derived cell geometry, rebuilt on measure for linear/grid
        /// variants and shared with hit testing.
        descriptor: Option<GridDescriptor>,
    },
}

#[derive(Debug)]
pub(crate) struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub(crate) position: DVec3,
    pub(crate) rotation: DQuat,
    /// Current local scale; managers may lower the xy components.
    pub(crate) scale: DVec3,
    /// The scale last set by the host; manager rescaling never exceeds it.
    pub(crate) authored_scale: DVec3,
    pub(crate) flags: NodeFlags,
    /// Where the pivot anchors within a leaf's content.
    pub(crate) content_alignment: Alignment,
    pub(crate) kind: NodeKind,
    /// Cached measured bounds: pivot-relative and post-scale.
    pub(crate) measured: Option<Bounds>,
    pub(crate) needs_layout: bool,
}

impl Node {
    fn new(generation: u32, kind: NodeKind) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            scale: DVec3::ONE,
            authored_scale: DVec3::ONE,
            flags: NodeFlags::default(),
            content_alignment: Alignment::CENTER,
            kind,
            measured: None,
            needs_layout: true,
        }
    }
}

/// The layout node tree.
///
/// Nodes live in a generational arena: a removed node's slot may be reused,
/// in which case the generation bumps and old [`NodeId`]s become stale.
/// Stale ids are rejected with [`LayoutError::StaleNode`] (or `None` from
/// accessors) rather than aliasing the new occupant.
///
/// Structural or property mutations invalidate the measured-bounds cache
/// upward along the ancestor chain, never downward. Sizing and placement
/// happen when [`stabilize`](crate::stabilize) is run over a subtree.
///
/// ## Example
///
/// ```rust
/// use canopy_layout::{Block, LayoutKind, LinearParams, Tree, stabilize};
/// use kurbo::Size;
///
/// let mut tree = Tree::new();
/// let column = tree.insert_container(LayoutKind::Linear(LinearParams::default()));
/// let item = tree.insert_leaf(Box::new(Block::new(Size::new(1.0, 1.0))));
/// tree.add_child(column, item).unwrap();
/// stabilize(&mut tree, column).unwrap();
///
/// assert_eq!(tree.measured_bounds(column).unwrap().size(), Size::new(1.0, 1.0));
/// ```
#[derive(Debug, Default)]
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl Tree {
    /// Create a new empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a detached leaf node measured through `content`.
    pub fn insert_leaf(&mut self, content: Box<dyn Content>) -> NodeId {
        self.alloc(NodeKind::Leaf(content))
    }

    /// Insert a detached container node with the given layout strategy.
    pub fn insert_container(&mut self, layout: LayoutKind) -> NodeId {
        self.alloc(NodeKind::Container {
            layout,
            descriptor: None,
        })
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, kind));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, kind)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let idx = idx as u32;
        NodeId::new(idx, generation)
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// The child is detached from any previous parent first. Attachment is
    /// where single-child and page-capability invariants are enforced:
    /// a rect container rejects a second child with
    /// [`LayoutError::RectChildLimit`], and a page view rejects children
    /// without [`NodeFlags::PAGE`] with [`LayoutError::NotAPage`].
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        if !self.is_alive(parent) || !self.is_alive(child) {
            return Err(LayoutError::StaleNode);
        }
        debug_assert!(
            !self.is_ancestor_or_self(child, parent),
            "attaching a node under its own subtree"
        );
        match &self.node(parent).kind {
            NodeKind::Container {
                layout: LayoutKind::Rect(_),
                ..
            } if !self.node(parent).children.is_empty() => {
                return Err(LayoutError::RectChildLimit);
            }
            NodeKind::Container {
                layout: LayoutKind::PageView(_),
                ..
            } if !self.node(child).flags.contains(NodeFlags::PAGE) => {
                return Err(LayoutError::NotAPage);
            }
            NodeKind::Container { .. } => {}
            NodeKind::Leaf(_) => {
                debug_assert!(false, "leaf nodes do not take children");
            }
        }
        if let Some(old) = self.node(child).parent {
            self.unlink_parent(child, old);
            self.invalidate(old);
        }
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
        self.invalidate(parent);
        Ok(())
    }

    /// Remove a node and its subtree. Stale ids are a no-op.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
            self.invalidate(parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Returns true if `id` refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    #[must_use]
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        self.node(id).parent
    }

    /// Get the children of a node, or an empty slice if the node is stale.
    #[must_use]
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        if !self.is_alive(id) {
            return &[];
        }
        &self.node(id).children
    }

    /// Local position (the node's pivot in its parent's space).
    #[must_use]
    pub fn local_position(&self, id: NodeId) -> Option<DVec3> {
        self.node_opt(id).map(|n| n.position)
    }

    /// Set the local position. Transform-only: measured bounds are
    /// pivot-relative, so this does not invalidate any cache.
    pub fn set_local_position(&mut self, id: NodeId, position: DVec3) {
        if let Some(n) = self.node_opt_mut(id) {
            n.position = position;
        }
    }

    /// Local rotation.
    #[must_use]
    pub fn local_rotation(&self, id: NodeId) -> Option<DQuat> {
        self.node_opt(id).map(|n| n.rotation)
    }

    /// Set the local rotation. Layout happens in the node's own plane, so
    /// rotation only affects how rays enter the subtree.
    pub fn set_local_rotation(&mut self, id: NodeId, rotation: DQuat) {
        if let Some(n) = self.node_opt_mut(id) {
            n.rotation = rotation;
        }
    }

    /// Current local scale (manager rescaling included).
    #[must_use]
    pub fn local_scale(&self, id: NodeId) -> Option<DVec3> {
        self.node_opt(id).map(|n| n.scale)
    }

    /// Set the local scale. This records the value as the host-authored
    /// ceiling for manager rescaling and invalidates measured bounds.
    pub fn set_local_scale(&mut self, id: NodeId, scale: DVec3) {
        debug_assert!(
            scale.x > 0.0 && scale.y > 0.0 && scale.z > 0.0,
            "scale components must be positive"
        );
        let changed = match self.node_opt_mut(id) {
            Some(n) => {
                n.scale = scale;
                n.authored_scale = scale;
                true
            }
            None => false,
        };
        if changed {
            self.invalidate(id);
        }
    }

    /// Node flags.
    #[must_use]
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.flags)
    }

    /// Replace the node flags wholesale, invalidating on visibility change.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        let changed = match self.node_opt_mut(id) {
            Some(n) if n.flags != flags => {
                let visibility = n.flags.contains(NodeFlags::VISIBLE)
                    != flags.contains(NodeFlags::VISIBLE);
                n.flags = flags;
                visibility
            }
            _ => false,
        };
        if changed {
            self.invalidate(id);
        }
    }

    /// Whether the node is visible.
    #[must_use]
    pub fn visible(&self, id: NodeId) -> Option<bool> {
        self.flags(id).map(|f| f.contains(NodeFlags::VISIBLE))
    }

    /// Show or hide the node. Visibility participates in sizing when the
    /// parent skips invisible items, so this invalidates upward.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(mut flags) = self.flags(id) {
            flags.set(NodeFlags::VISIBLE, visible);
            self.set_flags(id, flags);
        }
    }

    /// The pivot anchor within a leaf's content.
    #[must_use]
    pub fn content_alignment(&self, id: NodeId) -> Option<Alignment> {
        self.node_opt(id).map(|n| n.content_alignment)
    }

    /// Set the pivot anchor within a leaf's content.
    pub fn set_content_alignment(&mut self, id: NodeId, alignment: Alignment) {
        let changed = match self.node_opt_mut(id) {
            Some(n) if n.content_alignment != alignment => {
                n.content_alignment = alignment;
                true
            }
            _ => false,
        };
        if changed {
            self.invalidate(id);
        }
    }

    /// Replace a leaf's content, invalidating its measure.
    pub fn set_content(&mut self, id: NodeId, content: Box<dyn Content>) {
        let replaced = match self.node_opt_mut(id) {
            Some(n) => match &mut n.kind {
                NodeKind::Leaf(slot) => {
                    *slot = content;
                    true
                }
                NodeKind::Container { .. } => {
                    debug_assert!(false, "set_content on a container");
                    false
                }
            },
            None => false,
        };
        if replaced {
            self.invalidate(id);
        }
    }

    /// The layout strategy of a container, or `None` for leaves and stale ids.
    #[must_use]
    pub fn layout_of(&self, id: NodeId) -> Option<&LayoutKind> {
        match &self.node_opt(id)?.kind {
            NodeKind::Container { layout, .. } => Some(layout),
            NodeKind::Leaf(_) => None,
        }
    }

    /// Replace a container's layout strategy.
    ///
    /// Switching to a rect layout with more than one attached child is
    /// rejected, keeping the single-child invariant intact.
    pub fn set_layout(&mut self, id: NodeId, new_layout: LayoutKind) -> Result<(), LayoutError> {
        if !self.is_alive(id) {
            return Err(LayoutError::StaleNode);
        }
        if matches!(new_layout, LayoutKind::Rect(_)) && self.node(id).children.len() > 1 {
            return Err(LayoutError::RectChildLimit);
        }
        match &mut self.node_mut(id).kind {
            NodeKind::Container { layout, descriptor } => {
                *layout = new_layout;
                *descriptor = None;
            }
            NodeKind::Leaf(_) => {
                debug_assert!(false, "set_layout on a leaf");
                return Ok(());
            }
        }
        self.invalidate(id);
        Ok(())
    }

    /// Cached measured bounds (pivot-relative, post-scale), if current.
    #[must_use]
    pub fn measured_bounds(&self, id: NodeId) -> Option<Bounds> {
        self.node_opt(id).and_then(|n| n.measured)
    }

    /// Whether the node's cached measure is stale.
    #[must_use]
    pub fn needs_layout(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(|n| n.needs_layout)
    }

    /// The cached cell geometry of a linear/grid container, if measured.
    #[must_use]
    pub fn grid_descriptor(&self, id: NodeId) -> Option<&GridDescriptor> {
        match &self.node_opt(id)?.kind {
            NodeKind::Container { descriptor, .. } => descriptor.as_ref(),
            NodeKind::Leaf(_) => None,
        }
    }

    /// Mark `id` and its ancestors as needing re-measure.
    ///
    /// Invalidation travels upward only: a parent's size depends on its
    /// children, never the other way around.
    pub fn invalidate(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(n) = self.node_opt_mut(node_id) else {
                return;
            };
            n.needs_layout = true;
            n.measured = None;
            if let NodeKind::Container { descriptor, .. } = &mut n.kind {
                *descriptor = None;
            }
            current = n.parent;
        }
    }

    /// Measure `id`, reusing cached bounds when nothing below it changed.
    pub fn measure(&mut self, id: NodeId) -> Result<Bounds, LayoutError> {
        if !self.is_alive(id) {
            return Err(LayoutError::StaleNode);
        }
        if !self.node(id).needs_layout
            && let Some(bounds) = self.node(id).measured
        {
            return Ok(bounds);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.measure(child)?;
        }
        self.refresh_measure(id)
    }

    /// Recompute and cache the measured bounds of `id`, assuming its
    /// children's measures are current. Used by the stabilization driver,
    /// which orders its own traversal.
    pub(crate) fn refresh_measure(&mut self, id: NodeId) -> Result<Bounds, LayoutError> {
        let bounds = self.compute_bounds(id)?;
        let n = self.node_mut(id);
        n.measured = Some(bounds);
        n.needs_layout = false;
        Ok(bounds)
    }

    fn compute_bounds(&mut self, id: NodeId) -> Result<Bounds, LayoutError> {
        let node = self.node(id);
        let scale = node.scale;
        match &node.kind {
            NodeKind::Leaf(content) => Ok(leaf_bounds(
                content.natural_size(),
                scale,
                node.content_alignment,
            )),
            NodeKind::Container { layout, .. } => {
                let layout = layout.clone();
                let slots = self.participating_slots(id, &layout);
                let (size, descriptor) = match &layout {
                    LayoutKind::Linear(p) => {
                        let desc = GridDescriptor::linear(p, &metrics(&slots))?;
                        (desc.size, Some(desc))
                    }
                    LayoutKind::Grid(p) => {
                        let desc = GridDescriptor::grid(p, &metrics(&slots))?;
                        (desc.size, Some(desc))
                    }
                    LayoutKind::Rect(p) => (rect::area(p, &slots), None),
                    LayoutKind::PageView(p) => (page::area(p, &slots), None),
                };
                if let NodeKind::Container {
                    descriptor: cache, ..
                } = &mut self.node_mut(id).kind
                {
                    *cache = descriptor;
                }
                // Container content runs rightward and downward from the pivot.
                Ok(Bounds::new(
                    0.0,
                    -size.height * scale.y,
                    size.width * scale.x,
                    0.0,
                ))
            }
        }
    }

    /// Run one placement over `id`'s children, applying position, scale, and
    /// visibility mutations in place. Returns whether anything moved beyond
    /// the approximation epsilon.
    pub(crate) fn place_children(&mut self, id: NodeId) -> Result<bool, LayoutError> {
        let node = self.node(id);
        let NodeKind::Container { layout, descriptor } = &node.kind else {
            return Ok(false);
        };
        let layout = layout.clone();
        let descriptor = descriptor.clone();
        let slots = self.participating_slots(id, &layout);
        let placements = match &layout {
            LayoutKind::Linear(p) => {
                let Some(desc) = descriptor else {
                    return Ok(false);
                };
                linear::layout(p, &desc, &slots)
            }
            LayoutKind::Grid(p) => {
                let Some(desc) = descriptor else {
                    return Ok(false);
                };
                grid::layout(p, &desc, &slots)
            }
            LayoutKind::Rect(p) => rect::layout(p, &slots)?,
            LayoutKind::PageView(p) => page::layout(p, &slots),
        };
        let mut changed = false;
        for placement in placements {
            changed |= self.apply_placement(&placement);
        }
        Ok(changed)
    }

    /// The children a container actually lays out, with their effective
    /// per-index padding and alignment resolved.
    ///
    /// Hit testing recomputes the same filtering, so descriptor cells and
    /// ray targets always agree.
    pub(crate) fn participating_slots(&self, id: NodeId, layout: &LayoutKind) -> Vec<ChildSlot> {
        let common = layout.common();
        // Page views manage visibility themselves; filtering there would
        // shift page indices.
        let skip = common.skip_invisible && !matches!(layout, LayoutKind::PageView(_));
        let mut slots = Vec::new();
        for &child_id in &self.node(id).children {
            let child = self.node(child_id);
            if skip && !child.flags.contains(NodeFlags::VISIBLE) {
                continue;
            }
            let index = slots.len();
            slots.push(ChildSlot {
                id: child_id,
                bounds: child.measured.unwrap_or(Bounds::ZERO),
                padding: common.padding_for(index),
                alignment: common.alignment_for(index),
                scale: Vec2::new(child.scale.x, child.scale.y),
                authored_scale: Vec2::new(child.authored_scale.x, child.authored_scale.y),
            });
        }
        slots
    }

    fn apply_placement(&mut self, placement: &Placement) -> bool {
        let node = self.node_mut(placement.id);
        let mut changed = false;
        if (node.position.x - placement.position.x).abs() > APPROX_EPSILON
            || (node.position.y - placement.position.y).abs() > APPROX_EPSILON
        {
            // z is the host's business; layout is planar.
            node.position.x = placement.position.x;
            node.position.y = placement.position.y;
            changed = true;
        }
        if let Some(scale) = placement.scale
            && ((node.scale.x - scale).abs() > APPROX_EPSILON
                || (node.scale.y - scale).abs() > APPROX_EPSILON)
        {
            node.scale.x = scale;
            node.scale.y = scale;
            node.needs_layout = true;
            changed = true;
        }
        if let Some(visible) = placement.visible
            && node.flags.contains(NodeFlags::VISIBLE) != visible
        {
            node.flags.set(NodeFlags::VISIBLE, visible);
            node.needs_layout = true;
            changed = true;
        }
        changed
    }

    /// The node's bounds in its own local (pre-scale) space, for hit tests.
    pub(crate) fn local_content_bounds(&self, id: NodeId) -> Option<Bounds> {
        let node = self.node_opt(id)?;
        let measured = node.measured?;
        if node.scale.x.abs() < APPROX_EPSILON || node.scale.y.abs() < APPROX_EPSILON {
            return None;
        }
        Some(Bounds::new(
            measured.left / node.scale.x,
            measured.bottom / node.scale.y,
            measured.right / node.scale.x,
            measured.top / node.scale.y,
        ))
    }

    // --- internals ---

    fn is_ancestor_or_self(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut current = Some(of);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.node(id).parent;
        }
        false
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    pub(crate) fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        (n.generation == id.1).then_some(n)
    }
}

/// A leaf's measured bounds: natural size scaled, then anchored around the
/// pivot per the content alignment (the aligned fraction of the content
/// sits before the pivot).
fn leaf_bounds(natural: Size, scale: DVec3, alignment: Alignment) -> Bounds {
    let width = natural.width * scale.x;
    let height = natural.height * scale.y;
    let left = -width * alignment.horizontal.fraction();
    let top = height * alignment.vertical.fraction();
    Bounds::new(left, top - height, left + width, top)
}

fn metrics(slots: &[ChildSlot]) -> Vec<CellMetrics> {
    slots
        .iter()
        .map(|s| CellMetrics::new(&s.bounds, s.padding))
        .collect()
}
