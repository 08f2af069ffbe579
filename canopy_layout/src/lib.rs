// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Layout: a declarative layout core for AR and spatial UI trees.
//!
//! Canopy Layout sizes and places nodes that live on local 2D planes inside
//! a 3D scene: each node has a 3D transform (position, rotation, scale), but
//! a container arranges its children in its own y-up plane.
//!
//! - Represents a hierarchy of leaves (measured through the [`Content`]
//!   trait) and containers with a [`LayoutKind`] strategy: linear runs,
//!   grids, single-child rect slots, and page views.
//! - Measured bounds are pivot-relative and post-scale; they are cached and
//!   invalidated upward, never downward.
//! - [`stabilize`] drives a subtree to a layout fixed point with a bounded
//!   number of measure/place passes, applying child positions, uniform fit
//!   rescales, and page visibility in place.
//! - [`hit_test`] carries a 3D [`Ray`](canopy_geometry::Ray) down the tree,
//!   resolving container-local points straight to descriptor cells so picks
//!   and placement always agree.
//!
//! ## API overview
//!
//! - [`Tree`]: the generational node arena and measurement cache.
//! - [`NodeId`]: generational handle of a node.
//! - [`NodeFlags`]: visibility, interactivity, and page capability.
//! - [`Content`]: the leaf measurement contract; [`Block`] is the plain
//!   fixed-size implementation.
//! - [`LayoutKind`] with [`LinearParams`], [`GridParams`], [`RectParams`],
//!   and [`PageViewParams`]; shared knobs live in [`CommonParams`].
//! - [`GridDescriptor`]: derived per-track cell geometry, shared by
//!   placement and hit testing.
//! - [`LayoutError`]: configuration and convergence failures.
//!
//! Key operations:
//! - [`Tree::insert_leaf`] / [`Tree::insert_container`] → [`NodeId`]
//! - [`Tree::add_child`] (validates rect/page invariants) / [`Tree::remove`]
//! - [`Tree::set_local_position`] / [`Tree::set_local_rotation`] /
//!   [`Tree::set_local_scale`] / [`Tree::set_visible`] / [`Tree::set_layout`]
//! - [`Tree::measure`] / [`Tree::invalidate`] / [`Tree::measured_bounds`]
//! - [`stabilize`] → pass count, or [`LayoutError::DidNotConverge`]
//! - [`hit_test`] → deepest interactive node and its local strike point
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cell;
mod content;
mod descriptor;
mod error;
mod grid;
mod hit;
mod linear;
mod page;
mod params;
mod rect;
mod stabilize;
mod tree;
mod types;

pub use content::{Block, Content};
pub use descriptor::{Flow, GridDescriptor, Track};
pub use error::{Axis, LayoutError};
pub use hit::hit_test;
pub use params::{
    CommonParams, GridParams, LayoutKind, LinearParams, Orientation, PageViewParams, RectParams,
    WRAP_CONTENT,
};
pub use stabilize::{MAX_STABILIZATION_PASSES, stabilize};
pub use tree::Tree;
pub use types::{NodeFlags, NodeId};
