// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Geometry: value types shared across the Canopy layout engine.
//!
//! This crate holds the pure geometry vocabulary of the layout engine; it has
//! no behavior beyond arithmetic and comparisons.
//!
//! - [`Bounds`]: a y-up axis-aligned rectangle (`bottom <= top`), the unit in
//!   which node content is measured and cells are allotted.
//! - [`Padding`]: non-negative per-side insets around an item's content.
//! - [`Alignment`]: a horizontal/vertical pair controlling where content sits
//!   inside the slack of its cell.
//! - [`Ray`]: a world-space picking ray with helpers to move it into a node's
//!   local space and intersect the layout plane.
//!
//! Layout space is y-up: a container's content flows rightward along +x and
//! downward along -y, so a container occupying width `w` and height `h` spans
//! `left = 0, top = 0, right = w, bottom = -h`.
//!
//! 2D scalar types come from [`kurbo`] ([`kurbo::Point`], [`kurbo::Size`],
//! [`kurbo::Vec2`]); 3D ray and transform math uses [`glam`] (`DVec3`,
//! `DQuat`). All scalars are `f64` and are expected to be finite.
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

mod alignment;
mod bounds;
mod padding;
mod ray;

pub use alignment::{Alignment, HAlign, VAlign};
pub use bounds::{APPROX_EPSILON, Bounds};
pub use padding::Padding;
pub use ray::Ray;
