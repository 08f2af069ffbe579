// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Props: dynamic property application for Canopy layout trees.
//!
//! Scripting hosts describe nodes as flat string-keyed property bags. This
//! crate translates such a bag into typed mutations on a
//! [`Tree`](canopy_layout::Tree): layout parameters, transforms, and
//! visibility.
//!
//! The boundary is deliberately forgiving, matching how declarative hosts
//! behave: unknown keys are ignored (and debug-logged), and values that do
//! not parse fall back to the documented default for their key instead of
//! erroring. Structural invariants are still enforced by the tree itself.
//!
//! ## Known keys
//!
//! | key | value | applies to |
//! |---|---|---|
//! | `width`, `height` | number (0 = wrap content) | containers |
//! | `columns`, `rows` | number | grids |
//! | `orientation` | `"vertical"` / `"horizontal"` | linear layouts |
//! | `defaultItemAlignment` | `"top-left"` style string | containers |
//! | `defaultItemPadding` | `[top, right, bottom, left]` | containers |
//! | `itemAlignment` | indexed alignment strings | containers |
//! | `itemPadding` | indexed padding quadruples | containers |
//! | `skipInvisibleItems` | boolean | containers |
//! | `visiblePage` | number | page views |
//! | `alignment` | `"top-left"` style string | any node |
//! | `localPosition`, `localScale` | `[x, y, z]` | any node |
//! | `visible` | boolean | any node |
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod apply;
mod value;

pub use apply::apply_props;
pub use value::{PropMap, PropValue};
