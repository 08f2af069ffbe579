// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driving a layout tree from flat property bags, the way a scripting host
//! would: build nodes, throw string-keyed props at them, stabilize, read
//! back the geometry.
//!
//! Run:
//! - `cargo run -p canopy_demos --example props_driven`

use canopy_layout::{Block, LayoutKind, LinearParams, Tree, stabilize};
use canopy_props::{PropValue, apply_props};
use kurbo::Size;

fn main() {
    let mut tree = Tree::new();
    let row = tree.insert_container(LayoutKind::Linear(LinearParams::default()));
    let label = tree.insert_leaf(Box::new(Block::new(Size::new(2.0, 0.5))));
    let icon = tree.insert_leaf(Box::new(Block::new(Size::new(0.5, 0.5))));
    tree.add_child(row, label).expect("linear takes any child");
    tree.add_child(row, icon).expect("linear takes any child");

    // Turn the column into a padded horizontal row, host-style.
    let props = [
        (
            "orientation".to_string(),
            PropValue::Text("horizontal".to_string()),
        ),
        (
            "defaultItemPadding".to_string(),
            PropValue::Numbers(vec![0.05, 0.1, 0.05, 0.1]),
        ),
        (
            "defaultItemAlignment".to_string(),
            PropValue::Text("bottom-center".to_string()),
        ),
        // Typo'd and unknown keys are ignored with a debug log.
        ("colour".to_string(), PropValue::Text("teal".to_string())),
    ]
    .into_iter()
    .collect();
    apply_props(&mut tree, row, &props);

    let passes = stabilize(&mut tree, row).expect("static content settles");
    println!("Row settled in {passes} pass(es)");
    println!("row bounds:   {:?}", tree.measured_bounds(row).unwrap());
    for (name, node) in [("label", label), ("icon", icon)] {
        let p = tree.local_position(node).unwrap();
        println!("{name} sits at ({:.2}, {:.2})", p.x, p.y);
    }
}
