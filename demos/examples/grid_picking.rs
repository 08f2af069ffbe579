// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid layout + ray picking end to end.
//!
//! This example shows how to combine:
//! - `canopy_layout` for building and stabilizing a grid of leaves,
//! - `canopy_geometry::Ray` for picking cells with a 3D ray.
//!
//! Run:
//! - `cargo run -p canopy_demos --example grid_picking`

use canopy_geometry::Ray;
use canopy_layout::{Block, GridParams, LayoutKind, Tree, hit_test, stabilize};
use glam::DVec3;
use kurbo::Size;

fn main() {
    // A 3-column grid of unit tiles, one of them double-wide.
    let mut tree = Tree::new();
    let grid = tree.insert_container(LayoutKind::Grid(GridParams {
        columns: 3,
        ..GridParams::default()
    }));

    let mut tiles = Vec::new();
    for i in 0..7 {
        let size = if i == 4 {
            Size::new(2.0, 1.0)
        } else {
            Size::new(1.0, 1.0)
        };
        let tile = tree.insert_leaf(Box::new(Block::new(size)));
        tree.add_child(grid, tile).expect("grid takes any child");
        tiles.push(tile);
    }

    let passes = stabilize(&mut tree, grid).expect("static content settles");
    let bounds = tree.measured_bounds(grid).expect("measured after stabilize");
    println!("Grid settled in {passes} pass(es); content is {bounds:?}");
    for (i, &tile) in tiles.iter().enumerate() {
        let p = tree.local_position(tile).expect("tile is live");
        println!("  tile {i} at ({:.2}, {:.2})", p.x, p.y);
    }

    // Drop rays straight down the z axis onto a few spots.
    for (label, x, y) in [
        ("first tile", 0.5, -0.5),
        ("the wide tile", 2.0, -1.5),
        ("last row", 0.5, -2.5),
        ("past the right edge", 4.5, -0.5),
    ] {
        let ray = Ray {
            origin: DVec3::new(x, y, 5.0),
            direction: DVec3::new(0.0, 0.0, -1.0),
        };
        match hit_test(&tree, grid, &ray) {
            Some((node, point)) => {
                let which = tiles.iter().position(|&t| t == node);
                println!(
                    "{label}: hit {} at local ({:.2}, {:.2})",
                    which.map_or("the grid itself".to_string(), |i| format!("tile {i}")),
                    point.x,
                    point.y,
                );
            }
            None => println!("{label}: miss"),
        }
    }
}
