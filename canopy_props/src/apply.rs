// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Applying a property bag to one node.

use canopy_geometry::{Alignment, Padding};
use canopy_layout::{CommonParams, LayoutKind, NodeId, Orientation, Tree, WRAP_CONTENT};
use glam::DVec3;
use hashbrown::HashMap;

use crate::value::{PropMap, PropValue};

/// Apply every recognized property in `props` to `node`.
///
/// Unknown keys are ignored and debug-logged. Values of the wrong shape fall
/// back to the key's documented default. Keys that do not apply to the
/// node's kind (layout keys on a leaf, `visiblePage` on a grid) are ignored.
/// Structural invariants stay with the tree: nothing here can break the
/// rect single-child or page-capability rules.
pub fn apply_props(tree: &mut Tree, node: NodeId, props: &PropMap) {
    if !tree.is_alive(node) {
        log::debug!("ignoring property bag for a stale node");
        return;
    }
    let mut layout = tree.layout_of(node).cloned();
    let mut layout_changed = false;

    for (key, value) in props {
        match key.as_str() {
            "width" => with_common(&mut layout, &mut layout_changed, key, |c| {
                c.width = dimension(value);
            }),
            "height" => with_common(&mut layout, &mut layout_changed, key, |c| {
                c.height = dimension(value);
            }),
            "defaultItemAlignment" => with_common(&mut layout, &mut layout_changed, key, |c| {
                c.item_alignment = alignment(value);
            }),
            "defaultItemPadding" => with_common(&mut layout, &mut layout_changed, key, |c| {
                c.item_padding = padding(value);
            }),
            "itemAlignment" => with_common(&mut layout, &mut layout_changed, key, |c| {
                c.alignment_overrides = indexed(value, |v| v.as_text().and_then(Alignment::parse));
            }),
            "itemPadding" => with_common(&mut layout, &mut layout_changed, key, |c| {
                c.padding_overrides =
                    indexed(value, |v| v.as_numbers::<4>().map(quad_to_padding));
            }),
            "skipInvisibleItems" => with_common(&mut layout, &mut layout_changed, key, |c| {
                c.skip_invisible = value.as_bool().unwrap_or(false);
            }),
            "columns" => match &mut layout {
                Some(LayoutKind::Grid(p)) => {
                    p.columns = value.as_index().unwrap_or(0);
                    layout_changed = true;
                }
                _ => log::debug!("ignoring `columns` on a non-grid node"),
            },
            "rows" => match &mut layout {
                Some(LayoutKind::Grid(p)) => {
                    p.rows = value.as_index().unwrap_or(0);
                    layout_changed = true;
                }
                _ => log::debug!("ignoring `rows` on a non-grid node"),
            },
            "orientation" => match &mut layout {
                Some(LayoutKind::Linear(p)) => {
                    p.orientation = match value.as_text() {
                        Some("horizontal") => Orientation::Horizontal,
                        _ => Orientation::Vertical,
                    };
                    layout_changed = true;
                }
                _ => log::debug!("ignoring `orientation` on a non-linear node"),
            },
            "visiblePage" => match &mut layout {
                Some(LayoutKind::PageView(p)) => {
                    p.visible_page = value.as_index().unwrap_or(0);
                    layout_changed = true;
                }
                _ => log::debug!("ignoring `visiblePage` on a non-page-view node"),
            },
            "alignment" => tree.set_content_alignment(node, alignment(value)),
            "localPosition" => {
                let [x, y, z] = value.as_numbers::<3>().unwrap_or([0.0; 3]);
                tree.set_local_position(node, DVec3::new(x, y, z));
            }
            "localScale" => {
                let scale = match value.as_numbers::<3>() {
                    Some([x, y, z]) if x > 0.0 && y > 0.0 && z > 0.0 => DVec3::new(x, y, z),
                    _ => DVec3::ONE,
                };
                tree.set_local_scale(node, scale);
            }
            "visible" => tree.set_visible(node, value.as_bool().unwrap_or(true)),
            _ => log::debug!("ignoring unknown property `{key}`"),
        }
    }

    if layout_changed
        && let Some(layout) = layout
        && let Err(err) = tree.set_layout(node, layout)
    {
        log::debug!("could not apply layout properties: {err}");
    }
}

fn with_common(
    layout: &mut Option<LayoutKind>,
    changed: &mut bool,
    key: &str,
    f: impl FnOnce(&mut CommonParams),
) {
    match layout {
        Some(kind) => {
            f(kind.common_mut());
            *changed = true;
        }
        None => log::debug!("ignoring `{key}` on a leaf node"),
    }
}

/// A non-negative dimension, or wrap-content for anything else.
fn dimension(value: &PropValue) -> f64 {
    value
        .as_number()
        .filter(|v| *v >= 0.0)
        .unwrap_or(WRAP_CONTENT)
}

fn alignment(value: &PropValue) -> Alignment {
    value
        .as_text()
        .and_then(Alignment::parse)
        .unwrap_or(Alignment::CENTER)
}

fn padding(value: &PropValue) -> Padding {
    value
        .as_numbers::<4>()
        .map(quad_to_padding)
        .unwrap_or(Padding::ZERO)
}

fn quad_to_padding([top, right, bottom, left]: [f64; 4]) -> Padding {
    Padding::new(top, right, bottom, left)
}

/// Rebuild an override map from indexed entries, skipping ones whose value
/// does not parse.
fn indexed<T>(
    value: &PropValue,
    parse: impl Fn(&PropValue) -> Option<T>,
) -> HashMap<usize, T> {
    let mut out = HashMap::new();
    let Some(entries) = value.as_indexed() else {
        log::debug!("ignoring malformed per-index property value");
        return out;
    };
    for (index, entry) in entries {
        match parse(entry) {
            Some(parsed) => {
                out.insert(*index, parsed);
            }
            None => log::debug!("ignoring unparseable override for item {index}"),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::apply_props;
    use crate::value::{PropMap, PropValue};
    use alloc::boxed::Box;
    use alloc::string::ToString as _;
    use alloc::vec;
    use canopy_geometry::{Alignment, HAlign, Padding, VAlign};
    use canopy_layout::{
        Block, GridParams, LayoutKind, LinearParams, NodeId, Orientation, PageViewParams, Tree,
        WRAP_CONTENT,
    };
    use glam::DVec3;
    use kurbo::Size;

    fn props(entries: &[(&str, PropValue)]) -> PropMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn grid(tree: &mut Tree) -> NodeId {
        tree.insert_container(LayoutKind::Grid(GridParams::default()))
    }

    #[test]
    fn grid_keys_update_the_layout() {
        let mut tree = Tree::new();
        let node = grid(&mut tree);
        apply_props(
            &mut tree,
            node,
            &props(&[
                ("width", PropValue::Number(3.0)),
                ("columns", PropValue::Number(2.0)),
                ("skipInvisibleItems", PropValue::Boolean(true)),
            ]),
        );
        let Some(LayoutKind::Grid(p)) = tree.layout_of(node) else {
            panic!("expected a grid");
        };
        assert_eq!(p.columns, 2);
        assert_eq!(p.common.width, 3.0);
        assert!(p.common.skip_invisible);
    }

    #[test]
    fn unparseable_values_fall_back_to_defaults() {
        let mut tree = Tree::new();
        let node = grid(&mut tree);
        apply_props(
            &mut tree,
            node,
            &props(&[
                ("width", PropValue::Text("wide".to_string())),
                ("columns", PropValue::Number(-2.0)),
                ("defaultItemAlignment", PropValue::Text("middle".to_string())),
            ]),
        );
        let Some(LayoutKind::Grid(p)) = tree.layout_of(node) else {
            panic!("expected a grid");
        };
        assert_eq!(p.common.width, WRAP_CONTENT);
        assert_eq!(p.columns, 0);
        assert_eq!(p.common.item_alignment, Alignment::CENTER);
    }

    #[test]
    fn unknown_and_mismatched_keys_are_ignored() {
        let mut tree = Tree::new();
        let node = grid(&mut tree);
        let before = tree.layout_of(node).cloned();
        apply_props(
            &mut tree,
            node,
            &props(&[
                ("glow", PropValue::Boolean(true)),
                ("orientation", PropValue::Text("horizontal".to_string())),
                ("visiblePage", PropValue::Number(1.0)),
            ]),
        );
        assert_eq!(tree.layout_of(node).cloned(), before);
    }

    #[test]
    fn transform_keys_apply_to_leaves() {
        let mut tree = Tree::new();
        let node = tree.insert_leaf(Box::new(Block::new(Size::new(1.0, 1.0))));
        apply_props(
            &mut tree,
            node,
            &props(&[
                ("localPosition", PropValue::Numbers(vec![1.0, 2.0, 3.0])),
                ("localScale", PropValue::Numbers(vec![2.0, 2.0, 1.0])),
                ("visible", PropValue::Boolean(false)),
                ("alignment", PropValue::Text("top-left".to_string())),
            ]),
        );
        assert_eq!(tree.local_position(node), Some(DVec3::new(1.0, 2.0, 3.0)));
        assert_eq!(tree.local_scale(node), Some(DVec3::new(2.0, 2.0, 1.0)));
        assert_eq!(tree.visible(node), Some(false));
        assert_eq!(
            tree.content_alignment(node),
            Some(Alignment::new(VAlign::Top, HAlign::Left))
        );
    }

    #[test]
    fn indexed_overrides_rebuild_the_maps() {
        let mut tree = Tree::new();
        let node = tree.insert_container(LayoutKind::Linear(LinearParams::default()));
        apply_props(
            &mut tree,
            node,
            &props(&[(
                "itemPadding",
                PropValue::Indexed(vec![
                    (0, PropValue::Numbers(vec![0.1, 0.0, 0.1, 0.0])),
                    (2, PropValue::Text("thick".to_string())), // skipped
                ]),
            )]),
        );
        let Some(LayoutKind::Linear(p)) = tree.layout_of(node) else {
            panic!("expected a linear layout");
        };
        assert_eq!(
            p.common.padding_overrides.get(&0),
            Some(&Padding::new(0.1, 0.0, 0.1, 0.0))
        );
        assert_eq!(p.common.padding_overrides.get(&2), None);
        assert_eq!(p.common.padding_overrides.len(), 1);
    }

    #[test]
    fn page_and_orientation_keys_reach_their_variants() {
        let mut tree = Tree::new();
        let pages = tree.insert_container(LayoutKind::PageView(PageViewParams::default()));
        let row = tree.insert_container(LayoutKind::Linear(LinearParams::default()));
        apply_props(
            &mut tree,
            pages,
            &props(&[("visiblePage", PropValue::Number(2.0))]),
        );
        apply_props(
            &mut tree,
            row,
            &props(&[("orientation", PropValue::Text("horizontal".to_string()))]),
        );
        let Some(LayoutKind::PageView(p)) = tree.layout_of(pages) else {
            panic!("expected a page view");
        };
        assert_eq!(p.visible_page, 2);
        let Some(LayoutKind::Linear(p)) = tree.layout_of(row) else {
            panic!("expected a linear layout");
        };
        assert_eq!(p.orientation, Orientation::Horizontal);
    }
}
