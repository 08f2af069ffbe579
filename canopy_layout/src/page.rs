// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page-view placement: one visible child at a time.

use alloc::vec::Vec;
use kurbo::Size;

use crate::cell::{ChildSlot, Placement, place_in_cell};
use crate::params::PageViewParams;

/// The page area: each fixed dimension wins; a wrap-content dimension takes
/// the visible page's measured extent plus its padding.
pub(crate) fn area(params: &PageViewParams, slots: &[ChildSlot]) -> Size {
    let (page, padding) = match slots.get(params.visible_page) {
        Some(slot) => (slot.bounds.size(), slot.padding),
        None => (Size::ZERO, canopy_geometry::Padding::ZERO),
    };
    let width = if params.common.has_fixed_width() {
        params.common.width
    } else {
        page.width + padding.horizontal()
    };
    let height = if params.common.has_fixed_height() {
        params.common.height
    } else {
        page.height + padding.vertical()
    };
    Size::new(width, height)
}

/// Shows the page at `visible_page`, hides every other child, and aligns the
/// visible page within the area. A `visible_page` past the end hides all
/// pages.
pub(crate) fn layout(params: &PageViewParams, slots: &[ChildSlot]) -> Vec<Placement> {
    let size = area(params, slots);
    let mut placements = Vec::with_capacity(slots.len());
    for (i, slot) in slots.iter().enumerate() {
        // Hidden pages are positioned too, so revealing one later starts
        // from a sensible spot.
        placements.push(Placement {
            id: slot.id,
            position: place_in_cell(0.0, 0.0, size.width, size.height, slot),
            scale: None,
            visible: Some(i == params.visible_page),
        });
    }
    placements
}

#[cfg(test)]
mod tests {
    use super::{area, layout};
    use crate::cell::ChildSlot;
    use crate::params::{CommonParams, PageViewParams};
    use crate::types::NodeId;
    use canopy_geometry::{Alignment, Bounds, Padding};
    use kurbo::{Point, Size, Vec2};

    fn slots(sizes: &[(f64, f64)]) -> alloc::vec::Vec<ChildSlot> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| ChildSlot {
                id: NodeId::new(u32::try_from(i).unwrap(), 1),
                bounds: Bounds::from_center_size(Point::ZERO, Size::new(w, h)),
                padding: Padding::ZERO,
                alignment: Alignment::CENTER,
                scale: Vec2::new(1.0, 1.0),
                authored_scale: Vec2::new(1.0, 1.0),
            })
            .collect()
    }

    #[test]
    fn only_the_selected_page_is_visible() {
        let params = PageViewParams {
            visible_page: 1,
            ..PageViewParams::default()
        };
        let input = slots(&[(1.0, 1.0), (2.0, 1.0), (1.0, 1.0)]);
        let placed = layout(&params, &input);
        let shown: alloc::vec::Vec<Option<bool>> = placed.iter().map(|p| p.visible).collect();
        assert_eq!(shown, [Some(false), Some(true), Some(false)]);
        // The area follows the visible page, so it sits centered on itself.
        assert_eq!(placed[1].position, Point::new(1.0, -0.5));
    }

    #[test]
    fn switching_pages_changes_the_wrap_content_area() {
        let input = slots(&[(1.0, 1.0), (2.0, 3.0)]);
        let first = PageViewParams::default();
        let second = PageViewParams {
            visible_page: 1,
            ..PageViewParams::default()
        };
        assert_eq!(area(&first, &input), Size::new(1.0, 1.0));
        assert_eq!(area(&second, &input), Size::new(2.0, 3.0));
    }

    #[test]
    fn out_of_range_page_hides_everything() {
        let params = PageViewParams {
            visible_page: 5,
            ..PageViewParams::default()
        };
        let input = slots(&[(1.0, 1.0)]);
        let placed = layout(&params, &input);
        assert_eq!(placed[0].visible, Some(false));
        assert_eq!(area(&params, &input), Size::ZERO);
    }

    #[test]
    fn fixed_area_aligns_the_page() {
        let params = PageViewParams {
            common: CommonParams {
                width: 4.0,
                height: 2.0,
                ..CommonParams::default()
            },
            visible_page: 0,
        };
        let input = slots(&[(2.0, 1.0)]);
        let placed = layout(&params, &input);
        // Centered in the 4x2 area.
        assert_eq!(placed[0].position, Point::new(2.0, -1.0));
    }
}
