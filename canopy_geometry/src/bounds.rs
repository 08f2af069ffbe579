// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Y-up axis-aligned bounds.

use kurbo::{Point, Size, Vec2};

/// Tolerance used when comparing measured bounds across layout passes.
///
/// Layout coordinates are in scene units (meters for AR hosts), so this is
/// well below anything visually meaningful while still absorbing float noise
/// from repeated rescaling.
pub const APPROX_EPSILON: f64 = 1e-5;

/// An axis-aligned rectangle in y-up layout space.
///
/// Invariants: `left <= right` and `bottom <= top`. Width and height are
/// always derived, never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    /// Minimum x.
    pub left: f64,
    /// Minimum y.
    pub bottom: f64,
    /// Maximum x.
    pub right: f64,
    /// Maximum y.
    pub top: f64,
}

impl Bounds {
    /// The empty bounds at the origin.
    pub const ZERO: Self = Self {
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
        top: 0.0,
    };

    /// Creates bounds from the four edges.
    ///
    /// Callers must uphold `left <= right` and `bottom <= top`; this is
    /// debug-asserted, not repaired.
    #[must_use]
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        debug_assert!(
            left <= right && bottom <= top,
            "Bounds edges out of order: left={left}, right={right}, bottom={bottom}, top={top}"
        );
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Creates bounds of the given size centered on `center`.
    #[must_use]
    pub fn from_center_size(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            center.x + size.width / 2.0,
            center.y + size.height / 2.0,
        )
    }

    /// Width of the bounds (`right - left`).
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height of the bounds (`top - bottom`).
    #[must_use]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Size of the bounds.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Center point of the bounds.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.bottom + self.top) / 2.0,
        )
    }

    /// The smallest bounds containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            left: self.left.min(other.left),
            bottom: self.bottom.min(other.bottom),
            right: self.right.max(other.right),
            top: self.top.max(other.top),
        }
    }

    /// These bounds shifted by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            left: self.left + offset.x,
            bottom: self.bottom + offset.y,
            right: self.right + offset.x,
            top: self.top + offset.y,
        }
    }

    /// Whether `point` lies inside the bounds. Edges are included.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right
            && point.y >= self.bottom
            && point.y <= self.top
    }

    /// Whether all four edges of `other` are within [`APPROX_EPSILON`] of
    /// this one's.
    ///
    /// This is the convergence test used by the stabilization driver.
    #[must_use]
    pub fn approx_eq(&self, other: &Self) -> bool {
        (self.left - other.left).abs() < APPROX_EPSILON
            && (self.bottom - other.bottom).abs() < APPROX_EPSILON
            && (self.right - other.right).abs() < APPROX_EPSILON
            && (self.top - other.top).abs() < APPROX_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::{APPROX_EPSILON, Bounds};
    use kurbo::{Point, Size, Vec2};

    #[test]
    fn derived_measurements() {
        let b = Bounds::new(-1.0, -2.0, 3.0, 4.0);
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 6.0);
        assert_eq!(b.size(), Size::new(4.0, 6.0));
        assert_eq!(b.center(), Point::new(1.0, 1.0));
    }

    #[test]
    fn union_covers_both() {
        let a = Bounds::new(0.0, 0.0, 1.0, 1.0);
        let b = Bounds::new(-2.0, 0.5, 0.5, 3.0);
        let u = a.union(&b);
        assert_eq!(u, Bounds::new(-2.0, 0.0, 1.0, 3.0));
    }

    #[test]
    fn translation_moves_all_edges() {
        let b = Bounds::new(0.0, 0.0, 1.0, 1.0).translated(Vec2::new(2.0, -3.0));
        assert_eq!(b, Bounds::new(2.0, -3.0, 3.0, -2.0));
    }

    #[test]
    fn contains_includes_edges() {
        let b = Bounds::new(0.0, -1.0, 2.0, 0.0);
        assert!(b.contains(Point::new(0.0, 0.0)));
        assert!(b.contains(Point::new(2.0, -1.0)));
        assert!(b.contains(Point::new(1.0, -0.5)));
        assert!(!b.contains(Point::new(2.1, -0.5)));
    }

    #[test]
    fn approx_eq_tolerates_sub_epsilon_drift() {
        let a = Bounds::new(0.0, 0.0, 1.0, 1.0);
        let drift = APPROX_EPSILON / 2.0;
        let b = Bounds::new(drift, drift, 1.0 + drift, 1.0 + drift);
        assert!(a.approx_eq(&b));
        let c = Bounds::new(0.0, 0.0, 1.0 + APPROX_EPSILON * 2.0, 1.0);
        assert!(!a.approx_eq(&c));
    }

    #[test]
    fn from_center_size_round_trips() {
        let b = Bounds::from_center_size(Point::new(1.0, -1.0), Size::new(2.0, 4.0));
        assert_eq!(b, Bounds::new(0.0, -3.0, 2.0, 1.0));
        assert_eq!(b.center(), Point::new(1.0, -1.0));
    }
}
