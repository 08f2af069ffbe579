// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picking rays and the layout-plane intersection.

use glam::{DQuat, DVec3};
use kurbo::Point;

/// Direction components smaller than this are treated as parallel to the
/// layout plane.
const PARALLEL_EPSILON: f64 = 1e-9;

/// A ray in world (or some ancestor's local) space.
///
/// The direction does not need to be normalized; only its orientation
/// matters for plane intersection, and [`Ray::into_local`] rescales it
/// anyway.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Ray origin.
    pub origin: DVec3,
    /// Ray direction.
    pub direction: DVec3,
}

impl Ray {
    /// Creates a ray from origin and direction.
    #[must_use]
    pub const fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// The point `origin + t * direction`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Maps the ray through the inverse of a node transform
    /// (translate, then rotate, then scale), yielding the ray in that node's
    /// local space.
    ///
    /// Returns `None` when any scale component is (near) zero, since the
    /// inverse is undefined there; such a node is invisible anyway.
    #[must_use]
    pub fn into_local(&self, position: DVec3, rotation: DQuat, scale: DVec3) -> Option<Self> {
        if scale.x.abs() < PARALLEL_EPSILON
            || scale.y.abs() < PARALLEL_EPSILON
            || scale.z.abs() < PARALLEL_EPSILON
        {
            return None;
        }
        let inv_rotation = rotation.inverse();
        let origin = (inv_rotation * (self.origin - position)) / scale;
        let direction = (inv_rotation * self.direction) / scale;
        Some(Self { origin, direction })
    }

    /// Intersects the ray with the z = 0 layout plane of the space the ray
    /// currently lives in.
    ///
    /// Returns the 2D intersection point, or `None` when the ray is parallel
    /// to the plane or the intersection lies behind the origin.
    #[must_use]
    pub fn intersect_layout_plane(&self) -> Option<Point> {
        if self.direction.z.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = -self.origin.z / self.direction.z;
        if t < 0.0 {
            return None;
        }
        let hit = self.point_at(t);
        Some(Point::new(hit.x, hit.y))
    }
}

#[cfg(test)]
mod tests {
    use super::Ray;
    use glam::{DQuat, DVec3};
    use kurbo::Point;

    #[test]
    fn straight_on_intersection() {
        let ray = Ray::new(DVec3::new(0.25, -0.5, 1.0), DVec3::new(0.0, 0.0, -1.0));
        assert_eq!(ray.intersect_layout_plane(), Some(Point::new(0.25, -0.5)));
    }

    #[test]
    fn oblique_intersection() {
        // From (0, 0, 2) toward (1, 1, 0): hits the plane at (1, 1).
        let ray = Ray::new(DVec3::new(0.0, 0.0, 2.0), DVec3::new(1.0, 1.0, -2.0));
        let hit = ray.intersect_layout_plane().unwrap();
        assert!((hit.x - 1.0).abs() < 1e-12 && (hit.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn parallel_and_behind_miss() {
        let parallel = Ray::new(DVec3::new(0.0, 0.0, 1.0), DVec3::new(1.0, 0.0, 0.0));
        assert_eq!(parallel.intersect_layout_plane(), None);

        let behind = Ray::new(DVec3::new(0.0, 0.0, 1.0), DVec3::new(0.0, 0.0, 1.0));
        assert_eq!(behind.intersect_layout_plane(), None);
    }

    #[test]
    fn into_local_undoes_translation_and_scale() {
        let ray = Ray::new(DVec3::new(3.0, 2.0, 1.0), DVec3::new(0.0, 0.0, -1.0));
        let local = ray
            .into_local(
                DVec3::new(1.0, 2.0, 0.0),
                DQuat::IDENTITY,
                DVec3::new(2.0, 2.0, 2.0),
            )
            .unwrap();
        assert_eq!(local.origin, DVec3::new(1.0, 0.0, 0.5));
        assert_eq!(local.intersect_layout_plane(), Some(Point::new(1.0, 0.0)));
    }

    #[test]
    fn into_local_rejects_degenerate_scale() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        assert!(
            ray.into_local(DVec3::ZERO, DQuat::IDENTITY, DVec3::new(1.0, 0.0, 1.0))
                .is_none()
        );
    }

    #[test]
    fn into_local_undoes_rotation() {
        // A node rotated 90 degrees about y; a world ray along -x becomes a
        // local ray along its -z, so it can hit the node's layout plane.
        let rotation = DQuat::from_rotation_y(core::f64::consts::FRAC_PI_2);
        let ray = Ray::new(DVec3::new(1.0, 0.0, 0.0), DVec3::new(-1.0, 0.0, 0.0));
        let local = ray.into_local(DVec3::ZERO, rotation, DVec3::ONE).unwrap();
        let hit = local.intersect_layout_plane().unwrap();
        assert!(hit.x.abs() < 1e-12 && hit.y.abs() < 1e-12);
    }
}
