//! Infinite plane primitive.

use crate::{HitRecord, Hittable, Material, Ray};
use lumen_math::{Aabb, Interval, Vec3};
use std::sync::Arc;

/// Rays whose direction is this close to parallel with a plane never hit it.
pub(crate) const PARALLEL_EPSILON: f64 = 1e-4;

/// Parameter where `ray` crosses the plane through `point` with unit `normal`.
///
/// `None` if the ray runs parallel to the plane or the crossing lies outside
/// `ray_t`.
pub(crate) fn intersect_plane(normal: Vec3, point: Vec3, ray: &Ray, ray_t: Interval) -> Option<f64> {
    let denom = normal.dot(ray.direction());
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = normal.dot(point - ray.origin()) / denom;
    ray_t.surrounds(t).then_some(t)
}

/// An infinite plane given by a normal and a point on it.
pub struct Plane {
    normal: Vec3,
    point: Vec3,
    material: Arc<dyn Material>,
}

impl Plane {
    /// Create a plane. The normal is normalized and must not be zero.
    pub fn new(normal: Vec3, point: Vec3, material: Arc<dyn Material>) -> Self {
        Self {
            normal: normal.normalize(),
            point,
            material,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let t = intersect_plane(self.normal, self.point, ray, ray_t)?;

        Some(HitRecord {
            t,
            p: ray.at(t),
            normal: self.normal,
            material: self.material.as_ref(),
        })
    }

    /// Infinite planes cannot be bounded.
    fn bounding_box(&self) -> Option<Aabb> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lambertian;

    fn ground() -> Plane {
        Plane::new(
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Arc::new(Lambertian::new(Vec3::splat(0.5))),
        )
    }

    #[test]
    fn test_plane_hit() {
        let plane = ground();
        let ray = Ray::new(Vec3::new(3.0, 4.0, -2.0), Vec3::new(0.0, -2.0, 0.0));

        let rec = plane.hit(&ray, Interval::from_min(1e-4)).expect("ray should hit plane");
        assert!((rec.t - 2.5).abs() < 1e-12);
        assert!((rec.p - Vec3::new(3.0, -1.0, -2.0)).length() < 1e-12);
        assert_eq!(rec.normal, Vec3::Y);
    }

    #[test]
    fn test_plane_parallel_ray_misses() {
        let plane = ground();
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.00001, 0.0));

        assert!(plane.hit(&ray, Interval::from_min(1e-4)).is_none());
    }

    #[test]
    fn test_plane_behind_ray_misses() {
        let plane = ground();
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);

        assert!(plane.hit(&ray, Interval::from_min(1e-4)).is_none());
    }

    #[test]
    fn test_plane_hit_from_below_keeps_normal() {
        let plane = ground();
        let ray = Ray::new(Vec3::new(0.0, -3.0, 0.0), Vec3::Y);

        let rec = plane.hit(&ray, Interval::from_min(1e-4)).expect("ray should hit plane");
        assert!((rec.t - 2.0).abs() < 1e-12);
        assert_eq!(rec.normal, Vec3::Y);
    }

    #[test]
    fn test_plane_interval_limits() {
        let plane = ground();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Y);

        assert!(plane.hit(&ray, Interval::new(1e-4, 0.5)).is_none());
        assert!(plane.hit(&ray, Interval::new(1e-4, 1.5)).is_some());
        assert!(plane.bounding_box().is_none());
    }
}
