//! Triangle primitive for ray tracing.
//!
//! Intersects the triangle's supporting plane first, then classifies the
//! crossing point with area-based barycentric coordinates.

use crate::plane::intersect_plane;
use crate::{HitRecord, Hittable, Material, Ray};
use lumen_math::{Aabb, Interval, Vec3};
use std::sync::Arc;

/// Tolerance on the barycentric weight sum.
const CONTAINMENT_EPSILON: f64 = 1e-4;

/// A triangle primitive.
#[derive(Clone)]
pub struct Triangle {
    /// Vertices
    a: Vec3,
    b: Vec3,
    c: Vec3,
    /// Face normal, `normalize(cross(b - a, c - a))`; zero for degenerate triangles
    normal: Vec3,
    /// Twice the triangle's area
    double_area: f64,
    material: Arc<dyn Material>,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The winding `a -> b -> c` decides which way the normal faces.
    pub fn new(a: Vec3, b: Vec3, c: Vec3, material: Arc<dyn Material>) -> Self {
        let face = (b - a).cross(c - a);

        Self {
            a,
            b,
            c,
            normal: face.normalize_or_zero(),
            double_area: face.length(),
            material,
        }
    }

    /// Pre-computed unit face normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// The three vertices in winding order.
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.a, self.b, self.c]
    }

    /// Barycentric weights `(alpha, beta, gamma)` of `point` from the areas
    /// of the sub-triangles opposite each vertex.
    ///
    /// Returns `None` for a zero-area triangle. The weights are unsigned, so
    /// a point outside the triangle shows up as a sum greater than 1.
    pub fn barycentric(&self, point: Vec3) -> Option<Vec3> {
        if self.double_area <= f64::EPSILON {
            return None;
        }

        let (a, b, c) = (self.a, self.b, self.c);
        let alpha = (b - point).cross(c - point).length() / self.double_area;
        let beta = (c - point).cross(a - point).length() / self.double_area;
        let gamma = (a - point).cross(b - point).length() / self.double_area;

        Some(Vec3::new(alpha, beta, gamma))
    }

    /// Whether a point on the triangle's plane lies inside it (edges included).
    pub fn contains(&self, point: Vec3) -> bool {
        self.barycentric(point).is_some_and(|w| {
            let sum = w.x + w.y + w.z;
            w.min_element() >= 0.0 && (sum - 1.0).abs() < CONTAINMENT_EPSILON
        })
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let t = intersect_plane(self.normal, self.a, ray, ray_t)?;
        let p = ray.at(t);

        if !self.contains(p) {
            return None;
        }

        Some(HitRecord {
            t,
            p,
            normal: self.normal,
            material: self.material.as_ref(),
        })
    }

    fn bounding_box(&self) -> Option<Aabb> {
        // Flat triangles get padded by Aabb
        Some(Aabb::from_vertices([self.a, self.b, self.c]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;

    fn grey() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Vec3::splat(0.5)))
    }

    /// Triangle in the XY plane at z = -1, facing +Z
    fn facing_camera() -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
            grey(),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let tri = facing_camera();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = tri.hit(&ray, Interval::from_min(1e-4)).expect("ray should hit triangle");
        assert!((rec.t - 1.0).abs() < 1e-12);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_triangle_miss() {
        let tri = facing_camera();

        // Ray pointing away
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert!(tri.hit(&ray, Interval::from_min(1e-4)).is_none());

        // Crosses the plane outside the triangle
        let ray = Ray::new(Vec3::new(0.9, 0.9, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(tri.hit(&ray, Interval::from_min(1e-4)).is_none());
    }

    #[test]
    fn test_face_normal_follows_winding() {
        let a = Vec3::ZERO;
        let b = Vec3::X;
        let c = Vec3::Y;

        assert_eq!(Triangle::new(a, b, c, grey()).normal(), Vec3::Z);
        assert_eq!(Triangle::new(a, c, b, grey()).normal(), Vec3::NEG_Z);
    }

    #[test]
    fn test_barycentric_inside_sums_to_one() {
        let tri = facing_camera();
        let [a, b, c] = tri.vertices();

        for (wa, wb, wc) in [(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0), (0.6, 0.3, 0.1), (0.05, 0.05, 0.9)] {
            let point = a * wa + b * wb + c * wc;
            let w = tri.barycentric(point).expect("triangle is not degenerate");

            assert!(w.min_element() >= 0.0);
            assert!((w.x + w.y + w.z - 1.0).abs() < 1e-9);
            assert!((w - Vec3::new(wa, wb, wc)).length() < 1e-9);
            assert!(tri.contains(point));
        }
    }

    #[test]
    fn test_point_outside_fails_containment() {
        let tri = facing_camera();
        let [a, b, c] = tri.vertices();
        let centroid = (a + b + c) / 3.0;

        for vertex in [a, b, c] {
            let outside = centroid + 2.0 * (vertex - centroid);
            assert!(!tri.contains(outside));
        }
    }

    #[test]
    fn test_degenerate_triangle_never_hits() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0), grey());
        let ray = Ray::new(Vec3::new(0.5, 0.0, 1.0), Vec3::NEG_Z);

        assert!(tri.barycentric(Vec3::new(0.5, 0.0, 0.0)).is_none());
        assert!(tri.hit(&ray, Interval::from_min(1e-4)).is_none());
    }

    #[test]
    fn test_triangle_bounding_box() {
        let bbox = facing_camera().bounding_box().expect("triangles are bounded");

        assert_eq!(bbox.x.min, -1.0);
        assert_eq!(bbox.y.max, 1.0);
        assert!(bbox.z.contains(-1.0));
        assert!(bbox.z.size() > 0.0);
    }
}
