//! Torus primitive, intersected by sphere tracing.
//!
//! There is no closed-form hit test. The ray is marched forward by the
//! distance to the nearest point of the surface until that distance drops
//! below `MARCH_EPSILON` (hit) or the ray has travelled past every point of
//! the torus (miss). Precision is bounded by the epsilon.

use crate::{HitRecord, Hittable, Material, Ray};
use lumen_math::{Aabb, Interval, Vec3};
use std::sync::Arc;

/// Distance below which a marched point counts as on the surface.
pub const MARCH_EPSILON: f64 = 1e-4;

/// Upper bound on march iterations for a single ray.
pub const MAX_MARCH_STEPS: usize = 512;

/// Result of marching a ray against a torus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarchOutcome {
    Hit {
        /// Ray parameter, in units of the caller's ray direction
        t: f64,
        point: Vec3,
        /// Nearest point on the medial circle
        medial: Vec3,
        steps: usize,
    },
    Miss {
        steps: usize,
    },
}

impl MarchOutcome {
    /// Number of distance evaluations performed.
    pub fn steps(&self) -> usize {
        match *self {
            MarchOutcome::Hit { steps, .. } | MarchOutcome::Miss { steps } => steps,
        }
    }
}

/// A torus: a tube of radius `tube_radius` swept around a circle of radius
/// `disk_radius` lying in the plane through `center` with normal `normal`.
pub struct Torus {
    center: Vec3,
    normal: Vec3,
    disk_radius: f64,
    tube_radius: f64,
    material: Arc<dyn Material>,
    /// Analytic bounds widened by the march tolerance
    march_bounds: Aabb,
}

impl Torus {
    /// Create a torus. `normal` is normalized and must not be zero.
    pub fn new(
        center: Vec3,
        normal: Vec3,
        disk_radius: f64,
        tube_radius: f64,
        material: Arc<dyn Material>,
    ) -> Self {
        let mut torus = Self {
            center,
            normal: normal.normalize(),
            disk_radius: disk_radius.max(0.0),
            tube_radius: tube_radius.max(0.0),
            material,
            march_bounds: Aabb::EMPTY,
        };
        let bounds = torus.analytic_bounds();
        let pad = 4.0 * MARCH_EPSILON;
        torus.march_bounds = Aabb::new(bounds.x.expand(pad), bounds.y.expand(pad), bounds.z.expand(pad));
        torus
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn disk_radius(&self) -> f64 {
        self.disk_radius
    }

    pub fn tube_radius(&self) -> f64 {
        self.tube_radius
    }

    /// Closest point to `p` on the medial circle.
    pub fn medial_point(&self, p: Vec3) -> Vec3 {
        let offset = p - self.center;
        let radial = offset - offset.dot(self.normal) * self.normal;

        // On the axis every point of the circle is equally close
        let radial_dir = if radial.length_squared() > f64::EPSILON {
            radial.normalize()
        } else {
            self.normal.any_orthonormal_vector()
        };

        self.center + radial_dir * self.disk_radius
    }

    /// Signed distance from `p` to the surface (negative inside the tube),
    /// together with the medial point it was measured from.
    pub fn signed_distance(&self, p: Vec3) -> (f64, Vec3) {
        let medial = self.medial_point(p);
        ((p - medial).length() - self.tube_radius, medial)
    }

    /// March `ray` towards the surface.
    ///
    /// A march that starts on the surface (a ray leaving it) only reports a
    /// contact after it has once been `MARCH_EPSILON` or more away from the
    /// surface. Contacts must also lie beyond `ray_t.min` both as a ray
    /// parameter and as a distance travelled. The march gives up once it has
    /// covered `|origin - center| + disk_radius + tube_radius`, after
    /// `MAX_MARCH_STEPS` evaluations, or once it passes `ray_t.max`.
    pub fn march(&self, ray: &Ray, ray_t: Interval) -> MarchOutcome {
        let speed = ray.direction().length();
        if speed <= f64::EPSILON {
            return MarchOutcome::Miss { steps: 0 };
        }
        let dir = ray.direction() / speed;
        let max_dist = (ray.origin() - self.center).length() + self.disk_radius + self.tube_radius;

        let mut point = ray.origin();
        let mut traveled = 0.0;
        let mut left_start_shell = false;

        for step in 1..=MAX_MARCH_STEPS {
            let (distance, medial) = self.signed_distance(point);
            let on_surface = distance.abs() < MARCH_EPSILON;

            if on_surface && left_start_shell {
                let t = traveled / speed;
                if traveled > ray_t.min && ray_t.surrounds(t) {
                    return MarchOutcome::Hit {
                        t,
                        point,
                        medial,
                        steps: step,
                    };
                }
                if t >= ray_t.max {
                    return MarchOutcome::Miss { steps: step };
                }
            }
            left_start_shell |= !on_surface;

            let advance = distance.abs().max(MARCH_EPSILON);
            point += dir * advance;
            traveled += advance;

            if traveled > max_dist || traveled / speed >= ray_t.max {
                return MarchOutcome::Miss { steps: step };
            }
        }

        log::trace!("Torus march hit the step limit without converging");
        MarchOutcome::Miss {
            steps: MAX_MARCH_STEPS,
        }
    }

    /// Tight box around the tube.
    fn analytic_bounds(&self) -> Aabb {
        // Extent of the medial circle along each axis, widened by the tube
        let n = self.normal;
        let circle = Vec3::new(
            (1.0 - n.x * n.x).max(0.0).sqrt(),
            (1.0 - n.y * n.y).max(0.0).sqrt(),
            (1.0 - n.z * n.z).max(0.0).sqrt(),
        ) * self.disk_radius;
        let extent = circle + Vec3::splat(self.tube_radius);

        Aabb::from_points(self.center - extent, self.center + extent)
    }
}

impl Hittable for Torus {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        // Contacts are up to MARCH_EPSILON off the surface
        if !self.march_bounds.hit(ray, ray_t) {
            return None;
        }

        match self.march(ray, ray_t) {
            MarchOutcome::Hit { t, point, medial, .. } => {
                // A zero-width tube has no direction from the medial circle
                let radial = (medial - self.center).normalize_or(self.normal);
                Some(HitRecord {
                    t,
                    p: point,
                    normal: (point - medial).normalize_or(radial),
                    material: self.material.as_ref(),
                })
            }
            MarchOutcome::Miss { .. } => None,
        }
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.analytic_bounds())
    }
}
