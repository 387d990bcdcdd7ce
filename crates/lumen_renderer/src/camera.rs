//! Camera for ray generation.
//!
//! Image-plane coordinates are normalized: `u = 0` is the left edge,
//! `v = 0` the bottom edge.

use crate::sampling::random_in_unit_disk;
use crate::{Ray, RenderError, RenderResult};
use lumen_math::Vec3;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Thin-lens camera. Immutable once built.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    // Orthonormal basis: u right, v up, w backwards (away from the view)
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f64,
    focus_dist: f64,
}

impl Camera {
    /// Pinhole camera focused on `look_at`.
    ///
    /// - `vfov`: vertical field of view in degrees
    /// - `aspect`: image width / height
    ///
    /// `look_from` must differ from `look_at` and `vup` must not be parallel
    /// to the view direction; use [`CameraSettings::build`] to have that
    /// checked.
    pub fn new(look_from: Vec3, look_at: Vec3, vup: Vec3, vfov: f64, aspect: f64) -> Self {
        let focus_dist = (look_from - look_at).length();
        Self::with_lens(look_from, look_at, vup, vfov, aspect, 0.0, focus_dist)
    }

    /// Camera with depth of field.
    ///
    /// - `aperture`: radius of the lens disk; 0 gives a pinhole camera
    /// - `focus_dist`: distance from `look_from` to the plane in focus
    pub fn with_lens(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov: f64,
        aspect: f64,
        aperture: f64,
        focus_dist: f64,
    ) -> Self {
        let theta = vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = aspect * half_height;

        // Calculate camera basis vectors
        let w = (look_from - look_at).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let lower_left_corner = look_from
            - half_width * focus_dist * u
            - half_height * focus_dist * v
            - focus_dist * w;

        Self {
            origin: look_from,
            lower_left_corner,
            horizontal: 2.0 * half_width * focus_dist * u,
            vertical: 2.0 * half_height * focus_dist * v,
            u,
            v,
            w,
            lens_radius: aperture.max(0.0),
            focus_dist,
        }
    }

    /// Ray through the normalized image-plane point `(s, t)`.
    ///
    /// With a non-zero aperture the origin is jittered across the lens and
    /// the ray aimed at the same point on the focus plane.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(self.origin + offset, target - self.origin - offset)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        -self.w
    }

    pub fn right(&self) -> Vec3 {
        self.u
    }

    pub fn up(&self) -> Vec3 {
        self.v
    }

    pub fn lens_radius(&self) -> f64 {
        self.lens_radius
    }

    pub fn focus_dist(&self) -> f64 {
        self.focus_dist
    }
}

/// Serializable camera description, validated before a camera is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub look_from: [f64; 3],
    pub look_at: [f64; 3],
    pub vup: [f64; 3],
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Lens radius; 0 for a pinhole camera
    pub aperture: f64,
    /// Defaults to the distance between `look_from` and `look_at`
    pub focus_dist: Option<f64>,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: [0.0, 0.0, 0.0],
            look_at: [0.0, 0.0, -1.0],
            vup: [0.0, 1.0, 0.0],
            vfov: 90.0,
            aperture: 0.0,
            focus_dist: None,
        }
    }
}

impl CameraSettings {
    /// Check the settings and build a camera for the given aspect ratio.
    pub fn build(&self, aspect: f64) -> RenderResult<Camera> {
        let look_from = Vec3::from_array(self.look_from);
        let look_at = Vec3::from_array(self.look_at);
        let vup = Vec3::from_array(self.vup);

        let view = look_at - look_from;
        if view.length_squared() <= f64::EPSILON {
            return Err(invalid("look_from and look_at coincide"));
        }
        if vup.cross(view).length_squared() <= f64::EPSILON * view.length_squared() {
            return Err(invalid("vup is zero or parallel to the view direction"));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(invalid(format!("vfov must be in (0, 180) degrees, got {}", self.vfov)));
        }
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(invalid(format!("aspect ratio must be positive, got {}", aspect)));
        }
        if !(self.aperture >= 0.0 && self.aperture.is_finite()) {
            return Err(invalid(format!("aperture must be non-negative, got {}", self.aperture)));
        }

        let focus_dist = self.focus_dist.unwrap_or_else(|| view.length());
        if !(focus_dist.is_finite() && focus_dist > 0.0) {
            return Err(invalid(format!("focus distance must be positive, got {}", focus_dist)));
        }

        Ok(Camera::with_lens(
            look_from,
            look_at,
            vup,
            self.vfov,
            aspect,
            self.aperture,
            focus_dist,
        ))
    }
}

fn invalid(reason: impl Into<String>) -> RenderError {
    RenderError::InvalidCamera(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn looking_down_z() -> Camera {
        Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y, 90.0, 2.0)
    }

    #[test]
    fn test_camera_basis() {
        let camera = looking_down_z();

        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-12);
        assert!((camera.right() - Vec3::X).length() < 1e-12);
        assert!((camera.up() - Vec3::Y).length() < 1e-12);
        assert_eq!(camera.focus_dist(), 1.0);
    }

    #[test]
    fn test_center_ray_points_forward() {
        let camera = looking_down_z();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!((ray.direction().normalize() - Vec3::NEG_Z).length() < 1e-12);
    }

    #[test]
    fn test_image_plane_corners() {
        // 90 degree vfov at focus distance 1 spans [-1, 1] vertically;
        // aspect 2 spans [-2, 2] horizontally
        let camera = looking_down_z();
        let mut rng = StdRng::seed_from_u64(42);

        let bottom_left = camera.get_ray(0.0, 0.0, &mut rng);
        assert!((bottom_left.direction() - Vec3::new(-2.0, -1.0, -1.0)).length() < 1e-12);

        let top_right = camera.get_ray(1.0, 1.0, &mut rng);
        assert!((top_right.direction() - Vec3::new(2.0, 1.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn test_aperture_jitters_origin_but_keeps_focus() {
        let look_at = Vec3::new(0.0, 0.0, -4.0);
        let camera = Camera::with_lens(Vec3::ZERO, look_at, Vec3::Y, 40.0, 1.5, 0.25, 4.0);
        let mut rng = StdRng::seed_from_u64(7);

        let mut moved = false;
        for _ in 0..32 {
            let ray = camera.get_ray(0.5, 0.5, &mut rng);
            assert!(ray.origin().length() < 0.25);
            assert!(ray.origin().z.abs() < 1e-12);
            moved |= ray.origin() != Vec3::ZERO;

            // Every lens sample passes through the in-focus point
            let t = (look_at.z - ray.origin().z) / ray.direction().z;
            assert!((ray.at(t) - look_at).length() < 1e-9);
        }
        assert!(moved);
    }

    #[test]
    fn test_settings_build() {
        let settings = CameraSettings {
            look_from: [2.0, 2.0, 8.0],
            look_at: [0.0, 0.0, -1.0],
            vfov: 45.0,
            ..Default::default()
        };

        let camera = settings.build(2.0).expect("settings are valid");
        let expected = (Vec3::new(0.0, 0.0, -1.0) - Vec3::new(2.0, 2.0, 8.0)).normalize();
        assert!((camera.forward() - expected).length() < 1e-12);
        assert_eq!(camera.lens_radius(), 0.0);
    }

    #[test]
    fn test_settings_reject_degenerate_cameras() {
        let same_point = CameraSettings {
            look_at: [0.0, 0.0, 0.0],
            ..Default::default()
        };
        assert!(matches!(same_point.build(1.0), Err(RenderError::InvalidCamera(_))));

        let parallel_up = CameraSettings {
            vup: [0.0, 0.0, 3.0],
            ..Default::default()
        };
        assert!(matches!(parallel_up.build(1.0), Err(RenderError::InvalidCamera(_))));

        let bad_fov = CameraSettings {
            vfov: 180.0,
            ..Default::default()
        };
        assert!(bad_fov.build(1.0).is_err());

        let bad_aperture = CameraSettings {
            aperture: -0.5,
            ..Default::default()
        };
        assert!(bad_aperture.build(1.0).is_err());

        assert!(CameraSettings::default().build(0.0).is_err());
    }
}
