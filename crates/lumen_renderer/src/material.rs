//! Material trait for surface scattering.

use crate::sampling::{gen_f64, random_in_unit_sphere};
use crate::{HitRecord, Ray};
use lumen_math::Vec3;
use rand::RngCore;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Outcome of a scatter event that was not absorbed.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel factor applied to the light arriving along `scattered`
    pub attenuation: Color,
    /// Ray leaving the surface
    pub scattered: Ray,
}

impl ScatterResult {
    fn new(attenuation: Color, origin: Vec3, direction: Vec3) -> Self {
        Self {
            attenuation,
            scattered: Ray::new(origin, direction),
        }
    }
}

/// Trait for materials that describe how light interacts with surfaces.
///
/// Materials are immutable and shared between primitives through `Arc`.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult>;
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }
}

impl Material for Lambertian {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_in_unit_sphere(rng);

        // Catch degenerate scatter direction
        if scatter_direction.length_squared() < 1e-12 {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult::new(self.albedo, rec.p, scatter_direction))
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        if !(0.0..=1.0).contains(&fuzz) {
            log::warn!("Metal fuzz {} outside [0, 1], clamping", fuzz);
        }
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let scattered_dir = if self.fuzz > 0.0 {
            reflected + self.fuzz * random_in_unit_sphere(rng)
        } else {
            reflected
        };

        // Anything pointing into the surface is absorbed
        if scattered_dir.dot(rec.normal) > 0.0 {
            Some(ScatterResult::new(self.albedo, rec.p, scattered_dir))
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Index of refraction
    ref_idx: f64,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ref_idx`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ref_idx: f64) -> Self {
        Self { ref_idx }
    }

    pub fn ref_idx(&self) -> f64 {
        self.ref_idx
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let attenuation = Color::ONE;
        let direction = ray_in.direction();
        let unit_direction = direction.normalize();
        let cos_incident = unit_direction.dot(rec.normal);

        // Normals are outward: a positive cosine means we are leaving the medium
        let (outward_normal, ni_over_nt, cosine) = if cos_incident > 0.0 {
            let sin2 = self.ref_idx * self.ref_idx * (1.0 - cos_incident * cos_incident);
            (-rec.normal, self.ref_idx, (1.0 - sin2).max(0.0).sqrt())
        } else {
            (rec.normal, 1.0 / self.ref_idx, -cos_incident)
        };

        let scattered_dir = match refract(unit_direction, outward_normal, ni_over_nt) {
            Some(refracted) if gen_f64(rng) >= schlick(cosine, self.ref_idx) => refracted,
            // Total internal reflection, or the Fresnel draw chose reflection
            _ => reflect(direction, rec.normal),
        };

        Some(ScatterResult::new(attenuation, rec.p, scattered_dir))
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with normal `n` facing the
/// incoming side.
///
/// Returns `None` when Snell's law has no solution (total internal reflection).
#[inline]
pub fn refract(uv: Vec3, n: Vec3, ni_over_nt: f64) -> Option<Vec3> {
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(ni_over_nt * (uv - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}

/// Schlick's approximation for reflectance.
///
/// Matched indices mean there is no interface, so nothing is reflected.
#[inline]
pub fn schlick(cosine: f64, ref_idx: f64) -> f64 {
    let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
    if r0 == 0.0 {
        return 0.0;
    }
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
