//! Lumen - CPU Path Tracing
//!
//! A Monte Carlo path tracer for spheres, planes, triangles, cubes and tori
//! lit by a sky gradient. Single-threaded; all randomness comes from the
//! caller's RNG so a seeded render is reproducible.

mod camera;
mod cube;
mod error;
mod hittable;
mod material;
mod plane;
mod renderer;
pub mod sampling;
mod sphere;
mod torus;
mod triangle;

pub use camera::{Camera, CameraSettings};
pub use cube::Cube;
pub use error::{RenderError, RenderResult};
pub use hittable::{closest_hit, HitRecord, Hittable, HittableList};
pub use material::{reflect, refract, schlick, Color, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use plane::Plane;
pub use renderer::{
    color_to_rgb8, gamma_correct, linear_to_gamma, ray_color, render, render_pixel, sky_gradient,
    ImageBuffer, RenderConfig, DEFAULT_MAX_DEPTH, DEFAULT_T_MIN,
};
pub use sphere::Sphere;
pub use torus::{MarchOutcome, Torus, MARCH_EPSILON, MAX_MARCH_STEPS};
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Aabb, Interval, Ray, Vec3};
