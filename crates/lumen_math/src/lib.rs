//! Lumen math types.
//!
//! Everything is double precision: `Vec3` is glam's `DVec3`.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;

/// Lumen's 3-component vector.
pub type Vec3 = glam::DVec3;

/// 3x3 matrix matching `Vec3` precision.
pub type Mat3 = glam::DMat3;
