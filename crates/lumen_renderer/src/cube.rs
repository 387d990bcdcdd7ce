//! Box surface built from twelve triangles.
//!
//! The cube keeps only its eight corners. Each query rebuilds the triangles
//! from a fixed index table and takes the nearest hit among them.

use crate::hittable::closest_hit;
use crate::{HitRecord, Hittable, Material, Ray, Triangle};
use lumen_math::{Aabb, Interval, Mat3, Vec3};
use std::sync::Arc;

/// Corners of the canonical cube `[-1, 1]^3`.
const CANONICAL_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, -1.0),
];

/// Two triangles per face, wound so every face normal points outward.
const FACE_INDICES: [[usize; 3]; 12] = [
    // +Z
    [1, 0, 2],
    [3, 2, 0],
    // +X
    [3, 5, 2],
    [4, 2, 5],
    // -X
    [0, 1, 7],
    [1, 6, 7],
    // +Y
    [2, 4, 1],
    [6, 1, 4],
    // -Y
    [3, 0, 5],
    [7, 5, 0],
    // -Z
    [6, 4, 5],
    [7, 6, 5],
];

/// A cube surface made of 12 triangles.
pub struct Cube {
    vertices: [Vec3; 8],
    material: Arc<dyn Material>,
}

impl Cube {
    /// The canonical cube spanning `[-1, 1]` on every axis.
    pub fn new(material: Arc<dyn Material>) -> Self {
        Self {
            vertices: CANONICAL_VERTICES,
            material,
        }
    }

    /// An axis-aligned cube around `center` with the given half edge length.
    pub fn with_center(center: Vec3, half_extent: f64, material: Arc<dyn Material>) -> Self {
        Self {
            vertices: CANONICAL_VERTICES.map(|v| center + v * half_extent),
            material,
        }
    }

    /// Current corner positions.
    pub fn vertices(&self) -> &[Vec3; 8] {
        &self.vertices
    }

    /// Center of the cube (mean of its corners).
    pub fn center(&self) -> Vec3 {
        self.vertices.iter().copied().sum::<Vec3>() / 8.0
    }

    /// Rotate about the X axis through the cube's center, in degrees.
    pub fn rotate_x(&mut self, degrees: f64) {
        self.rotate(Mat3::from_rotation_x(degrees.to_radians()));
    }

    /// Rotate about the Y axis through the cube's center, in degrees.
    pub fn rotate_y(&mut self, degrees: f64) {
        self.rotate(Mat3::from_rotation_y(degrees.to_radians()));
    }

    /// Rotate about the Z axis through the cube's center, in degrees.
    pub fn rotate_z(&mut self, degrees: f64) {
        self.rotate(Mat3::from_rotation_z(degrees.to_radians()));
    }

    fn rotate(&mut self, rotation: Mat3) {
        let center = self.center();
        for vertex in &mut self.vertices {
            *vertex = center + rotation * (*vertex - center);
        }
    }

    /// The 12 triangles of the current cube.
    pub fn faces(&self) -> [Triangle; 12] {
        std::array::from_fn(|i| {
            let [a, b, c] = FACE_INDICES[i];
            Triangle::new(
                self.vertices[a],
                self.vertices[b],
                self.vertices[c],
                Arc::clone(&self.material),
            )
        })
    }
}

impl Hittable for Cube {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let faces = self.faces();
        let rec = closest_hit(faces.iter().map(|face| face as &dyn Hittable), ray, ray_t)?;

        // The faces are temporaries; hand back our own material
        Some(HitRecord {
            t: rec.t,
            p: rec.p,
            normal: rec.normal,
            material: self.material.as_ref(),
        })
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(Aabb::from_vertices(self.vertices))
    }
}
