//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Ray};
use lumen_math::{Aabb, Interval, Vec3};

/// Record of a ray-object intersection.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, outward-facing for closed shapes
    pub normal: Vec3,
    /// Material of the struck surface
    pub material: &'a dyn Material,
}

impl std::fmt::Debug for HitRecord<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRecord")
            .field("t", &self.t)
            .field("p", &self.p)
            .field("normal", &self.normal)
            .finish_non_exhaustive()
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object with `t` strictly inside `ray_t`.
    ///
    /// `ray_t.min` keeps a scattered ray from re-hitting the surface it
    /// left; `ray_t.max` is the closest hit found so far.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;

    /// Axis-aligned bounding box, or `None` for unbounded geometry.
    fn bounding_box(&self) -> Option<Aabb>;
}

/// Nearest hit among `objects`.
///
/// The window's upper bound shrinks to every hit found, so a later, farther
/// object can never replace a nearer one. Ties keep the earlier object.
pub fn closest_hit<'a, I>(objects: I, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>
where
    I: IntoIterator<Item = &'a dyn Hittable>,
{
    let mut closest: Option<HitRecord<'a>> = None;
    let mut closest_so_far = ray_t.max;

    for object in objects {
        if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
            closest_so_far = rec.t;
            closest = Some(rec);
        }
    }

    closest
}

/// A list of hittable objects, scanned linearly.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over the members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Hittable> {
        self.objects.iter().map(|object| object.as_ref())
    }
}

impl FromIterator<Box<dyn Hittable>> for HittableList {
    fn from_iter<T: IntoIterator<Item = Box<dyn Hittable>>>(iter: T) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        closest_hit(self.iter(), ray, ray_t)
    }

    fn bounding_box(&self) -> Option<Aabb> {
        // One unbounded member makes the whole list unbounded
        let mut objects = self.iter();
        let first = objects.next()?.bounding_box()?;
        objects.try_fold(first, |acc, object| {
            object
                .bounding_box()
                .map(|bbox| Aabb::surrounding(&acc, &bbox))
        })
    }
}
