//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, RenderError, Result};
use ember_math::{Interval, Point3, Ray, Vec3};
use std::sync::Arc;

/// Record of a ray-object intersection.
#[derive(Debug, Clone)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Point3,
    /// Unit surface normal at intersection (always points against the ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: Arc<Material>,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl HitRecord {
    /// Build a hit record for `ray` at parameter `t`.
    ///
    /// `outward_normal` must have unit length. The stored normal is flipped
    /// to oppose the ray, and `front_face` records which side was hit.
    /// Fails with [`RenderError::InvalidMaterial`] when no material is given.
    pub fn new(
        ray: &Ray,
        t: f64,
        outward_normal: Vec3,
        material: Option<&Arc<Material>>,
    ) -> Result<Self> {
        let material = material.cloned().ok_or(RenderError::InvalidMaterial)?;

        // If the ray and normal point in the same direction, we're inside
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Ok(Self {
            p: ray.at(t),
            normal,
            material,
            t,
            front_face,
        })
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object within the given interval.
    ///
    /// Returns the nearest hit, or `None` on a miss.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Result<Option<HitRecord>>;
}

/// An ordered list of shared hittable objects.
#[derive(Clone, Default)]
pub struct SurfaceList {
    objects: Vec<Arc<dyn Hittable>>,
}

impl SurfaceList {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
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
}

impl FromIterator<Arc<dyn Hittable>> for SurfaceList {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Hittable>>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl Hittable for SurfaceList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Result<Option<HitRecord>> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            let interval = Interval::new(ray_t.min, closest_so_far);
            if let Some(rec) = object.hit(ray, interval)? {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        Ok(closest)
    }
}
