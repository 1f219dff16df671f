//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Result,
};
use ember_math::{Interval, Point3, Ray};
use std::sync::Arc;

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Option<Arc<Material>>,
}

impl Sphere {
    /// Create a new sphere sharing the given material.
    pub fn new(center: Point3, radius: f64, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            material: Some(material),
        }
    }

    /// Create a sphere with geometry only.
    ///
    /// Any hit on it fails with [`crate::RenderError::InvalidMaterial`].
    pub fn without_material(center: Point3, radius: f64) -> Self {
        Self {
            center,
            radius,
            material: None,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> Option<&Arc<Material>> {
        self.material.as_ref()
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Result<Option<HitRecord>> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return Ok(None);
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return Ok(None);
            }
        }

        let outward_normal = ((ray.at(root) - self.center) / self.radius).normalize();
        HitRecord::new(ray, root, outward_normal, self.material.as_ref()).map(Some)
    }
}
