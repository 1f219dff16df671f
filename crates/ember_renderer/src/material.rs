//! Materials describing how light scatters off a surface.

use crate::sampling::random_unit_vector;
use crate::{HitRecord, Ray};
use ember_math::{near_zero, reflect, refract, Color};
use rand::RngCore;

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    /// The continuing ray
    pub scattered: Ray,
    /// Fraction of the continuing ray's color that survives the bounce
    pub attenuation: Color,
}

/// The closed set of surface materials.
///
/// Materials never change after construction and are shared between
/// surfaces through `Arc<Material>`.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    /// Scatter an incoming ray.
    ///
    /// Returns `Some(Scatter)` if the ray continues, or `None` if it is absorbed.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        match self {
            Material::Lambertian(m) => m.scatter(ray_in, rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => m.scatter(ray_in, rec, rng),
        }
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Lambertian(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Material::Dielectric(m)
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, Copy, PartialEq)]
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

    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        Some(Scatter {
            scattered: Ray::new(rec.p, scatter_direction),
            attenuation: self.albedo,
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough.
    ///   Values outside [0, 1] are clamped.
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }

    // A fuzzed reflection may point below the surface; it is still returned.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let direction = reflected + self.fuzz * random_unit_vector(rng);

        Some(Scatter {
            scattered: Ray::new(rec.p, direction),
            attenuation: self.albedo,
        })
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dielectric {
    refractive_index: f64,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `refractive_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn new(refractive_index: f64) -> Self {
        Self { refractive_index }
    }

    pub fn refractive_index(&self) -> f64 {
        self.refractive_index
    }

    /// Ratio of refractive indices across the surface for this hit.
    fn refraction_ratio(&self, front_face: bool) -> f64 {
        if front_face {
            1.0 / self.refractive_index
        } else {
            self.refractive_index
        }
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<Scatter> {
        let unit_direction = ray_in.direction().normalize();
        let ratio = self.refraction_ratio(rec.front_face);

        // Total internal reflection falls back to a mirror bounce
        let direction = refract(unit_direction, rec.normal, ratio)
            .unwrap_or_else(|| reflect(unit_direction, rec.normal));

        Some(Scatter {
            scattered: Ray::new(rec.p, direction),
            attenuation: Color::ONE,
        })
    }
}
