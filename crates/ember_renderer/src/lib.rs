//! Ember renderer - CPU path tracing
//!
//! A Monte Carlo path tracer over spheres with diffuse, metal and glass
//! materials. Every ray is tested against every surface; rendering is
//! single-threaded and reproducible from a seed.

mod camera;
mod error;
mod hittable;
mod material;
mod output;
mod renderer;
pub mod sampling;
mod sphere;

pub use camera::{Camera, CameraConfig, MAX_IMAGE_DIMENSION};
pub use error::{RenderError, Result};
pub use hittable::{HitRecord, Hittable, SurfaceList};
pub use material::{Dielectric, Lambertian, Material, Metal, Scatter};
pub use output::{color_to_rgb8, linear_to_gamma, save_png, write_ppm};
pub use renderer::{ray_color, sky_gradient, ImageBuffer, SURFACE_BIAS};
pub use sphere::Sphere;

/// Re-export the math types from ember_math
pub use ember_math::{Color, Interval, Point3, Ray, Vec3};
