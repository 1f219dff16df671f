//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing bounded by a maximum bounce depth
//! - Anti-aliasing via jittered multi-sampling
//! - A white-to-blue sky for rays that escape the scene

use crate::{Camera, Hittable, RenderError, Result};
use ember_math::{Color, Interval, Ray};
use rand::RngCore;
use std::time::Instant;

/// Smallest accepted hit distance, keeps bounced rays off their own surface.
pub const SURFACE_BIAS: f64 = 0.001;

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and multiplying in their attenuation.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Result<Color> {
    // If we've exceeded the ray bounce limit, no more light is gathered
    if depth == 0 {
        return Ok(Color::ZERO);
    }

    let Some(rec) = world.hit(ray, Interval::new(SURFACE_BIAS, f64::INFINITY))? else {
        return Ok(sky_gradient(ray));
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(scatter) => {
            let incoming = ray_color(&scatter.scattered, world, depth - 1, rng)?;
            Ok(scatter.attenuation * incoming)
        }
        // Absorbed
        None => Ok(Color::ZERO),
    }
}

/// Background seen by rays that hit nothing.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Render a single pixel, returning the sum of its samples.
pub(crate) fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Result<Color> {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel() {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth(), rng)?;
    }

    Ok(pixel_color)
}

/// Image buffer holding accumulated linear color per pixel.
///
/// Pixels are stored row-major from the top row. Each value is the sum of
/// `samples_per_pixel` estimates; writers divide it out.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32, samples_per_pixel: u32) -> Self {
        Self {
            width,
            height,
            samples_per_pixel,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Average color of the pixel at (x, y).
    pub fn average(&self, x: u32, y: u32) -> Color {
        self.get(x, y) / self.samples_per_pixel.max(1) as f64
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render the entire scene to an image buffer.
///
/// Single-threaded: rows top to bottom, pixels left to right.
/// Fails with [`RenderError::InvalidConfig`] if the camera is not initialized.
pub(crate) fn render(
    camera: &Camera,
    world: &dyn Hittable,
    rng: &mut dyn RngCore,
) -> Result<ImageBuffer> {
    if !camera.is_initialized() {
        return Err(RenderError::InvalidConfig(
            "camera must be initialized before rendering".to_string(),
        ));
    }

    let width = camera.image_width();
    let height = camera.image_height();
    let mut image = ImageBuffer::new(width, height, camera.samples_per_pixel());

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        width,
        height,
        camera.samples_per_pixel(),
        camera.max_depth()
    );
    let start = Instant::now();

    for y in 0..height {
        log::debug!("Scanlines remaining: {}", height - y);
        for x in 0..width {
            let color = render_pixel(camera, world, x, y, rng)?;
            image.set(x, y, color);
        }
    }

    log::info!("Done in {:?}", start.elapsed());
    Ok(image)
}
