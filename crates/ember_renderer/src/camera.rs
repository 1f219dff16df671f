//! Camera for ray generation.

use crate::renderer::{render, ImageBuffer};
use crate::sampling::{random_in_unit_disk, sample_square};
use crate::{Hittable, RenderError, Result};
use ember_math::{near_zero, Point3, Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Largest accepted image width or height in pixels.
pub const MAX_IMAGE_DIMENSION: u32 = 65_536;

/// User-facing camera settings.
///
/// Every field has a default so partial configuration files work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Ratio of image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Count of random samples for each pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces into scene
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Point the camera is looking from
    pub lookfrom: Point3,
    /// Point the camera is looking at
    pub lookat: Point3,
    /// Camera-relative "up" direction
    pub vup: Vec3,
    /// Variation angle of rays through each pixel, in degrees (0 disables)
    pub defocus_angle: f64,
    /// Distance from camera to plane of perfect focus
    pub focus_dist: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            lookfrom: Point3::new(0.0, 0.0, 0.0),
            lookat: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            defocus_angle: 0.0,
            focus_dist: 1.0,
        }
    }
}

impl CameraConfig {
    /// Image height derived from width and aspect ratio, at least 1.
    ///
    /// Saturates at `u32::MAX` for extreme aspect ratios.
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f64 / self.aspect_ratio) as u32).max(1)
    }

    /// Check the ranges every derived value depends on.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(RenderError::InvalidConfig(msg));

        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return invalid(format!("aspect_ratio must be > 0, got {}", self.aspect_ratio));
        }
        if self.image_width == 0 {
            return invalid("image_width must be > 0".to_string());
        }
        if self.image_width > MAX_IMAGE_DIMENSION || self.image_height() > MAX_IMAGE_DIMENSION {
            return invalid(format!(
                "image size {}x{} exceeds {} pixels per side",
                self.image_width,
                self.image_height(),
                MAX_IMAGE_DIMENSION
            ));
        }
        if self.samples_per_pixel == 0 {
            return invalid("samples_per_pixel must be >= 1".to_string());
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return invalid(format!("vfov must be in (0, 180) degrees, got {}", self.vfov));
        }
        if !(self.focus_dist.is_finite() && self.focus_dist > 0.0) {
            return invalid(format!("focus_dist must be > 0, got {}", self.focus_dist));
        }
        if !(self.defocus_angle.is_finite() && self.defocus_angle >= 0.0) {
            return invalid(format!("defocus_angle must be >= 0, got {}", self.defocus_angle));
        }
        if near_zero(self.lookfrom - self.lookat) {
            return invalid("lookfrom and lookat must differ".to_string());
        }
        if near_zero(self.vup.cross(self.lookfrom - self.lookat)) {
            return invalid("vup must not be parallel to the view direction".to_string());
        }
        Ok(())
    }
}

/// Camera for generating rays into the scene.
///
/// Created from a [`CameraConfig`], prepared once by [`Camera::initialize`]
/// and consumed by [`Camera::render`].
#[derive(Debug, Clone)]
pub struct Camera {
    config: CameraConfig,
    initialized: bool,

    // Cached computed values (set by initialize())
    image_height: u32,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    /// Create an uninitialized camera.
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            initialized: false,
            image_height: 1,
            center: Point3::ZERO,
            pixel00_loc: Point3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn image_width(&self) -> u32 {
        self.config.image_width
    }

    /// Image height, valid once initialized.
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.config.samples_per_pixel
    }

    pub fn max_depth(&self) -> u32 {
        self.config.max_depth
    }

    /// Camera basis vectors (right, up, back).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Derive the viewport and lens geometry from the configuration.
    ///
    /// Calling it again is a no-op.
    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        self.config.validate()?;

        let cfg = &self.config;

        self.image_height = cfg.image_height();
        self.center = cfg.lookfrom;

        // Calculate viewport dimensions
        let theta = cfg.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * cfg.focus_dist;
        let viewport_width =
            viewport_height * (cfg.image_width as f64 / self.image_height as f64);

        // Calculate camera basis vectors
        self.w = (cfg.lookfrom - cfg.lookat).normalize();
        self.u = cfg.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        self.pixel_delta_u = viewport_u / cfg.image_width as f64;
        self.pixel_delta_v = viewport_v / self.image_height as f64;

        let viewport_upper_left =
            self.center - cfg.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        // Calculate defocus disk basis vectors
        let defocus_radius = cfg.focus_dist * (cfg.defocus_angle / 2.0).to_radians().tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        self.initialized = true;
        log::debug!(
            "Camera initialized: {}x{}, viewport {:.3}x{:.3}",
            cfg.image_width,
            self.image_height,
            viewport_width,
            viewport_height
        );
        Ok(())
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    ///
    /// The camera must be initialized.
    pub(crate) fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        debug_assert!(self.initialized, "get_ray on an uninitialized camera");

        let offset = sample_square(rng);
        let pixel_sample = self.pixel00_loc
            + ((i as f64) + offset.x) * self.pixel_delta_u
            + ((j as f64) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.config.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    /// Render `world`, consuming the camera.
    ///
    /// Initializes first if needed. The returned buffer holds the summed
    /// samples of every pixel.
    pub fn render(mut self, world: &dyn Hittable, rng: &mut dyn RngCore) -> Result<ImageBuffer> {
        self.initialize()?;
        render(&self, world, rng)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn initialized(config: CameraConfig) -> Camera {
        let mut camera = Camera::new(config);
        camera.initialize().unwrap();
        camera
    }

    #[test]
    fn test_camera_initialize() {
        let camera = initialized(CameraConfig {
            aspect_ratio: 4.0 / 3.0,
            image_width: 800,
            ..CameraConfig::default()
        });

        assert_eq!(camera.center, Vec3::ZERO);
        assert_eq!(camera.image_height(), 600);
        let (u, v, w) = camera.basis();
        assert!((w - Vec3::Z).length() < 1e-12);
        assert!((u - Vec3::X).length() < 1e-12);
        assert!((v - Vec3::Y).length() < 1e-12);
    }

    #[test]
    fn test_image_height_sixteen_nine() {
        let camera = initialized(CameraConfig {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            ..CameraConfig::default()
        });
        assert_eq!(camera.image_height(), 225);
    }

    #[test]
    fn test_image_height_at_least_one() {
        let camera = initialized(CameraConfig {
            aspect_ratio: 1000.0,
            image_width: 10,
            ..CameraConfig::default()
        });
        assert_eq!(camera.image_height(), 1);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let camera = initialized(CameraConfig {
            lookfrom: Point3::new(-2.0, 2.0, 1.0),
            lookat: Point3::new(0.0, 0.0, -1.0),
            vfov: 20.0,
            ..CameraConfig::default()
        });
        let (u, v, w) = camera.basis();

        for axis in [u, v, w] {
            assert!((axis.length() - 1.0).abs() < 1e-12);
        }
        assert!(u.dot(v).abs() < 1e-12);
        assert!(v.dot(w).abs() < 1e-12);
        assert!(u.dot(w).abs() < 1e-12);
        assert!((w - Vec3::new(-2.0, 2.0, 2.0).normalize()).length() < 1e-12);
    }

    #[test]
    fn test_viewport_geometry() {
        // vfov 90 and focus 1 gives a viewport two units tall
        let camera = initialized(CameraConfig {
            image_width: 100,
            aspect_ratio: 2.0,
            ..CameraConfig::default()
        });

        assert!((camera.pixel_delta_u - Vec3::new(0.04, 0.0, 0.0)).length() < 1e-12);
        assert!((camera.pixel_delta_v - Vec3::new(0.0, -0.04, 0.0)).length() < 1e-12);
        assert!((camera.pixel00_loc - Vec3::new(-1.98, 0.98, -1.0)).length() < 1e-12);
    }

    #[test]
    fn test_camera_ray_direction() {
        let camera = initialized(CameraConfig {
            image_width: 100,
            ..CameraConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(42);

        // Center ray should point roughly towards -Z
        let ray = camera.get_ray(50, 50, &mut rng);
        assert_eq!(ray.origin(), Point3::ZERO);
        assert!(ray.direction().z < 0.0);
    }

    #[test]
    fn test_jitter_stays_inside_pixel() {
        let camera = initialized(CameraConfig {
            image_width: 10,
            ..CameraConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(5);
        let center = camera.pixel00_loc + 3.0 * camera.pixel_delta_u + 7.0 * camera.pixel_delta_v;

        for _ in 0..500 {
            let ray = camera.get_ray(3, 7, &mut rng);
            // Direction ends on the focus plane at z = -1
            let offset = ray.at(1.0) - center;
            assert!(offset.x.abs() <= 0.5 * camera.pixel_delta_u.x + 1e-12);
            assert!(offset.y.abs() <= 0.5 * camera.pixel_delta_v.y.abs() + 1e-12);
        }
    }

    #[test]
    fn test_defocus_disk_origins() {
        let camera = initialized(CameraConfig {
            defocus_angle: 10.0,
            focus_dist: 3.0,
            ..CameraConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(6);
        let radius = 3.0 * 5.0_f64.to_radians().tan();

        let mut moved = false;
        for _ in 0..200 {
            let ray = camera.get_ray(50, 50, &mut rng);
            let origin = ray.origin();
            assert_eq!(origin.z, 0.0);
            assert!(origin.length() < radius + 1e-12);
            moved |= origin != Point3::ZERO;
        }
        assert!(moved);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let bad = [
            CameraConfig { image_width: 0, ..CameraConfig::default() },
            CameraConfig { samples_per_pixel: 0, ..CameraConfig::default() },
            CameraConfig { aspect_ratio: 0.0, ..CameraConfig::default() },
            CameraConfig { focus_dist: -1.0, ..CameraConfig::default() },
            CameraConfig { vfov: 180.0, ..CameraConfig::default() },
            CameraConfig { lookat: Point3::ZERO, ..CameraConfig::default() },
            CameraConfig { vup: Vec3::Z, ..CameraConfig::default() },
        ];

        for config in bad {
            let mut camera = Camera::new(config);
            assert!(matches!(camera.initialize(), Err(RenderError::InvalidConfig(_))));
            assert!(!camera.is_initialized());
        }
    }

    #[test]
    fn test_oversized_images_rejected() {
        // A tiny aspect ratio would saturate the height to u32::MAX
        let tall = CameraConfig { aspect_ratio: 1e-9, ..CameraConfig::default() };
        assert_eq!(tall.image_height(), u32::MAX);

        let wide = CameraConfig {
            image_width: MAX_IMAGE_DIMENSION + 1,
            ..CameraConfig::default()
        };

        for config in [tall, wide] {
            let mut camera = Camera::new(config);
            assert!(matches!(camera.initialize(), Err(RenderError::InvalidConfig(_))));
        }

        let largest = CameraConfig {
            image_width: MAX_IMAGE_DIMENSION,
            ..CameraConfig::default()
        };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn test_config_partial_json() {
        let config: CameraConfig =
            serde_json::from_str(r#"{ "image_width": 400, "lookfrom": [1.0, 2.0, 3.0] }"#).unwrap();

        assert_eq!(config.image_width, 400);
        assert_eq!(config.lookfrom, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(config.samples_per_pixel, CameraConfig::default().samples_per_pixel);
    }
}
