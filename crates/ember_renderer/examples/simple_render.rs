//! Simple path tracer example.
//!
//! Renders a field of diffuse, metal and glass spheres with depth of field
//! and saves it to PPM format.

use ember_renderer::{
    sampling::{random_double, random_range, random_vector},
    write_ppm, Camera, CameraConfig, Color, Dielectric, Lambertian, Material, Metal, Point3,
    Sphere, SurfaceList, Vec3,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

fn main() -> ember_renderer::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = StdRng::seed_from_u64(42);

    let start = std::time::Instant::now();
    let world = build_scene(&mut rng);
    log::info!("Scene built in {:?}", start.elapsed());

    let camera = Camera::new(CameraConfig {
        aspect_ratio: 16.0 / 9.0,
        image_width: 400,
        samples_per_pixel: 50,
        max_depth: 10,
        vfov: 20.0,
        lookfrom: Point3::new(13.0, 2.0, 3.0),
        lookat: Point3::new(0.0, 0.0, 0.0),
        vup: Vec3::new(0.0, 1.0, 0.0),
        defocus_angle: 0.6,
        focus_dist: 10.0,
    });

    let image = camera.render(&world, &mut rng)?;

    let filename = "output.ppm";
    write_ppm(&image, BufWriter::new(File::create(filename)?))?;
    log::info!("Saved to {}", filename);
    Ok(())
}

fn build_scene(rng: &mut dyn RngCore) -> SurfaceList {
    let mut world = SurfaceList::new();
    let mut add = |center: Point3, radius: f64, material: Arc<Material>| {
        world.add(Arc::new(Sphere::new(center, radius, material)));
    };

    // Ground
    add(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)).into()),
    );

    // Every glass sphere shares one material
    let glass: Arc<Material> = Arc::new(Dielectric::new(1.5).into());

    // Three main spheres
    add(Point3::new(0.0, 1.0, 0.0), 1.0, glass.clone());
    add(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1)).into()),
    );
    add(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0).into()),
    );

    // Small random spheres
    for a in -5..5 {
        for b in -5..5 {
            let center = Point3::new(
                a as f64 + 0.9 * random_double(rng),
                0.2,
                b as f64 + 0.9 * random_double(rng),
            );

            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat = random_double(rng);
            let material: Arc<Material> = if choose_mat < 0.8 {
                // Diffuse
                let albedo = random_vector(rng, 0.0, 1.0) * random_vector(rng, 0.0, 1.0);
                Arc::new(Lambertian::new(albedo).into())
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = random_vector(rng, 0.5, 1.0);
                let fuzz = random_range(rng, 0.0, 0.5);
                Arc::new(Metal::new(albedo, fuzz).into())
            } else {
                glass.clone()
            };
            add(center, 0.2, material);
        }
    }

    log::info!("Created {} objects", world.len());
    world
}
