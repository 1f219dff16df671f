//! Scene description files and the built-in default scene.
//!
//! A scene file is JSON:
//!
//! ```json
//! {
//!   "seed": 7,
//!   "camera": { "aspect_ratio": 1.7777, "image_width": 400 },
//!   "materials": {
//!     "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] },
//!     "glass":  { "type": "dielectric", "refractive_index": 1.5 }
//!   },
//!   "spheres": [
//!     { "center": [0.0, -100.5, -1.0], "radius": 100.0, "material": "ground" }
//!   ]
//! }
//! ```

use ember_renderer::{
    CameraConfig, Color, Dielectric, Lambertian, Material, Metal, Point3, Sphere, SurfaceList,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Seed used when neither the scene nor the command line picks one.
pub const DEFAULT_SEED: u64 = 0;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Sphere {index} references unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },
}

/// Material entry of a scene file.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Lambertian { albedo: Color },
    Metal { albedo: Color, fuzz: f64 },
    Dielectric { refractive_index: f64 },
}

impl MaterialDesc {
    fn build(&self) -> Material {
        match *self {
            MaterialDesc::Lambertian { albedo } => Lambertian::new(albedo).into(),
            MaterialDesc::Metal { albedo, fuzz } => Metal::new(albedo, fuzz).into(),
            MaterialDesc::Dielectric { refractive_index } => {
                Dielectric::new(refractive_index).into()
            }
        }
    }
}

/// Sphere entry of a scene file.
#[derive(Debug, Clone, Deserialize)]
pub struct SphereDesc {
    pub center: Point3,
    pub radius: f64,
    /// Name of an entry in `materials`
    #[serde(default)]
    pub material: Option<String>,
}

/// Parsed scene file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SceneDesc {
    pub seed: Option<u64>,
    pub camera: CameraConfig,
    pub materials: BTreeMap<String, MaterialDesc>,
    pub spheres: Vec<SphereDesc>,
}

/// A scene ready to render.
pub struct Scene {
    pub camera: CameraConfig,
    pub world: SurfaceList,
    pub seed: u64,
}

impl SceneDesc {
    /// Load a scene description from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build materials and surfaces.
    ///
    /// Each material is constructed once and shared by every sphere naming
    /// it. A sphere without a material is kept as bare geometry.
    pub fn build(&self) -> Result<Scene, SceneError> {
        let materials: BTreeMap<&str, Arc<Material>> = self
            .materials
            .iter()
            .map(|(name, desc)| (name.as_str(), Arc::new(desc.build())))
            .collect();

        let mut world = SurfaceList::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            let surface = match &sphere.material {
                Some(name) => {
                    let material = materials.get(name.as_str()).ok_or_else(|| {
                        SceneError::UnknownMaterial {
                            index,
                            name: name.clone(),
                        }
                    })?;
                    Sphere::new(sphere.center, sphere.radius, material.clone())
                }
                None => {
                    log::warn!("Sphere {} has no material", index);
                    Sphere::without_material(sphere.center, sphere.radius)
                }
            };
            world.add(Arc::new(surface));
        }

        log::info!(
            "Built scene: {} spheres, {} materials",
            world.len(),
            materials.len()
        );

        Ok(Scene {
            camera: self.camera.clone(),
            world,
            seed: self.seed.unwrap_or(DEFAULT_SEED),
        })
    }
}

/// Two diffuse spheres: a small one resting on a huge ground sphere.
pub fn default_scene() -> Scene {
    let material: Arc<Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)).into());

    let mut world = SurfaceList::new();
    world.add(Arc::new(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, material.clone())));
    world.add(Arc::new(Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0, material)));

    let camera = CameraConfig {
        aspect_ratio: 16.0 / 9.0,
        image_width: 400,
        samples_per_pixel: 100,
        max_depth: 50,
        ..CameraConfig::default()
    };

    Scene {
        camera,
        world,
        seed: DEFAULT_SEED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"{
        "seed": 7,
        "camera": { "image_width": 64, "samples_per_pixel": 2 },
        "materials": {
            "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] },
            "chrome": { "type": "metal", "albedo": [0.8, 0.8, 0.8], "fuzz": 3.0 },
            "glass":  { "type": "dielectric", "refractive_index": 1.5 }
        },
        "spheres": [
            { "center": [0.0, -100.5, -1.0], "radius": 100.0, "material": "ground" },
            { "center": [-1.0, 0.0, -1.0], "radius": 0.5, "material": "glass" },
            { "center": [1.0, 0.0, -1.0], "radius": 0.5, "material": "chrome" }
        ]
    }"#;

    #[test]
    fn test_parse_and_build() {
        let desc = SceneDesc::from_json(SCENE).unwrap();
        assert_eq!(desc.materials.len(), 3);

        let scene = desc.build().unwrap();
        assert_eq!(scene.seed, 7);
        assert_eq!(scene.world.len(), 3);
        assert_eq!(scene.camera.image_width, 64);
        assert_eq!(scene.camera.samples_per_pixel, 2);
        assert_eq!(scene.camera.max_depth, CameraConfig::default().max_depth);
    }

    #[test]
    fn test_material_built_through_constructor() {
        let desc = SceneDesc::from_json(SCENE).unwrap();
        match desc.materials["chrome"].build() {
            Material::Metal(metal) => assert_eq!(metal.fuzz(), 1.0),
            other => panic!("expected metal, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_material() {
        let desc = SceneDesc::from_json(
            r#"{ "spheres": [ { "center": [0, 0, -1], "radius": 0.5, "material": "nope" } ] }"#,
        )
        .unwrap();

        match desc.build() {
            Err(SceneError::UnknownMaterial { index, name }) => {
                assert_eq!(index, 0);
                assert_eq!(name, "nope");
            }
            _ => panic!("expected unknown material error"),
        }
    }

    #[test]
    fn test_sphere_without_material_is_kept() {
        let desc = SceneDesc::from_json(
            r#"{ "spheres": [ { "center": [0.0, 0.0, -1.0], "radius": 0.5 } ] }"#,
        )
        .unwrap();
        let scene = desc.build().unwrap();
        assert_eq!(scene.world.len(), 1);
        assert_eq!(scene.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            SceneDesc::from_json("{ not json"),
            Err(SceneError::Parse(_))
        ));
    }

    #[test]
    fn test_default_scene() {
        let scene = default_scene();
        assert_eq!(scene.world.len(), 2);
        assert_eq!(scene.camera.image_width, 400);
        assert_eq!(scene.camera.samples_per_pixel, 100);
        assert_eq!(scene.camera.max_depth, 50);
    }
}
