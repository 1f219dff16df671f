// Re-export glam for convenience
pub use glam;

/// Three-component double precision vector used for directions and offsets.
pub type Vec3 = glam::DVec3;

/// Semantic alias of [`Vec3`] for positions.
pub type Point3 = glam::DVec3;

/// Linear RGB color, one component per channel.
pub type Color = glam::DVec3;

// Ember math types
mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{near_zero, reflect, refract, NEAR_ZERO_EPSILON};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_color_multiply_is_componentwise() {
        let attenuation = Color::new(0.5, 0.25, 1.0);
        let incoming = Color::new(1.0, 2.0, 0.5);
        assert_eq!(attenuation * incoming, Color::new(0.5, 0.5, 0.5));
    }
}
