//! Uniform random sampling helpers.
//!
//! Every function draws from an explicit generator so a render is
//! reproducible from its seed.

use ember_math::Vec3;
use rand::{Rng, RngCore};

/// Random value in [0, 1).
#[inline]
pub fn random_double(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Random value in [min, max).
#[inline]
pub fn random_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * random_double(rng)
}

/// Random vector with each component in [min, max).
pub fn random_vector(rng: &mut dyn RngCore, min: f64, max: f64) -> Vec3 {
    Vec3::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}

/// Random point strictly inside the unit sphere (rejection sampling).
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_vector(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random unit vector, uniformly distributed on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_in_unit_sphere(rng);
        let len_sq = p.length_squared();
        // Too short to normalize reliably
        if len_sq > 1e-160 {
            return p / len_sq.sqrt();
        }
    }
}

/// Random point inside the unit disk in the xy plane (z = 0).
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(random_range(rng, -1.0, 1.0), random_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random offset in the unit square [-0.5, 0.5) x [-0.5, 0.5).
pub fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(random_double(rng) - 0.5, random_double(rng) - 0.5, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_range_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = random_range(&mut rng, -2.0, 3.0);
            assert!((-2.0..3.0).contains(&x));
        }
    }

    #[test]
    fn test_unit_sphere_and_disk() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert!(random_in_unit_sphere(&mut rng).length_squared() < 1.0);

            let on = random_unit_vector(&mut rng);
            assert!((on.length() - 1.0).abs() < 1e-9);

            let disk = random_in_unit_disk(&mut rng);
            assert_eq!(disk.z, 0.0);
            assert!(disk.length_squared() < 1.0);
        }
    }

    #[test]
    fn test_sample_square_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let p = sample_square(&mut rng);
            assert!((-0.5..0.5).contains(&p.x));
            assert!((-0.5..0.5).contains(&p.y));
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);
        assert_eq!(random_unit_vector(&mut a), random_unit_vector(&mut b));
    }
}
