//! Vector helpers that glam does not provide.

use crate::Vec3;

/// Per-component threshold below which a vector counts as zero.
pub const NEAR_ZERO_EPSILON: f64 = 1e-8;

/// Returns true if the vector is close to zero in all dimensions.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.x.abs() < NEAR_ZERO_EPSILON && v.y.abs() < NEAR_ZERO_EPSILON && v.z.abs() < NEAR_ZERO_EPSILON
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with the given normal.
///
/// `etai_over_etat` is the ratio of the refractive indices on the incoming
/// and outgoing sides. Returns `None` when Snell's law has no solution
/// (total internal reflection).
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Option<Vec3> {
    let cos_theta = (-uv).dot(n).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    if etai_over_etat * sin_theta > 1.0 {
        return None;
    }

    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    Some(r_out_perp + r_out_parallel)
}
