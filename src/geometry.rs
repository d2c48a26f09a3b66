//! Shared geometric primitives
//!
//! Angular distance is the only metric used anywhere in the crate: site
//! energies, cap radii, the cap-overlap test and exchange gains all go
//! through [`angular_distance`].

use glam::{DVec2, DVec3};
use rand::Rng;
use std::f64::consts::TAU;

/// Arc length between two directions on the unit sphere
///
/// The dot product is clamped to `[-1, 1]` before `acos`, so rounding that
/// pushes it slightly past either end cannot produce NaN. The result always
/// lies in `[0, π]`.
///
/// `b` does not have to be unit length; representatives computed as a raw
/// mean are shorter than 1 and are measured exactly as stored.
#[inline]
pub fn angular_distance(a: DVec3, b: DVec3) -> f64 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}

/// Draw a uniformly distributed direction on the unit sphere
///
/// Inverse-transform sampling: `y` uniform in `[-1, 1]`, azimuth uniform in
/// `[0, 2π)`. The two draws happen in that order.
pub fn random_unit_direction<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    let y: f64 = rng.gen_range(-1.0..=1.0);
    let r = (1.0 - y * y).max(0.0).sqrt();
    let phi: f64 = rng.gen_range(0.0..TAU);
    let (sin_phi, cos_phi) = phi.sin_cos();
    DVec3::new(r * sin_phi, y, r * cos_phi)
}

/// Point on the unit circle at the given angle (radians)
#[inline]
pub fn ring_point(angle: f64) -> DVec2 {
    let (sin, cos) = angle.sin_cos();
    DVec2::new(cos, sin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::f64::consts::PI;

    #[test]
    fn test_angular_distance_identity() {
        let a = DVec3::new(0.3, -0.4, 0.5).normalize();
        assert!(angular_distance(a, a).abs() < 1e-7);
    }

    #[test]
    fn test_angular_distance_known_angles() {
        assert!((angular_distance(DVec3::X, DVec3::Y) - PI / 2.0).abs() < 1e-12);
        assert!((angular_distance(DVec3::X, DVec3::NEG_X) - PI).abs() < 1e-12);
        assert!((angular_distance(DVec3::Z, DVec3::Z)).abs() < 1e-12);
    }

    #[test]
    fn test_angular_distance_overshoot_is_clamped() {
        // Slightly longer than unit: the raw dot product exceeds 1
        let a = DVec3::X * (1.0 + 1e-12);
        let d = angular_distance(a, a);
        assert_eq!(d, 0.0);

        let b = DVec3::NEG_X * (1.0 + 1e-12);
        let d = angular_distance(a, b);
        assert!((d - PI).abs() < 1e-12);
    }

    #[test]
    fn test_angular_distance_domain() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1000 {
            let a = random_unit_direction(&mut rng);
            let b = random_unit_direction(&mut rng);
            let d = angular_distance(a, b);
            assert!((0.0..=PI).contains(&d), "distance {} outside [0, π]", d);
            assert!((d - angular_distance(b, a)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_random_directions_are_unit() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..1000 {
            let p = random_unit_direction(&mut rng);
            assert!((p.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_random_directions_cover_both_hemispheres() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let points: Vec<DVec3> = (0..500).map(|_| random_unit_direction(&mut rng)).collect();
        let north = points.iter().filter(|p| p.y > 0.0).count();
        assert!(north > 150 && north < 350, "north hemisphere holds {} of 500", north);
    }

    #[test]
    fn test_ring_point() {
        let p = ring_point(0.0);
        assert!((p - DVec2::X).length() < 1e-12);
        let p = ring_point(PI / 2.0);
        assert!((p - DVec2::Y).length() < 1e-12);
    }
}
