//! Randomized initialization of the site partition
//!
//! Points are scattered uniformly over the sphere and dealt out to sites by
//! generation index: the first `capacity` points go to site 0, the next
//! `capacity` to site 1, and so on. Sites therefore start out spread over the
//! whole sphere; the relaxation is what localizes them.

use glam::DVec3;
use rand::Rng;

use crate::geometry::random_unit_direction;
use crate::site::Site;

/// Build `site_count` sites of `capacity` random points each
///
/// Every site's initial representative is one of its own members chosen
/// uniformly at random (not the centroid). All points are drawn before any
/// representative, so the point set for a given seed does not depend on how
/// it is partitioned. A zero capacity yields no sites.
///
/// # Arguments
///
/// * `site_count` - Number of sites to build
/// * `capacity` - Points per site
/// * `rng` - Generator to draw from; seed it for reproducible layouts
///
/// # Returns
///
/// `site_count` sites in index order, none marked stable
///
/// # Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use rust_sphere_sampler::sphere::scatter_sites;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(10001);
/// let sites = scatter_sites(4, 16, &mut rng);
/// assert_eq!(sites.len(), 4);
/// assert!(sites.iter().all(|s| s.len() == 16));
/// ```
pub fn scatter_sites<R: Rng + ?Sized>(site_count: usize, capacity: usize, rng: &mut R) -> Vec<Site> {
    if capacity == 0 {
        return Vec::new();
    }

    let points: Vec<DVec3> = (0..site_count * capacity)
        .map(|_| random_unit_direction(rng))
        .collect();

    points
        .chunks(capacity)
        .map(|members| {
            let pick = rng.gen_range(0..capacity);
            Site::new(members[pick], members.to_vec())
        })
        .collect()
}

/// Sum of site energies in site order
pub fn total_energy(sites: &[Site]) -> f64 {
    sites.iter().map(Site::energy).fold(0.0, |acc, e| acc + e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_scatter_partition_sizes() {
        let mut rng = ChaCha8Rng::seed_from_u64(10001);
        let sites = scatter_sites(7, 13, &mut rng);

        assert_eq!(sites.len(), 7);
        for site in &sites {
            assert_eq!(site.len(), 13);
            assert!(!site.is_stable());
        }
    }

    #[test]
    fn test_representative_is_a_member() {
        let mut rng = ChaCha8Rng::seed_from_u64(10001);
        let sites = scatter_sites(5, 16, &mut rng);

        for site in &sites {
            assert!(site.members().contains(&site.representative()));
        }
    }

    #[test]
    fn test_partition_follows_generation_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let sites = scatter_sites(3, 4, &mut rng);

        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let points: Vec<DVec3> = (0..12).map(|_| random_unit_direction(&mut rng)).collect();

        for (s, site) in sites.iter().enumerate() {
            assert_eq!(site.members(), &points[s * 4..(s + 1) * 4]);
        }
    }

    #[test]
    fn test_scatter_determinism() {
        let a = scatter_sites(4, 32, &mut ChaCha8Rng::seed_from_u64(10001));
        let b = scatter_sites(4, 32, &mut ChaCha8Rng::seed_from_u64(10001));
        assert_eq!(a, b);

        let c = scatter_sites(4, 32, &mut ChaCha8Rng::seed_from_u64(10002));
        assert_ne!(a, c);
    }

    #[test]
    fn test_energy_matches_members() {
        let sites = scatter_sites(3, 64, &mut ChaCha8Rng::seed_from_u64(1));

        for site in &sites {
            let mut energy = 0.0;
            let mut max_radius: f64 = 0.0;
            for &p in site.members() {
                let r = crate::geometry::angular_distance(site.representative(), p);
                energy += r * r;
                max_radius = max_radius.max(r);
            }
            assert!((site.energy() - energy).abs() < 1e-9);
            assert!((site.max_radius() - max_radius).abs() < 1e-12);
        }

        let total: f64 = sites.iter().map(|s| s.energy()).sum();
        assert!((total_energy(&sites) - total).abs() < 1e-9);
    }
}
