//! Site Structure
//!
//! A site is one group of raw points on the sphere with a representative
//! direction and the statistics the optimizer needs.

use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::RecenterMode;
use crate::geometry::angular_distance;

/// A partition group of points on the unit sphere
///
/// Each site holds:
/// - A representative direction, read back by consumers as the sample
/// - A fixed number of member points, index-addressable for exchanges
/// - The energy (sum of squared angular distances to the representative)
/// - The cap radius (largest angular distance to any member)
/// - Whether the last optimization pass left it untouched
///
/// `energy` and `max_radius` are recomputed whenever the representative or
/// the members change, so they always describe the current state.
///
/// # Memory Usage
///
/// 24 bytes per member plus ~64 bytes of bookkeeping. A default site
/// (256 members) is roughly 6 KB.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub(crate) representative: DVec3,
    pub(crate) members: Vec<DVec3>,
    pub(crate) energy: f64,
    pub(crate) max_radius: f64,
    pub(crate) stable: bool,
}

impl Site {
    /// Create a site from an explicit representative and member list
    ///
    /// Statistics are computed immediately. A new site is never stable, so
    /// the next optimization pass always examines it.
    pub fn new(representative: DVec3, members: Vec<DVec3>) -> Self {
        let mut site = Self {
            representative,
            members,
            energy: 0.0,
            max_radius: 0.0,
            stable: false,
        };
        site.refresh_statistics();
        site
    }

    /// Direction consumers read back for this site
    #[inline]
    pub fn representative(&self) -> DVec3 {
        self.representative
    }

    /// Points currently owned by this site
    #[inline]
    pub fn members(&self) -> &[DVec3] {
        &self.members
    }

    /// Number of points owned by this site
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the site owns no points
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sum of squared angular distances from the representative to every member
    #[inline]
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Largest angular distance from the representative to any member
    #[inline]
    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    /// True if the most recent pass accepted no exchange touching this site
    #[inline]
    pub fn is_stable(&self) -> bool {
        self.stable
    }

    /// Could any member of either site be closer to the other representative?
    ///
    /// False when the caps around both representatives are disjoint.
    pub fn caps_overlap(&self, other: &Site) -> bool {
        let d = angular_distance(self.representative, other.representative);
        d <= self.max_radius + other.max_radius
    }

    /// Recompute energy and cap radius for the current representative
    pub(crate) fn refresh_statistics(&mut self) {
        let mut energy = 0.0;
        let mut max_radius: f64 = 0.0;
        for &member in &self.members {
            let r = angular_distance(self.representative, member);
            energy += r * r;
            max_radius = max_radius.max(r);
        }
        self.energy = energy;
        self.max_radius = max_radius;
    }

    /// Move the representative to the mean of the members, then refresh statistics
    ///
    /// Called for both sites of a pair after at least one exchange.
    pub(crate) fn recenter(&mut self, mode: RecenterMode) {
        let sum: DVec3 = self.members.iter().copied().sum();
        let mean = sum / self.members.len() as f64;

        self.representative = match mode {
            RecenterMode::Mean => mean,
            // A zero mean has no direction; keep it rather than produce NaN
            RecenterMode::Normalized => mean.try_normalize().unwrap_or(mean),
        };
        self.refresh_statistics();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn cluster(center: DVec3, spread: f64) -> Vec<DVec3> {
        let (a, b) = center.any_orthonormal_pair();
        vec![
            (center + a * spread).normalize(),
            (center - a * spread).normalize(),
            (center + b * spread).normalize(),
            (center - b * spread).normalize(),
        ]
    }

    #[test]
    fn test_site_statistics() {
        let site = Site::new(DVec3::X, vec![DVec3::X, DVec3::Y, DVec3::NEG_X]);

        let expected = 0.0 + FRAC_PI_2 * FRAC_PI_2 + PI * PI;
        assert!((site.energy() - expected).abs() < 1e-9);
        assert!((site.max_radius() - PI).abs() < 1e-9);
        assert_eq!(site.len(), 3);
        assert!(!site.is_stable());
    }

    #[test]
    fn test_recenter_mean_is_not_normalized() {
        let mut site = Site::new(DVec3::Z, cluster(DVec3::X, 0.2));
        site.recenter(RecenterMode::Mean);

        let rep = site.representative();
        assert!(rep.x > 0.9);
        assert!(rep.length() < 1.0);
        assert!(rep.y.abs() < 1e-12 && rep.z.abs() < 1e-12);
    }

    #[test]
    fn test_recenter_normalized() {
        let mut site = Site::new(DVec3::Z, cluster(DVec3::X, 0.2));
        site.recenter(RecenterMode::Normalized);

        let rep = site.representative();
        assert!((rep.length() - 1.0).abs() < 1e-12);
        assert!((rep - DVec3::X).length() < 1e-12);

        // Energy for a symmetric cluster around its exact center
        let r = angular_distance(DVec3::X, site.members()[0]);
        assert!((site.energy() - 4.0 * r * r).abs() < 1e-9);
        assert!((site.max_radius() - r).abs() < 1e-9);
    }

    #[test]
    fn test_recenter_lowers_energy_of_offset_site() {
        let mut site = Site::new(DVec3::Y, cluster(DVec3::X, 0.1));
        let before = site.energy();
        site.recenter(RecenterMode::Normalized);
        assert!(site.energy() < before);
    }

    #[test]
    fn test_max_radius_shrinks_after_recenter() {
        let mut site = Site::new(DVec3::NEG_X, cluster(DVec3::X, 0.1));
        assert!(site.max_radius() > 3.0);
        site.recenter(RecenterMode::Mean);
        assert!(site.max_radius() < 0.2);
    }

    #[test]
    fn test_caps_overlap() {
        let a = Site::new(DVec3::X, cluster(DVec3::X, 0.1));
        let b = Site::new(DVec3::NEG_X, cluster(DVec3::NEG_X, 0.1));
        assert!(!a.caps_overlap(&b));

        let c = Site::new(DVec3::X, cluster(DVec3::X, 0.1));
        assert!(a.caps_overlap(&c));
    }
}
