//! Spatial indexing for direction-to-site lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::DVec3;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// Wrapper around a KD-tree over site representatives
///
/// Representatives are projected onto the unit sphere before indexing. On
/// the unit sphere the squared chord length grows monotonically with the
/// angle, so the Euclidean nearest neighbour is also the angularly closest
/// site.
///
/// # Performance
///
/// - Construction: O(n log n)
/// - Query: O(log n)
#[derive(Clone)]
pub struct SiteIndex {
    tree: ImmutableKdTree<f32, usize, 3, 32>,
}

/// Direction as a unit `[f32; 3]`; zero vectors are kept as they are
fn unit_key(direction: DVec3) -> [f32; 3] {
    let v = direction.try_normalize().unwrap_or(direction).as_vec3();
    [v.x, v.y, v.z]
}

impl SiteIndex {
    /// Build an index from site representatives (index = site id)
    ///
    /// Called once after sampling; the tree is immutable afterwards.
    ///
    /// # Arguments
    ///
    /// * `representatives` - Site representatives in site order; must not be empty
    ///
    /// # Performance
    ///
    /// O(n log n) construction.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_sphere_sampler::*;
    /// use glam::DVec3;
    ///
    /// let index = SiteIndex::new(&[DVec3::X, DVec3::Y, DVec3::Z * 0.5]);
    /// assert_eq!(index.find_nearest(DVec3::new(0.1, 0.2, 0.9)), 2);
    /// ```
    pub fn new(representatives: &[DVec3]) -> Self {
        let points: Vec<[f32; 3]> = representatives.iter().map(|&r| unit_key(r)).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Find the site whose representative is angularly closest to `direction`
    ///
    /// # Arguments
    ///
    /// * `direction` - Query direction; its length is ignored
    ///
    /// # Returns
    ///
    /// Site ID (index) of the nearest representative
    ///
    /// # Performance
    ///
    /// O(log n) lookup.
    pub fn find_nearest(&self, direction: DVec3) -> usize {
        let query = unit_key(direction);
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}
