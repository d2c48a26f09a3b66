//! Sphere sampler: well-distributed directions through point-exchange relaxation
//!
//! A large pool of random points is partitioned into sites. Repeated
//! optimization passes trade points between neighbouring sites until every
//! site owns a compact patch of the sphere; the site representatives are then
//! an evenly spread set of directions.

mod init;
mod relax;

pub use init::scatter_sites;
pub use relax::{relax_pass, PassOutcome};

use std::time::Instant;

use glam::DVec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::SphereSamplerConfig;
use crate::error::{Result, SamplerError};
use crate::site::Site;

#[cfg(feature = "spatial-index")]
use crate::spatial::SiteIndex;

/// Why the optimization loop stopped
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A pass accepted no exchange anywhere
    Converged,
    /// Two consecutive passes reported bit-identical total energy
    Plateau,
    /// The configured pass ceiling was reached first
    PassLimit,
}

/// Summary of a complete sampling run
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleReport {
    /// Total energy before the first optimization pass
    pub initial_energy: f64,
    /// Total energy after the last optimization pass
    pub energy: f64,
    /// Number of optimization passes run
    pub passes: usize,
    /// Why the loop stopped
    pub termination: Termination,
}

impl SampleReport {
    /// True unless the pass ceiling cut the run short
    #[inline]
    pub fn converged(&self) -> bool {
        self.termination != Termination::PassLimit
    }
}

/// The partition of all points into sites
///
/// Every point belongs to exactly one site and every site holds exactly
/// `capacity` points. Exchanges only ever swap two points between sites, so
/// the point set itself never changes after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteSet {
    sites: Vec<Site>,
    capacity: usize,
}

impl SiteSet {
    /// Validate an explicit layout: nonempty, and every site holding `capacity` points
    fn from_sites(sites: Vec<Site>, capacity: usize) -> Result<Self> {
        if sites.is_empty() {
            return Err(SamplerError::InvalidSites("no sites given".to_string()));
        }
        if let Some((id, site)) = sites.iter().enumerate().find(|(_, s)| s.len() != capacity) {
            return Err(SamplerError::InvalidSites(format!(
                "site {} holds {} points, expected {}",
                id,
                site.len(),
                capacity
            )));
        }
        Ok(Self { sites, capacity })
    }

    /// Number of sites
    #[inline]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// True before initialization
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Points per site
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total number of points held across all sites
    pub fn point_count(&self) -> usize {
        self.sites.iter().map(Site::len).sum()
    }

    /// Get a site by index
    #[inline]
    pub fn get(&self, id: usize) -> Option<&Site> {
        self.sites.get(id)
    }

    /// Iterate over sites in index order
    pub fn iter(&self) -> std::slice::Iter<'_, Site> {
        self.sites.iter()
    }

    /// All sites as a slice
    #[inline]
    pub fn as_slice(&self) -> &[Site] {
        &self.sites
    }

    /// Sum of site energies
    pub fn total_energy(&self) -> f64 {
        init::total_energy(&self.sites)
    }
}

impl<'a> IntoIterator for &'a SiteSet {
    type Item = &'a Site;
    type IntoIter = std::slice::Iter<'a, Site>;

    fn into_iter(self) -> Self::IntoIter {
        self.sites.iter()
    }
}

/// Generates `site_count` well-distributed directions on the unit sphere
///
/// # Example
///
/// ```
/// use rust_sphere_sampler::*;
///
/// let config = SphereSamplerConfigBuilder::new()
///     .site_count(8).unwrap()
///     .capacity(32).unwrap()
///     .max_passes(200).unwrap()
///     .build()
///     .unwrap();
///
/// let mut sampler = SphereSampler::new(config);
/// let report = sampler.sample();
/// assert!(report.energy < report.initial_energy);
///
/// for i in 0..sampler.site_count() {
///     let direction = sampler.representative(i).unwrap();
///     assert!(direction.is_finite());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SphereSampler {
    config: SphereSamplerConfig,
    sites: SiteSet,
}

impl SphereSampler {
    /// Create a sampler; no points exist until `initialize` or `sample`
    pub fn new(config: SphereSamplerConfig) -> Self {
        Self {
            config,
            sites: SiteSet::default(),
        }
    }

    /// Create a sampler from an explicit site layout
    ///
    /// Useful for seeding the relaxation with a known partition. Follow with
    /// `relax()`; calling `sample()` would discard the layout.
    ///
    /// # Arguments
    ///
    /// * `config` - Sampler configuration; `site_count` and `capacity` must match the layout
    /// * `sites` - Sites built with `Site::new`, each holding `capacity` points
    ///
    /// # Returns
    ///
    /// A sampler whose sites are all marked unstable, ready for `relax()`
    ///
    /// # Errors
    ///
    /// Returns `InvalidSites` if the number of sites differs from
    /// `config.site_count` or any site does not hold `config.capacity` points.
    pub fn from_sites(config: SphereSamplerConfig, sites: Vec<Site>) -> Result<Self> {
        if sites.len() != config.site_count {
            return Err(SamplerError::InvalidSites(format!(
                "expected {} sites, got {}",
                config.site_count,
                sites.len()
            )));
        }
        let sites = SiteSet::from_sites(sites, config.capacity)?;
        Ok(Self { config, sites })
    }

    /// Configuration used by this sampler
    #[inline]
    pub fn config(&self) -> &SphereSamplerConfig {
        &self.config
    }

    /// Scatter fresh random points and partition them into sites
    ///
    /// The generator is reseeded from the configuration on every call, so the
    /// same configuration always yields the same starting state. Returns the
    /// total energy of that state.
    pub fn initialize(&mut self) -> f64 {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let sites = scatter_sites(self.config.site_count, self.config.capacity, &mut rng);
        self.sites = SiteSet {
            sites,
            capacity: self.config.capacity,
        };
        self.sites.total_energy()
    }

    /// Run a single optimization pass over the current sites
    pub fn optimize(&mut self) -> PassOutcome {
        relax_pass(&mut self.sites.sites, self.config.recenter)
    }

    /// Initialize, then optimize until convergence, plateau or the pass ceiling
    pub fn sample(&mut self) -> SampleReport {
        log::info!(
            "[Sphere] Initializing: {} sites x {} points, seed {}",
            self.config.site_count,
            self.config.capacity,
            self.config.seed
        );
        self.initialize();
        self.relax()
    }

    /// Optimize the current sites until convergence, plateau or the pass ceiling
    ///
    /// A plateau (bit-identical energy on two consecutive passes) ends the run
    /// even when some site still changed, which stops exchanges that cycle
    /// without lowering the energy.
    ///
    /// # Algorithm
    ///
    /// Each pass:
    /// 1. Skip pairs of sites that are both stable or whose caps are disjoint
    /// 2. Trade misassigned members between the remaining pairs
    /// 3. Recenter every site that traded
    /// 4. Stop on a global fixed point, a plateau, or the pass ceiling
    ///
    /// # Returns
    ///
    /// A report with the starting and final energy, the number of passes and
    /// the reason the loop stopped
    ///
    /// # Performance
    ///
    /// Each pass is O(site_count² · capacity · log capacity). Without a pass
    /// ceiling the run is bounded only by convergence or plateau detection.
    pub fn relax(&mut self) -> SampleReport {
        let total_start = Instant::now();
        let initial_energy = self.sites.total_energy();
        let mut best_energy = initial_energy;
        let mut passes = 0;

        log::info!(
            "[Sphere] Starting: {} sites x {} points, energy {:.6}, max passes {:?}",
            self.sites.len(),
            self.sites.capacity(),
            initial_energy,
            self.config.max_passes
        );

        let termination = loop {
            if self.config.max_passes.is_some_and(|limit| passes >= limit) {
                break Termination::PassLimit;
            }

            let pass_start = Instant::now();
            let outcome = self.optimize();
            passes += 1;

            log::debug!(
                "[Sphere] Pass {}: energy={:.6}, swaps={}, stable={}/{}, elapsed={:?}",
                passes,
                outcome.energy,
                outcome.swaps,
                self.sites.iter().filter(|s| s.is_stable()).count(),
                self.sites.len(),
                pass_start.elapsed()
            );

            if outcome.all_stable {
                best_energy = outcome.energy;
                break Termination::Converged;
            }
            if outcome.energy.to_bits() == best_energy.to_bits() {
                break Termination::Plateau;
            }
            best_energy = outcome.energy;
        };

        log::info!(
            "[Sphere] Finished: {} passes, {:?}, energy {:.6} -> {:.6}, total={:?}",
            passes,
            termination,
            initial_energy,
            best_energy,
            total_start.elapsed()
        );

        SampleReport {
            initial_energy,
            energy: best_energy,
            passes,
            termination,
        }
    }

    /// Number of sites currently held (0 before initialization)
    #[inline]
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Get a site by index
    #[inline]
    pub fn site(&self, id: usize) -> Option<&Site> {
        self.sites.get(id)
    }

    /// Representative direction of a site
    #[inline]
    pub fn representative(&self, id: usize) -> Option<DVec3> {
        self.sites.get(id).map(Site::representative)
    }

    /// All representative directions in site order
    pub fn representatives(&self) -> Vec<DVec3> {
        self.sites.iter().map(Site::representative).collect()
    }

    /// The current partition
    #[inline]
    pub fn sites(&self) -> &SiteSet {
        &self.sites
    }

    /// Sum of the current site energies
    pub fn total_energy(&self) -> f64 {
        self.sites.total_energy()
    }

    /// Build a nearest-site lookup over the current representatives
    ///
    /// # Errors
    ///
    /// Returns `NotSampled` if the sampler holds no sites yet.
    #[cfg(feature = "spatial-index")]
    pub fn site_index(&self) -> Result<SiteIndex> {
        if self.sites.is_empty() {
            return Err(SamplerError::NotSampled);
        }
        Ok(SiteIndex::new(&self.representatives()))
    }
}
