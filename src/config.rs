//! Sampler Configuration and Builders
//!
//! This module provides configuration types for deterministic sphere and ring sampling.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SamplerError};

/// Number of raw points owned by each site unless configured otherwise
pub const DEFAULT_CAPACITY: usize = 256;

/// Seed used for sphere initialization unless configured otherwise
pub const DEFAULT_SPHERE_SEED: u64 = 10001;

/// Seed used for ring sampling unless configured otherwise
pub const DEFAULT_RING_SEED: u64 = 1001;

/// Per-point ring jitter as a fraction of the angular spacing
pub const DEFAULT_RING_JITTER: f64 = 0.1;

/// How a site's representative is recomputed after its members change
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecenterMode {
    /// Arithmetic mean of the members, left inside the sphere
    ///
    /// The mean of unit vectors is shorter than 1, so angular distances
    /// measured from it are slightly inflated. Kept as the default so results
    /// stay comparable with existing lookup tables.
    #[default]
    Mean,
    /// Arithmetic mean projected back onto the unit sphere
    Normalized,
}

/// Configuration for the sphere sampler
///
/// The same configuration always produces the same set of directions.
///
/// # Example
///
/// ```rust
/// use rust_sphere_sampler::*;
///
/// let config = SphereSamplerConfigBuilder::new()
///     .site_count(32).unwrap()
///     .capacity(64).unwrap()
///     .max_passes(100).unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.point_count(), 32 * 64);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereSamplerConfig {
    /// Number of sites, i.e. output directions
    pub site_count: usize,

    /// Raw points owned by every site
    ///
    /// Larger capacities give smoother site boundaries but each pass costs
    /// O(site_count² · capacity · log capacity).
    pub capacity: usize,

    /// Seed for the point generator, reapplied at every initialization
    pub seed: u64,

    /// Optional ceiling on optimization passes
    ///
    /// - None: run until a fixed point or an energy plateau (default)
    /// - Some(n): additionally stop after n passes and report `PassLimit`
    pub max_passes: Option<usize>,

    /// Representative update rule used after point exchanges
    pub recenter: RecenterMode,
}

impl SphereSamplerConfig {
    /// Total number of raw points owned by the sampler
    #[inline]
    pub fn point_count(&self) -> usize {
        self.site_count * self.capacity
    }
}

impl Default for SphereSamplerConfig {
    fn default() -> Self {
        Self {
            site_count: 64,
            capacity: DEFAULT_CAPACITY,
            seed: DEFAULT_SPHERE_SEED,
            max_passes: None,
            recenter: RecenterMode::Mean,
        }
    }
}

/// Builder for creating SphereSamplerConfig with validation
#[derive(Debug, Clone)]
pub struct SphereSamplerConfigBuilder {
    config: SphereSamplerConfig,
}

impl SphereSamplerConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - site_count: 64
    /// - capacity: 256
    /// - seed: 10001
    /// - max_passes: None (unbounded)
    /// - recenter: Mean
    pub fn new() -> Self {
        Self {
            config: SphereSamplerConfig::default(),
        }
    }

    /// Set the number of sites
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if count is 0
    pub fn site_count(mut self, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(SamplerError::InvalidConfig(
                "site count must be >= 1 (got 0)".to_string(),
            ));
        }
        self.config.site_count = count;
        Ok(self)
    }

    /// Set the number of points per site
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if capacity is 0
    pub fn capacity(mut self, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(SamplerError::InvalidConfig(
                "site capacity must be >= 1 (got 0)".to_string(),
            ));
        }
        self.config.capacity = capacity;
        Ok(self)
    }

    /// Set the seed for point generation
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Cap the number of optimization passes
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if passes is 0
    pub fn max_passes(mut self, passes: usize) -> Result<Self> {
        if passes == 0 {
            return Err(SamplerError::InvalidConfig(
                "pass ceiling must be >= 1 (got 0)".to_string(),
            ));
        }
        self.config.max_passes = Some(passes);
        Ok(self)
    }

    /// Remove any pass ceiling
    pub fn unbounded(mut self) -> Self {
        self.config.max_passes = None;
        self
    }

    /// Choose how representatives are recomputed
    pub fn recenter(mut self, mode: RecenterMode) -> Self {
        self.config.recenter = mode;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SphereSamplerConfig> {
        Ok(self.config)
    }
}

impl Default for SphereSamplerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for the jittered ring sampler
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSamplerConfig {
    /// Number of points on the ring
    pub count: usize,
    /// Seed for phase and jitter
    pub seed: u64,
    /// Maximum per-point offset as a fraction of the spacing `2π / count`
    pub jitter: f64,
}

impl RingSamplerConfig {
    /// Angular spacing between unjittered neighbours
    #[inline]
    pub fn spacing(&self) -> f64 {
        std::f64::consts::TAU / self.count as f64
    }
}

impl Default for RingSamplerConfig {
    fn default() -> Self {
        Self {
            count: 16,
            seed: DEFAULT_RING_SEED,
            jitter: DEFAULT_RING_JITTER,
        }
    }
}

/// Builder for creating RingSamplerConfig with validation
#[derive(Debug, Clone)]
pub struct RingSamplerConfigBuilder {
    config: RingSamplerConfig,
}

impl RingSamplerConfigBuilder {
    /// Create a new builder with default values (16 points, seed 1001, 10% jitter)
    pub fn new() -> Self {
        Self {
            config: RingSamplerConfig::default(),
        }
    }

    /// Set the number of ring points
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if count is 0
    pub fn count(mut self, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(SamplerError::InvalidConfig(
                "ring point count must be >= 1 (got 0)".to_string(),
            ));
        }
        self.config.count = count;
        Ok(self)
    }

    /// Set the seed for phase and jitter
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the jitter fraction
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless `0 <= fraction < 0.5`; at 0.5 two
    /// neighbours could land on the same angle.
    pub fn jitter(mut self, fraction: f64) -> Result<Self> {
        if !(0.0..0.5).contains(&fraction) {
            return Err(SamplerError::InvalidConfig(format!(
                "ring jitter must be in [0, 0.5) (got {})",
                fraction
            )));
        }
        self.config.jitter = fraction;
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<RingSamplerConfig> {
        Ok(self.config)
    }
}

impl Default for RingSamplerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_builder_defaults() {
        let config = SphereSamplerConfigBuilder::new().build().unwrap();
        assert_eq!(config.site_count, 64);
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert_eq!(config.seed, DEFAULT_SPHERE_SEED);
        assert_eq!(config.max_passes, None);
        assert_eq!(config.recenter, RecenterMode::Mean);
        assert_eq!(config, SphereSamplerConfig::default());
    }

    #[test]
    fn test_sphere_builder_custom() {
        let config = SphereSamplerConfigBuilder::new()
            .site_count(8)
            .unwrap()
            .capacity(16)
            .unwrap()
            .seed(7)
            .max_passes(42)
            .unwrap()
            .recenter(RecenterMode::Normalized)
            .build()
            .unwrap();

        assert_eq!(config.site_count, 8);
        assert_eq!(config.capacity, 16);
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_passes, Some(42));
        assert_eq!(config.recenter, RecenterMode::Normalized);
        assert_eq!(config.point_count(), 128);
    }

    #[test]
    fn test_sphere_builder_rejects_zero() {
        assert!(SphereSamplerConfigBuilder::new().site_count(0).is_err());
        assert!(SphereSamplerConfigBuilder::new().capacity(0).is_err());
        assert!(SphereSamplerConfigBuilder::new().max_passes(0).is_err());
    }

    #[test]
    fn test_unbounded_clears_ceiling() {
        let config = SphereSamplerConfigBuilder::new()
            .max_passes(3)
            .unwrap()
            .unbounded()
            .build()
            .unwrap();
        assert_eq!(config.max_passes, None);
    }

    #[test]
    fn test_ring_builder() {
        let config = RingSamplerConfigBuilder::new()
            .count(8)
            .unwrap()
            .seed(5)
            .jitter(0.25)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.count, 8);
        assert_eq!(config.seed, 5);
        assert_eq!(config.jitter, 0.25);
        assert!((config.spacing() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_ring_builder_invalid() {
        assert!(RingSamplerConfigBuilder::new().count(0).is_err());
        assert!(RingSamplerConfigBuilder::new().jitter(-0.01).is_err());
        assert!(RingSamplerConfigBuilder::new().jitter(0.5).is_err());
        assert!(RingSamplerConfigBuilder::new().jitter(f64::NAN).is_err());
        assert!(RingSamplerConfigBuilder::new().jitter(0.0).is_ok());
    }

    #[test]
    fn test_ring_defaults() {
        let config = RingSamplerConfig::default();
        assert_eq!(config.seed, DEFAULT_RING_SEED);
        assert_eq!(config.jitter, DEFAULT_RING_JITTER);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = SphereSamplerConfigBuilder::new()
            .site_count(12)
            .unwrap()
            .max_passes(9)
            .unwrap()
            .recenter(RecenterMode::Normalized)
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: SphereSamplerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);

        let ring = RingSamplerConfig::default();
        let json = serde_json::to_string(&ring).unwrap();
        let restored: RingSamplerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(ring, restored);
    }
}
