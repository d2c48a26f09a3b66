//! Jittered sampling on the unit circle
//!
//! The ring sampler is a one-shot counterpart to the sphere sampler: `count`
//! points are spread evenly around the circle from a random starting phase,
//! and each one is nudged by a bounded random offset. There is no
//! optimization step.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;

use crate::config::RingSamplerConfig;
use crate::geometry::ring_point;

/// Evenly spaced, jittered points on the unit circle
///
/// Point `k` sits at angle `phase + k · 2π/N + jitter_k`, where every
/// `jitter_k` is uniform in `±config.jitter · 2π/N`. Consecutive points are
/// therefore `2π/N ± 2 · config.jitter · 2π/N` apart.
///
/// # Example
///
/// ```
/// use rust_sphere_sampler::*;
///
/// let config = RingSamplerConfigBuilder::new().count(8).unwrap().build().unwrap();
/// let mut sampler = RingSampler::new(config);
/// sampler.sample();
///
/// assert_eq!(sampler.len(), 8);
/// for point in sampler.points() {
///     assert!((point.length() - 1.0).abs() < 1e-5);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RingSampler {
    config: RingSamplerConfig,
    points: Vec<DVec2>,
}

impl RingSampler {
    /// Create a sampler; no points exist until `sample` is called
    pub fn new(config: RingSamplerConfig) -> Self {
        Self {
            config,
            points: Vec::new(),
        }
    }

    /// Configuration used by this sampler
    #[inline]
    pub fn config(&self) -> &RingSamplerConfig {
        &self.config
    }

    /// Generate the points
    ///
    /// The generator is reseeded from the configuration, so calling this
    /// again reproduces the same points.
    pub fn sample(&mut self) -> &[DVec2] {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let spacing = self.config.spacing();
        let noise_range = spacing * self.config.jitter;

        let phase: f64 = rng.gen_range(0.0..TAU);
        self.points = (0..self.config.count)
            .map(|k| {
                let jitter = noise_range * rng.gen_range(-1.0..=1.0);
                ring_point(phase + spacing * k as f64 + jitter)
            })
            .collect();

        log::debug!(
            "[Ring] Sampled {} points, spacing {:.6}, jitter ±{:.6}",
            self.points.len(),
            spacing,
            noise_range
        );

        &self.points
    }

    /// Number of generated points (0 before sampling)
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True before sampling
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get a point by index
    #[inline]
    pub fn point(&self, id: usize) -> Option<DVec2> {
        self.points.get(id).copied()
    }

    /// All generated points in construction order
    #[inline]
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }
}
