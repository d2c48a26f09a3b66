//! Well-distributed sample directions for stochastic sampling effects
//!
//! A standalone library that generates evenly spread directions on the unit
//! sphere (and jittered offsets on the unit circle) for jittered or
//! stochastic rendering effects. The results are plain data to be uploaded
//! into a lookup texture by whatever graphics backend consumes them.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rust_sphere_sampler::*;
//!
//! // Relax 64 sites of 256 points each
//! let config = SphereSamplerConfigBuilder::new()
//!     .site_count(64).unwrap()
//!     .build().unwrap();
//!
//! let mut sampler = SphereSampler::new(config);
//! let report = sampler.sample();
//! println!("{} passes, energy {:.3}", report.passes, report.energy);
//!
//! // Pack the directions for a 1D texture
//! let table = JitterTable::from_sphere(&sampler).unwrap();
//! println!("{} texels", table.len());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) direction-to-site lookups using KD-tree
//! - `serde`: Enables serialization support for configuration, sites, reports and tables

// Modules
pub mod error;
pub mod config;
pub mod geometry;
pub mod site;
pub mod sphere;
pub mod ring;
pub mod table;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{SamplerError, Result};
pub use config::{
    RecenterMode, RingSamplerConfig, RingSamplerConfigBuilder, SphereSamplerConfig,
    SphereSamplerConfigBuilder, DEFAULT_CAPACITY,
};
pub use geometry::angular_distance;
pub use site::Site;
pub use sphere::{PassOutcome, SampleReport, SiteSet, SphereSampler, Termination};
pub use ring::RingSampler;
pub use table::JitterTable;

#[cfg(feature = "spatial-index")]
pub use spatial::SiteIndex;

// Re-export glam vector types for convenience
pub use glam::{DVec2, DVec3};
