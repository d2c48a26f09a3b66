//! Lookup-table packing for GPU upload
//!
//! Shaders consume the sampled directions as a 1D RGBA32F texture indexed
//! `0..len`. This module only lays the values out; creating the texture is
//! left to the caller's graphics backend.

use glam::{DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SamplerError};
use crate::ring::RingSampler;
use crate::sphere::SphereSampler;

/// Size in bytes of one RGBA32F texel
pub const TEXEL_SIZE: usize = 16;

/// A 1D table of RGBA32F texels
///
/// Sphere directions are stored as `(x, y, z, 0)`, ring points as
/// `(x, y, 0, 0)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JitterTable {
    texels: Vec<[f32; 4]>,
}

impl JitterTable {
    /// Pack 3D directions, in order
    pub fn from_directions(directions: &[DVec3]) -> Self {
        let texels = directions
            .iter()
            .map(|d| {
                let v = d.as_vec3();
                [v.x, v.y, v.z, 0.0]
            })
            .collect();
        Self { texels }
    }

    /// Pack 2D ring points, in order
    pub fn from_ring_points(points: &[DVec2]) -> Self {
        let texels = points
            .iter()
            .map(|p| {
                let v = p.as_vec2();
                [v.x, v.y, 0.0, 0.0]
            })
            .collect();
        Self { texels }
    }

    /// Pack a sampler's site representatives
    ///
    /// # Errors
    ///
    /// Returns `NotSampled` if the sampler holds no sites.
    pub fn from_sphere(sampler: &SphereSampler) -> Result<Self> {
        if sampler.site_count() == 0 {
            return Err(SamplerError::NotSampled);
        }
        Ok(Self::from_directions(&sampler.representatives()))
    }

    /// Pack a ring sampler's points
    ///
    /// # Errors
    ///
    /// Returns `NotSampled` if `sample` has not been called.
    pub fn from_ring(sampler: &RingSampler) -> Result<Self> {
        if sampler.is_empty() {
            return Err(SamplerError::NotSampled);
        }
        Ok(Self::from_ring_points(sampler.points()))
    }

    /// Number of texels
    #[inline]
    pub fn len(&self) -> usize {
        self.texels.len()
    }

    /// True if the table holds no texels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.texels.is_empty()
    }

    /// Get a texel by index
    #[inline]
    pub fn texel(&self, id: usize) -> Option<[f32; 4]> {
        self.texels.get(id).copied()
    }

    /// All texels in index order
    #[inline]
    pub fn texels(&self) -> &[[f32; 4]] {
        &self.texels
    }

    /// Texel data as tightly packed little-endian bytes
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.texels.len() * TEXEL_SIZE);
        for texel in &self.texels {
            for channel in texel {
                bytes.extend_from_slice(&channel.to_le_bytes());
            }
        }
        bytes
    }
}
