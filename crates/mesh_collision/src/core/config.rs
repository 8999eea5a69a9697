//! # Collision Configuration
//!
//! Top-level tuning for the collision system: octree subdivision limits and
//! narrow-phase candidate handling. Loadable from TOML or RON through the
//! [`Config`] trait; missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::spatial::OctreeConfig;

/// Floats per vertex in the default interleaved layout (position, normal, uv)
pub const DEFAULT_VERTEX_STRIDE: usize = 8;

/// # Collision System Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Subdivision limits used for every object's octree
    pub octree: OctreeConfig,
    /// Sort and deduplicate mid-phase candidate lists before the narrow phase
    ///
    /// Triangles straddling octants are stored in several leaves, so a raw
    /// query can name the same triangle more than once.
    pub deduplicate_candidates: bool,
    /// Stride used by callers that do not pass one explicitly
    pub default_stride: usize,
}

impl CollisionConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            octree: OctreeConfig::default(),
            deduplicate_candidates: true,
            default_stride: DEFAULT_VERTEX_STRIDE,
        }
    }

    /// Set octree limits
    pub fn with_octree(mut self, octree: OctreeConfig) -> Self {
        self.octree = octree;
        self
    }

    /// Enable or disable candidate deduplication
    pub fn with_deduplication(mut self, enabled: bool) -> Self {
        self.deduplicate_candidates = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_stride < 3 {
            return Err(format!("Vertex stride must be at least 3, got {}", self.default_stride));
        }
        self.octree.validate()
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for CollisionConfig {}
