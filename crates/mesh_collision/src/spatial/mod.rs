//! Spatial partitioning data structures
//!
//! Provides axis-aligned bounds and the per-mesh triangle octree used by the
//! mid phase of collision detection and by ray queries.

pub mod aabb;
mod octree;

pub use aabb::{aabb_utils, ROUNDING_SLACK, AABB};
pub use octree::{
    NodeIndex, Octree, OctreeConfig, OctreeNode, OctreeStats, MAX_DEPTH, MAX_TRIANGLES_LEAF,
    MIN_TRIANGLES,
};
