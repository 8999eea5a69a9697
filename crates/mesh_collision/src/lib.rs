//! # Mesh Collision
//!
//! Hierarchical collision detection between triangle meshes.
//!
//! ## Features
//!
//! - **Phased Pair Tests**: AABB broad phase, octree mid phase, SAT narrow phase
//! - **Per-Mesh Octrees**: Model-space triangle octrees built once per mesh
//! - **Cheap Movement**: Objects are translated, never rebuilt
//! - **Ray Queries**: Closest-hit raycasts against every registered mesh
//! - **File Configuration**: Octree limits and system options from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mesh_collision::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut system = CollisionSystem::new();
//!
//!     let cube = Mesh::unit_cube();
//!     let a = system.add_object_from_mesh(&cube)?;
//!     let b = system.add_object_from_mesh(&cube)?;
//!     system.update_position(b, Vec3::new(0.5, 0.5, 0.5));
//!
//!     if system.check_collision(a, b) {
//!         let info = system.detailed_collision(a, b);
//!         println!("contact near {:?}", info.collision_point);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_precision_loss)]

pub mod core;

pub mod foundation;
pub mod config;
pub mod spatial;
pub mod physics;
pub mod assets;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        assets::{Mesh, MeshSource, Vertex},
        config::{Config, ConfigError},
        core::config::CollisionConfig,
        foundation::math::Vec3,
        physics::{
            CandidateSets, CollisionError, CollisionInfo, CollisionObject, CollisionSystem,
            ObjectId, PhaseStats, Ray, RayHit, Triangle,
        },
        spatial::{Octree, OctreeConfig, AABB},
    };
}
