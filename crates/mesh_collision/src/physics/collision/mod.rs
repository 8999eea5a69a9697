//! Collision geometry
//!
//! # Architecture
//!
//! Following Game Engine Architecture 3rd Edition (GEA 13.3.4):
//! - **Model Space Storage**: triangles and octrees are kept in local coordinates
//! - **On-Demand Transformation**: only the candidates a query needs are moved to world space
//!
//! # Module Organization
//!
//! - [`primitives`] - Triangles and rays with their intersection tests
//! - [`mesh`] - Triangle extraction from interleaved mesh buffers
//! - [`object`] - [`CollisionObject`], mesh geometry placed in the world

pub mod primitives;
pub mod mesh;
pub mod object;

pub use primitives::{Ray, RayHit, Triangle};
pub use object::CollisionObject;
