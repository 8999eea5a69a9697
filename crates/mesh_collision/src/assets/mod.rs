//! Mesh data consumed by the collision system
//!
//! Collision only needs positions and triangle indices. Any type that can
//! expose an interleaved vertex buffer and an index buffer plugs in through
//! [`MeshSource`].

pub mod mesh;

pub use mesh::{Mesh, MeshSource, Vertex};
