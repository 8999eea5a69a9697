//! Physics module for mesh collision detection
//!
//! Provides the collision primitives, per-object collision geometry and the
//! phased [`CollisionSystem`] that composes them.

pub mod collision;
pub mod collision_system;
mod error;

#[cfg(test)]
mod tests;

pub use collision::{CollisionObject, Ray, RayHit, Triangle};
pub use collision_system::{CandidateSets, CollisionInfo, CollisionSystem, ObjectId, PhaseStats};
pub use error::CollisionError;
