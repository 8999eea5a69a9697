//! Math utilities and types
//!
//! Provides the vector types used by the collision geometry.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Math utility functions
pub mod utils {
    use super::Vec3;

    /// Component-wise minimum of two vectors
    pub fn component_min(a: &Vec3, b: &Vec3) -> Vec3 {
        Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
    }

    /// Component-wise maximum of two vectors
    pub fn component_max(a: &Vec3, b: &Vec3) -> Vec3 {
        Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
    }

    /// Read the position (first three floats) of vertex `vertex` from an interleaved buffer
    ///
    /// Returns `None` when the vertex lies past the end of the buffer or the
    /// stride cannot hold a position.
    pub fn position_at(vertices: &[f32], stride: usize, vertex: usize) -> Option<Vec3> {
        if stride < 3 {
            return None;
        }
        let base = vertex.checked_mul(stride)?;
        let p = vertices.get(base..base + 3)?;
        Some(Vec3::new(p[0], p[1], p[2]))
    }
}
