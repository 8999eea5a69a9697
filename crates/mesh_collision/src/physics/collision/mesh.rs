//! Triangle extraction from interleaved mesh buffers
//!
//! Mesh providers hand over an interleaved `f32` buffer where each vertex
//! occupies `stride` floats with the position first, plus a triangle-list
//! index buffer. Normals, uvs and any other attributes are ignored here.

use crate::foundation::math::utils::position_at;
use crate::physics::collision::primitives::Triangle;
use crate::physics::CollisionError;

/// Build the triangle list named by every consecutive index triple
///
/// `stride < 3` cannot hold a position and yields no triangles. A length
/// that is not a multiple of 3, or an index past the vertex buffer, means the
/// upstream geometry is corrupted and is reported as an error.
pub fn triangles_from_buffers(
    vertices: &[f32],
    indices: &[u32],
    stride: usize,
) -> Result<Vec<Triangle>, CollisionError> {
    if indices.len() % 3 != 0 {
        return Err(CollisionError::MalformedIndexBuffer { len: indices.len() });
    }

    if stride < 3 {
        log::warn!("Vertex stride {} cannot hold a position; mesh treated as empty", stride);
        return Ok(Vec::new());
    }

    let vertex_count = vertices.len() / stride;
    let vertex = |index: u32| {
        position_at(vertices, stride, index as usize)
            .ok_or(CollisionError::IndexOutOfRange { index, vertex_count })
    };

    indices
        .chunks_exact(3)
        .map(|chunk| -> Result<Triangle, CollisionError> {
            Ok(Triangle::new(vertex(chunk[0])?, vertex(chunk[1])?, vertex(chunk[2])?))
        })
        .collect()
}
