//! Collision geometry errors
//!
//! Only corrupted mesh data is an error. Query paths never fail: unknown ids,
//! unbuilt trees and empty meshes all answer "no collision".

use thiserror::Error;

/// Errors raised while turning mesh buffers into collision geometry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollisionError {
    /// Index buffer length is not a multiple of 3
    #[error("Index buffer length {len} is not a multiple of 3")]
    MalformedIndexBuffer {
        /// Length of the offending buffer
        len: usize,
    },

    /// An index names a vertex past the end of the vertex buffer
    #[error("Vertex index {index} out of range ({vertex_count} vertices)")]
    IndexOutOfRange {
        /// The offending index
        index: u32,
        /// Number of whole vertices in the buffer
        vertex_count: usize,
    },
}
