//! Mesh representation for collision geometry input
//!
//! [`MeshSource`] is the narrow interface mesh providers implement. [`Mesh`]
//! is a plain implementation with the standard interleaved layout
//! (position, normal, uv = 8 floats per vertex) plus a few procedural shapes.

use std::borrow::Cow;

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::Vec3;

/// A provider of interleaved vertex data and triangle-list indices
pub trait MeshSource {
    /// Interleaved vertex buffer; the first three floats of each vertex are its position
    fn interleaved_vertex_data(&self) -> Cow<'_, [f32]>;

    /// Triangle-list indices, three per triangle
    fn index_data(&self) -> &[u32];

    /// Floats per vertex in [`Self::interleaved_vertex_data`]
    fn vertex_stride(&self) -> usize;
}

/// Vertex with position, normal, and texture coordinates
///
/// `#[repr(C)]` with no padding, so a vertex slice can be viewed directly as
/// an `f32` slice of stride [`Vertex::STRIDE`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],

    /// Normal vector
    pub normal: [f32; 3],

    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Floats per vertex
    pub const STRIDE: usize = 8;

    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Indexed triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,

    /// Index data for triangles
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Axis-aligned box spanning `min..max`, 8 shared vertices and 12 outward-facing triangles
    pub fn cuboid(min: Vec3, max: Vec3) -> Self {
        let center = (min + max) * 0.5;
        let vertices = (0..8)
            .map(|corner: u32| {
                let position = Vec3::new(
                    if corner & 1 != 0 { max.x } else { min.x },
                    if corner & 2 != 0 { max.y } else { min.y },
                    if corner & 4 != 0 { max.z } else { min.z },
                );
                let normal = (position - center)
                    .try_normalize(f32::EPSILON)
                    .unwrap_or_else(Vec3::zeros);
                let uv = [(corner & 1) as f32, ((corner >> 1) & 1) as f32];
                Vertex::new(position.into(), normal.into(), uv)
            })
            .collect();

        #[rustfmt::skip]
        let indices = vec![
            0, 2, 1, 1, 2, 3, // -Z
            4, 5, 6, 5, 7, 6, // +Z
            0, 4, 2, 2, 4, 6, // -X
            1, 3, 5, 3, 7, 5, // +X
            0, 1, 4, 1, 5, 4, // -Y
            2, 6, 3, 3, 6, 7, // +Y
        ];

        Self { vertices, indices }
    }

    /// Unit cube spanning `(0,0,0)..(1,1,1)`
    pub fn unit_cube() -> Self {
        Self::cuboid(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0))
    }

    /// Single triangle with a face normal on every vertex
    pub fn triangle(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let normal = (v1 - v0)
            .cross(&(v2 - v0))
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vec3::zeros);
        let vertices = [(v0, [0.0, 0.0]), (v1, [1.0, 0.0]), (v2, [0.0, 1.0])]
            .into_iter()
            .map(|(position, uv)| Vertex::new(position.into(), normal.into(), uv))
            .collect();

        Self {
            vertices,
            indices: vec![0, 1, 2],
        }
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl MeshSource for Mesh {
    fn interleaved_vertex_data(&self) -> Cow<'_, [f32]> {
        Cow::Borrowed(bytemuck::cast_slice(&self.vertices))
    }

    fn index_data(&self) -> &[u32] {
        &self.indices
    }

    fn vertex_stride(&self) -> usize {
        Vertex::STRIDE
    }
}
