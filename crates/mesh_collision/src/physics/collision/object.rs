//! Collision objects: mesh geometry bound to a world position
//!
//! Geometry is stored in model space and never touched after initialization;
//! only the translation changes per frame. World-space bounds are derived on
//! demand from the local bounds and the current position.

use crate::assets::MeshSource;
use crate::foundation::math::Vec3;
use crate::physics::CollisionError;
use crate::spatial::{aabb_utils, Octree, OctreeConfig, AABB};

/// A mesh's local bounds and triangle octree placed at a world position
#[derive(Debug, Clone, Default)]
pub struct CollisionObject {
    position: Vec3,
    local_aabb: AABB,
    octree: Octree,
    initialized: bool,
}

impl CollisionObject {
    /// Create an empty, uninitialized object at the origin
    ///
    /// Until [`Self::initialize`] succeeds its bounds are invalid, so it never
    /// collides with anything.
    pub fn new(config: OctreeConfig) -> Self {
        Self {
            octree: Octree::new(config),
            ..Self::default()
        }
    }

    /// Build local bounds and octree from raw interleaved mesh buffers
    ///
    /// Both are built from the same buffers into temporaries first; on error
    /// the object keeps its previous geometry.
    pub fn initialize(
        &mut self,
        vertices: &[f32],
        indices: &[u32],
        stride: usize,
    ) -> Result<(), CollisionError> {
        let local_aabb = aabb_utils::compute_from_vertices(vertices, stride);
        let mut octree = Octree::new(*self.octree.config());
        octree.build(vertices, indices, stride)?;

        self.local_aabb = local_aabb;
        self.octree = octree;
        self.initialized = true;
        Ok(())
    }

    /// Build local bounds and octree from a mesh provider
    pub fn initialize_from_mesh(&mut self, mesh: &impl MeshSource) -> Result<(), CollisionError> {
        let vertices = mesh.interleaved_vertex_data();
        self.initialize(&vertices, mesh.index_data(), mesh.vertex_stride())
    }

    /// Whether geometry has been built
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Move the object; geometry is not recomputed
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Current world position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Mesh bounds in model space
    pub fn local_aabb(&self) -> AABB {
        self.local_aabb
    }

    /// Mesh bounds in world space, recomputed on every call
    pub fn world_aabb(&self) -> AABB {
        self.local_aabb.transformed(self.position)
    }

    /// The model-space triangle octree
    pub fn octree(&self) -> &Octree {
        &self.octree
    }

    /// Convert a world-space region into this object's model space
    pub fn to_local(&self, world_region: &AABB) -> AABB {
        world_region.transformed(-self.position)
    }

    /// Model-space octree query region for a world-space region
    ///
    /// Padded by the rounding error of the conversion so a region that
    /// touches this object's world bounds still reaches its local bounds.
    pub fn to_local_query(&self, world_region: &AABB) -> AABB {
        self.to_local(world_region).padded_for_rounding(self.position.amax())
    }
}
