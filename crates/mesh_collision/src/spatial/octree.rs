//! Octree spatial partitioning over a mesh's triangles
//!
//! Built once per mesh from interleaved vertex and index buffers, then queried
//! many times per frame with an AABB to obtain a reduced candidate triangle
//! set. Nodes live in a flat arena and refer to their children by
//! [`NodeIndex`]; only leaves hold triangle indices.
//!
//! A triangle whose bounds straddle several octants is inserted into every
//! overlapping child, so queries may report the same index more than once.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;
use crate::physics::collision::mesh::triangles_from_buffers;
use crate::physics::collision::primitives::{Ray, Triangle};
use crate::physics::CollisionError;
use crate::spatial::{aabb_utils, AABB};

/// Default maximum subdivision depth
pub const MAX_DEPTH: u32 = 8;

/// Default minimum triangle count a leaf must reach before it may subdivide
pub const MIN_TRIANGLES: usize = 4;

/// Default leaf capacity; a leaf subdivides once this is exceeded
pub const MAX_TRIANGLES_LEAF: usize = 16;

/// Configuration for octree subdivision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// Maximum subdivision depth (root is depth 0)
    pub max_depth: u32,

    /// Leaves holding fewer triangles than this never subdivide
    pub min_triangles: usize,

    /// Maximum triangles per leaf before subdivision, unless at `max_depth`
    pub max_triangles_per_leaf: usize,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            min_triangles: MIN_TRIANGLES,
            max_triangles_per_leaf: MAX_TRIANGLES_LEAF,
        }
    }
}

impl OctreeConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_triangles_per_leaf == 0 {
            return Err("Leaf capacity must be at least 1".to_string());
        }
        if self.min_triangles > self.max_triangles_per_leaf + 1 {
            return Err(format!(
                "min_triangles ({}) prevents leaves over capacity ({}) from subdividing",
                self.min_triangles, self.max_triangles_per_leaf
            ));
        }
        Ok(())
    }
}

/// Index of a node inside an [`Octree`]'s arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex(u32);

impl NodeIndex {
    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Single node in the octree hierarchy
#[derive(Debug, Clone)]
pub struct OctreeNode {
    /// Spatial region of this node, fixed at construction
    pub bounds: AABB,

    /// Depth in the tree (0 = root)
    pub depth: u32,

    /// Triangle indices held by this node; non-empty only on leaves
    pub triangle_indices: Vec<usize>,

    /// Child octants, all `None` on a leaf
    pub children: [Option<NodeIndex>; 8],
}

impl OctreeNode {
    /// Create a new leaf node
    pub fn new(bounds: AABB, depth: u32) -> Self {
        Self {
            bounds,
            depth,
            triangle_indices: Vec::new(),
            children: [None; 8],
        }
    }

    /// Check if this node is a leaf (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    /// Number of triangle indices held directly by this node
    pub fn triangle_count(&self) -> usize {
        self.triangle_indices.len()
    }

    /// Bounds of child `octant` when splitting `bounds` at its center
    ///
    /// Octant layout (bit 0 = x, bit 1 = y, bit 2 = z; set = upper half):
    /// 0: -X, -Y, -Z    4: -X, -Y, +Z
    /// 1: +X, -Y, -Z    5: +X, -Y, +Z
    /// 2: -X, +Y, -Z    6: -X, +Y, +Z
    /// 3: +X, +Y, -Z    7: +X, +Y, +Z
    pub fn child_bounds(bounds: &AABB, octant: usize) -> AABB {
        let center = bounds.center();
        let mut min = bounds.min;
        let mut max = bounds.max;

        for axis in 0..3 {
            if octant & (1 << axis) != 0 {
                min[axis] = center[axis];
            } else {
                max[axis] = center[axis];
            }
        }

        AABB::new(min, max)
    }

    /// Octant containing `point`, using the same layout as [`Self::child_bounds`]
    pub fn octant_of(bounds: &AABB, point: Vec3) -> usize {
        let center = bounds.center();
        (0..3).fold(0, |octant, axis| {
            if point[axis] >= center[axis] {
                octant | (1 << axis)
            } else {
                octant
            }
        })
    }
}

/// Summary of an octree's shape, for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OctreeStats {
    /// Total nodes in the arena
    pub node_count: usize,
    /// Nodes without children
    pub leaf_count: usize,
    /// Deepest node depth
    pub max_depth_reached: u32,
    /// Sum of leaf index list lengths (counts duplicated triangles once per leaf)
    pub triangle_references: usize,
}

/// Triangle octree for a single mesh
#[derive(Debug, Clone, Default)]
pub struct Octree {
    /// Node arena; the root, once built, is always at index 0
    nodes: Vec<OctreeNode>,

    /// Root node, `None` until built
    root: Option<NodeIndex>,

    /// Every triangle of the mesh; nodes store indices into this list
    triangles: Vec<Triangle>,

    /// Overall mesh bounds
    bounds: AABB,

    /// Subdivision limits
    config: OctreeConfig,
}

impl Octree {
    /// Create an unbuilt octree with the given subdivision limits
    pub fn new(config: OctreeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Build from an interleaved vertex buffer and a triangle-list index buffer
    ///
    /// Only the first three floats of each `stride`-float vertex are read.
    /// Any previous tree is replaced, but only once the new one has been
    /// built successfully.
    pub fn build(
        &mut self,
        vertices: &[f32],
        indices: &[u32],
        stride: usize,
    ) -> Result<(), CollisionError> {
        let triangles = triangles_from_buffers(vertices, indices, stride)?;
        self.build_from_triangles(triangles);
        Ok(())
    }

    /// Build from an already extracted triangle list, replacing any previous tree
    pub fn build_from_triangles(&mut self, triangles: Vec<Triangle>) {
        let mut bounds = AABB::empty();
        for triangle in &triangles {
            bounds.expand_to_include_aabb(&triangle.bounds());
        }

        let mut fresh = Octree {
            nodes: vec![OctreeNode::new(bounds, 0)],
            root: Some(NodeIndex(0)),
            triangles,
            bounds,
            config: self.config,
        };

        let root = NodeIndex(0);
        for triangle_index in 0..fresh.triangles.len() {
            fresh.insert(root, triangle_index);
        }

        let stats = fresh.stats();
        log::debug!(
            "Built octree: {} triangles, {} nodes, {} leaves, max depth {}",
            fresh.triangles.len(),
            stats.node_count,
            stats.leaf_count,
            stats.max_depth_reached
        );

        *self = fresh;
    }

    /// Whether [`Self::build`] has run
    pub fn is_built(&self) -> bool {
        self.root.is_some()
    }

    /// Overall mesh bounds (invalid for an empty or unbuilt tree)
    pub fn bounds(&self) -> AABB {
        self.bounds
    }

    /// All triangles of the mesh
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// A single triangle by index
    pub fn triangle(&self, index: usize) -> Option<&Triangle> {
        self.triangles.get(index)
    }

    /// Subdivision limits
    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    /// Root node, if built
    pub fn root(&self) -> Option<&OctreeNode> {
        self.root.map(|index| &self.nodes[index.index()])
    }

    /// Node by arena index
    pub fn node(&self, index: NodeIndex) -> Option<&OctreeNode> {
        self.nodes.get(index.index())
    }

    /// Total nodes in the arena
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Append to `out` the index of every triangle held by a leaf overlapping `query_bounds`
    ///
    /// Subtrees whose bounds miss the query are pruned. Indices may repeat
    /// when a triangle was stored in several reached leaves.
    pub fn query_into(&self, query_bounds: &AABB, out: &mut Vec<usize>) {
        let Some(root) = self.root else {
            log::warn!("Octree queried before build; returning no candidates");
            return;
        };

        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index.index()];
            if !aabb_utils::intersects(&node.bounds, query_bounds) {
                continue;
            }

            if node.is_leaf() {
                out.extend_from_slice(&node.triangle_indices);
            } else {
                stack.extend(node.children.iter().flatten());
            }
        }
    }

    /// Candidate triangle indices for `query_bounds`, duplicates possible
    pub fn query(&self, query_bounds: &AABB) -> Vec<usize> {
        let mut results = Vec::new();
        self.query_into(query_bounds, &mut results);
        results
    }

    /// Candidate triangle indices for `query_bounds`, sorted without duplicates
    pub fn query_unique(&self, query_bounds: &AABB) -> Vec<usize> {
        let mut results = self.query(query_bounds);
        results.sort_unstable();
        results.dedup();
        results
    }

    /// Every triangle index referenced by some leaf, sorted without duplicates
    pub fn all_triangles(&self) -> Vec<usize> {
        let mut results: Vec<usize> = self
            .leaves()
            .into_iter()
            .flat_map(|leaf| leaf.triangle_indices.iter().copied())
            .collect();
        results.sort_unstable();
        results.dedup();
        results
    }

    /// Closest triangle hit by `ray`, as `(triangle_index, distance)`
    ///
    /// Nodes the ray misses, or that start beyond the best hit so far, are skipped.
    pub fn raycast(&self, ray: &Ray) -> Option<(usize, f32)> {
        let root = self.root?;
        let mut best: Option<(usize, f32)> = None;
        let mut stack = vec![root];

        while let Some(index) = stack.pop() {
            let node = &self.nodes[index.index()];
            let Some(entry) = node.bounds.intersect_ray(ray.origin, ray.direction) else {
                continue;
            };
            if best.is_some_and(|(_, distance)| entry > distance) {
                continue;
            }

            if !node.is_leaf() {
                stack.extend(node.children.iter().flatten());
                continue;
            }

            for &triangle_index in &node.triangle_indices {
                if let Some((t, _, _)) = self.triangles[triangle_index].intersect_ray(ray) {
                    if best.map_or(true, |(_, distance)| t < distance) {
                        best = Some((triangle_index, t));
                    }
                }
            }
        }

        best
    }

    /// Get all leaf nodes (for visualization)
    pub fn leaves(&self) -> Vec<&OctreeNode> {
        self.reachable_nodes().filter(|node| node.is_leaf()).collect()
    }

    /// Get all nodes at a specific depth (for visualization)
    pub fn nodes_at_depth(&self, depth: u32) -> Vec<&OctreeNode> {
        self.reachable_nodes().filter(|node| node.depth == depth).collect()
    }

    /// Shape summary of the built tree
    pub fn stats(&self) -> OctreeStats {
        self.reachable_nodes().fold(OctreeStats::default(), |mut stats, node| {
            stats.node_count += 1;
            stats.max_depth_reached = stats.max_depth_reached.max(node.depth);
            if node.is_leaf() {
                stats.leaf_count += 1;
                stats.triangle_references += node.triangle_count();
            }
            stats
        })
    }

    /// Nodes reachable from the root; every arena node is reachable after a build
    fn reachable_nodes(&self) -> impl Iterator<Item = &OctreeNode> {
        let reachable = if self.root.is_some() { self.nodes.len() } else { 0 };
        self.nodes.iter().take(reachable)
    }

    fn insert(&mut self, node: NodeIndex, triangle_index: usize) {
        let current = &self.nodes[node.index()];
        if !current.is_leaf() {
            self.insert_into_children(node, triangle_index);
            return;
        }

        let held = current.triangle_count();
        let should_subdivide = held >= self.config.max_triangles_per_leaf
            && held + 1 >= self.config.min_triangles
            && current.depth < self.config.max_depth;

        if should_subdivide {
            self.subdivide(node);
            self.insert_into_children(node, triangle_index);
        } else {
            self.nodes[node.index()].triangle_indices.push(triangle_index);
        }
    }

    /// Split a leaf into 8 children and re-route the indices it held
    fn subdivide(&mut self, node: NodeIndex) {
        let parent_bounds = self.nodes[node.index()].bounds;
        let child_depth = self.nodes[node.index()].depth + 1;

        let mut children = [None; 8];
        for (octant, slot) in children.iter_mut().enumerate() {
            let child = NodeIndex(self.nodes.len() as u32);
            let bounds = OctreeNode::child_bounds(&parent_bounds, octant);
            self.nodes.push(OctreeNode::new(bounds, child_depth));
            *slot = Some(child);
        }

        let parent = &mut self.nodes[node.index()];
        parent.children = children;
        let held = std::mem::take(&mut parent.triangle_indices);

        for triangle_index in held {
            self.insert_into_children(node, triangle_index);
        }
    }

    fn insert_into_children(&mut self, node: NodeIndex, triangle_index: usize) {
        for child in self.child_indices_for_triangle(node, triangle_index) {
            self.insert(child, triangle_index);
        }
    }

    /// Children whose bounds overlap the triangle's bounds
    ///
    /// Falls back to the octant of the centroid so a triangle is never lost
    /// to rounding at the split planes.
    fn child_indices_for_triangle(&self, node: NodeIndex, triangle_index: usize) -> Vec<NodeIndex> {
        let triangle = &self.triangles[triangle_index];
        let triangle_bounds = triangle.bounds();
        let parent = &self.nodes[node.index()];

        let overlapping: Vec<NodeIndex> = parent
            .children
            .iter()
            .flatten()
            .copied()
            .filter(|child| {
                aabb_utils::intersects(&self.nodes[child.index()].bounds, &triangle_bounds)
            })
            .collect();

        if !overlapping.is_empty() {
            return overlapping;
        }

        let octant = OctreeNode::octant_of(&parent.bounds, triangle.centroid());
        parent.children[octant].into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flat grid of `n * n` quads (2 triangles each) in the XZ plane, stride 3
    fn grid_mesh(n: u32) -> (Vec<f32>, Vec<u32>) {
        let mut vertices = Vec::new();
        for z in 0..=n {
            for x in 0..=n {
                vertices.extend_from_slice(&[x as f32, 0.0, z as f32]);
            }
        }

        let row = n + 1;
        let mut indices = Vec::new();
        for z in 0..n {
            for x in 0..n {
                let i = z * row + x;
                indices.extend_from_slice(&[i, i + row, i + 1, i + 1, i + row, i + row + 1]);
            }
        }
        (vertices, indices)
    }

    /// Grid with some height variation so the tree splits on all three axes
    fn bumpy_grid_mesh(n: u32) -> (Vec<f32>, Vec<u32>) {
        let (mut vertices, indices) = grid_mesh(n);
        for (i, y) in vertices.iter_mut().skip(1).step_by(3).enumerate() {
            *y = (i % 5) as f32 * 0.5;
        }
        (vertices, indices)
    }

    fn built(vertices: &[f32], indices: &[u32]) -> Octree {
        let mut octree = Octree::new(OctreeConfig::default());
        octree.build(vertices, indices, 3).unwrap();
        octree
    }

    #[test]
    fn test_unbuilt_octree_queries_empty() {
        let octree = Octree::default();
        assert!(!octree.is_built());
        assert!(octree.root().is_none());
        let everything = AABB::new(Vec3::repeat(-1000.0), Vec3::repeat(1000.0));
        assert!(octree.query(&everything).is_empty());
        assert_eq!(octree.stats(), OctreeStats::default());
    }

    #[test]
    fn test_empty_mesh_builds_empty_tree() {
        let octree = built(&[], &[]);
        assert!(octree.is_built());
        assert!(!octree.bounds().is_valid());
        let everything = AABB::new(Vec3::repeat(-1000.0), Vec3::repeat(1000.0));
        assert!(octree.query(&everything).is_empty());
    }

    #[test]
    fn test_small_mesh_stays_single_leaf() {
        let (vertices, indices) = grid_mesh(2);
        let octree = built(&vertices, &indices);

        assert_eq!(octree.triangles().len(), 8);
        assert_eq!(octree.node_count(), 1);
        assert!(octree.root().unwrap().is_leaf());
    }

    #[test]
    fn test_large_mesh_subdivides() {
        let (vertices, indices) = bumpy_grid_mesh(10);
        let octree = built(&vertices, &indices);

        assert_eq!(octree.triangles().len(), 200);
        assert!(!octree.root().unwrap().is_leaf());
        assert!(octree.root().unwrap().triangle_indices.is_empty());
        assert!(octree.stats().leaf_count > 1);
    }

    #[test]
    fn test_query_with_mesh_bounds_reaches_every_triangle() {
        let (vertices, indices) = bumpy_grid_mesh(12);
        let octree = built(&vertices, &indices);

        let found = octree.query_unique(&octree.bounds());
        let expected: Vec<usize> = (0..octree.triangles().len()).collect();
        assert_eq!(found, expected);
        assert_eq!(octree.all_triangles(), expected);
    }

    #[test]
    fn test_disjoint_query_is_empty() {
        let (vertices, indices) = bumpy_grid_mesh(8);
        let octree = built(&vertices, &indices);

        let far = AABB::new(Vec3::repeat(100.0), Vec3::repeat(101.0));
        assert!(octree.query(&far).is_empty());
    }

    #[test]
    fn test_local_query_prunes_candidates() {
        let (vertices, indices) = bumpy_grid_mesh(16);
        let octree = built(&vertices, &indices);

        let corner = AABB::new(Vec3::new(-0.5, -1.0, -0.5), Vec3::new(1.5, 3.0, 1.5));
        let candidates = octree.query_unique(&corner);
        assert!(!candidates.is_empty());
        assert!(candidates.len() < octree.triangles().len());

        // every triangle actually touching the region must be among the candidates
        for (index, triangle) in octree.triangles().iter().enumerate() {
            if triangle.bounds().intersects(&corner) {
                assert!(candidates.contains(&index), "triangle {} missing", index);
            }
        }
    }

    #[test]
    fn test_leaf_invariant() {
        let (vertices, indices) = bumpy_grid_mesh(20);
        let octree = built(&vertices, &indices);
        let config = *octree.config();

        for leaf in octree.leaves() {
            assert!(
                leaf.triangle_count() <= config.max_triangles_per_leaf
                    || leaf.depth == config.max_depth
            );
        }
        for node in octree.nodes_at_depth(1) {
            assert_eq!(node.depth, 1);
        }
        for index in 0..octree.node_count() {
            let node = octree.node(NodeIndex(index as u32)).unwrap();
            if !node.is_leaf() {
                assert!(node.triangle_indices.is_empty());
            }
        }
    }

    #[test]
    fn test_clustered_triangles_stop_at_max_depth() {
        // 40 identical tiny triangles can never be separated
        let vertices = [0.0, 0.0, 0.0, 0.001, 0.0, 0.0, 0.0, 0.001, 0.0, 5.0, 5.0, 5.0];
        let mut indices: Vec<u32> = (0..40).flat_map(|_| [0, 1, 2]).collect();
        // one far triangle gives the root a non-trivial volume
        indices.extend_from_slice(&[3, 3, 3]);

        let config = OctreeConfig {
            max_depth: 3,
            ..OctreeConfig::default()
        };
        let mut octree = Octree::new(config);
        octree.build(&vertices, &indices, 3).unwrap();

        let stats = octree.stats();
        assert_eq!(stats.max_depth_reached, 3);
        assert!(octree
            .leaves()
            .iter()
            .any(|leaf| leaf.triangle_count() > config.max_triangles_per_leaf));
        for leaf in octree.leaves() {
            assert!(
                leaf.triangle_count() <= config.max_triangles_per_leaf
                    || leaf.depth == config.max_depth
            );
        }
    }

    #[test]
    fn test_child_bounds_match_octant_lookup() {
        let bounds = AABB::new(Vec3::new(-2.0, 0.0, 4.0), Vec3::new(2.0, 8.0, 6.0));
        for octant in 0..8 {
            let child = OctreeNode::child_bounds(&bounds, octant);
            assert!(bounds.contains(&child));
            assert_eq!(OctreeNode::octant_of(&bounds, child.center()), octant);
        }
    }

    #[test]
    fn test_rebuild_replaces_previous_tree() {
        let (vertices, indices) = bumpy_grid_mesh(10);
        let mut octree = built(&vertices, &indices);

        let (small_vertices, small_indices) = grid_mesh(1);
        octree.build(&small_vertices, &small_indices, 3).unwrap();
        assert_eq!(octree.triangles().len(), 2);
        assert_eq!(octree.node_count(), 1);
    }

    #[test]
    fn test_failed_rebuild_keeps_previous_tree() {
        let (vertices, indices) = grid_mesh(2);
        let mut octree = built(&vertices, &indices);

        let result = octree.build(&vertices, &indices[..4], 3);
        assert!(matches!(result, Err(CollisionError::MalformedIndexBuffer { len: 4 })));
        assert_eq!(octree.triangles().len(), 8);
    }

    #[test]
    fn test_raycast_finds_closest_triangle() {
        let (vertices, indices) = grid_mesh(10);
        let octree = built(&vertices, &indices);

        let ray = Ray::new(Vec3::new(3.25, 10.0, 3.75), Vec3::new(0.0, -1.0, 0.0));
        let (index, distance) = octree.raycast(&ray).unwrap();
        assert!((distance - 10.0).abs() < 1e-4);
        let bounds = octree.triangle(index).unwrap().bounds();
        assert!(bounds.contains_point(Vec3::new(3.25, 0.0, 3.75)));

        let miss = Ray::new(Vec3::new(30.0, 10.0, 3.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(octree.raycast(&miss).is_none());
    }
}
