//! Phased mesh-mesh collision detection
//!
//! Based on Game Engine Architecture 3rd Edition, Chapter 13: a pair test
//! runs in three phases, each cheaper than the next and each able to stop
//! the test early.
//!
//! 1. **Broad phase**: world AABB overlap. Disjoint boxes end the test.
//! 2. **Mid phase**: the overlap region of the two boxes is moved into each
//!    object's model space, padded by the rounding error of that move, and
//!    used to query its octree, giving a small candidate triangle set per
//!    object. Padding only adds candidates, so no contact is lost here.
//! 3. **Narrow phase**: candidate triangle pairs, moved to world space, are
//!    tested with a separating-axis triangle test. The first hit wins.
//!
//! Unknown ids and uninitialized objects never error; they simply don't collide.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;

use crate::assets::MeshSource;
use crate::core::config::CollisionConfig;
use crate::foundation::math::Vec3;
use crate::physics::collision::primitives::{Ray, RayHit, Triangle};
use crate::physics::collision::CollisionObject;
use crate::physics::CollisionError;
use crate::spatial::{aabb_utils, AABB};

/// Identifier of an object registered with a [`CollisionSystem`]
///
/// Ids start at 1, strictly increase, and are never reused within a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Raw numeric value
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contact details for a detected collision
///
/// Best-effort diagnostics, not an exact contact manifold: the point is the
/// midpoint of the two colliding triangles' centroids, the normal is the
/// first object's face normal, and the depth is the thinnest extent of the
/// two objects' world AABB overlap. Fields other than `has_collision` are
/// only meaningful when it is `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionInfo {
    /// Whether the objects collide
    pub has_collision: bool,
    /// Approximate contact point in world space
    pub collision_point: Vec3,
    /// Face normal of the colliding triangle on the first object
    pub collision_normal: Vec3,
    /// Coarse penetration estimate
    pub penetration_depth: f32,
    /// Colliding triangle on the first object
    pub triangle_index_a: usize,
    /// Colliding triangle on the second object
    pub triangle_index_b: usize,
}

/// Cumulative per-phase work counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseStats {
    /// Pair tests that reached the broad phase
    pub broad_phase_tests: u64,
    /// Pair tests ended by the broad phase
    pub broad_phase_rejections: u64,
    /// Octree queries issued by the mid phase
    pub mid_phase_queries: u64,
    /// Triangle-triangle tests run by the narrow phase
    pub narrow_phase_triangle_tests: u64,
}

/// Mid-phase output: candidate triangle indices on each object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSets {
    /// Candidates on the first object
    pub a: Vec<usize>,
    /// Candidates on the second object
    pub b: Vec<usize>,
}

impl CandidateSets {
    /// Whether either side has no candidates
    pub fn is_empty(&self) -> bool {
        self.a.is_empty() || self.b.is_empty()
    }
}

/// Owns collision objects and answers pairwise collision queries
///
/// Single-threaded: all queries run to completion on the calling thread.
#[derive(Debug)]
pub struct CollisionSystem {
    objects: BTreeMap<ObjectId, CollisionObject>,
    next_object_id: u64,
    config: CollisionConfig,
    stats: Cell<PhaseStats>,
}

impl Default for CollisionSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionSystem {
    /// Create an empty system with default configuration
    pub fn new() -> Self {
        Self::with_config(CollisionConfig::default())
    }

    /// Create an empty system with the given configuration
    pub fn with_config(config: CollisionConfig) -> Self {
        Self {
            objects: BTreeMap::new(),
            next_object_id: 1,
            config,
            stats: Cell::new(PhaseStats::default()),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    // ---------------------------------------------------------------------
    // Object management
    // ---------------------------------------------------------------------

    /// Register a mesh given as raw buffers in the configured default stride
    pub fn add_object(
        &mut self,
        vertices: &[f32],
        indices: &[u32],
    ) -> Result<ObjectId, CollisionError> {
        self.add_object_with_stride(vertices, indices, self.config.default_stride)
    }

    /// Register a mesh given as raw buffers with `stride` floats per vertex
    pub fn add_object_with_stride(
        &mut self,
        vertices: &[f32],
        indices: &[u32],
        stride: usize,
    ) -> Result<ObjectId, CollisionError> {
        let mut object = CollisionObject::new(self.config.octree);
        object.initialize(vertices, indices, stride)?;
        Ok(self.insert_object(object))
    }

    /// Register a mesh from a mesh provider
    pub fn add_object_from_mesh(
        &mut self,
        mesh: &impl MeshSource,
    ) -> Result<ObjectId, CollisionError> {
        let mut object = CollisionObject::new(self.config.octree);
        object.initialize_from_mesh(mesh)?;
        Ok(self.insert_object(object))
    }

    fn insert_object(&mut self, object: CollisionObject) -> ObjectId {
        let id = ObjectId(self.next_object_id);
        self.next_object_id += 1;

        log::debug!(
            "Registered collision object {} ({} triangles)",
            id,
            object.octree().triangles().len()
        );
        self.objects.insert(id, object);
        id
    }

    /// Remove an object; returns whether it existed
    pub fn remove_object(&mut self, id: ObjectId) -> bool {
        let removed = self.objects.remove(&id).is_some();
        if removed {
            log::debug!("Removed collision object {}", id);
        }
        removed
    }

    /// Move an object; returns whether it exists
    pub fn update_position(&mut self, id: ObjectId, position: Vec3) -> bool {
        match self.objects.get_mut(&id) {
            Some(object) => {
                object.set_position(position);
                true
            }
            None => false,
        }
    }

    /// Current position of an object
    pub fn position(&self, id: ObjectId) -> Option<Vec3> {
        self.objects.get(&id).map(CollisionObject::position)
    }

    /// World-space bounds of an object
    pub fn world_aabb(&self, id: ObjectId) -> Option<AABB> {
        self.objects.get(&id).map(CollisionObject::world_aabb)
    }

    /// Look up an object
    pub fn object(&self, id: ObjectId) -> Option<&CollisionObject> {
        self.objects.get(&id)
    }

    /// Look up an object for mutation
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut CollisionObject> {
        self.objects.get_mut(&id)
    }

    /// Whether `id` is registered
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Number of registered objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Registered ids in ascending order
    pub fn object_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.keys().copied()
    }

    /// Remove every object; ids already handed out are still never reused
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Cumulative phase counters
    pub fn stats(&self) -> PhaseStats {
        self.stats.get()
    }

    /// Zero the phase counters
    pub fn reset_stats(&self) {
        self.stats.set(PhaseStats::default());
    }

    // ---------------------------------------------------------------------
    // Pair queries
    // ---------------------------------------------------------------------

    /// Full three-phase test between two objects
    pub fn check_collision(&self, a: ObjectId, b: ObjectId) -> bool {
        self.check_collision_with_info(a, b, None)
    }

    /// Full three-phase test, filling `info` when given
    ///
    /// `info` is reset first, so it reports `has_collision = false` on a miss.
    pub fn check_collision_with_info(
        &self,
        a: ObjectId,
        b: ObjectId,
        info: Option<&mut CollisionInfo>,
    ) -> bool {
        let mut scratch = CollisionInfo::default();
        let out = info.unwrap_or(&mut scratch);
        *out = CollisionInfo::default();

        let Some((object_a, object_b)) = self.pair(a, b) else {
            return false;
        };

        let hit = self.run_phases(object_a, object_b, out);
        log::trace!("Collision check {} vs {}: {}", a, b, hit);
        hit
    }

    /// Full three-phase test returning contact details by value
    pub fn detailed_collision(&self, a: ObjectId, b: ObjectId) -> CollisionInfo {
        let mut info = CollisionInfo::default();
        self.check_collision_with_info(a, b, Some(&mut info));
        info
    }

    /// Ids of every other object colliding with `id`, in ascending order
    ///
    /// Runs the full pair test against each registered object.
    pub fn check_collision_against_all(&self, id: ObjectId) -> Vec<ObjectId> {
        let Some(object) = self.objects.get(&id) else {
            log::debug!("Collision query for unknown object {}", id);
            return Vec::new();
        };

        self.objects
            .iter()
            .filter(|&(&other_id, _)| other_id != id)
            .filter(|&(_, other)| {
                let mut info = CollisionInfo::default();
                self.run_phases(object, other, &mut info)
            })
            .map(|(&other_id, _)| other_id)
            .collect()
    }

    /// Broad phase only: do the world AABBs overlap?
    pub fn check_aabb_collision(&self, a: ObjectId, b: ObjectId) -> bool {
        self.pair(a, b).is_some_and(|(object_a, object_b)| {
            aabb_utils::intersects(&object_a.world_aabb(), &object_b.world_aabb())
        })
    }

    /// Broad and mid phase: do both octrees report candidates in the overlap region?
    pub fn check_octree_collision(&self, a: ObjectId, b: ObjectId) -> bool {
        self.octree_candidates(a, b).is_some_and(|candidates| !candidates.is_empty())
    }

    /// Mid-phase candidate sets, or `None` when the broad phase already rules out contact
    pub fn octree_candidates(&self, a: ObjectId, b: ObjectId) -> Option<CandidateSets> {
        let (object_a, object_b) = self.pair(a, b)?;
        let overlap = Self::broad_phase_overlap(object_a, object_b)?;
        self.mid_phase(object_a, object_b, &overlap)
    }

    /// Narrow phase over given candidate sets
    ///
    /// Candidate indices that do not name a triangle of the object are skipped.
    pub fn check_triangle_collision(
        &self,
        a: ObjectId,
        b: ObjectId,
        candidates: &CandidateSets,
        info: Option<&mut CollisionInfo>,
    ) -> bool {
        let mut scratch = CollisionInfo::default();
        let out = info.unwrap_or(&mut scratch);
        *out = CollisionInfo::default();

        let Some((object_a, object_b)) = self.pair(a, b) else {
            return false;
        };
        let overlap = object_a.world_aabb().intersection(&object_b.world_aabb());
        self.narrow_phase(object_a, object_b, candidates, &overlap, out)
    }

    // ---------------------------------------------------------------------
    // Ray queries
    // ---------------------------------------------------------------------

    /// Closest triangle hit by `ray` across all objects
    pub fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;

        for (&id, object) in &self.objects {
            let Some(entry) = object.world_aabb().intersect_ray(ray.origin, ray.direction) else {
                continue;
            };
            if best.is_some_and(|hit| entry > hit.distance) {
                continue;
            }

            let local_ray = ray.translated(-object.position());
            if let Some((triangle_index, distance)) = object.octree().raycast(&local_ray) {
                if best.map_or(true, |hit| distance < hit.distance) {
                    best = Some(RayHit {
                        object: id,
                        triangle_index,
                        distance,
                        point: ray.point_at(distance),
                        normal: object.octree().triangles()[triangle_index].normal,
                    });
                }
            }
        }

        best
    }

    // ---------------------------------------------------------------------
    // Phases
    // ---------------------------------------------------------------------

    fn pair(&self, a: ObjectId, b: ObjectId) -> Option<(&CollisionObject, &CollisionObject)> {
        match (self.objects.get(&a), self.objects.get(&b)) {
            (Some(object_a), Some(object_b)) => Some((object_a, object_b)),
            _ => {
                log::debug!("Collision query with unknown object ({} / {})", a, b);
                None
            }
        }
    }

    fn record(&self, update: impl FnOnce(&mut PhaseStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }

    fn run_phases(
        &self,
        a: &CollisionObject,
        b: &CollisionObject,
        out: &mut CollisionInfo,
    ) -> bool {
        self.record(|stats| stats.broad_phase_tests += 1);
        let Some(overlap) = Self::broad_phase_overlap(a, b) else {
            self.record(|stats| stats.broad_phase_rejections += 1);
            return false;
        };

        let Some(candidates) = self.mid_phase(a, b, &overlap) else {
            return false;
        };
        if candidates.is_empty() {
            return false;
        }

        self.narrow_phase(a, b, &candidates, &overlap, out)
    }

    /// World-space overlap region, if the world AABBs intersect
    fn broad_phase_overlap(a: &CollisionObject, b: &CollisionObject) -> Option<AABB> {
        let world_a = a.world_aabb();
        let world_b = b.world_aabb();
        if !aabb_utils::intersects(&world_a, &world_b) {
            return None;
        }
        Some(world_a.intersection(&world_b))
    }

    fn mid_phase(
        &self,
        a: &CollisionObject,
        b: &CollisionObject,
        overlap: &AABB,
    ) -> Option<CandidateSets> {
        if !a.octree().is_built() || !b.octree().is_built() {
            log::warn!("Mid phase skipped: collision object has no octree");
            return None;
        }

        self.record(|stats| stats.mid_phase_queries += 2);
        let query = |object: &CollisionObject| {
            let local = object.to_local_query(overlap);
            if self.config.deduplicate_candidates {
                object.octree().query_unique(&local)
            } else {
                object.octree().query(&local)
            }
        };

        Some(CandidateSets {
            a: query(a),
            b: query(b),
        })
    }

    fn narrow_phase(
        &self,
        a: &CollisionObject,
        b: &CollisionObject,
        candidates: &CandidateSets,
        overlap: &AABB,
        out: &mut CollisionInfo,
    ) -> bool {
        // Any contact lies inside the overlap region, so triangles whose
        // bounds miss it cannot take part.
        let offset_magnitude = a.position().amax().max(b.position().amax());
        let region = overlap.padded_for_rounding(offset_magnitude);
        let in_overlap = |object: &CollisionObject, indices: &[usize]| -> Vec<(usize, Triangle)> {
            indices
                .iter()
                .filter_map(|&index| {
                    let world = object.octree().triangle(index)?.translated(object.position());
                    aabb_utils::intersects(&world.bounds(), &region).then_some((index, world))
                })
                .collect()
        };

        let triangles_a = in_overlap(a, &candidates.a);
        let triangles_b = in_overlap(b, &candidates.b);

        let mut tests = 0u64;
        let mut hit = None;
        'search: for (index_a, triangle_a) in &triangles_a {
            for (index_b, triangle_b) in &triangles_b {
                tests += 1;
                if triangle_a.intersects_triangle(triangle_b) {
                    hit = Some((*index_a, triangle_a, *index_b, triangle_b));
                    break 'search;
                }
            }
        }
        self.record(|stats| stats.narrow_phase_triangle_tests += tests);

        let Some((index_a, triangle_a, index_b, triangle_b)) = hit else {
            return false;
        };

        let overlap_extents = overlap.extents();
        *out = CollisionInfo {
            has_collision: true,
            collision_point: (triangle_a.centroid() + triangle_b.centroid()) * 0.5,
            collision_normal: triangle_a.normal,
            penetration_depth: overlap_extents.x.min(overlap_extents.y).min(overlap_extents.z),
            triangle_index_a: index_a,
            triangle_index_b: index_b,
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Mesh;

    fn system_with_cubes(offset: Vec3) -> (CollisionSystem, ObjectId, ObjectId) {
        let mut system = CollisionSystem::new();
        let a = system.add_object_from_mesh(&Mesh::unit_cube()).unwrap();
        let b = system.add_object_from_mesh(&Mesh::unit_cube()).unwrap();
        system.update_position(b, offset);
        (system, a, b)
    }

    #[test]
    fn test_ids_strictly_increase_and_are_not_reused() {
        let mut system = CollisionSystem::new();
        let first = system.add_object_from_mesh(&Mesh::unit_cube()).unwrap();
        let second = system.add_object_from_mesh(&Mesh::unit_cube()).unwrap();
        assert!(second > first);

        assert!(system.remove_object(second));
        let third = system.add_object_from_mesh(&Mesh::unit_cube()).unwrap();
        assert!(third > second);

        system.clear();
        let fourth = system.add_object_from_mesh(&Mesh::unit_cube()).unwrap();
        assert!(fourth > third);
        assert_eq!(first.value(), 1);
    }

    #[test]
    fn test_object_mut_reinitializes_in_place() {
        let (mut system, a, b) = system_with_cubes(Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(system.object_ids().collect::<Vec<_>>(), vec![a, b]);
        assert!(!system.check_collision(a, b));

        let wide = Mesh::cuboid(Vec3::zeros(), Vec3::new(4.0, 1.0, 1.0));
        system.object_mut(a).unwrap().initialize_from_mesh(&wide).unwrap();
        assert!(system.check_collision(a, b));
        assert_eq!(system.object_count(), 2);
    }

    #[test]
    fn test_removed_object_has_no_position() {
        let (mut system, a, _) = system_with_cubes(Vec3::new(3.0, 0.0, 0.0));
        system.update_position(a, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(system.position(a), Some(Vec3::new(1.0, 1.0, 1.0)));

        assert!(system.remove_object(a));
        assert!(!system.remove_object(a));
        assert_eq!(system.position(a), None);
        assert!(system.object(a).is_none());
        assert!(!system.update_position(a, Vec3::zeros()));
    }

    #[test]
    fn test_unknown_ids_never_collide() {
        let (system, a, _) = system_with_cubes(Vec3::new(0.5, 0.5, 0.5));
        let ghost = ObjectId(999);

        assert!(!system.check_collision(a, ghost));
        assert!(!system.check_collision(ghost, a));
        assert!(!system.check_aabb_collision(a, ghost));
        assert!(system.octree_candidates(a, ghost).is_none());
        assert!(system.check_collision_against_all(ghost).is_empty());
        assert!(!system.detailed_collision(ghost, a).has_collision);
    }

    #[test]
    fn test_broad_phase_rejection_skips_later_phases() {
        let (system, a, b) = system_with_cubes(Vec3::new(10.0, 10.0, 10.0));

        assert!(!system.check_collision(a, b));
        let stats = system.stats();
        assert_eq!(stats.broad_phase_tests, 1);
        assert_eq!(stats.broad_phase_rejections, 1);
        assert_eq!(stats.mid_phase_queries, 0);
        assert_eq!(stats.narrow_phase_triangle_tests, 0);
    }

    #[test]
    fn test_overlapping_pair_runs_all_phases() {
        let (system, a, b) = system_with_cubes(Vec3::new(0.5, 0.5, 0.5));

        assert!(system.check_collision(a, b));
        let stats = system.stats();
        assert_eq!(stats.broad_phase_rejections, 0);
        assert_eq!(stats.mid_phase_queries, 2);
        assert!(stats.narrow_phase_triangle_tests >= 1);

        system.reset_stats();
        assert_eq!(system.stats(), PhaseStats::default());
    }

    #[test]
    fn test_aabb_check_is_idempotent() {
        let (system, a, b) = system_with_cubes(Vec3::new(0.9, 0.0, 0.0));
        let first = system.check_aabb_collision(a, b);
        for _ in 0..5 {
            assert_eq!(system.check_aabb_collision(a, b), first);
        }
        assert!(first);
    }

    #[test]
    fn test_collision_info_is_populated() {
        let (system, a, b) = system_with_cubes(Vec3::new(0.5, 0.5, 0.5));

        let mut info = CollisionInfo::default();
        assert!(system.check_collision_with_info(a, b, Some(&mut info)));
        assert!(info.has_collision);
        assert!(info.triangle_index_a < 12 && info.triangle_index_b < 12);
        assert!((info.collision_normal.magnitude() - 1.0).abs() < 1e-5);
        assert!((info.penetration_depth - 0.5).abs() < 1e-5);

        let detailed = system.detailed_collision(a, b);
        assert_eq!(detailed, info);
    }

    #[test]
    fn test_info_is_reset_on_miss() {
        let (mut system, a, b) = system_with_cubes(Vec3::new(0.5, 0.5, 0.5));
        let mut info = CollisionInfo::default();
        assert!(system.check_collision_with_info(a, b, Some(&mut info)));

        system.update_position(b, Vec3::new(5.0, 0.0, 0.0));
        assert!(!system.check_collision_with_info(a, b, Some(&mut info)));
        assert_eq!(info, CollisionInfo::default());
    }

    #[test]
    fn test_nested_cube_without_surface_contact_does_not_collide() {
        let mut system = CollisionSystem::new();
        let outer = system
            .add_object_from_mesh(&Mesh::cuboid(Vec3::repeat(-5.0), Vec3::repeat(5.0)))
            .unwrap();
        let inner = system.add_object_from_mesh(&Mesh::unit_cube()).unwrap();

        // Boxes overlap, surfaces do not: triangle meshes only report surface contact
        assert!(system.check_aabb_collision(outer, inner));
        assert!(!system.check_collision(outer, inner));
    }

    #[test]
    fn test_mid_phase_keeps_touching_candidates() {
        let mut system = CollisionSystem::new();
        let a = system.add_object_from_mesh(&Mesh::unit_cube()).unwrap();
        let b = system.add_object_from_mesh(&Mesh::unit_cube()).unwrap();
        system.update_position(a, Vec3::new(1.103, 0.0, 0.0));
        let touching_x = system.world_aabb(a).unwrap().max.x;
        system.update_position(b, Vec3::new(touching_x, 0.0, 0.0));

        let candidates = system.octree_candidates(a, b).unwrap();
        assert!(!candidates.a.is_empty());
        assert!(!candidates.b.is_empty());

        let every_triangle = CandidateSets {
            a: (0..12).collect(),
            b: (0..12).collect(),
        };
        assert!(system.check_triangle_collision(a, b, &every_triangle, None));
        assert!(system.check_collision(a, b));
    }

    #[test]
    fn test_phase_methods_agree_with_full_check() {
        let (system, a, b) = system_with_cubes(Vec3::new(0.5, 0.5, 0.5));

        assert!(system.check_aabb_collision(a, b));
        assert!(system.check_octree_collision(a, b));
        let candidates = system.octree_candidates(a, b).unwrap();
        assert!(system.check_triangle_collision(a, b, &candidates, None));

        let empty = CandidateSets::default();
        assert!(!system.check_triangle_collision(a, b, &empty, None));
    }

    #[test]
    fn test_against_all_reports_only_colliders() {
        let mut system = CollisionSystem::new();
        let cube = Mesh::unit_cube();
        let center = system.add_object_from_mesh(&cube).unwrap();
        let near = system.add_object_from_mesh(&cube).unwrap();
        let far = system.add_object_from_mesh(&cube).unwrap();
        let also_near = system.add_object_from_mesh(&cube).unwrap();

        system.update_position(near, Vec3::new(0.5, 0.25, 0.0));
        system.update_position(far, Vec3::new(20.0, 0.0, 0.0));
        system.update_position(also_near, Vec3::new(-0.5, 0.5, 0.5));

        assert_eq!(system.check_collision_against_all(center), vec![near, also_near]);
        assert!(system.check_collision_against_all(far).is_empty());
    }

    #[test]
    fn test_raycast_picks_closest_object() {
        let (mut system, a, b) = system_with_cubes(Vec3::new(5.0, 0.0, 0.0));
        system.update_position(a, Vec3::new(10.0, 0.0, 0.0));

        let ray = Ray::new(Vec3::new(-10.0, 0.3, 0.6), Vec3::new(1.0, 0.0, 0.0));
        let hit = system.raycast(&ray).unwrap();
        assert_eq!(hit.object, b);
        assert!((hit.distance - 15.0).abs() < 1e-4);
        assert!((hit.point.x - 5.0).abs() < 1e-4);
        assert!((hit.normal - Vec3::new(-1.0, 0.0, 0.0)).magnitude() < 1e-5);

        let miss = Ray::new(Vec3::new(-10.0, 5.0, 0.5), Vec3::new(1.0, 0.0, 0.0));
        assert!(system.raycast(&miss).is_none());
    }
}
