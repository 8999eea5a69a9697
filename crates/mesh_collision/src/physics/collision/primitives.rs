//! Primitive collision shapes and intersection algorithms
//!
//! Provides the triangle and ray primitives with efficient intersection
//! testing algorithms.

use crate::foundation::math::Vec3;
use crate::physics::ObjectId;
use crate::spatial::{aabb_utils, AABB};

/// Below this squared length a separating axis candidate is treated as degenerate
const AXIS_EPSILON: f32 = 0.000001;

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray
    pub origin: Vec3,
    /// The direction of the ray (normalized on construction)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Return a copy with the origin shifted by `offset`
    pub fn translated(&self, offset: Vec3) -> Ray {
        Ray {
            origin: self.origin + offset,
            direction: self.direction,
        }
    }
}

/// Result of a ray query against the collision system
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// The object that was hit
    pub object: ObjectId,
    /// Index of the hit triangle within the object's mesh
    pub triangle_index: usize,
    /// The distance from the ray origin to the hit point
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec3,
    /// Face normal of the hit triangle
    pub normal: Vec3,
}

/// A triangle for collision detection
///
/// Immutable once built from mesh data. The normal is derived at construction
/// from counter-clockwise winding: `normalize(cross(v1 - v0, v2 - v0))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
    /// Unit face normal (zero for degenerate triangles)
    pub normal: Vec3,
    /// Material slot carried for renderer reuse, ignored by collision
    pub material_index: u32,
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self::with_material(v0, v1, v2, 0)
    }

    /// Creates a new triangle tagged with a material slot
    pub fn with_material(v0: Vec3, v1: Vec3, v2: Vec3, material_index: u32) -> Self {
        let normal = (v1 - v0)
            .cross(&(v2 - v0))
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vec3::zeros);
        Self {
            v0,
            v1,
            v2,
            normal,
            material_index,
        }
    }

    /// Bounds of the three vertices
    pub fn bounds(&self) -> AABB {
        aabb_utils::compute_from_triangle(self.v0, self.v1, self.v2)
    }

    /// Calculates the centroid (center point) of the triangle
    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    /// Return a copy moved by `offset`; the normal is unchanged by translation
    pub fn translated(&self, offset: Vec3) -> Triangle {
        Triangle {
            v0: self.v0 + offset,
            v1: self.v1 + offset,
            v2: self.v2 + offset,
            ..*self
        }
    }

    /// Möller-Trumbore ray-triangle intersection algorithm
    /// Returns (t, u, v) barycentric coordinates if hit, None otherwise
    ///
    /// See: "Fast, Minimum Storage Ray/Triangle Intersection" by Möller & Trumbore
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, f32, f32)> {
        const EPSILON: f32 = 0.000001;

        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction.cross(&edge2);
        let a = edge1.dot(&h);

        // Ray parallel to triangle?
        if a.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(&h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = f * ray.direction.dot(&q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(&q);
        if t >= 0.0 {
            Some((t, u, v))
        } else {
            None // Behind ray origin
        }
    }

    /// Test if this triangle intersects another triangle
    ///
    /// Separating Axis Theorem over the two face normals and the nine
    /// edge-edge cross products. When the triangles are coplanar the
    /// edge-edge axes collapse onto the normal, so the six in-plane edge
    /// normals are tested instead. Touching triangles count as intersecting.
    pub fn intersects_triangle(&self, other: &Triangle) -> bool {
        let edges_a = self.edges();
        let edges_b = other.edges();

        if !separating_axis_overlaps(self, other, self.normal)
            || !separating_axis_overlaps(self, other, other.normal)
        {
            return false;
        }

        let coplanar = self.normal.cross(&other.normal).magnitude_squared() < AXIS_EPSILON;
        if coplanar {
            let plane_normal = if self.normal.magnitude_squared() > 0.0 {
                self.normal
            } else {
                other.normal
            };
            return edges_a
                .iter()
                .chain(edges_b.iter())
                .all(|edge| separating_axis_overlaps(self, other, plane_normal.cross(edge)));
        }

        for edge_a in &edges_a {
            for edge_b in &edges_b {
                if !separating_axis_overlaps(self, other, edge_a.cross(edge_b)) {
                    return false;
                }
            }
        }

        // No separating axis found = triangles intersect
        true
    }

    fn edges(&self) -> [Vec3; 3] {
        [self.v1 - self.v0, self.v2 - self.v1, self.v0 - self.v2]
    }

    fn project(&self, axis: &Vec3) -> (f32, f32) {
        let p0 = axis.dot(&self.v0);
        let p1 = axis.dot(&self.v1);
        let p2 = axis.dot(&self.v2);
        (p0.min(p1).min(p2), p0.max(p1).max(p2))
    }
}

/// False only if `axis` separates the two triangles; degenerate axes never separate
fn separating_axis_overlaps(a: &Triangle, b: &Triangle, axis: Vec3) -> bool {
    let length_sq = axis.magnitude_squared();
    if length_sq < AXIS_EPSILON {
        return true;
    }

    let axis = axis / length_sq.sqrt();
    let (min_a, max_a) = a.project(&axis);
    let (min_b, max_b) = b.project(&axis);
    max_a >= min_b && max_b >= min_a
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tri(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        Triangle::new(Vec3::from(a), Vec3::from(b), Vec3::from(c))
    }

    #[test]
    fn test_normal_follows_ccw_winding() {
        let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_relative_eq!(t.normal, Vec3::new(0.0, 0.0, 1.0));

        let flipped = tri([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]);
        assert_relative_eq!(flipped.normal, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_degenerate_triangle_has_zero_normal() {
        let t = tri([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]);
        assert_eq!(t.normal, Vec3::zeros());
    }

    #[test]
    fn test_bounds_and_centroid() {
        let t = tri([0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [0.0, 3.0, 3.0]);
        assert_eq!(t.bounds().min, Vec3::zeros());
        assert_eq!(t.bounds().max, Vec3::new(3.0, 3.0, 3.0));
        assert_relative_eq!(t.centroid(), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_translated_keeps_normal() {
        let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let moved = t.translated(Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(moved.v0, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(moved.normal, t.normal);
    }

    #[test]
    fn test_ray_hits_triangle() {
        let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let ray = Ray::new(Vec3::new(0.25, 0.25, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let (distance, _, _) = t.intersect_ray(&ray).unwrap();
        assert_relative_eq!(distance, 5.0);

        let miss = Ray::new(Vec3::new(2.0, 2.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(t.intersect_ray(&miss).is_none());

        let away = Ray::new(Vec3::new(0.25, 0.25, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(t.intersect_ray(&away).is_none());
    }

    #[test]
    fn test_crossing_triangles_intersect() {
        let a = tri([-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]);
        let b = tri([0.0, 0.0, -1.0], [0.0, 0.0, 1.0], [0.0, -2.0, 0.0]);
        assert!(a.intersects_triangle(&b));
        assert!(b.intersects_triangle(&a));
    }

    #[test]
    fn test_parallel_planes_do_not_intersect() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = a.translated(Vec3::new(0.0, 0.0, 0.5));
        assert!(!a.intersects_triangle(&b));
    }

    #[test]
    fn test_separated_by_edge_axis() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = tri([2.0, 2.0, -1.0], [2.0, 2.0, 1.0], [3.0, 3.0, 0.0]);
        assert!(!a.intersects_triangle(&b));
    }

    #[test]
    fn test_coplanar_triangles() {
        let a = tri([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]);
        let overlapping = tri([0.5, 0.5, 0.0], [3.0, 0.5, 0.0], [0.5, 3.0, 0.0]);
        let disjoint = tri([1.5, 1.5, 0.0], [3.0, 1.5, 0.0], [1.5, 3.0, 0.0]);

        assert!(a.intersects_triangle(&overlapping));
        assert!(!a.intersects_triangle(&disjoint));
    }

    #[test]
    fn test_touching_triangles_intersect() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = tri([1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [2.0, 0.0, 0.0]);
        assert!(a.intersects_triangle(&b));
    }
}
