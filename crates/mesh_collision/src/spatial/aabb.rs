//! Axis-aligned bounding boxes
//!
//! A default-constructed [`AABB`] is *inverted* (`min = +inf`, `max = -inf`)
//! so that repeated [`AABB::expand_to_include`] calls converge to the true
//! bounds. A box that never received a point stays invalid and behaves as
//! empty: it intersects nothing and contains nothing.

use crate::foundation::math::utils::{component_max, component_min, position_at};
use crate::foundation::math::Vec3;

/// Relative error bound for bounds moved between model and world space
///
/// One `f32` addition followed by one subtraction is off by at most a few
/// ulps of the largest magnitude involved.
pub const ROUNDING_SLACK: f32 = 4.0 * f32::EPSILON;

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Default for AABB {
    fn default() -> Self {
        Self::empty()
    }
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create the inverted, empty AABB
    pub fn empty() -> Self {
        Self {
            min: Vec3::repeat(f32::INFINITY),
            max: Vec3::repeat(f32::NEG_INFINITY),
        }
    }

    /// Check that `min <= max` on every axis
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Get the center of the AABB (zero for an invalid box)
    pub fn center(&self) -> Vec3 {
        if !self.is_valid() {
            return Vec3::zeros();
        }
        (self.min + self.max) * 0.5
    }

    /// Get the full size of the AABB on each axis (zero for an invalid box)
    pub fn extents(&self) -> Vec3 {
        if !self.is_valid() {
            return Vec3::zeros();
        }
        self.max - self.min
    }

    /// Get the half size of the AABB on each axis
    pub fn half_extents(&self) -> Vec3 {
        self.extents() * 0.5
    }

    /// Grow the box to include `point`
    pub fn expand_to_include(&mut self, point: Vec3) {
        self.min = component_min(&self.min, &point);
        self.max = component_max(&self.max, &point);
    }

    /// Grow the box to include another box; invalid boxes contribute nothing
    pub fn expand_to_include_aabb(&mut self, other: &AABB) {
        if !other.is_valid() {
            return;
        }
        self.min = component_min(&self.min, &other.min);
        self.max = component_max(&self.max, &other.max);
    }

    /// Return a copy translated by `offset`
    pub fn transformed(&self, offset: Vec3) -> AABB {
        AABB {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Grow by `margin` on every side; invalid boxes are returned unchanged
    pub fn expanded(&self, margin: f32) -> AABB {
        if !self.is_valid() {
            return *self;
        }
        AABB {
            min: self.min - Vec3::repeat(margin),
            max: self.max + Vec3::repeat(margin),
        }
    }

    /// Grow by the rounding error a translation of magnitude `offset_magnitude` may carry
    ///
    /// Used before querying with a region that went through a world/local
    /// conversion, so touching contacts are not lost to the last ulp.
    pub fn padded_for_rounding(&self, offset_magnitude: f32) -> AABB {
        if !self.is_valid() {
            return *self;
        }
        let magnitude = offset_magnitude.abs() + self.min.amax().max(self.max.amax());
        self.expanded(ROUNDING_SLACK * magnitude.max(1.0))
    }

    /// Overlap region of two boxes
    ///
    /// The result is invalid when the boxes are disjoint. Boxes that only
    /// touch produce a flat (zero-thickness) but valid region.
    pub fn intersection(&self, other: &AABB) -> AABB {
        AABB {
            min: component_max(&self.min, &other.min),
            max: component_min(&self.max, &other.max),
        }
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &AABB) -> bool {
        aabb_utils::intersects(self, other)
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        aabb_utils::contains_point(self, point)
    }

    /// Check if `inner` lies entirely inside this AABB
    pub fn contains(&self, inner: &AABB) -> bool {
        aabb_utils::contains(self, inner)
    }

    /// Test ray intersection with this AABB using the slab method
    ///
    /// Returns the distance to the entry point (0 if the origin is inside),
    /// or `None` when the ray misses or the box is invalid.
    pub fn intersect_ray(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<f32> {
        if !self.is_valid() {
            return None;
        }

        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray_origin[axis];
            let dir = ray_dir[axis];
            if dir == 0.0 {
                // Parallel to this slab: must already be inside it
                if origin < self.min[axis] || origin > self.max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let t1 = (self.min[axis] - origin) * inv;
            let t2 = (self.max[axis] - origin) * inv;
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));
        }

        if t_max >= t_min && t_max >= 0.0 {
            Some(t_min.max(0.0))
        } else {
            None
        }
    }
}

/// Free-standing AABB construction and overlap tests
pub mod aabb_utils {
    use super::*;

    /// Bounds of every `stride`-th float triple in an interleaved vertex buffer
    ///
    /// Only the first three floats of each vertex (the position) are read.
    /// An empty buffer or `stride < 3` yields an invalid AABB.
    pub fn compute_from_vertices(vertices: &[f32], stride: usize) -> AABB {
        let mut aabb = AABB::empty();
        if stride < 3 {
            return aabb;
        }

        let vertex_count = vertices.len() / stride;
        for vertex in 0..vertex_count {
            if let Some(position) = position_at(vertices, stride, vertex) {
                aabb.expand_to_include(position);
            }
        }
        aabb
    }

    /// Bounds of a single triangle
    pub fn compute_from_triangle(v0: Vec3, v1: Vec3, v2: Vec3) -> AABB {
        AABB {
            min: component_min(&component_min(&v0, &v1), &v2),
            max: component_max(&component_max(&v0, &v1), &v2),
        }
    }

    /// Closed-interval overlap test on the three cardinal axes
    ///
    /// Touching boxes intersect. Invalid boxes never intersect anything since
    /// `min > max` makes every comparison fail.
    pub fn intersects(a: &AABB, b: &AABB) -> bool {
        a.min.x <= b.max.x
            && a.max.x >= b.min.x
            && a.min.y <= b.max.y
            && a.max.y >= b.min.y
            && a.min.z <= b.max.z
            && a.max.z >= b.min.z
    }

    /// Closed-interval point containment
    pub fn contains_point(aabb: &AABB, point: Vec3) -> bool {
        point.x >= aabb.min.x
            && point.x <= aabb.max.x
            && point.y >= aabb.min.y
            && point.y <= aabb.max.y
            && point.z >= aabb.min.z
            && point.z <= aabb.max.z
    }

    /// `inner` fully inside `outer` on all axes; false if either is invalid
    pub fn contains(outer: &AABB, inner: &AABB) -> bool {
        if !outer.is_valid() || !inner.is_valid() {
            return false;
        }
        inner.min.x >= outer.min.x
            && inner.max.x <= outer.max.x
            && inner.min.y >= outer.min.y
            && inner.max.y <= outer.max.y
            && inner.min.z >= outer.min.z
            && inner.max.z <= outer.max.z
    }
}
