//! Intersection results.

use lumen_math::Vec3;

/// Raw intersection reported by a single primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Ray parameter where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Geometric normal, not necessarily unit length
    pub normal: Vec3,
}

/// Record of a ray-scene intersection.
///
/// Scene queries return `Option<HitRecord>`; a missing hit has no point,
/// normal or distance to read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub point: Vec3,
    /// Surface normal. Callers normalize before shading.
    pub normal: Vec3,
    /// Distance along the (unit-direction) ray
    pub distance: f32,
    /// Index of the struck object in the scene's object list
    pub object_index: usize,
}

impl HitRecord {
    /// Attach the struck object's index to a primitive hit.
    pub fn new(hit: SurfaceHit, object_index: usize) -> Self {
        Self {
            point: hit.point,
            normal: hit.normal,
            distance: hit.t,
            object_index,
        }
    }

    /// The surface normal scaled to unit length (zero if degenerate).
    pub fn unit_normal(&self) -> Vec3 {
        self.normal.normalize_or_zero()
    }
}
