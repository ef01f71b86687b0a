use glam::Vec3;

use crate::ids::{ObjectId, SurfaceId};

/// Nearest surface hit by a ray.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceHit {
    /// Identity of the hit surface (comparison only).
    pub surface: SurfaceId,
    /// World object the surface belongs to.
    pub object: ObjectId,
}

impl SurfaceHit {
    pub const fn new(surface: SurfaceId, object: ObjectId) -> Self {
        Self { surface, object }
    }
}

/// Spatial query provider (physics raycast).
pub trait SpatialQuery: Send + Sync {
    /// Returns the nearest hit within `max_distance` along `direction` from
    /// `origin`, or `None` on a miss.
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<SurfaceHit>;
}
