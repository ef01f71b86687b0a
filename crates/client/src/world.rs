//! A tiny physical world for the demo: spheres and controller positions.

use std::collections::HashMap;
use std::sync::RwLock;

use glam::Vec3;
use interaction_core::{
    ControllerId, InteractableId, ObjectId, PositionOracle, SpatialQuery, SurfaceHit, SurfaceId,
};

#[derive(Clone, Copy, Debug)]
struct Body {
    surface: SurfaceId,
    object: ObjectId,
    interactable: Option<InteractableId>,
    center: Vec3,
    radius: f32,
}

impl Body {
    /// Distance along a normalized ray to the sphere surface, if it is hit in front of `origin`.
    fn intersect(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let to_center = self.center - origin;
        let along = to_center.dot(direction);
        let closest_sq = to_center.length_squared() - along * along;
        let radius_sq = self.radius * self.radius;
        if closest_sq > radius_sq {
            return None;
        }
        let half_chord = (radius_sq - closest_sq).sqrt();
        let near = along - half_chord;
        let far = along + half_chord;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(0.0)
        } else {
            None
        }
    }
}

#[derive(Default)]
struct Bodies {
    by_object: HashMap<ObjectId, Body>,
    controllers: HashMap<ControllerId, Vec3>,
}

/// Sphere colliders keyed by world object, plus controller positions.
#[derive(Default)]
pub struct DemoWorld {
    state: RwLock<Bodies>,
}

impl DemoWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a spherical object whose single surface shares its id.
    pub fn place(&self, object: ObjectId, center: Vec3, radius: f32) {
        if let Ok(mut state) = self.state.write() {
            state.by_object.insert(
                object,
                Body {
                    surface: SurfaceId(object.0),
                    object,
                    interactable: None,
                    center,
                    radius,
                },
            );
        }
    }

    /// Records which interactable an object exposes, for position queries.
    pub fn attach(&self, object: ObjectId, interactable: InteractableId) {
        if let Ok(mut state) = self.state.write()
            && let Some(body) = state.by_object.get_mut(&object)
        {
            body.interactable = Some(interactable);
        }
    }

    pub fn remove(&self, object: ObjectId) {
        if let Ok(mut state) = self.state.write() {
            state.by_object.remove(&object);
        }
    }

    pub fn move_controller(&self, controller: ControllerId, position: Vec3) {
        if let Ok(mut state) = self.state.write() {
            state.controllers.insert(controller, position);
        }
    }

    pub fn controller(&self, controller: ControllerId) -> Option<Vec3> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.controllers.get(&controller).copied())
    }
}

impl SpatialQuery for DemoWorld {
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<SurfaceHit> {
        let direction = direction.try_normalize()?;
        let state = self.state.read().ok()?;

        state
            .by_object
            .values()
            .filter_map(|body| {
                body.intersect(origin, direction)
                    .filter(|distance| *distance <= max_distance)
                    .map(|distance| (distance, body))
            })
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, body)| SurfaceHit::new(body.surface, body.object))
    }
}

impl PositionOracle for DemoWorld {
    fn controller_position(&self, controller: ControllerId) -> Option<Vec3> {
        self.controller(controller)
    }

    fn interactable_position(&self, interactable: InteractableId) -> Option<Vec3> {
        let state = self.state.read().ok()?;
        state
            .by_object
            .values()
            .find(|body| body.interactable == Some(interactable))
            .map(|body| body.center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_returns_nearest_body_within_range() {
        let world = DemoWorld::new();
        world.place(ObjectId(1), Vec3::new(0.0, 0.0, -2.0), 0.5);
        world.place(ObjectId(2), Vec3::new(0.0, 0.0, -4.0), 0.5);

        let hit = world.cast(Vec3::ZERO, Vec3::NEG_Z, 2.5);
        assert_eq!(hit.map(|h| h.object), Some(ObjectId(1)));

        assert_eq!(world.cast(Vec3::ZERO, Vec3::NEG_Z, 1.0), None);
        assert_eq!(world.cast(Vec3::ZERO, Vec3::X, 10.0), None);
        assert_eq!(world.cast(Vec3::ZERO, Vec3::ZERO, 10.0), None);

        world.remove(ObjectId(1));
        let hit = world.cast(Vec3::ZERO, Vec3::NEG_Z, 10.0);
        assert_eq!(hit.map(|h| h.object), Some(ObjectId(2)));
    }

    #[test]
    fn attached_interactables_have_positions() {
        let world = DemoWorld::new();
        world.place(ObjectId(1), Vec3::X, 0.5);
        world.attach(ObjectId(1), InteractableId(9));

        assert_eq!(world.interactable_position(InteractableId(9)), Some(Vec3::X));
        assert_eq!(world.interactable_position(InteractableId(8)), None);
    }
}
