//! Server-side proximity re-check.
//!
//! Targeting is client-authoritative and cosmetic, so by itself the server
//! would commit an interaction on any id the client knows about. A
//! [`ReachPolicy`] closes that gap when positions are available.
//! Line of sight is not re-checked; that needs the physics raycaster.

use std::sync::Arc;

use interaction_core::{ControllerId, InteractableId, PositionOracle};

pub trait ReachPolicy: Send + Sync {
    fn within_reach(&self, controller: ControllerId, interactable: InteractableId) -> bool;

    /// Returns the policy name for logging.
    fn name(&self) -> &'static str;
}

/// Trusts the ids alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unrestricted;

impl ReachPolicy for Unrestricted {
    fn within_reach(&self, _controller: ControllerId, _interactable: InteractableId) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "unrestricted"
    }
}

/// Requires the controller to be within `max_distance` of the interactable.
///
/// Unknown positions fail the check.
pub struct MaxDistance {
    max_distance: f32,
    positions: Arc<dyn PositionOracle>,
}

impl MaxDistance {
    pub fn new(max_distance: f32, positions: Arc<dyn PositionOracle>) -> Self {
        Self {
            max_distance: max_distance.max(0.0),
            positions,
        }
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }
}

impl ReachPolicy for MaxDistance {
    fn within_reach(&self, controller: ControllerId, interactable: InteractableId) -> bool {
        let (Some(from), Some(to)) = (
            self.positions.controller_position(controller),
            self.positions.interactable_position(interactable),
        ) else {
            return false;
        };

        from.distance_squared(to) <= self.max_distance * self.max_distance
    }

    fn name(&self) -> &'static str {
        "max_distance"
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    struct Fixed;

    impl PositionOracle for Fixed {
        fn controller_position(&self, controller: ControllerId) -> Option<Vec3> {
            (controller.0 == 1).then_some(Vec3::ZERO)
        }

        fn interactable_position(&self, interactable: InteractableId) -> Option<Vec3> {
            match interactable.0 {
                0 => Some(Vec3::new(2.0, 0.0, 0.0)),
                1 => Some(Vec3::new(0.0, 3.0, 0.0)),
                _ => None,
            }
        }
    }

    #[test]
    fn max_distance_compares_against_the_limit() {
        let policy = MaxDistance::new(2.5, Arc::new(Fixed));

        assert!(policy.within_reach(ControllerId(1), InteractableId(0)));
        assert!(!policy.within_reach(ControllerId(1), InteractableId(1)));
    }

    #[test]
    fn unknown_positions_fail_closed() {
        let policy = MaxDistance::new(100.0, Arc::new(Fixed));

        assert!(!policy.within_reach(ControllerId(2), InteractableId(0)));
        assert!(!policy.within_reach(ControllerId(1), InteractableId(7)));
        assert!(Unrestricted.within_reach(ControllerId(2), InteractableId(7)));
    }
}
