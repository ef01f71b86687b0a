use glam::Vec3;

use crate::ids::{ControllerId, InteractableId};

/// World positions known to the server, used for reach checks.
pub trait PositionOracle: Send + Sync {
    fn controller_position(&self, controller: ControllerId) -> Option<Vec3>;

    fn interactable_position(&self, interactable: InteractableId) -> Option<Vec3>;
}
