use std::sync::Arc;

use crate::ids::ObjectId;
use crate::registry::Interactable;

/// Capability lookup from a world object to its interactable, if any.
pub trait InteractableLookup: Send + Sync {
    fn as_interactable(&self, object: ObjectId) -> Option<Arc<Interactable>>;
}
