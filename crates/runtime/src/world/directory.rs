//! Directory of live interactables.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use interaction_core::{Interactable, InteractableId, InteractableLookup, ObjectId};
use tracing::debug;

use crate::api::{Result, RuntimeError};

#[derive(Default)]
struct DirectoryState {
    by_id: HashMap<InteractableId, Arc<Interactable>>,
    by_object: HashMap<ObjectId, InteractableId>,
}

/// Holds the only strong references to live interactables.
///
/// Despawning removes the strong reference, so every tracker's `Weak` handle
/// stops upgrading and in-flight requests for the id are dropped on arrival.
/// Reads never fail: a poisoned lock reads as "not present".
#[derive(Default)]
pub struct InteractableDirectory {
    state: RwLock<DirectoryState>,
}

impl InteractableDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the interactable of a newly created world object.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::ObjectAlreadySpawned`] if `object` already has
    /// an interactable, or [`RuntimeError::LockPoisoned`].
    pub fn spawn(&self, object: ObjectId, interactable: Interactable) -> Result<Arc<Interactable>> {
        let mut state = self
            .state
            .write()
            .map_err(|_| RuntimeError::LockPoisoned("interactable directory"))?;

        if let Some(&existing) = state.by_object.get(&object) {
            return Err(RuntimeError::ObjectAlreadySpawned { object, existing });
        }

        let id = interactable.id();
        let interactable = Arc::new(interactable);
        state.by_object.insert(object, id);
        state.by_id.insert(id, Arc::clone(&interactable));

        debug!(
            target: "runtime::world",
            object = object.0,
            interactable = %interactable,
            "interactable spawned"
        );

        Ok(interactable)
    }

    /// Removes the interactable owned by `object`.
    ///
    /// Returns the id that was removed, if any.
    pub fn despawn(&self, object: ObjectId) -> Result<Option<InteractableId>> {
        let mut state = self
            .state
            .write()
            .map_err(|_| RuntimeError::LockPoisoned("interactable directory"))?;

        let Some(id) = state.by_object.remove(&object) else {
            return Ok(None);
        };
        state.by_id.remove(&id);

        debug!(
            target: "runtime::world",
            object = object.0,
            interactable = %id,
            "interactable despawned"
        );

        Ok(Some(id))
    }

    pub fn get(&self, id: InteractableId) -> Option<Arc<Interactable>> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.by_id.get(&id).cloned())
    }

    pub fn by_object(&self, object: ObjectId) -> Option<Arc<Interactable>> {
        self.state.read().ok().and_then(|state| {
            let id = state.by_object.get(&object)?;
            state.by_id.get(id).cloned()
        })
    }

    pub fn len(&self) -> usize {
        self.state.read().map(|state| state.by_id.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl InteractableLookup for InteractableDirectory {
    fn as_interactable(&self, object: ObjectId) -> Option<Arc<Interactable>> {
        self.by_object(object)
    }
}
